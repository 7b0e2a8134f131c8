//! Per-tick lane simulation
//!
//! Advances every vehicle and platform, then checks the lane under the
//! player. Results come back as [`SimEvents`] for the session to apply; the
//! simulator never touches the player or the score.

use super::lane::{LaneContent, LaneTable};
use super::player::PlayerState;
use super::score::Collection;
use crate::config::GameConfig;
use crate::ground_distance;

/// What happened on the player's lane this tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimEvents {
    /// Overlapped a vehicle
    pub collision: bool,
    /// Platform displacement to carry the player along
    pub drift: Option<f32>,
    /// On water, no platform underneath, not mid-hop
    pub fell_in_water: bool,
    /// Uncollected items within reach, in lane order
    pub collections: Vec<Collection>,
}

impl SimEvents {
    pub fn is_fatal(&self) -> bool {
        self.collision || self.fell_in_water
    }
}

/// Advance all movers by `dt` and evaluate the player's lane
pub fn advance_lanes(
    lanes: &mut LaneTable,
    player: &PlayerState,
    config: &GameConfig,
    dt: f32,
) -> SimEvents {
    let mut events = SimEvents::default();
    let (_, player_z) = player.cell();
    let player_x = player.position.x;

    for lane in lanes.lanes_mut() {
        let z = lane.z;
        let on_lane = z == player_z;
        match &mut lane.content {
            LaneContent::Road(vehicle) => {
                vehicle.advance(dt, config.wrap_x);
                if on_lane && vehicle.overlaps(player_x, config.player_hitbox) {
                    events.collision = true;
                }
            }
            LaneContent::Water { platform, .. } => {
                let delta = platform.advance(dt, config.wrap_x);
                if on_lane {
                    if platform.overlaps(player_x, config.player_hitbox) {
                        events.drift = Some(delta);
                    } else if !player.is_settling() {
                        events.fell_in_water = true;
                    }
                }
            }
            LaneContent::Grass { collectibles, .. } if on_lane => {
                events.collections.extend(
                    collectibles
                        .iter()
                        .filter(|c| !c.collected)
                        .filter(|c| {
                            ground_distance(c.position, player.position) < config.collection_radius
                        })
                        .map(|c| Collection {
                            z,
                            id: c.id.clone(),
                            kind: c.kind,
                            value: c.value,
                        }),
                );
            }
            LaneContent::Grass { .. } => {}
        }
    }

    events
}
