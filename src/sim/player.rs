//! Player state and discrete moves
//!
//! The player hops one cell at a time. A hop takes the move lock until a
//! deadline on the session clock; requests arriving before the deadline are
//! ignored whether or not their target would be valid.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::lane::LaneTable;
use crate::config::GameConfig;
use crate::grid_round;

/// Hop direction, also the way the player is facing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    #[default]
    Up,
    Down,
    Left,
    Right,
}

impl Facing {
    /// Cell offset `(dx, dz)`; up is toward -z
    pub fn offset(self) -> (i32, i32) {
        match self {
            Facing::Up => (0, -1),
            Facing::Down => (0, 1),
            Facing::Left => (-1, 0),
            Facing::Right => (1, 0),
        }
    }
}

/// The player character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    /// `x` may be fractional after platform drift; `y` is always 0 here
    pub position: Vec3,
    pub facing: Facing,
    /// Session time at which the current hop's lock expires
    move_lock_until: Option<f64>,
    /// Ticks left in which a fresh landing is not checked for water
    grace_ticks: u32,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerState {
    pub fn new() -> Self {
        Self {
            position: Vec3::ZERO,
            facing: Facing::Up,
            move_lock_until: None,
            grace_ticks: 0,
        }
    }

    /// Whether a hop is in flight
    #[inline]
    pub fn is_moving(&self) -> bool {
        self.move_lock_until.is_some()
    }

    /// Mid-hop or just landed; water under the player is not fatal yet
    #[inline]
    pub fn is_settling(&self) -> bool {
        self.is_moving() || self.grace_ticks > 0
    }

    /// Grid cell `(x, z)` the player occupies
    pub fn cell(&self) -> (i32, i32) {
        (grid_round(self.position.x), grid_round(self.position.z))
    }

    /// Release the lock once `now` reaches the deadline. Returns true on release.
    pub fn release_lock(&mut self, now: f64, grace_ticks: u32) -> bool {
        match self.move_lock_until {
            Some(deadline) if now >= deadline => {
                self.move_lock_until = None;
                self.grace_ticks = grace_ticks;
                true
            }
            _ => false,
        }
    }

    /// Count down the landing grace (once per tick, after checks ran)
    pub fn consume_grace(&mut self) {
        self.grace_ticks = self.grace_ticks.saturating_sub(1);
    }

    /// Back to the origin with no hop in flight
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

/// Why a hop was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveRejection {
    /// Target column outside the play area
    OutOfBounds,
    /// Target grass cell holds an obstacle
    Obstacle,
}

/// Outcome of a move request
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MoveResult {
    Moved {
        from: Vec3,
        to: Vec3,
        /// Forward distance `|z|` of the target, for up moves
        forward_distance: Option<u32>,
    },
    Rejected(MoveRejection),
    /// A previous hop still holds the lock
    Locked,
}

impl MoveResult {
    pub fn is_moved(&self) -> bool {
        matches!(self, MoveResult::Moved { .. })
    }
}

/// Validate and perform one hop. Rejected and locked requests change nothing.
pub fn try_move(
    player: &mut PlayerState,
    direction: Facing,
    lanes: &LaneTable,
    config: &GameConfig,
    now: f64,
) -> MoveResult {
    if player.is_moving() {
        return MoveResult::Locked;
    }

    let (dx, dz) = direction.offset();
    let from = player.position;
    let target_x = from.x + dx as f32;
    let target_z = grid_round(from.z) + dz;

    if target_x < config.play_area_min as f32 || target_x > config.play_area_max as f32 {
        return MoveResult::Rejected(MoveRejection::OutOfBounds);
    }

    if lanes
        .lane_at(target_z)
        .is_some_and(|lane| lane.is_blocked(grid_round(target_x)))
    {
        return MoveResult::Rejected(MoveRejection::Obstacle);
    }

    let to = Vec3::new(target_x, from.y, target_z as f32);
    player.position = to;
    player.facing = direction;
    player.move_lock_until = Some(now + config.move_lock_duration());
    player.grace_ticks = 0;

    let forward_distance = (direction == Facing::Up).then_some(target_z.unsigned_abs());

    MoveResult::Moved {
        from,
        to,
        forward_distance,
    }
}
