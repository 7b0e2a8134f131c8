//! Procedural world generation
//!
//! Builds the lane table for a span of raw indices from a seeded RNG. Draws
//! are consumed in a fixed order so a seed always yields the same world:
//! 1. one kind draw per lane (lanes at or behind the start line draw nothing),
//! 2. per lane, in index order: grass cells from `grass_x_min` to `grass_x_max`,
//!    or speed, direction, width and variant for road/water.

use std::collections::BTreeMap;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::lane::{
    Collectible, CollectibleKind, Lane, LaneContent, LaneKind, LaneTable, Mover, ObstacleKind,
    TrafficDirection, WaterVariant,
};
use crate::config::GameConfig;

/// Generate the default world span for a seed
pub fn generate_world(config: &GameConfig, seed: u64) -> LaneTable {
    let mut rng = Pcg32::seed_from_u64(seed);
    let table = generate(config, config.world_start, config.world_end, &mut rng);
    log::info!(
        "Generated {} lanes (seed {}, remaining collectibles {})",
        table.len(),
        seed,
        table.remaining_collectibles()
    );
    table
}

/// Generate one lane per raw index in `[span_start, span_end)`, lane `z = -index`
pub fn generate<R: Rng + ?Sized>(
    config: &GameConfig,
    span_start: i32,
    span_end: i32,
    rng: &mut R,
) -> LaneTable {
    if span_start >= span_end {
        return LaneTable::default();
    }

    let kinds: Vec<(i32, LaneKind)> = (span_start..span_end)
        .map(|raw_index| (raw_index, pick_lane_kind(config, raw_index, rng)))
        .collect();

    let mut lanes = Vec::with_capacity(kinds.len());
    for (i, &(raw_index, kind)) in kinds.iter().enumerate() {
        let is_road = |k: Option<&(i32, LaneKind)>| matches!(k, Some((_, LaneKind::Road)));
        let adjacent_to_road =
            is_road(i.checked_sub(1).and_then(|p| kinds.get(p))) || is_road(kinds.get(i + 1));

        let lane = match kind {
            LaneKind::Grass => populate_grass(config, raw_index, adjacent_to_road, rng),
            LaneKind::Road => {
                let (speed, direction) = draw_motion(config, rng);
                Lane::road(raw_index, Mover::new(speed, direction, config.vehicle_width))
            }
            LaneKind::Water => {
                let (speed, direction) = draw_motion(config, rng);
                let width = uniform(rng, config.log_width_min, config.log_width_max);
                let variant = if rng.random::<f64>() < config.stone_chance {
                    WaterVariant::Stone
                } else {
                    WaterVariant::Log
                };
                Lane::water(raw_index, Mover::new(speed, direction, width), variant)
            }
        };
        lanes.push(lane);
    }

    LaneTable::new(lanes)
}

/// Lanes at or behind the start line are always grass
fn pick_lane_kind<R: Rng + ?Sized>(config: &GameConfig, raw_index: i32, rng: &mut R) -> LaneKind {
    if raw_index <= 0 {
        return LaneKind::Grass;
    }
    let p = &config.lane_probabilities;
    let r = rng.random::<f64>();
    if r < p.grass {
        LaneKind::Grass
    } else if r < p.grass + p.road {
        LaneKind::Road
    } else {
        LaneKind::Water
    }
}

fn populate_grass<R: Rng + ?Sized>(
    config: &GameConfig,
    raw_index: i32,
    adjacent_to_road: bool,
    rng: &mut R,
) -> Lane {
    let z = -raw_index;
    let density = if raw_index < config.obstacle_density.late_game_index {
        config.obstacle_density.early_game
    } else {
        config.obstacle_density.late_game
    };

    let mut obstacles = BTreeMap::new();
    let mut collectibles = Vec::new();

    for x in config.grass_x_min..=config.grass_x_max {
        // Keep the spawn cell clear
        if raw_index == 0 && x == 0 {
            continue;
        }
        let in_play_area = config.in_play_area(x);

        if adjacent_to_road
            && in_play_area
            && rng.random::<f64>() > config.obstacle_density.traffic_light
        {
            obstacles.insert(x, ObstacleKind::TrafficLight);
            continue;
        }

        if in_play_area {
            if raw_index > config.coin_free_lanes
                && rng.random::<f64>() < config.coin_spawn_chance
            {
                let (kind, value) = if rng.random::<f64>() < config.gem_spawn_chance {
                    (CollectibleKind::Gem, config.gem_value)
                } else {
                    (CollectibleKind::Coin, config.coin_value)
                };
                collectibles.push(Collectible::new(z, x, kind, value));
            } else if rng.random::<f64>() > density {
                let kind = if rng.random::<f64>() > 0.5 {
                    ObstacleKind::Tree
                } else {
                    ObstacleKind::Rock
                };
                obstacles.insert(x, kind);
            }
        } else if rng.random::<f64>() > config.obstacle_density.outside_play {
            obstacles.insert(x, ObstacleKind::Tree);
        }
    }

    Lane {
        z,
        raw_index,
        content: LaneContent::Grass {
            obstacles,
            collectibles,
        },
    }
}

fn draw_motion<R: Rng + ?Sized>(config: &GameConfig, rng: &mut R) -> (f32, TrafficDirection) {
    let speed = uniform(rng, config.vehicle_speed_min, config.vehicle_speed_max);
    let direction = if rng.random::<f64>() > 0.5 {
        TrafficDirection::Right
    } else {
        TrafficDirection::Left
    };
    (speed, direction)
}

/// Uniform in `[min, max)`; a degenerate range still consumes one draw
fn uniform<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    (rng.random::<f64>() * (max - min) as f64 + min as f64) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_lane_is_safe() {
        let config = GameConfig::default();
        for seed in 0..20 {
            let table = generate_world(&config, seed);
            let start = table.lane_at(0).unwrap();
            assert_eq!(start.kind(), LaneKind::Grass);
            assert!(!start.is_blocked(0));
            assert!(start.collectibles().iter().all(|c| c.x() != 0));
        }
    }

    #[test]
    fn test_span_maps_to_negative_z() {
        let config = GameConfig::default();
        let mut rng = Pcg32::seed_from_u64(7);
        let table = generate(&config, -3, 5, &mut rng);
        assert_eq!(table.len(), 8);
        let zs: Vec<i32> = table.lanes().iter().map(|l| l.z).collect();
        assert_eq!(zs, vec![3, 2, 1, 0, -1, -2, -3, -4]);
        // Backfill behind the start is grass
        for z in 0..=3 {
            assert_eq!(table.lane_at(z).unwrap().kind(), LaneKind::Grass);
        }
    }

    #[test]
    fn test_empty_span() {
        let config = GameConfig::default();
        let mut rng = Pcg32::seed_from_u64(1);
        assert!(generate(&config, 5, 5, &mut rng).is_empty());
    }

    #[test]
    fn test_same_seed_same_world() {
        let config = GameConfig::default();
        assert_eq!(generate_world(&config, 42), generate_world(&config, 42));
        assert_ne!(generate_world(&config, 42), generate_world(&config, 43));
    }

    #[test]
    fn test_no_collectibles_in_starting_stretch() {
        let config = GameConfig::default();
        let table = generate_world(&config, 3);
        for lane in table.lanes().iter().filter(|l| l.raw_index <= config.coin_free_lanes) {
            assert!(lane.collectibles().is_empty());
        }
    }

    #[test]
    fn test_outside_play_area_only_trees() {
        let config = GameConfig::default();
        let table = generate_world(&config, 11);
        for lane in table.lanes() {
            if let LaneContent::Grass {
                obstacles,
                collectibles,
            } = &lane.content
            {
                for (&x, &kind) in obstacles {
                    if !config.in_play_area(x) {
                        assert_eq!(kind, ObstacleKind::Tree);
                    }
                }
                assert!(collectibles.iter().all(|c| config.in_play_area(c.x())));
            }
        }
    }

    #[test]
    fn test_traffic_lights_only_next_to_roads() {
        let config = GameConfig::default();
        let table = generate_world(&config, 5);
        for lane in table.lanes() {
            let has_light = matches!(
                &lane.content,
                LaneContent::Grass { obstacles, .. }
                    if obstacles.values().any(|k| *k == ObstacleKind::TrafficLight)
            );
            if has_light {
                let near_road = [lane.z - 1, lane.z + 1].iter().any(|&z| {
                    table
                        .lane_at(z)
                        .is_some_and(|l| l.kind() == LaneKind::Road)
                });
                assert!(near_road, "traffic light at z={} without road", lane.z);
            }
        }
    }

    #[test]
    fn test_mover_parameters_in_range() {
        let config = GameConfig::default();
        let table = generate_world(&config, 9);
        for lane in table.lanes() {
            match &lane.content {
                LaneContent::Road(v) => {
                    assert!(v.speed >= 2.0 && v.speed < 6.0);
                    assert_eq!(v.width, 2.0);
                    assert_eq!(v.offset, 0.0);
                }
                LaneContent::Water { platform, .. } => {
                    assert!(platform.speed >= 2.0 && platform.speed < 6.0);
                    assert!(platform.width >= 2.0 && platform.width < 4.0);
                }
                LaneContent::Grass { .. } => {}
            }
        }
    }

    #[test]
    fn test_collectible_values_match_kind() {
        let config = GameConfig::default();
        let table = generate_world(&config, 21);
        let all: Vec<_> = table.lanes().iter().flat_map(|l| l.collectibles()).collect();
        assert!(!all.is_empty());
        for c in all {
            match c.kind {
                CollectibleKind::Coin => assert_eq!(c.value, 10),
                CollectibleKind::Gem => assert_eq!(c.value, 50),
            }
        }
    }

    #[test]
    fn test_all_grass_config() {
        let mut config = GameConfig::default();
        config.lane_probabilities.grass = 1.0;
        config.lane_probabilities.road = 0.0;
        config.lane_probabilities.water = 0.0;
        let table = generate_world(&config, 2);
        assert!(table.lanes().iter().all(|l| l.kind() == LaneKind::Grass));
        // No roads means no traffic lights anywhere
        for lane in table.lanes() {
            for x in config.play_area_min..=config.play_area_max {
                assert_ne!(lane.obstacle_at(x), Some(ObstacleKind::TrafficLight));
            }
        }
    }
}
