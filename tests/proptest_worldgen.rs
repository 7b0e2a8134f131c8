//! Property tests for world generation.
//!
//! Every seed must yield a world that is safe to start in and internally
//! consistent, and the same seed must always yield the same world.

use std::collections::BTreeSet;

use lane_crosser::GameConfig;
use lane_crosser::sim::{LaneContent, LaneKind, ObstacleKind, generate, generate_world};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_pcg::Pcg32;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn start_cell_is_safe(seed in any::<u64>()) {
        let config = GameConfig::default();
        let lanes = generate_world(&config, seed);

        let start = lanes.lane_at(0).expect("start lane exists");
        prop_assert_eq!(start.kind(), LaneKind::Grass);
        prop_assert!(!start.is_blocked(0));
        prop_assert!(start.collectibles().iter().all(|c| c.x() != 0));

        // The backfill behind the start line is all grass
        for lane in lanes.lanes().iter().filter(|l| l.raw_index <= 0) {
            prop_assert_eq!(lane.kind(), LaneKind::Grass);
        }
    }

    #[test]
    fn obstacles_and_collectibles_are_disjoint(seed in any::<u64>()) {
        let config = GameConfig::default();
        let lanes = generate_world(&config, seed);

        for lane in lanes.lanes() {
            let LaneContent::Grass { obstacles, collectibles } = &lane.content else {
                continue;
            };
            let mut seen = BTreeSet::new();
            for c in collectibles {
                prop_assert!(!obstacles.contains_key(&c.x()), "overlap at {}", c.id);
                prop_assert!(seen.insert(c.x()), "duplicate collectible {}", c.id);
                prop_assert_eq!(&c.id, &format!("{}-{}", lane.z, c.x()));
                prop_assert!(!c.collected);
            }
        }
    }

    #[test]
    fn placement_respects_play_band(seed in any::<u64>()) {
        let config = GameConfig::default();
        let lanes = generate_world(&config, seed);
        let all = lanes.lanes();

        for (i, lane) in all.iter().enumerate() {
            let LaneContent::Grass { obstacles, collectibles } = &lane.content else {
                continue;
            };
            let near_road = [i.checked_sub(1), Some(i + 1)]
                .into_iter()
                .flatten()
                .filter_map(|j| all.get(j))
                .any(|l| l.kind() == LaneKind::Road);

            for (&x, &kind) in obstacles {
                prop_assert!(x >= config.grass_x_min && x <= config.grass_x_max);
                if !config.in_play_area(x) {
                    prop_assert_eq!(kind, ObstacleKind::Tree);
                }
                if kind == ObstacleKind::TrafficLight {
                    prop_assert!(near_road);
                    prop_assert!(config.in_play_area(x));
                }
            }
            for c in collectibles {
                prop_assert!(config.in_play_area(c.x()));
                prop_assert!(lane.raw_index > config.coin_free_lanes);
            }
        }
    }

    #[test]
    fn movers_within_ranges(seed in any::<u64>()) {
        let config = GameConfig::default();
        let lanes = generate_world(&config, seed);

        for lane in lanes.lanes() {
            match &lane.content {
                LaneContent::Road(vehicle) => {
                    prop_assert!(vehicle.speed >= config.vehicle_speed_min);
                    prop_assert!(vehicle.speed <= config.vehicle_speed_max);
                    prop_assert_eq!(vehicle.width, config.vehicle_width);
                    prop_assert_eq!(vehicle.offset, 0.0);
                }
                LaneContent::Water { platform, .. } => {
                    prop_assert!(platform.speed >= config.vehicle_speed_min);
                    prop_assert!(platform.speed <= config.vehicle_speed_max);
                    prop_assert!(platform.width >= config.log_width_min);
                    prop_assert!(platform.width <= config.log_width_max);
                }
                LaneContent::Grass { .. } => {}
            }
        }
    }

    #[test]
    fn same_seed_same_world(seed in any::<u64>()) {
        let config = GameConfig::default();
        prop_assert_eq!(generate_world(&config, seed), generate_world(&config, seed));
    }

    #[test]
    fn one_lane_per_index(start in -60i32..20, len in 1i32..40, seed in any::<u64>()) {
        let config = GameConfig::default();
        let mut rng = Pcg32::seed_from_u64(seed);
        let lanes = generate(&config, start, start + len, &mut rng);

        prop_assert_eq!(lanes.len(), len as usize);
        for (lane, raw_index) in lanes.lanes().iter().zip(start..start + len) {
            prop_assert_eq!(lane.raw_index, raw_index);
            prop_assert_eq!(lane.z, -raw_index);
        }
    }
}

#[test]
fn empty_span_is_empty() {
    let config = GameConfig::default();
    let mut rng = Pcg32::seed_from_u64(7);
    assert!(generate(&config, 5, 5, &mut rng).is_empty());
    assert!(generate(&config, 5, 1, &mut rng).is_empty());
}

#[test]
fn different_seeds_usually_differ() {
    let config = GameConfig::default();
    let a = generate_world(&config, 1);
    let b = generate_world(&config, 2);
    assert_ne!(a, b);
}
