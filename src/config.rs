//! Data-driven game tuning
//!
//! Every probability, speed and bound the simulation reads comes from here.
//! Defaults mirror `crate::consts`; a JSON document may override any subset.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised while loading or validating a [`GameConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config value `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Lane kind probabilities
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaneProbabilities {
    pub grass: f64,
    pub road: f64,
    pub water: f64,
}

impl Default for LaneProbabilities {
    fn default() -> Self {
        Self {
            grass: P_GRASS,
            road: P_ROAD,
            water: P_WATER,
        }
    }
}

/// Obstacle draw thresholds. An obstacle spawns when a uniform draw exceeds the value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObstacleDensity {
    pub early_game: f64,
    pub late_game: f64,
    pub outside_play: f64,
    /// Raw index from which `late_game` applies
    pub late_game_index: i32,
    pub traffic_light: f64,
}

impl Default for ObstacleDensity {
    fn default() -> Self {
        Self {
            early_game: DENSITY_EARLY,
            late_game: DENSITY_LATE,
            outside_play: DENSITY_OUTSIDE_PLAY,
            late_game_index: LATE_GAME_INDEX,
            traffic_light: TRAFFIC_LIGHT_THRESHOLD,
        }
    }
}

/// Complete tuning set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === World ===
    pub world_start: i32,
    pub world_end: i32,
    pub play_area_min: i32,
    pub play_area_max: i32,
    pub grass_x_min: i32,
    pub grass_x_max: i32,
    pub lane_probabilities: LaneProbabilities,
    pub obstacle_density: ObstacleDensity,

    // === Collectibles ===
    pub coin_spawn_chance: f64,
    pub gem_spawn_chance: f64,
    pub coin_free_lanes: i32,
    pub coin_value: u64,
    pub gem_value: u64,
    pub collection_radius: f32,

    // === Movers ===
    pub vehicle_speed_min: f32,
    pub vehicle_speed_max: f32,
    pub vehicle_width: f32,
    pub log_width_min: f32,
    pub log_width_max: f32,
    pub stone_chance: f64,
    pub wrap_x: f32,
    pub player_hitbox: f32,

    // === Player ===
    pub move_duration: f32,
    pub move_slack: f32,
    pub landing_grace_ticks: u32,
    pub score_multiplier: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            world_start: WORLD_START,
            world_end: WORLD_END,
            play_area_min: PLAY_AREA_MIN,
            play_area_max: PLAY_AREA_MAX,
            grass_x_min: GRASS_X_MIN,
            grass_x_max: GRASS_X_MAX,
            lane_probabilities: LaneProbabilities::default(),
            obstacle_density: ObstacleDensity::default(),

            coin_spawn_chance: COIN_SPAWN_CHANCE,
            gem_spawn_chance: GEM_SPAWN_CHANCE,
            coin_free_lanes: COIN_FREE_LANES,
            coin_value: COIN_VALUE,
            gem_value: GEM_VALUE,
            collection_radius: COLLECTION_RADIUS,

            vehicle_speed_min: VEHICLE_SPEED_MIN,
            vehicle_speed_max: VEHICLE_SPEED_MAX,
            vehicle_width: VEHICLE_WIDTH,
            log_width_min: LOG_WIDTH_MIN,
            log_width_max: LOG_WIDTH_MAX,
            stone_chance: STONE_CHANCE,
            wrap_x: LANE_WRAP_X,
            player_hitbox: PLAYER_HITBOX,

            move_duration: CHICKEN_SPEED,
            move_slack: MOVE_SETTLE_SLACK,
            landing_grace_ticks: LANDING_GRACE_TICKS,
            score_multiplier: SCORE_MULTIPLIER,
        }
    }
}

impl GameConfig {
    /// Parse a (possibly partial) JSON document and validate it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a JSON file on disk
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_file(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Total lock time for one hop
    pub fn move_lock_duration(&self) -> f64 {
        (self.move_duration + self.move_slack) as f64
    }

    /// Whether a column is inside the player's band
    pub fn in_play_area(&self, x: i32) -> bool {
        x >= self.play_area_min && x <= self.play_area_max
    }

    /// Check cross-field constraints
    pub fn validate(&self) -> Result<(), ConfigError> {
        let p = &self.lane_probabilities;
        let total = p.grass + p.road + p.water;
        if (total - 1.0).abs() > 1e-6 || p.grass < 0.0 || p.road < 0.0 || p.water < 0.0 {
            return Err(invalid(
                "lane_probabilities",
                format!("must be non-negative and sum to 1, got {total}"),
            ));
        }
        if self.world_start >= self.world_end {
            return Err(invalid(
                "world_start",
                format!("{} is not below world_end {}", self.world_start, self.world_end),
            ));
        }
        if self.play_area_min > self.play_area_max {
            return Err(invalid(
                "play_area_min",
                format!("{} exceeds play_area_max {}", self.play_area_min, self.play_area_max),
            ));
        }
        if self.grass_x_min > self.grass_x_max {
            return Err(invalid("grass_x_min", "exceeds grass_x_max".to_string()));
        }
        if self.vehicle_speed_min > self.vehicle_speed_max {
            return Err(invalid("vehicle_speed_min", "exceeds vehicle_speed_max".to_string()));
        }
        if self.log_width_min > self.log_width_max {
            return Err(invalid("log_width_min", "exceeds log_width_max".to_string()));
        }
        if self.move_duration <= 0.0 {
            return Err(invalid("move_duration", "must be positive".to_string()));
        }
        if self.wrap_x <= 0.0 {
            return Err(invalid("wrap_x", "must be positive".to_string()));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: String) -> ConfigError {
    ConfigError::Invalid { field, reason }
}
