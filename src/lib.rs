//! Lane Crosser - An endless lane-crossing arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (world generation, lane ticking, moves, game state)
//! - `runner`: Fixed-timestep frame driver that routes events to collaborators
//! - `persistence`: Key-value storage for high score, progress and settings
//! - `platform`: Input mapping from raw keys to abstract commands
//! - `config`: Data-driven game tuning
//! - `highscores` / `settings`: Persisted progress and audio preferences
//! - `audio`: Procedural Web Audio sound effects
//! - `camera`: Follow camera for renderers

pub mod audio;
pub mod camera;
pub mod config;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod runner;
pub mod settings;
pub mod sim;

pub use config::{ConfigError, GameConfig};
pub use highscores::{GameProgress, HighScoreEntry};
pub use runner::GameRunner;
pub use settings::AudioSettings;

use glam::Vec3;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one tick per display frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Duration of one animated hop between cells (seconds)
    pub const CHICKEN_SPEED: f32 = 0.15;
    /// Extra lock time after the hop so the landing settles (seconds)
    pub const MOVE_SETTLE_SLACK: f32 = 0.05;
    /// Ticks after landing during which the water fall check is skipped
    pub const LANDING_GRACE_TICKS: u32 = 1;

    /// Generated span, as raw lane indices `[WORLD_START, WORLD_END)`
    pub const WORLD_START: i32 = -50;
    pub const WORLD_END: i32 = 300;
    /// Lanes further than this from the player are not handed to the renderer
    pub const RENDER_DISTANCE: i32 = 70;

    /// Columns the player may occupy
    pub const PLAY_AREA_MIN: i32 = -9;
    pub const PLAY_AREA_MAX: i32 = 9;
    /// Columns populated with scenery during generation
    pub const GRASS_X_MIN: i32 = -50;
    pub const GRASS_X_MAX: i32 = 50;

    /// Lane kind probabilities (must sum to 1)
    pub const P_GRASS: f64 = 0.4;
    pub const P_ROAD: f64 = 0.3;
    pub const P_WATER: f64 = 0.3;

    /// Obstacle draw thresholds (an obstacle spawns when a draw exceeds these)
    pub const DENSITY_EARLY: f64 = 0.9; // First 50 lanes (10% spawn chance)
    pub const DENSITY_LATE: f64 = 0.98; // After 50 lanes (2% spawn chance)
    pub const DENSITY_OUTSIDE_PLAY: f64 = 0.85; // Outside play area (15% spawn chance)
    pub const LATE_GAME_INDEX: i32 = 50;
    /// Traffic lights spawn next to roads when a draw exceeds this
    pub const TRAFFIC_LIGHT_THRESHOLD: f64 = 0.95;

    /// Collectibles
    pub const COIN_SPAWN_CHANCE: f64 = 0.15;
    pub const GEM_SPAWN_CHANCE: f64 = 0.2;
    pub const COIN_FREE_LANES: i32 = 10; // No collectibles at or before this raw index
    pub const COIN_VALUE: u64 = 10;
    pub const GEM_VALUE: u64 = 50;
    pub const COLLECTION_RADIUS: f32 = 0.5;

    /// Vehicles and platforms
    pub const VEHICLE_SPEED_MIN: f32 = 2.0;
    pub const VEHICLE_SPEED_MAX: f32 = 6.0;
    pub const VEHICLE_WIDTH: f32 = 2.0;
    pub const LOG_WIDTH_MIN: f32 = 2.0;
    pub const LOG_WIDTH_MAX: f32 = 4.0;
    pub const STONE_CHANCE: f64 = 0.3;
    /// Movers wrap around at +/- this x
    pub const LANE_WRAP_X: f32 = 25.0;
    /// Player hitbox radius added to a mover's half width
    pub const PLAYER_HITBOX: f32 = 0.4;

    /// Score = max distance * multiplier (plus collected value)
    pub const SCORE_MULTIPLIER: u64 = 10;

    /// Camera follow
    pub const CAMERA_FOLLOW_SPEED: f32 = 0.1;
    pub const CAMERA_OFFSET_Z: f32 = 10.0;
    pub const CAMERA_POSITION_X: f32 = 20.0;
    pub const CAMERA_LEAD_Z: f32 = 20.0;
}

/// Round a world coordinate to its grid cell (halves round toward +inf)
#[inline]
pub fn grid_round(v: f32) -> i32 {
    (v + 0.5).floor() as i32
}

/// Distance between two points projected onto the ground (x-z) plane
#[inline]
pub fn ground_distance(a: Vec3, b: Vec3) -> f32 {
    let dx = a.x - b.x;
    let dz = a.z - b.z;
    (dx * dx + dz * dz).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_round() {
        assert_eq!(grid_round(0.0), 0);
        assert_eq!(grid_round(0.49), 0);
        assert_eq!(grid_round(0.5), 1);
        assert_eq!(grid_round(-0.5), 0);
        assert_eq!(grid_round(-0.51), -1);
        assert_eq!(grid_round(-3.0), -3);
    }

    #[test]
    fn test_ground_distance_ignores_height() {
        let a = Vec3::new(0.0, 5.0, 0.0);
        let b = Vec3::new(3.0, 0.0, -4.0);
        assert!((ground_distance(a, b) - 5.0).abs() < 1e-6);
    }
}
