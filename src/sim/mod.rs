//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (lanes by raw index, cells by x)
//! - No rendering, audio or storage dependencies; effects leave as events

pub mod events;
pub mod lane;
pub mod player;
pub mod score;
pub mod simulator;
pub mod state;
pub mod tick;
pub mod worldgen;

pub use events::{DeathCause, EffectSink, GameEvent, LogSink, SoundEffect};
pub use lane::{
    Collectible, CollectibleKind, Lane, LaneContent, LaneKind, LaneTable, Mover, ObstacleKind,
    TrafficDirection, WaterVariant,
};
pub use player::{Facing, MoveRejection, MoveResult, PlayerState, try_move};
pub use score::{Collection, GameStats, ScoreKeeper};
pub use simulator::{SimEvents, advance_lanes};
pub use state::{GamePhase, GameSession};
pub use tick::{TickInput, step, tick};
pub use worldgen::{generate, generate_world};
