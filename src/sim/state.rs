//! Game session and lifecycle
//!
//! A session owns the world, the player and the run's score. Phase changes go
//! through the methods here so that every transition emits its events exactly
//! once.

use serde::{Deserialize, Serialize};

use super::events::{DeathCause, EffectSink, GameEvent, SoundEffect};
use super::lane::LaneTable;
use super::player::{Facing, MoveResult, PlayerState, try_move};
use super::score::{GameStats, ScoreKeeper};
use super::worldgen::generate_world;
use crate::config::GameConfig;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Simulation frozen until resumed
    Paused,
    /// Run ended, waiting for restart
    GameOver,
}

/// Complete state of one play session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSession {
    pub config: GameConfig,
    /// World seed
    pub seed: u64,
    pub phase: GamePhase,
    pub player: PlayerState,
    pub score: ScoreKeeper,
    pub lanes: LaneTable,
    /// Seconds of simulated Playing time (the move lock clock)
    pub clock: f64,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// How the last run ended
    pub death: Option<DeathCause>,
    /// Effects not yet handed to the outside world
    #[serde(skip)]
    events: Vec<GameEvent>,
}

impl GameSession {
    /// Generate a world from `seed` and start playing
    pub fn new(config: GameConfig, seed: u64, high_score: u64) -> Self {
        let lanes = generate_world(&config, seed);
        let mut session = Self::with_lanes(config, lanes, high_score);
        session.seed = seed;
        session
    }

    /// Start playing on a prebuilt world
    pub fn with_lanes(config: GameConfig, lanes: LaneTable, high_score: u64) -> Self {
        Self {
            config,
            seed: 0,
            phase: GamePhase::Playing,
            player: PlayerState::new(),
            score: ScoreKeeper::new(high_score),
            lanes,
            clock: 0.0,
            time_ticks: 0,
            death: None,
            events: Vec::new(),
        }
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    pub fn stats(&self) -> &GameStats {
        &self.score.stats
    }

    pub fn high_score(&self) -> u64 {
        self.score.high_score()
    }

    /// Playing <-> Paused. Returns the phase afterwards.
    pub fn toggle_pause(&mut self) -> GamePhase {
        self.phase = match self.phase {
            GamePhase::Playing => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Playing,
            GamePhase::GameOver => GamePhase::GameOver,
        };
        log::debug!("Phase is now {:?}", self.phase);
        self.phase
    }

    /// New run on the same world layout. Allowed from GameOver or Paused.
    pub fn restart(&mut self) -> bool {
        if self.phase == GamePhase::Playing {
            return false;
        }
        self.player.reset();
        self.score.reset();
        self.lanes.reset_collectibles();
        self.death = None;
        self.phase = GamePhase::Playing;
        log::info!("Run restarted (seed {})", self.seed);
        true
    }

    /// Enter GameOver. Signals after the first are ignored.
    pub fn end_run(&mut self, cause: DeathCause) -> bool {
        if self.phase != GamePhase::Playing {
            return false;
        }
        self.phase = GamePhase::GameOver;
        self.death = Some(cause);
        let score = self.score.stats.score;
        log::info!(
            "Game over ({:?}) at z={} with score {}",
            cause,
            self.player.cell().1,
            score
        );
        self.events.push(GameEvent::PlaySound(cause.sound()));
        self.events.push(GameEvent::GameOver { cause, score });
        true
    }

    /// Request a hop. `None` when not playing.
    pub fn move_player(&mut self, direction: Facing) -> Option<MoveResult> {
        if !self.is_playing() {
            return None;
        }
        let result = try_move(
            &mut self.player,
            direction,
            &self.lanes,
            &self.config,
            self.clock,
        );
        match result {
            MoveResult::Moved {
                to,
                forward_distance,
                ..
            } => {
                log::debug!("Hop {:?} to ({}, {})", direction, to.x, to.z);
                self.events.push(GameEvent::PlaySound(SoundEffect::Jump));
                if let Some(distance) = forward_distance {
                    let multiplier = self.config.score_multiplier;
                    if self.score.record_distance(distance, multiplier) {
                        self.note_score_change();
                    }
                }
            }
            MoveResult::Rejected(reason) => {
                log::debug!("Hop {:?} rejected: {:?}", direction, reason);
            }
            MoveResult::Locked => {}
        }
        Some(result)
    }

    /// Emit a high score event if the run just beat the stored best
    pub(crate) fn note_score_change(&mut self) {
        if let Some(best) = self.score.check_high_score() {
            self.events.push(GameEvent::NewHighScore(best));
        }
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Hand all pending events to a sink
    pub fn flush_events(&mut self, sink: &mut impl EffectSink) {
        for event in self.events.drain(..) {
            sink.emit(&event);
        }
    }
}
