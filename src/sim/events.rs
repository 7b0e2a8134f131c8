//! Effects emitted by the core
//!
//! The simulation never talks to audio, storage or rendering directly. It
//! queues [`GameEvent`]s and the caller forwards them over an [`EffectSink`].

use serde::{Deserialize, Serialize};

use super::lane::CollectibleKind;
use crate::settings::AudioSettings;

/// Named sound effects understood by the audio collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundEffect {
    /// Accepted hop
    Jump,
    /// Coin picked up
    Coin,
    /// Gem picked up
    Gem,
    /// Hit by a vehicle (or any non-water death)
    Crash,
    /// Fell into water
    Splash,
}

impl SoundEffect {
    pub fn name(self) -> &'static str {
        match self {
            SoundEffect::Jump => "jump",
            SoundEffect::Coin => "coin",
            SoundEffect::Gem => "gem",
            SoundEffect::Crash => "crash",
            SoundEffect::Splash => "splash",
        }
    }

    pub fn for_collectible(kind: CollectibleKind) -> Self {
        match kind {
            CollectibleKind::Coin => SoundEffect::Coin,
            CollectibleKind::Gem => SoundEffect::Gem,
        }
    }
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    /// Overlapped a vehicle
    Vehicle,
    /// Standing on water with nothing underneath
    Drowned,
}

impl DeathCause {
    pub fn sound(self) -> SoundEffect {
        match self {
            DeathCause::Vehicle => SoundEffect::Crash,
            DeathCause::Drowned => SoundEffect::Splash,
        }
    }
}

/// Something the outside world may want to react to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    PlaySound(SoundEffect),
    CoinCollected {
        id: String,
        kind: CollectibleKind,
        value: u64,
    },
    GameOver {
        cause: DeathCause,
        score: u64,
    },
    /// Score exceeded the stored high score; persist the new value
    NewHighScore(u64),
}

/// Receiver for core effects. Implementations must not block.
pub trait EffectSink {
    fn emit(&mut self, event: &GameEvent);

    /// Audio preferences changed (mute toggle or volume)
    fn settings_changed(&mut self, _settings: &AudioSettings) {}
}

/// Collects events in memory (useful for tests and replays)
impl EffectSink for Vec<GameEvent> {
    fn emit(&mut self, event: &GameEvent) {
        self.push(event.clone());
    }
}

/// Logs every event at debug level
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl EffectSink for LogSink {
    fn emit(&mut self, event: &GameEvent) {
        log::debug!("event: {:?}", event);
    }
}
