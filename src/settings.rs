//! Audio settings and preferences
//!
//! Persisted separately from progress under `keys::AUDIO_SETTINGS`.

use serde::{Deserialize, Serialize};

use crate::persistence::{KeyValueStore, PersistenceError, keys, load_json, save_json};
use crate::sim::SoundEffect;

/// Default master volume
pub const DEFAULT_MASTER_VOLUME: f32 = 0.7;

/// Audio preferences
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AudioSettings {
    pub muted: bool,
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            muted: false,
            master_volume: DEFAULT_MASTER_VOLUME,
        }
    }
}

impl AudioSettings {
    /// Base mix level of each effect before the master volume
    pub fn base_volume(effect: SoundEffect) -> f32 {
        match effect {
            SoundEffect::Jump => 0.6,
            SoundEffect::Coin => 0.5,
            SoundEffect::Gem => 0.8,
            SoundEffect::Crash => 1.0,
            SoundEffect::Splash => 0.9,
        }
    }

    /// Playback volume for an effect (0 when muted)
    pub fn effective_volume(&self, effect: SoundEffect) -> f32 {
        if self.muted {
            0.0
        } else {
            Self::base_volume(effect) * self.master_volume
        }
    }

    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    /// Set master volume (clamped to 0.0 - 1.0)
    pub fn set_master_volume(&mut self, volume: f32) {
        self.master_volume = volume.clamp(0.0, 1.0);
    }

    /// Load settings from storage; missing or unreadable settings fall back to defaults
    pub fn load(store: &impl KeyValueStore) -> Self {
        match load_json::<Self>(store, keys::AUDIO_SETTINGS) {
            Ok(Some(mut settings)) => {
                settings.set_master_volume(settings.master_volume);
                log::info!("Loaded audio settings");
                settings
            }
            Ok(None) => {
                log::info!("Using default audio settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Ignoring unreadable audio settings: {}", e);
                Self::default()
            }
        }
    }

    pub fn save(&self, store: &mut impl KeyValueStore) -> Result<(), PersistenceError> {
        save_json(store, keys::AUDIO_SETTINGS, self)?;
        log::info!("Audio settings saved");
        Ok(())
    }
}
