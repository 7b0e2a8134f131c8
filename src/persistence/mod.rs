//! Key-value persistence
//!
//! The game stores three values: the high score (a plain number), the
//! progress ledger and the audio settings (both JSON). Backends:
//! - `MemoryStore`: in-process, for tests and headless runs
//! - `FileStore`: a single JSON file with tmp-then-rename writes (native)
//! - `LocalStorageStore`: browser LocalStorage (wasm)

use std::collections::HashMap;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

#[cfg(not(target_arch = "wasm32"))]
mod file;
#[cfg(target_arch = "wasm32")]
mod local_storage;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStore;
#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorageStore;

/// Storage keys
pub mod keys {
    pub const HIGH_SCORE: &str = "highScore";
    pub const AUDIO_SETTINGS: &str = "audioSettings";
    pub const PROGRESS: &str = "progress";
}

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("stored value is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("stored value for `{key}` is malformed: {value:?}")]
    Malformed { key: String, value: String },
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// String key-value storage backend
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError>;
    fn remove(&mut self, key: &str) -> Result<(), PersistenceError>;
}

/// Read and deserialize a JSON value
pub fn load_json<T: DeserializeOwned>(
    store: &impl KeyValueStore,
    key: &str,
) -> Result<Option<T>, PersistenceError> {
    match store.get(key)? {
        Some(json) => Ok(Some(serde_json::from_str(&json)?)),
        None => Ok(None),
    }
}

/// Serialize and write a JSON value
pub fn save_json<T: Serialize>(
    store: &mut impl KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), PersistenceError> {
    let json = serde_json::to_string(value)?;
    store.set(key, &json)
}

/// Read the stored high score (0 when absent)
pub fn load_high_score(store: &impl KeyValueStore) -> Result<u64, PersistenceError> {
    match store.get(keys::HIGH_SCORE)? {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| PersistenceError::Malformed {
                key: keys::HIGH_SCORE.to_string(),
                value: raw,
            }),
        None => Ok(0),
    }
}

pub fn save_high_score(store: &mut impl KeyValueStore, score: u64) -> Result<(), PersistenceError> {
    store.set(keys::HIGH_SCORE, &score.to_string())
}

/// In-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), PersistenceError> {
        self.values.remove(key);
        Ok(())
    }
}
