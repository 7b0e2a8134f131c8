//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input events (raw keys to abstract commands)
//! - Wall-clock time for leaderboard timestamps

pub mod input;

pub use input::{Command, command_for_key};

/// Milliseconds since the Unix epoch
#[cfg(target_arch = "wasm32")]
pub fn timestamp_ms() -> f64 {
    js_sys::Date::now()
}

/// Milliseconds since the Unix epoch
#[cfg(not(target_arch = "wasm32"))]
pub fn timestamp_ms() -> f64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or(0.0)
}
