//! High score and lifetime progress
//!
//! Persisted as JSON under `keys::PROGRESS`, tracks lifetime totals and the
//! top 10 runs. The bare high score number is stored separately under
//! `keys::HIGH_SCORE` so it can be written the moment a run beats it.

use serde::{Deserialize, Serialize};

use crate::persistence::{KeyValueStore, PersistenceError, keys, load_json, save_json};
use crate::sim::GameStats;

/// Maximum number of runs to keep on the leaderboard
pub const MAX_HIGH_SCORES: usize = 10;

/// A single finished run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HighScoreEntry {
    pub score: u64,
    pub coins: u64,
    pub distance: u32,
    /// Unix timestamp (ms) when achieved
    pub timestamp: f64,
}

/// Lifetime totals plus the leaderboard
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameProgress {
    pub high_score: u64,
    pub total_coins: u64,
    pub total_distance: u64,
    pub total_games: u32,
    /// Sorted descending by score
    pub top_scores: Vec<HighScoreEntry>,
}

impl GameProgress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u64) -> bool {
        if score == 0 {
            return false;
        }
        if self.top_scores.len() < MAX_HIGH_SCORES {
            return true;
        }
        // Check if score beats the lowest entry
        self.top_scores.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Get the rank a score would achieve (1-indexed, None if doesn't qualify)
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.top_scores.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.top_scores.len()) + 1)
    }

    /// Fold a finished run into the totals and leaderboard.
    /// Returns the leaderboard rank achieved (1-indexed), if any.
    pub fn record_run(&mut self, stats: &GameStats, timestamp: f64) -> Option<usize> {
        self.total_games += 1;
        self.total_coins += stats.coins;
        self.total_distance += stats.distance as u64;
        self.high_score = self.high_score.max(stats.score);

        if !self.qualifies(stats.score) {
            return None;
        }

        let entry = HighScoreEntry {
            score: stats.score,
            coins: stats.coins,
            distance: stats.distance,
            timestamp,
        };

        // Find insertion point (sorted descending by score)
        let pos = self.top_scores.iter().position(|e| stats.score > e.score);
        let rank = match pos {
            Some(i) => {
                self.top_scores.insert(i, entry);
                i + 1
            }
            None => {
                self.top_scores.push(entry);
                self.top_scores.len()
            }
        };

        // Trim to max size
        self.top_scores.truncate(MAX_HIGH_SCORES);

        Some(rank)
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.top_scores.first().map(|e| e.score)
    }

    /// Load from storage, starting fresh when absent
    pub fn load(store: &impl KeyValueStore) -> Result<Self, PersistenceError> {
        let progress = load_json::<Self>(store, keys::PROGRESS)?;
        match progress {
            Some(progress) => {
                log::info!(
                    "Loaded progress: {} games, {} leaderboard entries",
                    progress.total_games,
                    progress.top_scores.len()
                );
                Ok(progress)
            }
            None => {
                log::info!("No progress found, starting fresh");
                Ok(Self::new())
            }
        }
    }

    pub fn save(&self, store: &mut impl KeyValueStore) -> Result<(), PersistenceError> {
        save_json(store, keys::PROGRESS, self)?;
        log::info!("Progress saved ({} entries)", self.top_scores.len());
        Ok(())
    }
}
