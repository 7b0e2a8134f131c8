//! Score, distance and collection bookkeeping

use serde::{Deserialize, Serialize};

use super::lane::{CollectibleKind, LaneTable};

/// Per-run statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStats {
    /// Never decreases within a run
    pub score: u64,
    /// Sum of collected values
    pub coins: u64,
    /// Furthest `|z|` reached
    pub distance: u32,
    /// Reserved for combo scoring
    pub max_combo: u32,
}

/// A collectible picked up during a tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collection {
    /// Lane the collectible sits on
    pub z: i32,
    pub id: String,
    pub kind: CollectibleKind,
    pub value: u64,
}

/// Owns the run's stats and the best score seen so far
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreKeeper {
    pub stats: GameStats,
    high_score: u64,
}

impl ScoreKeeper {
    /// Start a run against a previously stored high score
    pub fn new(high_score: u64) -> Self {
        Self {
            stats: GameStats::default(),
            high_score,
        }
    }

    pub fn high_score(&self) -> u64 {
        self.high_score
    }

    /// Fold in a forward distance; returns true if score or distance changed
    pub fn record_distance(&mut self, distance: u32, multiplier: u64) -> bool {
        let before = self.stats;
        self.stats.score = self.stats.score.max(distance as u64 * multiplier);
        self.stats.distance = self.stats.distance.max(distance);
        before != self.stats
    }

    /// Mark the collectible taken and credit its value. Already-collected or
    /// unknown ids are ignored and return false.
    pub fn collect(&mut self, lanes: &mut LaneTable, collection: &Collection) -> bool {
        let Some(collectibles) = lanes
            .lane_at_mut(collection.z)
            .and_then(|lane| lane.collectibles_mut())
        else {
            return false;
        };
        let Some(item) = collectibles
            .iter_mut()
            .find(|c| c.id == collection.id && !c.collected)
        else {
            return false;
        };

        item.collected = true;
        self.stats.coins += item.value;
        self.stats.score += item.value;
        true
    }

    /// If the score beat the best so far, adopt it and return it
    pub fn check_high_score(&mut self) -> Option<u64> {
        if self.stats.score > self.high_score {
            self.high_score = self.stats.score;
            Some(self.high_score)
        } else {
            None
        }
    }

    /// Zero the run stats, keeping the high score
    pub fn reset(&mut self) {
        self.stats = GameStats::default();
    }
}
