//! Running training statistics.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Outcome of a single training episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EpisodeResult {
    /// Final game score.
    pub score: u32,
    /// Value of the largest tile reached.
    pub max_tile: u32,
    /// Number of moves played.
    pub moves: u32,
}

/// Counters for episodes whose best tile reached a milestone value.
///
/// A single episode bumps every milestone it reached, so an 8192 game
/// counts toward all three.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MilestoneCount {
    pub tile2048: u64,
    pub tile4096: u64,
    pub tile8192: u64,
}

/// Aggregate statistics over all completed episodes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingStats {
    /// Episodes completed.
    pub episode: u64,
    /// Sum of all episode scores.
    pub total_score: u64,
    /// Mean score over all episodes.
    pub avg_score: f64,
    /// Mean score over the trailing window.
    pub recent_avg_score: f64,
    /// Largest tile value ever reached.
    pub max_tile: u32,
    /// Fraction of episodes reaching 2048.
    pub rate2048: f64,
    /// Fraction of episodes reaching 4096.
    pub rate4096: f64,
    /// Fraction of episodes reaching 8192.
    pub rate8192: f64,
    /// Episodes completed per second in this run.
    pub episodes_per_second: f64,
    /// Seconds elapsed in this run.
    pub elapsed_time: f64,
    /// Estimated seconds until the configured episode count.
    pub estimated_remaining: f64,
}

/// Sliding window over the most recent episode scores.
#[derive(Debug, Clone, Default)]
pub struct RecentScores {
    scores: VecDeque<u32>,
}

impl RecentScores {
    /// Number of scores the window retains.
    pub const WINDOW: usize = 1000;

    /// Creates an empty window.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restores a window from checkpointed scores, keeping the newest
    /// entries if the list is overlong.
    pub fn from_vec(scores: Vec<u32>) -> Self {
        let start = scores.len().saturating_sub(Self::WINDOW);
        Self {
            scores: scores[start..].iter().copied().collect(),
        }
    }

    /// Appends a score, dropping the oldest when the window is full.
    pub fn push(&mut self, score: u32) {
        if self.scores.len() == Self::WINDOW {
            self.scores.pop_front();
        }
        self.scores.push_back(score);
    }

    /// Returns the mean of the retained scores (0 when empty).
    pub fn mean(&self) -> f64 {
        if self.scores.is_empty() {
            return 0.0;
        }
        let sum: u64 = self.scores.iter().map(|&s| u64::from(s)).sum();
        sum as f64 / self.scores.len() as f64
    }

    /// Copies the retained scores, oldest first, for checkpointing.
    pub fn to_vec(&self) -> Vec<u32> {
        self.scores.iter().copied().collect()
    }
}
