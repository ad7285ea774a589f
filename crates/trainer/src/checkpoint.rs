//! Checkpoint records for resumable training.
//!
//! A checkpoint captures everything needed to continue a run: the
//! configuration it was started with, the last completed episode, the
//! current learning rate, all statistics, the trailing score window, and a
//! full weight export. The JSON field names are part of the on-disk format
//! and must stay stable across versions.

use serde::{Deserialize, Serialize};
use twenty48_core::weights::WeightsFile;

use crate::config::TrainingConfig;
use crate::stats::{MilestoneCount, TrainingStats};

/// Current checkpoint format version.
pub const CHECKPOINT_VERSION: u32 = 1;

/// On-disk representation of a paused training run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckpointData {
    /// Format version; anything other than 1 is rejected.
    pub version: u32,
    /// Configuration the run was started with (informational).
    pub config: TrainingConfig,
    /// Last completed episode; training resumes at `episode + 1`.
    pub episode: u64,
    /// Learning rate after any decay steps so far.
    pub current_learning_rate: f64,
    /// Statistics snapshot.
    pub stats: TrainingStats,
    /// Milestone counters.
    pub milestone_count: MilestoneCount,
    /// Trailing window of episode scores, oldest first.
    pub recent_scores: Vec<u32>,
    /// Full weight export.
    pub weights: WeightsFile,
    /// Unix timestamp in milliseconds when the checkpoint was written.
    pub timestamp: i64,
}
