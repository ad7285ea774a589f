//! Training configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// All tunable parameters of a training run.
///
/// The configuration is stored inside checkpoints for reference; resuming
/// always uses the configuration given on the command line.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingConfig {
    /// Number of episodes to play.
    pub episodes: u64,
    /// Initial learning rate alpha.
    pub learning_rate: f64,
    /// Whether the learning rate decays over time.
    pub enable_decay: bool,
    /// Multiplicative decay factor.
    pub decay_rate: f64,
    /// Episodes between decay steps.
    pub decay_interval: u64,
    /// Optimistic initial weight value; 0 disables.
    pub optimistic_init: f64,
    /// Episodes between progress reports.
    pub report_interval: u64,
    /// Weight output file path.
    pub output_path: PathBuf,
    /// Episodes between checkpoints; 0 disables.
    pub checkpoint_interval: u64,
    /// Checkpoint file path.
    pub checkpoint_path: PathBuf,
    /// Wall-clock seconds between weight saves; 0 disables.
    pub weights_save_interval: u64,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            episodes: 100_000,
            learning_rate: 0.0025,
            enable_decay: false,
            decay_rate: 0.95,
            decay_interval: 10_000,
            optimistic_init: 0.0,
            report_interval: 100,
            output_path: PathBuf::from("weights.json"),
            checkpoint_interval: 1000,
            checkpoint_path: PathBuf::from("checkpoint.json"),
            weights_save_interval: 300,
        }
    }
}

/// Resolves a path against the directory containing the running executable.
///
/// Relative output and checkpoint paths anchor to the program location
/// rather than the process working directory, so repeated runs from
/// different directories keep finding the same files. Absolute paths are
/// used verbatim.
pub fn resolve_path(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    match std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        Some(dir) => dir.join(path),
        None => path.to_path_buf(),
    }
}
