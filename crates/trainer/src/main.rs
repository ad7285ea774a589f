//! TD(0) self-play trainer for the 2048 n-tuple network.
//!
//! Plays games against itself, learns afterstate values into per-pattern
//! lookup tables, and periodically writes the weight file consumed by
//! downstream evaluators.

mod checkpoint;
mod config;
mod display;
mod persist;
mod stats;
mod trainer;

use std::path::PathBuf;

use clap::Parser;
use env_logger::Env;
use twenty48_core::network::NTupleNetwork;
use twenty48_core::pattern::Catalog;

use crate::config::TrainingConfig;
use crate::trainer::Trainer;

#[derive(Parser, Debug)]
#[command(
    name = "trainer",
    about = "Trains a 2048 evaluation network by TD(0) self-play"
)]
struct Cli {
    /// Number of training episodes
    #[arg(short, long, default_value_t = 100_000)]
    episodes: u64,

    /// Learning rate alpha
    #[arg(short = 'l', long, default_value_t = 0.0025)]
    learning_rate: f64,

    /// Weight output file path
    #[arg(short, long, default_value = "weights.json")]
    output: PathBuf,

    /// Enable learning-rate decay
    #[arg(short, long)]
    decay: bool,

    /// Optimistic initial weight value (0 disables)
    #[arg(long, default_value_t = 0.0)]
    optimistic: f64,

    /// Progress report interval in episodes
    #[arg(short, long, default_value_t = 100)]
    report: u64,

    /// Checkpoint interval in episodes (0 disables)
    #[arg(short, long, default_value_t = 1000)]
    checkpoint: u64,

    /// Checkpoint file path
    #[arg(long, default_value = "checkpoint.json")]
    checkpoint_path: PathBuf,

    /// Weight save interval in seconds (0 disables)
    #[arg(short = 'w', long, default_value_t = 300)]
    weights_save: u64,

    /// Resume training from the checkpoint file
    #[arg(long)]
    resume: bool,

    /// RNG seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,
}

/// Checks the value ranges clap cannot express.
fn validate(cli: &Cli) -> Result<(), String> {
    if cli.episodes == 0 {
        return Err("episodes must be positive".to_string());
    }
    if !(cli.learning_rate > 0.0 && cli.learning_rate <= 1.0) {
        return Err("learning rate must be between 0 and 1".to_string());
    }
    if cli.report == 0 {
        return Err("report interval must be positive".to_string());
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if let Err(message) = validate(&cli) {
        eprintln!("error: {message}");
        std::process::exit(1);
    }

    twenty48_core::init();

    let config = TrainingConfig {
        episodes: cli.episodes,
        learning_rate: cli.learning_rate,
        enable_decay: cli.decay,
        optimistic_init: cli.optimistic,
        report_interval: cli.report,
        output_path: config::resolve_path(&cli.output),
        checkpoint_interval: cli.checkpoint,
        checkpoint_path: config::resolve_path(&cli.checkpoint_path),
        weights_save_interval: cli.weights_save,
        ..Default::default()
    };

    let network = NTupleNetwork::from_catalog(Catalog::RowCol4);
    let mut trainer = Trainer::new(network, config, cli.seed);

    if let Err(err) = trainer.train(cli.resume) {
        log::error!("training aborted: {err:#}");
        std::process::exit(1);
    }
}
