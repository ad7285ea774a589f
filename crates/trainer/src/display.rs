//! Terminal output for training progress.

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::TrainingConfig;
use crate::stats::TrainingStats;

/// Prints the run header describing the configuration.
pub fn print_banner(config: &TrainingConfig, start_episode: u64) {
    let rule = "=".repeat(60);
    println!("{rule}");
    println!("{}", "2048 n-tuple network training".bold());
    println!("{rule}");
    println!("episodes:       {}", config.episodes);
    println!("learning rate:  {}", config.learning_rate);
    if config.enable_decay {
        println!(
            "decay:          rate {} every {} episodes",
            config.decay_rate, config.decay_interval
        );
    } else {
        println!("decay:          disabled");
    }
    if config.optimistic_init > 0.0 {
        println!("optimistic:     {}", config.optimistic_init);
    } else {
        println!("optimistic:     disabled");
    }
    println!("output:         {}", config.output_path.display());
    if config.checkpoint_interval > 0 {
        println!(
            "checkpoint:     {} (every {} episodes)",
            config.checkpoint_path.display(),
            config.checkpoint_interval
        );
    } else {
        println!("checkpoint:     disabled");
    }
    if config.weights_save_interval > 0 {
        println!("weight save:    every {}s", config.weights_save_interval);
    } else {
        println!("weight save:    disabled");
    }
    if start_episode > 1 {
        println!("{}", format!("resuming at episode {start_episode}").cyan());
    }
    println!("{rule}");
}

/// Creates the styled episode progress bar.
pub fn progress_bar(total_episodes: u64) -> ProgressBar {
    let bar = ProgressBar::new(total_episodes);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.cyan} [{bar:30.cyan}] {pos}/{len} ({percent}%) {msg}")
            .unwrap()
            .progress_chars("█▉▊▋▌▍▎▏ "),
    );
    bar
}

/// Refreshes the progress bar from the latest statistics.
pub fn update_progress(bar: &ProgressBar, stats: &TrainingStats) {
    bar.set_position(stats.episode);
    bar.set_message(format!(
        "score {:>6.0} | 2048 {:>5.1}% | {:>4.0} ep/s | eta {}",
        stats.recent_avg_score,
        stats.rate2048 * 100.0,
        stats.episodes_per_second,
        format_duration(stats.estimated_remaining)
    ));
}

/// Prints the periodic detail line above the progress bar.
pub fn print_detail(bar: &ProgressBar, stats: &TrainingStats, learning_rate: f64) {
    bar.println(format!(
        "  max {} | 4096 {:>5.1}% | 8192 {:>5.1}% | alpha {:.2e}",
        stats.max_tile,
        stats.rate4096 * 100.0,
        stats.rate8192 * 100.0,
        learning_rate
    ));
}

/// Formats a duration in seconds as a compact human-readable string.
pub fn format_duration(seconds: f64) -> String {
    if !seconds.is_finite() {
        return "-".to_string();
    }
    let seconds = seconds.max(0.0) as u64;
    if seconds < 60 {
        format!("{seconds}s")
    } else if seconds < 3600 {
        format!("{}m{}s", seconds / 60, seconds % 60)
    } else {
        format!("{}h{}m", seconds / 3600, (seconds % 3600) / 60)
    }
}
