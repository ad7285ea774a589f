//! TD(0) self-play training loop.
//!
//! The trainer plays games against itself, choosing moves greedily with
//! respect to the current evaluation, and corrects the network after each
//! transition. The network evaluates *afterstates*: the deterministic board
//! a move produces before the random tile spawns. Learning on afterstates
//! decouples the value estimate from spawn randomness.
//!
//! Per transition with reward `r` and afterstate value `V(s')`, the previous
//! afterstate's entries move by `alpha * (r + V(s') - V(s))`. The value of a
//! terminal position is defined to be zero, which yields one final
//! correction when the game ends.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use anyhow::Result;
use rand::SeedableRng;
use rand::rngs::StdRng;
use twenty48_core::bitboard::Board;
use twenty48_core::direction::Direction;
use twenty48_core::game_state::GameState;
use twenty48_core::network::NTupleNetwork;
use twenty48_core::weights::WeightsFile;

use crate::checkpoint::{CHECKPOINT_VERSION, CheckpointData};
use crate::config::TrainingConfig;
use crate::display;
use crate::persist;
use crate::stats::{EpisodeResult, MilestoneCount, RecentScores, TrainingStats};

/// Progress is reported at least this often regardless of the episode
/// interval.
const REPORT_FALLBACK: Duration = Duration::from_secs(5);

/// Episodes between detail lines (max tile, higher milestones, alpha).
const DETAIL_INTERVAL: u64 = 1000;

/// Drives TD(0) self-play training of an n-tuple network.
pub struct Trainer {
    network: NTupleNetwork,
    config: TrainingConfig,
    current_learning_rate: f64,
    /// First episode of this run; above 1 after a resume.
    start_episode: u64,
    /// Whether weights came from a checkpoint or weight file.
    weights_loaded: bool,
    stats: TrainingStats,
    recent_scores: RecentScores,
    milestones: MilestoneCount,
    start_time: Instant,
    rng: StdRng,
    shutdown: Arc<AtomicBool>,
}

impl Trainer {
    /// Creates a trainer over a network and configuration.
    ///
    /// # Arguments
    ///
    /// * `network` - The network to train, usually zero-initialized.
    /// * `config` - Training parameters with paths already resolved.
    /// * `seed` - Fixed RNG seed for reproducible runs, or `None` for OS
    ///   entropy.
    pub fn new(network: NTupleNetwork, config: TrainingConfig, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => rand::make_rng(),
        };
        let mut trainer = Self {
            current_learning_rate: config.learning_rate,
            network,
            config,
            start_episode: 1,
            weights_loaded: false,
            stats: TrainingStats::default(),
            recent_scores: RecentScores::new(),
            milestones: MilestoneCount::default(),
            start_time: Instant::now(),
            rng,
            shutdown: Arc::new(AtomicBool::new(false)),
        };
        if trainer.config.optimistic_init > 0.0 {
            trainer.network.init_optimistic(trainer.config.optimistic_init);
        }
        trainer
    }

    /// Runs the configured number of episodes.
    ///
    /// With `resume`, state is restored from the checkpoint file, falling
    /// back to the weight file and then to a fresh start. Without it, an
    /// existing weight file at the output path is still picked up so
    /// repeated runs keep improving the same network (statistics restart
    /// at episode 1).
    ///
    /// # Errors
    ///
    /// Any write failure while saving weights or checkpoints; training
    /// cannot guarantee progress without durable state.
    pub fn train(&mut self, resume: bool) -> Result<()> {
        if resume {
            if !self.load_checkpoint() {
                log::warn!("no usable checkpoint; trying the weight file");
                if !self.load_weights() {
                    log::info!("no existing weights; starting fresh");
                }
            }
        } else if self.config.output_path.exists() {
            log::info!(
                "found existing weight file {}; loading it to continue training",
                self.config.output_path.display()
            );
            if !self.load_weights() {
                log::warn!("could not load existing weights; starting fresh");
            }
        }

        display::print_banner(&self.config, self.start_episode);

        let flag = Arc::clone(&self.shutdown);
        ctrlc::set_handler(move || flag.store(true, Ordering::SeqCst))
            .map_err(|e| anyhow::anyhow!("Failed to install the shutdown signal handler: {}", e))?;

        self.start_time = Instant::now();
        let mut last_weights_save = Instant::now();
        let mut last_report = Instant::now();
        let mut last_checkpoint_episode = self.start_episode - 1;

        if !self.weights_loaded {
            log::info!("saving initial weights");
            self.save_weights()?;
        }

        let bar = display::progress_bar(self.config.episodes);
        bar.set_position(self.start_episode.saturating_sub(1));

        for episode in self.start_episode..=self.config.episodes {
            // Shutdown is only honored at episode boundaries so the saved
            // snapshot is always consistent.
            if self.shutdown.load(Ordering::SeqCst) {
                bar.abandon_with_message("interrupted");
                log::info!("interrupt received; saving checkpoint and weights");
                self.save_checkpoint()?;
                self.save_weights()?;
                log::info!("state saved; rerun with --resume to continue");
                return Ok(());
            }

            let result = self.train_episode();
            log::debug!(
                "episode {episode}: score {} max tile {} in {} moves",
                result.score,
                result.max_tile,
                result.moves
            );
            self.update_stats(episode, &result);
            self.apply_decay(episode);

            if episode % self.config.report_interval == 0 || last_report.elapsed() >= REPORT_FALLBACK
            {
                display::update_progress(&bar, &self.stats);
                last_report = Instant::now();
            }
            if episode % DETAIL_INTERVAL == 0 {
                display::print_detail(&bar, &self.stats, self.current_learning_rate);
            }

            if self.config.checkpoint_interval > 0
                && episode - last_checkpoint_episode >= self.config.checkpoint_interval
            {
                self.save_checkpoint()?;
                last_checkpoint_episode = episode;
            }

            if self.config.weights_save_interval > 0
                && last_weights_save.elapsed().as_secs() >= self.config.weights_save_interval
            {
                self.save_weights()?;
                last_weights_save = Instant::now();
            }
        }

        display::update_progress(&bar, &self.stats);
        display::print_detail(&bar, &self.stats, self.current_learning_rate);
        bar.finish_with_message("done");

        self.save_weights()?;
        self.remove_checkpoint()?;
        Ok(())
    }

    /// Plays one self-play game from a fresh start.
    fn train_episode(&mut self) -> EpisodeResult {
        let game = GameState::new_game(&mut self.rng);
        self.run_episode(game)
    }

    /// Plays one self-play game from the given state, learning as it goes.
    fn run_episode(&mut self, mut game: GameState) -> EpisodeResult {
        let mut prev: Option<(Board, f64)> = None;
        let mut moves = 0u32;

        while !game.is_over() && self.td_step(&mut game, &mut prev) {
            moves += 1;
        }

        // The value of a terminal position is defined to be zero.
        if let Some((prev_afterstate, prev_value)) = prev {
            self.network
                .update(prev_afterstate, self.current_learning_rate * (0.0 - prev_value));
        }

        EpisodeResult {
            score: game.score(),
            max_tile: game.max_tile(),
            moves,
        }
    }

    /// Runs one select-learn-commit-spawn step of the episode loop.
    ///
    /// `prev` holds the previous afterstate and its value estimate as
    /// recorded *before* any update, which is the TD(0) target semantics.
    ///
    /// # Returns
    ///
    /// `false` when no legal move remains and the episode is over.
    fn td_step(&mut self, game: &mut GameState, prev: &mut Option<(Board, f64)>) -> bool {
        let Some((_, afterstate, reward)) = self.select_best_move(game) else {
            return false;
        };
        let current_value = self.network.evaluate(afterstate);

        if let Some((prev_afterstate, prev_value)) = *prev {
            let td_error = f64::from(reward) + current_value - prev_value;
            self.network
                .update(prev_afterstate, self.current_learning_rate * td_error);
        }

        game.commit(afterstate, reward);
        game.add_random_tile(&mut self.rng);

        *prev = Some((afterstate, current_value));
        true
    }

    /// Picks the greedy direction, returning it with its afterstate and
    /// reward so the caller need not recompute the move.
    ///
    /// Ties go to the earliest direction in [`Direction::ALL`] order.
    fn select_best_move(&self, game: &GameState) -> Option<(Direction, Board, u32)> {
        let mut best: Option<(Direction, Board, u32)> = None;
        let mut best_value = f64::NEG_INFINITY;

        for direction in Direction::ALL {
            if let Some((afterstate, reward)) = game.afterstate(direction) {
                let value = f64::from(reward) + self.network.evaluate(afterstate);
                if value > best_value {
                    best_value = value;
                    best = Some((direction, afterstate, reward));
                }
            }
        }

        best
    }

    /// Multiplies the learning rate by the decay factor at each interval
    /// boundary.
    fn apply_decay(&mut self, episode: u64) {
        if self.config.enable_decay
            && self.config.decay_interval > 0
            && episode % self.config.decay_interval == 0
        {
            self.current_learning_rate *= self.config.decay_rate;
        }
    }

    /// Folds an episode result into the running statistics.
    fn update_stats(&mut self, episode: u64, result: &EpisodeResult) {
        self.stats.episode = episode;
        self.stats.total_score += u64::from(result.score);
        self.stats.avg_score = self.stats.total_score as f64 / episode as f64;

        if result.max_tile > self.stats.max_tile {
            self.stats.max_tile = result.max_tile;
        }
        if result.max_tile >= 2048 {
            self.milestones.tile2048 += 1;
        }
        if result.max_tile >= 4096 {
            self.milestones.tile4096 += 1;
        }
        if result.max_tile >= 8192 {
            self.milestones.tile8192 += 1;
        }
        self.stats.rate2048 = self.milestones.tile2048 as f64 / episode as f64;
        self.stats.rate4096 = self.milestones.tile4096 as f64 / episode as f64;
        self.stats.rate8192 = self.milestones.tile8192 as f64 / episode as f64;

        self.recent_scores.push(result.score);
        self.stats.recent_avg_score = self.recent_scores.mean();

        self.stats.elapsed_time = self.start_time.elapsed().as_secs_f64();
        let episodes_this_run = episode - self.start_episode + 1;
        self.stats.episodes_per_second = episodes_this_run as f64 / self.stats.elapsed_time;
        let remaining = self.config.episodes.saturating_sub(episode);
        self.stats.estimated_remaining = remaining as f64 / self.stats.episodes_per_second;
    }

    /// Restores trainer state from the checkpoint file.
    ///
    /// Missing files, version mismatches, parse failures and weight shape
    /// mismatches are all treated as "no checkpoint" after a warning.
    fn load_checkpoint(&mut self) -> bool {
        let path = &self.config.checkpoint_path;
        let checkpoint: CheckpointData = match persist::read_json(path) {
            Ok(Some(checkpoint)) => checkpoint,
            Ok(None) => return false,
            Err(err) => {
                log::warn!("failed to read checkpoint {}: {err:#}", path.display());
                return false;
            }
        };

        if checkpoint.version != CHECKPOINT_VERSION {
            log::warn!(
                "checkpoint version mismatch: expected {CHECKPOINT_VERSION}, got {}",
                checkpoint.version
            );
            return false;
        }
        if let Err(err) = self.network.import(checkpoint.weights) {
            log::warn!("checkpoint weights rejected: {err}");
            return false;
        }

        self.start_episode = checkpoint.episode + 1;
        self.current_learning_rate = checkpoint.current_learning_rate;
        self.stats = checkpoint.stats;
        self.milestones = checkpoint.milestone_count;
        self.recent_scores = RecentScores::from_vec(checkpoint.recent_scores);
        self.weights_loaded = true;

        log::info!(
            "checkpoint loaded from {}; resuming at episode {}",
            path.display(),
            self.start_episode
        );
        true
    }

    /// Loads network weights from the output path.
    ///
    /// Missing files, parse failures and shape mismatches are treated as
    /// "no weights" after a warning.
    fn load_weights(&mut self) -> bool {
        let path = &self.config.output_path;
        let file: WeightsFile = match persist::read_json(path) {
            Ok(Some(file)) => file,
            Ok(None) => return false,
            Err(err) => {
                log::warn!("failed to read weights {}: {err:#}", path.display());
                return false;
            }
        };

        let trained_games = file
            .metadata
            .as_ref()
            .and_then(|metadata| metadata.get("trainedGames"))
            .and_then(|games| games.as_u64());

        if let Err(err) = self.network.import(file) {
            log::warn!("weight file rejected: {err}");
            return false;
        }
        self.weights_loaded = true;

        match trained_games {
            Some(games) => {
                log::info!(
                    "weights loaded from {} ({games} games trained)",
                    path.display()
                );
            }
            None => log::info!("weights loaded from {}", path.display()),
        }
        true
    }

    /// Writes the weight file with fresh metadata to the output path.
    fn save_weights(&self) -> Result<()> {
        let export = self.network.export(Some(self.metadata()));
        persist::write_json(&self.config.output_path, &export)?;
        log::info!(
            "weights saved to {} at episode {}",
            self.config.output_path.display(),
            self.stats.episode
        );
        Ok(())
    }

    /// Writes a checkpoint capturing the full trainer state.
    fn save_checkpoint(&self) -> Result<()> {
        let checkpoint = CheckpointData {
            version: CHECKPOINT_VERSION,
            config: self.config.clone(),
            episode: self.stats.episode,
            current_learning_rate: self.current_learning_rate,
            stats: self.stats.clone(),
            milestone_count: self.milestones,
            recent_scores: self.recent_scores.to_vec(),
            weights: self.network.export(Some(self.metadata())),
            timestamp: chrono::Utc::now().timestamp_millis(),
        };
        persist::write_json(&self.config.checkpoint_path, &checkpoint)
    }

    /// Deletes the checkpoint file after a completed run.
    fn remove_checkpoint(&self) -> Result<()> {
        if self.config.checkpoint_path.exists() {
            std::fs::remove_file(&self.config.checkpoint_path)?;
            log::info!("checkpoint file removed");
        }
        Ok(())
    }

    /// Builds the weight file metadata block from current statistics.
    fn metadata(&self) -> serde_json::Value {
        serde_json::json!({
            "trainedGames": self.stats.episode,
            "avgScore": self.stats.avg_score.round() as u64,
            "maxTile": self.stats.max_tile,
            "rate2048": round4(self.stats.rate2048),
            "rate4096": round4(self.stats.rate4096),
            "rate8192": round4(self.stats.rate8192),
            "trainingTime": self.stats.elapsed_time.round() as u64,
        })
    }
}

/// Rounds to four decimal places for metadata reporting.
fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use twenty48_core::pattern::Catalog;

    fn test_trainer(learning_rate: f64) -> Trainer {
        let config = TrainingConfig {
            learning_rate,
            ..Default::default()
        };
        Trainer::new(
            NTupleNetwork::from_catalog(Catalog::RowCol4),
            config,
            Some(1),
        )
    }

    #[test]
    fn test_select_best_move_prefers_reward() {
        let trainer = test_trainer(0.0025);
        // Two 2s in the top row; merging beats the rewardless slide down.
        let board =
            Board::from_values([[2, 2, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]]);
        let game = GameState::from_board(board, 0);

        let (direction, _, reward) = trainer.select_best_move(&game).unwrap();
        // Up is a no-op; Right and Left both merge for 4, so Right wins
        // the tie by direction order.
        assert_eq!(direction, Direction::Right);
        assert_eq!(reward, 4);
    }

    #[test]
    fn test_select_best_move_tie_breaks_in_direction_order() {
        let trainer = test_trainer(0.0025);
        // A single tile in the middle: every direction slides for zero
        // reward and zero value.
        let board =
            Board::from_values([[0, 0, 0, 0], [0, 2, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]]);
        let game = GameState::from_board(board, 0);

        let (direction, _, reward) = trainer.select_best_move(&game).unwrap();
        assert_eq!(direction, Direction::Up);
        assert_eq!(reward, 0);
    }

    #[test]
    fn test_select_best_move_none_on_blocked_board() {
        let trainer = test_trainer(0.0025);
        let game = GameState::from_board(Board::new(0x1212_2121_1212_2121), 0);
        assert!(trainer.select_best_move(&game).is_none());
    }

    #[test]
    fn test_td_step_credits_next_reward_to_previous_afterstate() {
        let mut trainer = test_trainer(0.1);

        // Full board whose only legal moves merge the two 32s in the
        // bottom row; the shifted row then lines up the 16s vertically, so
        // the second move merges them for a reward of 32 no matter which
        // tile spawns into the freed corner.
        let board = Board::from_values([
            [2, 4, 2, 4],
            [4, 2, 4, 2],
            [8, 16, 8, 16],
            [16, 32, 32, 8],
        ]);
        let mut game = GameState::from_board(board, 0);
        let mut prev = None;

        assert!(trainer.td_step(&mut game, &mut prev));
        let (first_afterstate, first_value) = prev.unwrap();
        assert_eq!(first_value, 0.0);
        assert_eq!(game.score(), 64);

        assert!(trainer.td_step(&mut game, &mut prev));
        assert_eq!(game.score(), 96);

        // The second step saw reward 32 and a zero-valued next afterstate,
        // so every entry the first afterstate touches took 0.1 * 32. All
        // 64 touched entries are distinct here, giving V = 64 * 3.2.
        let expected = 64.0 * 0.1 * 32.0;
        assert!((trainer.network.evaluate(first_afterstate) - expected).abs() < 1e-9);

        // prev_value is recorded before the update it triggers.
        let (_, second_value) = prev.unwrap();
        assert_eq!(second_value, 0.0);
    }

    #[test]
    fn test_one_move_episode_applies_zero_terminal_correction() {
        let mut trainer = test_trainer(0.1);

        // One empty corner; the only useful move slides the bottom row
        // right, and any spawned tile leaves the board terminal.
        let board = Board::from_values([
            [2, 4, 2, 4],
            [4, 2, 4, 2],
            [8, 16, 8, 16],
            [32, 2, 4, 0],
        ]);
        let result = trainer.run_episode(GameState::from_board(board, 0));

        assert_eq!(result.moves, 1);
        assert_eq!(result.score, 0);
        assert_eq!(result.max_tile, 32);
        // prev_value was zero, so the terminal correction wrote zeros.
        assert_eq!(trainer.network.evaluate(Board::EMPTY), 0.0);
        assert_eq!(trainer.network.evaluate(board), 0.0);
    }

    #[test]
    fn test_seeded_episode_runs_to_termination() {
        let mut trainer = test_trainer(0.0025);
        let result = trainer.train_episode();

        assert!(result.moves > 0);
        assert!(result.score > 0);
        assert!(result.max_tile >= 4);
        // TD updates happened and stayed finite.
        let weights = trainer.network.weights();
        assert!(weights.iter().flatten().any(|&w| w != 0.0));
        assert!(weights.iter().flatten().all(|w| w.is_finite()));
    }

    #[test]
    fn test_seeded_training_is_reproducible() {
        let mut a = test_trainer(0.0025);
        let mut b = test_trainer(0.0025);
        for _ in 0..3 {
            assert_eq!(a.train_episode(), b.train_episode());
        }
        assert_eq!(a.network.weights(), b.network.weights());
    }

    #[test]
    fn test_decay_follows_power_law() {
        let mut trainer = test_trainer(0.0025);
        trainer.config.enable_decay = true;

        for episode in 1..=30_000u64 {
            trainer.apply_decay(episode);
        }
        let expected = 0.0025 * 0.95f64.powi(3);
        assert!((trainer.current_learning_rate - expected).abs() < 1e-12);
    }

    #[test]
    fn test_decay_disabled_keeps_rate() {
        let mut trainer = test_trainer(0.0025);
        for episode in 1..=30_000u64 {
            trainer.apply_decay(episode);
        }
        assert_eq!(trainer.current_learning_rate, 0.0025);
    }

    #[test]
    fn test_update_stats_tracks_milestones_and_means() {
        let mut trainer = test_trainer(0.0025);

        trainer.update_stats(
            1,
            &EpisodeResult {
                score: 100,
                max_tile: 2048,
                moves: 50,
            },
        );
        trainer.update_stats(
            2,
            &EpisodeResult {
                score: 300,
                max_tile: 8192,
                moves: 70,
            },
        );

        assert_eq!(trainer.stats.episode, 2);
        assert_eq!(trainer.stats.total_score, 400);
        assert_eq!(trainer.stats.avg_score, 200.0);
        assert_eq!(trainer.stats.recent_avg_score, 200.0);
        assert_eq!(trainer.stats.max_tile, 8192);
        // The 8192 episode counts toward every milestone it reached.
        assert_eq!(trainer.milestones.tile2048, 2);
        assert_eq!(trainer.milestones.tile4096, 1);
        assert_eq!(trainer.milestones.tile8192, 1);
        assert_eq!(trainer.stats.rate2048, 1.0);
        assert_eq!(trainer.stats.rate4096, 0.5);
        assert_eq!(trainer.stats.rate8192, 0.5);
    }

    #[test]
    fn test_optimistic_init_raises_initial_values() {
        let config = TrainingConfig {
            optimistic_init: 2.5,
            ..Default::default()
        };
        let trainer = Trainer::new(
            NTupleNetwork::from_catalog(Catalog::RowCol4),
            config,
            Some(1),
        );
        // 8 patterns x 8 placements, each entry holding 2.5.
        assert!((trainer.network.evaluate(Board::EMPTY) - 160.0).abs() < 1e-9);
    }

    #[test]
    fn test_checkpoint_save_and_resume_round_trip() {
        let dir = std::env::temp_dir().join(format!("twenty48-trainer-{}", std::process::id()));
        let checkpoint_path = dir.join("checkpoint.json");
        let output_path = dir.join("weights.json");

        let config = TrainingConfig {
            checkpoint_path: checkpoint_path.clone(),
            output_path: output_path.clone(),
            ..Default::default()
        };

        let mut trainer = Trainer::new(
            NTupleNetwork::from_catalog(Catalog::RowCol4),
            config.clone(),
            Some(1),
        );
        for episode in 1..=5 {
            let result = trainer.train_episode();
            trainer.update_stats(episode, &result);
        }
        trainer.current_learning_rate = 0.002;
        trainer.save_checkpoint().unwrap();

        let mut resumed = Trainer::new(
            NTupleNetwork::from_catalog(Catalog::RowCol4),
            config,
            Some(1),
        );
        assert!(resumed.load_checkpoint());
        assert_eq!(resumed.start_episode, 6);
        assert_eq!(resumed.current_learning_rate, 0.002);
        assert_eq!(resumed.stats, trainer.stats);
        assert_eq!(resumed.milestones, trainer.milestones);
        assert_eq!(resumed.recent_scores.to_vec(), trainer.recent_scores.to_vec());
        assert_eq!(resumed.network.weights(), trainer.network.weights());
        assert!(resumed.weights_loaded);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_load_checkpoint_rejects_wrong_version() {
        let dir = std::env::temp_dir().join(format!("twenty48-ckpt-ver-{}", std::process::id()));
        let checkpoint_path = dir.join("checkpoint.json");

        let config = TrainingConfig {
            checkpoint_path: checkpoint_path.clone(),
            ..Default::default()
        };
        let mut trainer = Trainer::new(
            NTupleNetwork::from_catalog(Catalog::RowCol4),
            config.clone(),
            Some(1),
        );
        trainer.save_checkpoint().unwrap();

        // Rewrite the version field and make sure the load is refused.
        let mut raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&checkpoint_path).unwrap()).unwrap();
        raw["version"] = serde_json::json!(2);
        std::fs::write(&checkpoint_path, serde_json::to_string(&raw).unwrap()).unwrap();

        let mut fresh = Trainer::new(
            NTupleNetwork::from_catalog(Catalog::RowCol4),
            config,
            Some(1),
        );
        assert!(!fresh.load_checkpoint());
        assert_eq!(fresh.start_episode, 1);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_load_weights_rejects_wrong_shape() {
        let dir = std::env::temp_dir().join(format!("twenty48-shape-{}", std::process::id()));
        let output_path = dir.join("weights.json");

        let config = TrainingConfig {
            output_path: output_path.clone(),
            ..Default::default()
        };

        // Write a weight file with a single-pattern shape.
        let mismatched = WeightsFile {
            version: 1,
            patterns: vec![vec![0, 1, 2, 3]],
            weights: vec![vec![0.0; 65_536]],
            metadata: None,
        };
        persist::write_json(&output_path, &mismatched).unwrap();

        let mut trainer = Trainer::new(
            NTupleNetwork::from_catalog(Catalog::RowCol4),
            config,
            Some(1),
        );
        assert!(!trainer.load_weights());
        assert!(!trainer.weights_loaded);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_saved_weights_carry_metadata() {
        let dir = std::env::temp_dir().join(format!("twenty48-meta-{}", std::process::id()));
        let output_path = dir.join("weights.json");

        let config = TrainingConfig {
            output_path: output_path.clone(),
            ..Default::default()
        };
        let mut trainer = Trainer::new(
            NTupleNetwork::from_catalog(Catalog::RowCol4),
            config,
            Some(1),
        );
        let result = trainer.train_episode();
        trainer.update_stats(1, &result);
        trainer.save_weights().unwrap();

        let file: WeightsFile = persist::read_json(&output_path).unwrap().unwrap();
        let metadata = file.metadata.unwrap();
        assert_eq!(metadata["trainedGames"], serde_json::json!(1));
        assert!(metadata["avgScore"].is_number());
        assert!(metadata["trainingTime"].is_number());

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
