//! Game state management for 2048.
//!
//! This module provides the [`GameState`] struct which maintains the current
//! board and cumulative score, and drives the move / spawn cycle of a game.

use rand::Rng;

use crate::bitboard::Board;
use crate::direction::Direction;
use crate::slide;

/// Represents the state of a 2048 game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameState {
    /// The current board position.
    board: Board,
    /// Sum of merge rewards since game start.
    score: u32,
}

impl GameState {
    /// Starts a new game with two randomly spawned tiles and zero score.
    pub fn new_game<R: Rng>(rng: &mut R) -> Self {
        Self {
            board: slide::make_initial(rng),
            score: 0,
        }
    }

    /// Creates a game state from an existing position.
    pub fn from_board(board: Board, score: u32) -> Self {
        Self { board, score }
    }

    /// Returns the current board.
    #[inline(always)]
    pub fn board(&self) -> Board {
        self.board
    }

    /// Returns the cumulative score.
    #[inline(always)]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Computes the afterstate of a move without committing it.
    ///
    /// # Returns
    ///
    /// `Some((afterstate, reward))` for a legal move, `None` for a no-op.
    #[inline]
    pub fn afterstate(&self, direction: Direction) -> Option<(Board, u32)> {
        slide::try_move(self.board, direction)
    }

    /// Applies a move, updating the board and score.
    ///
    /// # Returns
    ///
    /// The merge reward of the move, or `None` if the move is a no-op.
    pub fn apply_move(&mut self, direction: Direction) -> Option<u32> {
        let (board, reward) = slide::try_move(self.board, direction)?;
        self.commit(board, reward);
        Some(reward)
    }

    /// Commits a previously computed afterstate and its reward.
    ///
    /// Lets callers that already ranked the move via
    /// [`afterstate`](Self::afterstate) skip recomputing it.
    #[inline]
    pub fn commit(&mut self, afterstate: Board, reward: u32) {
        self.board = afterstate;
        self.score += reward;
    }

    /// Spawns a random tile on an empty cell, if any.
    pub fn add_random_tile<R: Rng>(&mut self, rng: &mut R) {
        self.board = slide::spawn_random(self.board, rng);
    }

    /// Checks whether no legal move remains.
    #[inline]
    pub fn is_over(&self) -> bool {
        slide::is_terminal(self.board)
    }

    /// Returns the value of the largest tile on the board.
    #[inline]
    pub fn max_tile(&self) -> u32 {
        self.board.max_tile_value()
    }

    /// Returns the number of empty cells.
    #[inline]
    pub fn count_empty(&self) -> u32 {
        self.board.count_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_new_game() {
        let mut rng = StdRng::seed_from_u64(3);
        let game = GameState::new_game(&mut rng);
        assert_eq!(game.score(), 0);
        assert_eq!(game.count_empty(), 14);
        assert!(!game.is_over());
    }

    #[test]
    fn test_apply_move_accumulates_score() {
        let board = Board::from_values([[2, 2, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]]);
        let mut game = GameState::from_board(board, 0);

        let reward = game.apply_move(Direction::Left).expect("left is legal");
        assert_eq!(reward, 4);
        assert_eq!(game.score(), 4);
        assert_eq!(game.board().tile(0), 2);
        assert_eq!(game.max_tile(), 4);
    }

    #[test]
    fn test_apply_move_rejects_no_op() {
        let board = Board::from_values([[2, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]]);
        let mut game = GameState::from_board(board, 7);
        assert_eq!(game.apply_move(Direction::Left), None);
        assert_eq!(game.score(), 7);
        assert_eq!(game.board(), board);
    }

    #[test]
    fn test_commit_matches_apply_move() {
        let board = Board::from_values([[2, 2, 4, 4], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]]);
        let mut direct = GameState::from_board(board, 0);
        let mut cached = GameState::from_board(board, 0);

        let (afterstate, reward) = cached.afterstate(Direction::Left).unwrap();
        cached.commit(afterstate, reward);
        direct.apply_move(Direction::Left).unwrap();

        assert_eq!(cached, direct);
        assert_eq!(cached.score(), 12);
    }

    #[test]
    fn test_add_random_tile_fills_one_cell() {
        let mut rng = StdRng::seed_from_u64(11);
        let board = Board::from_values([[2, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]]);
        let mut game = GameState::from_board(board, 0);
        game.add_random_tile(&mut rng);
        assert_eq!(game.count_empty(), 14);
    }

    #[test]
    fn test_is_over_on_blocked_board() {
        let game = GameState::from_board(Board::new(0x1212_2121_1212_2121), 100);
        assert!(game.is_over());
    }
}
