//! Row transition tables and move application.
//!
//! A 2048 move slides each of the four rows (or columns) toward one edge,
//! closing gaps and merging adjacent equal tiles pairwise. All 65,536
//! possible 16-bit rows are solved once up front into two lookup tables, so
//! applying a move to a full board costs four table reads.
//!
//! Vertical moves reuse the same tables by transposing the board, sliding
//! horizontally, and transposing back.

use std::sync::OnceLock;

use arrayvec::ArrayVec;
use rand::Rng;
use rand::RngExt;

use crate::bitboard::Board;
use crate::constants::{BOARD_CELLS, BOARD_SIZE, MAX_TILE_EXPONENT, ROW_CONFIGURATIONS};
use crate::direction::Direction;

/// Probability that a spawned tile is a 2 (exponent 1) rather than a 4.
const SPAWN_TWO_PROBABILITY: f64 = 0.9;

/// Result of sliding a single row toward the left edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowMove {
    /// The row after sliding and merging.
    pub row: u16,
    /// Score gained from merges in this row.
    pub score: u32,
}

/// Left-move lookup table, one entry per 16-bit row, initialized once.
static LEFT_TABLE: OnceLock<Vec<RowMove>> = OnceLock::new();

/// Right-move lookup table, derived from the left table by row reversal.
static RIGHT_TABLE: OnceLock<Vec<RowMove>> = OnceLock::new();

/// Forces construction of both row transition tables.
///
/// The tables are also built lazily on first use; calling this at program
/// start simply front-loads the cost.
pub fn init() {
    left_table();
    right_table();
}

fn left_table() -> &'static [RowMove] {
    LEFT_TABLE.get_or_init(|| {
        (0..ROW_CONFIGURATIONS)
            .map(|row| compute_row_left(row as u16))
            .collect()
    })
}

fn right_table() -> &'static [RowMove] {
    RIGHT_TABLE.get_or_init(|| {
        (0..ROW_CONFIGURATIONS)
            .map(|row| {
                let left = compute_row_left(reverse_row(row as u16));
                RowMove {
                    row: reverse_row(left.row),
                    score: left.score,
                }
            })
            .collect()
    })
}

/// Slides one row toward the left edge, merging adjacent equal tiles.
///
/// Non-empty tiles close up toward the left, then equal neighbors merge
/// pairwise left to right. Each tile participates in at most one merge,
/// and every merge of exponent `e` scores `2^(e+1)`.
///
/// This is the reference definition the lookup tables are built from.
pub fn compute_row_left(row: u16) -> RowMove {
    let tiles = [
        (row >> 12) & 0xF,
        (row >> 8) & 0xF,
        (row >> 4) & 0xF,
        row & 0xF,
    ];

    let non_empty: ArrayVec<u16, BOARD_SIZE> = tiles.into_iter().filter(|&t| t != 0).collect();

    let mut merged = ArrayVec::<u16, BOARD_SIZE>::new();
    let mut score = 0u32;
    let mut i = 0;
    while i < non_empty.len() {
        if i + 1 < non_empty.len() && non_empty[i] == non_empty[i + 1] {
            let value = non_empty[i] + 1;
            score += 1u32 << value;
            // Two 32768 tiles saturate instead of overflowing the nibble.
            merged.push(value.min(MAX_TILE_EXPONENT as u16));
            i += 2;
        } else {
            merged.push(non_empty[i]);
            i += 1;
        }
    }

    let mut new_row = 0u16;
    for (slot, tile) in merged.iter().enumerate() {
        new_row |= tile << (12 - 4 * slot);
    }

    RowMove {
        row: new_row,
        score,
    }
}

/// Reverses the four nibbles of a 16-bit row.
#[inline(always)]
pub const fn reverse_row(row: u16) -> u16 {
    ((row & 0xF) << 12) | (((row >> 4) & 0xF) << 8) | (((row >> 8) & 0xF) << 4) | (row >> 12)
}

/// Applies a move to the board.
///
/// # Arguments
///
/// * `board` - The board to slide.
/// * `direction` - The direction to slide toward.
///
/// # Returns
///
/// `Some((new_board, gained_score))` if at least one tile moved or merged,
/// `None` if the move is a no-op.
#[inline]
pub fn try_move(board: Board, direction: Direction) -> Option<(Board, u32)> {
    match direction {
        Direction::Left => slide_rows(board, left_table()),
        Direction::Right => slide_rows(board, right_table()),
        Direction::Up => {
            slide_rows(board.transpose(), left_table()).map(|(b, s)| (b.transpose(), s))
        }
        Direction::Down => {
            slide_rows(board.transpose(), right_table()).map(|(b, s)| (b.transpose(), s))
        }
    }
}

/// Applies a row table to all four rows of the board.
fn slide_rows(board: Board, table: &[RowMove]) -> Option<(Board, u32)> {
    let mut new_board = Board::EMPTY;
    let mut score = 0u32;
    let mut moved = false;

    for r in 0..BOARD_SIZE {
        let row = board.row(r);
        let entry = table[row as usize];
        new_board = new_board.with_row(r, entry.row);
        score += entry.score;
        if entry.row != row {
            moved = true;
        }
    }

    moved.then_some((new_board, score))
}

/// Spawns a random tile on a uniformly chosen empty cell.
///
/// The new tile is a 2 with probability 0.9 and a 4 otherwise. A full
/// board is returned unchanged.
pub fn spawn_random<R: Rng>(board: Board, rng: &mut R) -> Board {
    let empties: ArrayVec<u8, BOARD_CELLS> = (0..BOARD_CELLS)
        .filter(|&pos| board.tile(pos) == 0)
        .map(|pos| pos as u8)
        .collect();

    if empties.is_empty() {
        return board;
    }

    let pos = empties[rng.random_range(0..empties.len())];
    let exponent = if rng.random_bool(SPAWN_TWO_PROBABILITY) {
        1
    } else {
        2
    };
    board.with_tile(pos as usize, exponent)
}

/// Creates a starting board with two randomly spawned tiles.
pub fn make_initial<R: Rng>(rng: &mut R) -> Board {
    let board = spawn_random(Board::EMPTY, rng);
    spawn_random(board, rng)
}

/// Checks whether the board has no legal move left.
///
/// A board is terminal iff it has no empty cell and no pair of orthogonally
/// adjacent equal tiles.
pub fn is_terminal(board: Board) -> bool {
    if board.count_empty() > 0 {
        return false;
    }
    !(has_adjacent_pair(board) || has_adjacent_pair(board.transpose()))
}

/// Checks whether any row contains two horizontally adjacent equal nibbles.
fn has_adjacent_pair(board: Board) -> bool {
    (0..BOARD_SIZE).any(|r| {
        let row = board.row(r);
        (0..BOARD_SIZE - 1).any(|c| {
            let left = (row >> (12 - 4 * c)) & 0xF;
            let right = (row >> (8 - 4 * c)) & 0xF;
            left == right
        })
    })
}
