//! Core engine and n-tuple evaluation for 2048 self-play training.
//!
//! The crate packs a 4x4 board of tile exponents into a `u64`
//! ([`bitboard::Board`]), applies moves through precomputed 16-bit row
//! transition tables ([`slide`]), and evaluates positions with an n-tuple
//! network whose weight tables are shared across the eight dihedral
//! symmetries of the board ([`network::NTupleNetwork`]).

pub mod bitboard;
pub mod constants;
pub mod direction;
pub mod game_state;
pub mod network;
pub mod pattern;
pub mod slide;
pub mod weights;

/// Builds the precomputed row transition tables.
///
/// Optional: the tables are built lazily on first use. Calling this at
/// program start moves the one-time cost out of the first move.
pub fn init() {
    slide::init();
}
