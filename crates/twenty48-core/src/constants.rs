//! Global constants

/// Board side length.
pub const BOARD_SIZE: usize = 4;

/// Number of cells on the 2048 board.
pub const BOARD_CELLS: usize = 16;

/// Number of bits used to encode one tile exponent.
pub const TILE_BITS: usize = 4;

/// Largest representable tile exponent (tile value 32768).
pub const MAX_TILE_EXPONENT: u8 = 15;

/// Number of distinct 16-bit row configurations.
pub const ROW_CONFIGURATIONS: usize = 1 << 16;

/// Number of dihedral symmetries of the square board.
pub const NUM_SYMMETRIES: usize = 8;
