//! Tuple patterns and the dihedral symmetries of the board.
//!
//! An n-tuple pattern is an ordered list of board positions; the tile
//! exponents found at those positions, read in pattern order, form a
//! base-16 index into the pattern's weight table. Each base pattern is
//! expanded into its eight images under the dihedral group of the square
//! (four rotations, each optionally mirrored), and all eight images share
//! the base pattern's table.

use crate::bitboard::Board;
use crate::constants::{BOARD_CELLS, BOARD_SIZE, NUM_SYMMETRIES, TILE_BITS};

/// One of the eight dihedral transforms of the 4x4 board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Symmetry {
    Identity,
    Rot90,
    Rot180,
    Rot270,
    Mirror,
    MirrorRot90,
    MirrorRot180,
    MirrorRot270,
}

impl Symmetry {
    /// All eight transforms, identity first.
    pub const ALL: [Symmetry; NUM_SYMMETRIES] = [
        Symmetry::Identity,
        Symmetry::Rot90,
        Symmetry::Rot180,
        Symmetry::Rot270,
        Symmetry::Mirror,
        Symmetry::MirrorRot90,
        Symmetry::MirrorRot180,
        Symmetry::MirrorRot270,
    ];

    /// Maps a board position through this transform.
    #[inline(always)]
    pub fn apply(self, pos: u8) -> u8 {
        SYMMETRY_MAP[self as usize][pos as usize]
    }
}

/// Rotates a position 90 degrees clockwise: (r, c) -> (c, 3 - r).
const fn rotate90(pos: usize) -> usize {
    let r = pos / BOARD_SIZE;
    let c = pos % BOARD_SIZE;
    c * BOARD_SIZE + (BOARD_SIZE - 1 - r)
}

/// Mirrors a position horizontally: (r, c) -> (r, 3 - c).
const fn mirror(pos: usize) -> usize {
    let r = pos / BOARD_SIZE;
    let c = pos % BOARD_SIZE;
    r * BOARD_SIZE + (BOARD_SIZE - 1 - c)
}

/// Generates the position lookup table for all eight transforms at compile
/// time. Mirrored variants apply the mirror first, then the rotation.
const fn generate_symmetry_map() -> [[u8; BOARD_CELLS]; NUM_SYMMETRIES] {
    let mut map = [[0u8; BOARD_CELLS]; NUM_SYMMETRIES];
    let mut pos = 0;
    while pos < BOARD_CELLS {
        map[0][pos] = pos as u8;
        map[1][pos] = rotate90(pos) as u8;
        map[2][pos] = rotate90(rotate90(pos)) as u8;
        map[3][pos] = rotate90(rotate90(rotate90(pos))) as u8;
        map[4][pos] = mirror(pos) as u8;
        map[5][pos] = rotate90(mirror(pos)) as u8;
        map[6][pos] = rotate90(rotate90(mirror(pos))) as u8;
        map[7][pos] = rotate90(rotate90(rotate90(mirror(pos)))) as u8;
        pos += 1;
    }
    map
}

/// Position lookup table indexed by (transform, original position).
const SYMMETRY_MAP: [[u8; BOARD_CELLS]; NUM_SYMMETRIES] = generate_symmetry_map();

/// Applies a transform to every cell of a board.
///
/// The tile at position `p` ends up at position `symmetry.apply(p)`, so
/// pattern indices and board transforms stay consistent with each other.
pub fn transform_board(board: Board, symmetry: Symmetry) -> Board {
    let mut out = Board::EMPTY;
    for pos in 0..BOARD_CELLS {
        out = out.with_tile(symmetry.apply(pos as u8) as usize, board.tile(pos));
    }
    out
}

/// An ordered set of board positions indexing one weight table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    positions: Vec<u8>,
}

impl Pattern {
    /// Creates a pattern from a list of distinct board positions.
    pub fn new(positions: Vec<u8>) -> Self {
        debug_assert!(positions.iter().all(|&p| (p as usize) < BOARD_CELLS));
        debug_assert!(
            (1..positions.len()).all(|i| !positions[..i].contains(&positions[i])),
            "pattern positions must be distinct"
        );
        Self { positions }
    }

    /// Returns the positions in pattern order.
    #[inline(always)]
    pub fn positions(&self) -> &[u8] {
        &self.positions
    }

    /// Returns the number of positions in the pattern.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Returns `true` if the pattern covers no positions.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Returns the weight table size for this pattern, `16^len`.
    #[inline(always)]
    pub fn table_size(&self) -> usize {
        1usize << (TILE_BITS * self.positions.len())
    }

    /// Returns the image of this pattern under a transform.
    pub fn transformed(&self, symmetry: Symmetry) -> Pattern {
        Pattern {
            positions: self.positions.iter().map(|&p| symmetry.apply(p)).collect(),
        }
    }

    /// Extracts the tuple index for this pattern on the given board.
    ///
    /// The tile exponents at the pattern's positions are read in order and
    /// interpreted as a base-16 number, most significant digit first.
    #[inline(always)]
    pub fn index(&self, board: Board) -> usize {
        self.positions
            .iter()
            .fold(0usize, |index, &p| (index << 4) | board.tile(p as usize) as usize)
    }
}

/// The built-in pattern catalogs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Catalog {
    /// The four rows and four columns as 4-tuples (the training default).
    #[default]
    RowCol4,
    /// Six overlapping 2x3 rectangles as 6-tuples.
    Rectangle6,
    /// Four 2x3 corner blocks as 6-tuples.
    Corner6,
    /// The standard ten-pattern 6-tuple set.
    Standard10,
}

const ROW_COL_4TUPLE: [[u8; 4]; 8] = [
    [0, 1, 2, 3],
    [4, 5, 6, 7],
    [8, 9, 10, 11],
    [12, 13, 14, 15],
    [0, 4, 8, 12],
    [1, 5, 9, 13],
    [2, 6, 10, 14],
    [3, 7, 11, 15],
];

const RECTANGLE_6TUPLE: [[u8; 6]; 6] = [
    [0, 1, 2, 4, 5, 6],
    [1, 2, 3, 5, 6, 7],
    [4, 5, 6, 8, 9, 10],
    [5, 6, 7, 9, 10, 11],
    [8, 9, 10, 12, 13, 14],
    [9, 10, 11, 13, 14, 15],
];

const CORNER_6TUPLE: [[u8; 6]; 4] = [
    [0, 1, 4, 5, 8, 9],
    [2, 3, 6, 7, 10, 11],
    [4, 5, 8, 9, 12, 13],
    [6, 7, 10, 11, 14, 15],
];

const STANDARD_6TUPLE: [[u8; 6]; 10] = [
    [0, 1, 2, 4, 5, 6],
    [4, 5, 6, 8, 9, 10],
    [1, 2, 3, 5, 6, 7],
    [5, 6, 7, 9, 10, 11],
    [8, 9, 10, 12, 13, 14],
    [9, 10, 11, 13, 14, 15],
    [0, 1, 4, 5, 8, 9],
    [2, 3, 6, 7, 10, 11],
    [4, 5, 8, 9, 12, 13],
    [6, 7, 10, 11, 14, 15],
];

impl Catalog {
    /// Returns the base patterns of this catalog.
    pub fn patterns(self) -> Vec<Pattern> {
        fn build<const N: usize>(cells: &[[u8; N]]) -> Vec<Pattern> {
            cells.iter().map(|p| Pattern::new(p.to_vec())).collect()
        }

        match self {
            Catalog::RowCol4 => build(&ROW_COL_4TUPLE),
            Catalog::Rectangle6 => build(&RECTANGLE_6TUPLE),
            Catalog::Corner6 => build(&CORNER_6TUPLE),
            Catalog::Standard10 => build(&STANDARD_6TUPLE),
        }
    }
}
