//! N-tuple network evaluation and update.
//!
//! The network's value for a board is the sum, over every base pattern and
//! each of its eight symmetric placements, of one weight table entry. All
//! eight placements of a base pattern share that pattern's table (tied
//! weights), which makes the value function invariant under the dihedral
//! symmetries of the board.

use crate::bitboard::Board;
use crate::pattern::{Catalog, Pattern, Symmetry};
use crate::weights::{WEIGHTS_VERSION, WeightError, WeightsFile};

/// A sum of symmetric lookup tables over tuple patterns.
#[derive(Debug, Clone)]
pub struct NTupleNetwork {
    /// Base patterns, in catalog order.
    patterns: Vec<Pattern>,
    /// The eight symmetric placements of each base pattern.
    symmetric: Vec<Vec<Pattern>>,
    /// One weight table of `16^len` entries per base pattern.
    weights: Vec<Vec<f64>>,
}

impl NTupleNetwork {
    /// Creates a zero-initialized network over the given base patterns.
    pub fn new(patterns: Vec<Pattern>) -> Self {
        let symmetric = patterns
            .iter()
            .map(|pattern| {
                Symmetry::ALL
                    .iter()
                    .map(|&symmetry| pattern.transformed(symmetry))
                    .collect()
            })
            .collect();
        let weights = patterns
            .iter()
            .map(|pattern| vec![0.0; pattern.table_size()])
            .collect();
        Self {
            patterns,
            symmetric,
            weights,
        }
    }

    /// Creates a zero-initialized network from a built-in catalog.
    pub fn from_catalog(catalog: Catalog) -> Self {
        Self::new(catalog.patterns())
    }

    /// Returns the base patterns.
    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    /// Returns the weight tables, one per base pattern.
    pub fn weights(&self) -> &[Vec<f64>] {
        &self.weights
    }

    /// Evaluates the board: the sum of one table entry per symmetric
    /// placement of every base pattern.
    pub fn evaluate(&self, board: Board) -> f64 {
        let mut total = 0.0;
        for (placements, table) in self.symmetric.iter().zip(&self.weights) {
            for placement in placements {
                total += table[placement.index(board)];
            }
        }
        total
    }

    /// Adds `delta` to every table entry that [`evaluate`](Self::evaluate)
    /// reads for this board.
    ///
    /// Updating all symmetric placements with the same delta keeps the
    /// value function invariant under board symmetries.
    pub fn update(&mut self, board: Board, delta: f64) {
        for (placements, table) in self.symmetric.iter().zip(&mut self.weights) {
            for placement in placements {
                table[placement.index(board)] += delta;
            }
        }
    }

    /// Fills every weight with an optimistic initial value.
    ///
    /// High initial evaluations encourage early exploration of novel
    /// states.
    pub fn init_optimistic(&mut self, value: f64) {
        for table in &mut self.weights {
            table.fill(value);
        }
    }

    /// Exports the network in the stable weight file format.
    pub fn export(&self, metadata: Option<serde_json::Value>) -> WeightsFile {
        WeightsFile {
            version: WEIGHTS_VERSION,
            patterns: self
                .patterns
                .iter()
                .map(|pattern| pattern.positions().to_vec())
                .collect(),
            weights: self.weights.clone(),
            metadata,
        }
    }

    /// Replaces the network's weights with those from a weight file.
    ///
    /// # Errors
    ///
    /// Returns a [`WeightError`] and leaves the network untouched when the
    /// file's patterns or table shapes do not match this network.
    pub fn import(&mut self, file: WeightsFile) -> Result<(), WeightError> {
        if file.patterns.len() != self.patterns.len() {
            return Err(WeightError::PatternCountMismatch {
                expected: self.patterns.len(),
                actual: file.patterns.len(),
            });
        }
        for (index, (pattern, loaded)) in self.patterns.iter().zip(&file.patterns).enumerate() {
            if loaded.len() != pattern.len() {
                return Err(WeightError::PatternLengthMismatch {
                    index,
                    expected: pattern.len(),
                    actual: loaded.len(),
                });
            }
        }
        if file.weights.len() != self.patterns.len() {
            return Err(WeightError::TableCountMismatch {
                expected: self.patterns.len(),
                actual: file.weights.len(),
            });
        }
        for (index, (pattern, table)) in self.patterns.iter().zip(&file.weights).enumerate() {
            if table.len() != pattern.table_size() {
                return Err(WeightError::TableSizeMismatch {
                    index,
                    expected: pattern.table_size(),
                    actual: table.len(),
                });
            }
        }

        self.weights = file.weights;
        Ok(())
    }
}
