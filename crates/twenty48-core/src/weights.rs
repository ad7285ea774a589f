//! Serialized weight file format.
//!
//! This is the stable JSON contract shared with downstream consumers of the
//! trained network:
//!
//! ```json
//! { "version": 1,
//!   "patterns": [[0, 1, 2, 3], ...],
//!   "weights":  [[0.0, ...], ...],
//!   "metadata": null }
//! ```
//!
//! Consumers read only `version`, `patterns` and `weights`; `metadata` is an
//! opaque object the trainer uses for bookkeeping.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Current weight file format version.
pub const WEIGHTS_VERSION: u32 = 1;

/// On-disk representation of a trained network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightsFile {
    /// Format version, always 1.
    pub version: u32,
    /// Base pattern positions, one array per pattern.
    pub patterns: Vec<Vec<u8>>,
    /// Weight tables, one array of `16^len` entries per pattern.
    pub weights: Vec<Vec<f64>>,
    /// Opaque trainer bookkeeping, `null` when absent.
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
}

/// Error raised when a weight file does not match the network's catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WeightError {
    /// The file holds a different number of patterns than the network.
    PatternCountMismatch {
        /// Patterns in the network.
        expected: usize,
        /// Patterns in the file.
        actual: usize,
    },
    /// A pattern in the file has the wrong number of positions.
    PatternLengthMismatch {
        /// Index of the offending pattern.
        index: usize,
        /// Positions expected at this index.
        expected: usize,
        /// Positions found in the file.
        actual: usize,
    },
    /// The file holds a different number of weight tables than patterns.
    TableCountMismatch {
        /// Tables expected.
        expected: usize,
        /// Tables in the file.
        actual: usize,
    },
    /// A weight table has the wrong number of entries.
    TableSizeMismatch {
        /// Index of the offending table.
        index: usize,
        /// Entries expected (`16^len`).
        expected: usize,
        /// Entries found in the file.
        actual: usize,
    },
}

impl fmt::Display for WeightError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeightError::PatternCountMismatch { expected, actual } => {
                write!(f, "pattern count mismatch: expected {expected}, got {actual}")
            }
            WeightError::PatternLengthMismatch {
                index,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "pattern size mismatch at index {index}: expected {expected}, got {actual}"
                )
            }
            WeightError::TableCountMismatch { expected, actual } => {
                write!(
                    f,
                    "weight table count mismatch: expected {expected}, got {actual}"
                )
            }
            WeightError::TableSizeMismatch {
                index,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "weight table size mismatch for pattern {index}: expected {expected}, got {actual}"
                )
            }
        }
    }
}

impl std::error::Error for WeightError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_defaults_to_none() {
        let json = r#"{"version":1,"patterns":[[0,1]],"weights":[[0.0]]}"#;
        let file: WeightsFile = serde_json::from_str(json).unwrap();
        assert_eq!(file.metadata, None);
    }

    #[test]
    fn test_absent_metadata_serializes_as_null() {
        let file = WeightsFile {
            version: WEIGHTS_VERSION,
            patterns: vec![vec![0, 1, 2, 3]],
            weights: vec![vec![0.0; 4]],
            metadata: None,
        };
        let json = serde_json::to_string(&file).unwrap();
        assert!(json.contains(r#""metadata":null"#));
    }

    #[test]
    fn test_json_round_trip() {
        let file = WeightsFile {
            version: WEIGHTS_VERSION,
            patterns: vec![vec![0, 1, 2, 3], vec![0, 4, 8, 12]],
            weights: vec![vec![1.5, -2.25], vec![0.0, 4.0]],
            metadata: Some(serde_json::json!({ "trainedGames": 10 })),
        };
        let json = serde_json::to_string(&file).unwrap();
        let parsed: WeightsFile = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, file);
    }

    #[test]
    fn test_error_messages_name_the_mismatch() {
        let err = WeightError::TableSizeMismatch {
            index: 2,
            expected: 65_536,
            actual: 10,
        };
        let message = err.to_string();
        assert!(message.contains("pattern 2"));
        assert!(message.contains("65536"));
    }
}
