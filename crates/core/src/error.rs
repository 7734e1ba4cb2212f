//! Error types for the board engine.
//!
//! Restoring a saved session is the only operation that can fail. Swipes and
//! resets are total over a valid engine.

use thiserror::Error;

use crate::types::Position;

/// A restore payload or engine configuration was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The payload had no rows at all.
    #[error("grid has no rows")]
    Empty,
    /// The board is smaller than the engine supports.
    #[error("grid size {size} is below the minimum of {min}")]
    TooSmall { size: usize, min: usize },
    /// The board is larger than the engine supports.
    #[error("grid size {size} is above the maximum of {max}")]
    TooLarge { size: usize, max: usize },
    /// A row's length differs from the number of rows.
    #[error("row {row} has {len} cells, expected {expected}")]
    NotSquare {
        row: usize,
        len: usize,
        expected: usize,
    },
    /// The payload is square but does not match the engine's board size.
    #[error("grid is {actual}x{actual}, engine board is {expected}x{expected}")]
    SizeMismatch { expected: usize, actual: usize },
    /// A cell is negative, or positive but not a power of two.
    #[error("invalid tile value {value} at {at}")]
    InvalidTile { at: Position, value: i64 },
    /// An engine setting is out of range.
    #[error("invalid config: {0}")]
    Config(&'static str),
}
