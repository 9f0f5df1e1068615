//! Error types for the `farmstead-world` crate.
//!
//! All fallible operations in this crate return [`FarmError`]. These are
//! programmer or data errors: every function here is pure, so retrying a
//! failed call reproduces the same error.

/// Errors raised by tile, grid, pattern, and yield computations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FarmError {
    /// A plot index outside `0..25`.
    #[error("invalid tile index: {0} (must be 0..24)")]
    InvalidTileIndex(usize),

    /// A `(row, col)` pair outside the 5x5 grid.
    #[error("invalid coordinates: row {row}, col {col} (must be 0..4)")]
    InvalidCoords {
        /// The requested row.
        row: usize,
        /// The requested column.
        col: usize,
    },

    /// A grid was built from the wrong number of tiles.
    #[error("expected {expected} tiles, got {actual}")]
    InvalidTileCount {
        /// Required tile count.
        expected: usize,
        /// Tiles supplied.
        actual: usize,
    },

    /// A raw crop value with no entry in the crop table.
    #[error("unknown crop type: {0}")]
    UnknownCropType(u8),

    /// Arithmetic overflow during a checked operation.
    #[error("arithmetic overflow in yield calculation")]
    ArithmeticOverflow,
}
