//! Error type shared by every fallible operation in the library.

use thiserror::Error;

/// Configuration errors and precondition violations.
///
/// Degenerate piece sets and zero/one/many-solution results are outcomes,
/// not errors, and never show up here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PuzzleError {
    /// The grid is too small to have corners, or too large for the solver's piece pool.
    #[error("invalid grid size {width}x{height} (each side must be at least 2, at most 128 cells)")]
    InvalidDimensions { width: usize, height: usize },

    /// The edge supply cannot cover every internal boundary.
    #[error("edge supply too small: {needed} boundaries but only {available} edge uses")]
    InsufficientSupply { needed: usize, available: usize },

    /// A draw found no class with remaining supply.
    #[error("edge supply exhausted at boundary {boundary}")]
    SupplyExhausted { boundary: usize },

    /// A piece set does not have one piece per grid cell.
    #[error("expected {expected} pieces, got {actual}")]
    PieceCount { expected: usize, actual: usize },

    /// Piece numbers must run from 1 to the piece count without repeats.
    #[error("piece number {number} is out of range or repeated")]
    PieceNumber { number: usize },

    /// Any other rejected setting.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
