//! Error types for the similarity engine.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by the similarity engine.
///
/// Every failure is typed and surfaced to the caller. Nothing is retried
/// internally, and no operation returns a partially-computed result.
#[derive(Debug, Error)]
pub enum Error {
    /// A row had zero magnitude and cannot be scaled to unit length.
    #[error("cannot normalize a zero vector (row {row})")]
    ZeroVector { row: usize },

    /// Operand dimensions are incompatible for multiplication.
    #[error("shape mismatch: cannot multiply {lhs_rows}x{lhs_cols} by {rhs_rows}x{rhs_cols}")]
    ShapeMismatch {
        lhs_rows: usize,
        lhs_cols: usize,
        rhs_rows: usize,
        rhs_cols: usize,
    },

    /// Output buffer does not match the product's dimensions.
    #[error("output shape mismatch: expected {expected_rows}x{expected_cols}, got {actual_rows}x{actual_cols}")]
    OutputShape {
        expected_rows: usize,
        expected_cols: usize,
        actual_rows: usize,
        actual_cols: usize,
    },

    /// Block size cannot tile the operand dimensions.
    #[error("block size {block} must be positive and evenly divide dimensions {m}, {n}, and {k}")]
    InvalidBlockSize {
        block: usize,
        m: usize,
        n: usize,
        k: usize,
    },

    /// There are documents to embed but no vocabulary tokens to embed
    /// them against.
    #[error("cannot embed documents into an empty vocabulary")]
    EmptyVocabulary,

    /// The underlying data source could not be read.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
