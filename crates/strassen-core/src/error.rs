//! Error types for strassen-core.
//!
//! Every failure is detected eagerly, before any recursive work or trace entry,
//! so a failed call never yields a partial result.

use thiserror::Error;

/// Shape errors raised while validating multiplication inputs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DimensionError {
    /// A matrix has no rows (or its first row has no columns).
    #[error("matrix cannot be empty")]
    Empty,

    /// A row length differs from the number of rows.
    #[error("matrix must be square: row {row} has {len} elements, expected {expected}")]
    NotSquare {
        /// Zero-based index of the offending row.
        row: usize,
        /// Length of that row.
        len: usize,
        /// Number of rows in the matrix.
        expected: usize,
    },

    /// The flat buffer does not hold `n * n` elements.
    #[error("flat buffer of {len} elements does not describe a {n}x{n} matrix")]
    BadBuffer {
        /// Requested dimension.
        n: usize,
        /// Buffer length received.
        len: usize,
    },

    /// The two operands have different dimensions.
    #[error("matrices must be square and of same dimensions: {left}x{left} vs {right}x{right}")]
    Mismatch {
        /// Dimension of the left operand.
        left: usize,
        /// Dimension of the right operand.
        right: usize,
    },

    /// The shared dimension is not a power of two.
    #[error("matrix size must be a power of 2, got {n}x{n}")]
    NotPowerOfTwo {
        /// Offending dimension.
        n: usize,
    },
}

/// Top-level error returned by the engine and the method façade.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatrixError {
    /// Inputs are not equal-size square matrices of power-of-two dimension.
    #[error(transparent)]
    Dimension(#[from] DimensionError),

    /// The requested method name is not recognized.
    #[error("unsupported multiplication method: {method} (available: {available})")]
    UnsupportedMethod {
        /// Name as supplied by the caller.
        method: String,
        /// Comma-separated list of supported names.
        available: String,
    },
}

/// A trace line that does not render any known milestone.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized trace line: {0:?}")]
pub struct ParseStepError(pub String);
