//! Error types for the SOM clustering kernel.

use thiserror::Error;

/// The main error type for clustering operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SomError {
    /// Invalid construction parameters.
    #[error("Configuration error: {0}")]
    Config(String),

    /// An input vector does not have the expected dimensionality.
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// The dimensionality the engine or bounds were built for.
        expected: usize,
        /// The length of the offending vector.
        actual: usize,
    },

    /// A training value is NaN or infinite.
    #[error("Non-finite value {value} at record {record}, feature {feature}")]
    NonFinite {
        /// Position of the record in the input.
        record: usize,
        /// Feature index within the record.
        feature: usize,
        /// The offending value.
        value: f64,
    },

    /// Empty input.
    #[error("Empty input: {0}")]
    EmptyInput(String),

    /// Training error.
    #[error("Training error: {0}")]
    Training(String),

    /// A restored weight tensor or model is inconsistent with its parameters.
    #[error("Invalid snapshot: {0}")]
    Snapshot(String),
}

/// Result type alias for clustering operations.
pub type Result<T> = std::result::Result<T, SomError>;

/// Checks that `actual` matches `expected`.
#[inline]
pub(crate) fn check_dimension(expected: usize, actual: usize) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(SomError::DimensionMismatch { expected, actual })
    }
}
