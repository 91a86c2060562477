//! Error types for hera-vector.

use thiserror::Error;

/// Result type for hera-vector operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in hera-vector operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Dimension mismatch between a vector and the index.
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimensions.
        expected: usize,
        /// Actual dimensions provided.
        actual: usize,
    },

    /// Invalid vector (e.g., empty, contains NaN).
    #[error("Invalid vector: {0}")]
    InvalidVector(String),

    /// Invalid search parameter (e.g., k == 0).
    #[error("Invalid search parameter: {0}")]
    InvalidSearch(String),

    /// Unknown distance metric name.
    #[error("Unknown distance metric '{0}'")]
    UnknownMetric(String),

    /// Persistence error (serialization, malformed artifact, etc.).
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
