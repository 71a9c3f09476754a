//! Embedding errors

use thiserror::Error;

/// Result type for embedding operations
pub type EmbedResult<T> = Result<T, EmbedError>;

/// Errors raised while turning text or documents into vectors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmbedError {
    /// Embedder configured with an unusable dimension
    #[error("invalid embedder dimension {dimension}: must be positive")]
    InvalidDimension {
        /// Requested dimension
        dimension: usize,
    },

    /// Document is not an object or has no string text field
    #[error("document {index}: missing string field '{field}'")]
    MissingField {
        /// Position of the document in the input
        index: usize,
        /// Name of the text field
        field: String,
    },

    /// Embedder produced a vector of the wrong length
    #[error("embedder returned {got} components, expected {expected}")]
    OutputMismatch {
        /// Declared dimension
        expected: usize,
        /// Actual output length
        got: usize,
    },

    /// `start_id + index` does not fit in a point id
    #[error("document {index}: id {start_id} + {index} exceeds u64::MAX")]
    IdOverflow {
        /// First id of the batch
        start_id: u64,
        /// Position of the document in the input
        index: usize,
    },
}
