//! Executor errors and their wire form
//!
//! | Code | Meaning |
//! |------|---------|
//! | ConfigError | Bad collection config or name, or no embedder configured |
//! | DimensionMismatch | Vector length differs from the collection dimension |
//! | NotFound | Collection (or point, in strict mode) does not exist |
//! | InvalidFilter | Malformed filter expression |
//! | InvalidVector | NaN or infinite vector component |
//! | AlreadyExists | Collection name taken |
//! | EmbeddingError | Text or document could not be embedded |
//! | InvalidCommand | Request JSON does not describe a command |

use nearstore_core::VectorError;
use nearstore_embed::EmbedError;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;

/// Result type for executor operations
pub type Result<T> = std::result::Result<T, Error>;

/// Executor errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Error from the vector store
    #[error(transparent)]
    Vector(#[from] VectorError),

    /// Error from the embedder or document encoder
    #[error("embedding failed: {0}")]
    Embed(#[from] EmbedError),

    /// A text command was issued but no embedder is configured
    #[error("no embedder configured; text commands are unavailable")]
    EmbedderUnavailable,

    /// Request could not be decoded into a command
    #[error("invalid command: {reason}")]
    InvalidCommand {
        /// Decoder message
        reason: String,
    },
}

impl Error {
    /// Canonical wire code
    pub fn code(&self) -> &'static str {
        match self {
            Error::Vector(e) => e.code(),
            Error::Embed(_) => "EmbeddingError",
            Error::EmbedderUnavailable => "ConfigError",
            Error::InvalidCommand { .. } => "InvalidCommand",
        }
    }

    /// Structured context for the wire form, if any
    fn details(&self) -> Option<Value> {
        match self {
            Error::Vector(VectorError::DimensionMismatch { expected, got }) => {
                Some(json!({"expected": expected, "got": got}))
            }
            Error::Vector(VectorError::CollectionNotFound { name })
            | Error::Vector(VectorError::CollectionAlreadyExists { name }) => {
                Some(json!({"collection": name}))
            }
            Error::Vector(VectorError::PointNotFound { id }) => Some(json!({"id": id})),
            _ => None,
        }
    }

    /// Convert to the wire representation
    pub fn to_wire(&self) -> WireError {
        WireError {
            code: self.code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }
}

/// Wire error representation
///
/// ```json
/// {"code": "DimensionMismatch", "message": "dimension mismatch: expected 4, got 3",
///  "details": {"expected": 4, "got": 3}}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireError {
    /// Canonical error code
    pub code: String,
    /// Human-readable message
    pub message: String,
    /// Optional structured details
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}
