//! Unified error type for nearstore.
//!
//! Wraps the errors of the member crates and presents one stable set of
//! kinds. [`Error::code`] gives the same wire codes the executor emits.

use nearstore_core::VectorError;
use nearstore_embed::EmbedError;
use thiserror::Error;

/// All nearstore errors.
#[derive(Debug, Error)]
pub enum Error {
    /// Collection or point does not exist
    #[error("not found: {0}")]
    NotFound(String),

    /// Invalid configuration (collection config, name, store config, embedder)
    #[error("config error: {0}")]
    Config(String),

    /// Vector length differs from the collection dimension
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Collection dimension
        expected: usize,
        /// Offending vector length
        got: usize,
    },

    /// Malformed filter expression
    #[error("invalid filter: {0}")]
    InvalidFilter(String),

    /// Vector with NaN or infinite components
    #[error("invalid vector: {0}")]
    InvalidVector(String),

    /// Collection already exists
    #[error("already exists: {0}")]
    AlreadyExists(String),

    /// Text or document could not be embedded
    #[error("embedding error: {0}")]
    Embedding(String),

    /// Request could not be decoded
    #[error("invalid command: {0}")]
    InvalidCommand(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Result type for nearstore operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Canonical wire code.
    pub fn code(&self) -> &'static str {
        match self {
            Error::NotFound(_) => "NotFound",
            Error::Config(_) => "ConfigError",
            Error::DimensionMismatch { .. } => "DimensionMismatch",
            Error::InvalidFilter(_) => "InvalidFilter",
            Error::InvalidVector(_) => "InvalidVector",
            Error::AlreadyExists(_) => "AlreadyExists",
            Error::Embedding(_) => "EmbeddingError",
            Error::InvalidCommand(_) => "InvalidCommand",
            Error::Io(_) => "IoError",
            Error::Serialization(_) => "SerializationError",
        }
    }

    /// Check if this is a not-found error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }

    /// Check if this is a configuration error.
    pub fn is_config_error(&self) -> bool {
        matches!(self, Error::Config(_))
    }

    /// Check if this is a dimension mismatch.
    pub fn is_dimension_mismatch(&self) -> bool {
        matches!(self, Error::DimensionMismatch { .. })
    }

    /// Check if this is a malformed filter.
    pub fn is_invalid_filter(&self) -> bool {
        matches!(self, Error::InvalidFilter(_))
    }

    /// Check if this is a duplicate collection.
    pub fn is_already_exists(&self) -> bool {
        matches!(self, Error::AlreadyExists(_))
    }
}

// Convert from vector store errors
impl From<VectorError> for Error {
    fn from(e: VectorError) -> Self {
        match e {
            VectorError::InvalidConfig { .. } | VectorError::InvalidCollectionName { .. } => {
                Error::Config(e.to_string())
            }
            VectorError::CollectionAlreadyExists { name } => Error::AlreadyExists(name),
            VectorError::CollectionNotFound { name } => {
                Error::NotFound(format!("collection {}", name))
            }
            VectorError::PointNotFound { id } => Error::NotFound(format!("point {}", id)),
            VectorError::DimensionMismatch { expected, got } => {
                Error::DimensionMismatch { expected, got }
            }
            VectorError::InvalidVector { reason } => Error::InvalidVector(reason),
            VectorError::InvalidFilter { reason } => Error::InvalidFilter(reason),
        }
    }
}

// Convert from embedding errors
impl From<EmbedError> for Error {
    fn from(e: EmbedError) -> Self {
        Error::Embedding(e.to_string())
    }
}

// Convert from executor errors
impl From<nearstore_executor::Error> for Error {
    fn from(e: nearstore_executor::Error) -> Self {
        use nearstore_executor::Error as ExecError;
        match e {
            ExecError::Vector(v) => v.into(),
            ExecError::Embed(em) => em.into(),
            ExecError::EmbedderUnavailable => Error::Config(e.to_string()),
            ExecError::InvalidCommand { reason } => Error::InvalidCommand(reason),
        }
    }
}

// Convert from serde_json errors
impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

// Malformed config files are configuration errors
impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::Config(e.to_string())
    }
}
