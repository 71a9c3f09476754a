//! Error types for vector operations
//!
//! Every variant maps onto one stable wire code via [`VectorError::code`].
//! The codes group the variants into the kinds callers branch on:
//!
//! | Code | Variants |
//! |------|----------|
//! | `ConfigError` | `InvalidConfig`, `InvalidCollectionName` |
//! | `DimensionMismatch` | `DimensionMismatch` |
//! | `NotFound` | `CollectionNotFound`, `PointNotFound` |
//! | `InvalidFilter` | `InvalidFilter` |
//! | `InvalidVector` | `InvalidVector` |
//! | `AlreadyExists` | `CollectionAlreadyExists` |

use crate::types::PointId;
use thiserror::Error;

/// Result type for vector operations
pub type VectorResult<T> = Result<T, VectorError>;

/// Vector store errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum VectorError {
    /// Collection configuration rejected (zero dimension, unknown metric, limits)
    #[error("invalid collection config: {reason}")]
    InvalidConfig {
        /// Why the configuration was rejected
        reason: String,
    },

    /// Collection name rejected
    #[error("invalid collection name '{name}': {reason}")]
    InvalidCollectionName {
        /// The rejected name
        name: String,
        /// Why the name was rejected
        reason: String,
    },

    /// Collection with this name already exists
    #[error("collection already exists: {name}")]
    CollectionAlreadyExists {
        /// Collection name
        name: String,
    },

    /// Collection does not exist
    #[error("collection not found: {name}")]
    CollectionNotFound {
        /// Collection name
        name: String,
    },

    /// Point does not exist (strict retrieval only)
    #[error("point not found: {id}")]
    PointNotFound {
        /// Missing point id
        id: PointId,
    },

    /// Vector length disagrees with the collection dimension
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Collection dimension
        expected: usize,
        /// Length of the offending vector
        got: usize,
    },

    /// Vector contains NaN or infinite components
    #[error("invalid vector: {reason}")]
    InvalidVector {
        /// What is wrong with the vector
        reason: String,
    },

    /// Malformed filter expression
    #[error("invalid filter: {reason}")]
    InvalidFilter {
        /// What is wrong with the filter
        reason: String,
    },
}

impl VectorError {
    /// Shorthand for an [`VectorError::InvalidFilter`]
    pub fn invalid_filter(reason: impl Into<String>) -> Self {
        VectorError::InvalidFilter {
            reason: reason.into(),
        }
    }

    /// Shorthand for an [`VectorError::InvalidConfig`]
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        VectorError::InvalidConfig {
            reason: reason.into(),
        }
    }

    /// Canonical wire code for this error
    pub fn code(&self) -> &'static str {
        match self {
            VectorError::InvalidConfig { .. } | VectorError::InvalidCollectionName { .. } => {
                "ConfigError"
            }
            VectorError::CollectionAlreadyExists { .. } => "AlreadyExists",
            VectorError::CollectionNotFound { .. } | VectorError::PointNotFound { .. } => {
                "NotFound"
            }
            VectorError::DimensionMismatch { .. } => "DimensionMismatch",
            VectorError::InvalidVector { .. } => "InvalidVector",
            VectorError::InvalidFilter { .. } => "InvalidFilter",
        }
    }

    /// Check if this is a not-found error (collection or point)
    pub fn is_not_found(&self) -> bool {
        self.code() == "NotFound"
    }

    /// Check if this is a configuration error
    pub fn is_config_error(&self) -> bool {
        self.code() == "ConfigError"
    }

    /// Check if this is a dimension mismatch
    pub fn is_dimension_mismatch(&self) -> bool {
        matches!(self, VectorError::DimensionMismatch { .. })
    }
}
