//! Store configuration.
//!
//! Loaded from TOML:
//!
//! ```toml
//! strict_ids = false
//! max_dimension = 65536
//!
//! [embedder]
//! dimension = 384
//! seed = 0
//! ```
//!
//! Every key is optional. Without an `[embedder]` table, text search and
//! document upload are unavailable.

use crate::error::{Error, Result};
use nearstore_embed::HashingConfig;
use nearstore_index::{StoreOptions, DEFAULT_MAX_DIMENSION};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level configuration for [`NearStore`](crate::NearStore).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NearStoreConfig {
    /// Retrieval of unknown ids fails with `NotFound` instead of skipping
    pub strict_ids: bool,

    /// Largest collection dimension accepted
    pub max_dimension: usize,

    /// Hashing embedder settings; `None` disables text operations
    #[serde(skip_serializing_if = "Option::is_none")]
    pub embedder: Option<HashingConfig>,
}

impl Default for NearStoreConfig {
    fn default() -> Self {
        NearStoreConfig {
            strict_ids: false,
            max_dimension: DEFAULT_MAX_DIMENSION,
            embedder: None,
        }
    }
}

impl NearStoreConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: NearStoreConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<()> {
        if self.max_dimension == 0 {
            return Err(Error::Config("max_dimension must be positive".into()));
        }
        if let Some(embedder) = &self.embedder {
            if embedder.dimension == 0 {
                return Err(Error::Config("embedder.dimension must be positive".into()));
            }
            if embedder.dimension > self.max_dimension {
                return Err(Error::Config(format!(
                    "embedder.dimension {} exceeds max_dimension {}",
                    embedder.dimension, self.max_dimension
                )));
            }
        }
        Ok(())
    }

    /// Options for the underlying vector store.
    pub fn store_options(&self) -> StoreOptions {
        StoreOptions {
            strict_ids: self.strict_ids,
            max_dimension: self.max_dimension,
        }
    }
}
