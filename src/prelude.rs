//! Convenient imports for nearstore.
//!
//! ```
//! use nearstore::prelude::*;
//!
//! let store = NearStore::new();
//! store.create_collection("docs", CollectionConfig::for_minilm())?;
//! # Ok::<(), nearstore::Error>(())
//! ```

// Main entry point
pub use crate::config::NearStoreConfig;
pub use crate::database::{NearStore, NearStoreBuilder};

// Error handling
pub use crate::error::{Error, Result};

// Data model
pub use nearstore_core::{
    CollectionConfig, CollectionInfo, DistanceMetric, Filter, MatchValue, Payload, PointId,
    PointRecord, PointStruct, Range, SearchHit,
};

// Search
pub use nearstore_index::SearchRequest;

// Text
pub use nearstore_embed::{Embedder, HashingEmbedder};

// Caller boundary
pub use nearstore_executor::{Command, Executor, Output};

// Re-export serde_json for convenience
pub use serde_json::json;
