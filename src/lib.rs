//! # nearstore
//!
//! In-process vector store with filtered nearest-neighbor search.
//!
//! Points are `(id, vector, payload)` records grouped into collections of a
//! fixed dimension and distance metric. Search filters candidates by payload
//! first, scores the rest against the query, and returns the best `limit`
//! hits in a deterministic order.
//!
//! ## Quick Start
//!
//! ```
//! use nearstore::prelude::*;
//!
//! let store = NearStore::new();
//! store.create_collection("cities", CollectionConfig::parse(4, "dot")?)?;
//! store.upsert(
//!     "cities",
//!     vec![
//!         PointStruct::new(1u64, vec![0.05, 0.61, 0.76, 0.74]).with_payload("city", "Berlin"),
//!         PointStruct::new(2u64, vec![0.19, 0.81, 0.75, 0.11]).with_payload("city", "London"),
//!     ],
//! )?;
//!
//! let request = SearchRequest::new(vec![0.2, 0.1, 0.9, 0.7], 3)
//!     .with_filter(Filter::must(vec![Filter::eq("city", "London")]));
//! let hits = store.search("cities", &request)?;
//! assert_eq!(hits.len(), 1);
//! assert_eq!(hits[0].id, PointId::Num(2));
//! # Ok::<(), nearstore::Error>(())
//! ```
//!
//! ## Crates
//!
//! - `nearstore-core`: points, metrics, filters, errors
//! - `nearstore-index`: collections and the brute-force index
//! - `nearstore-embed`: text embedders and document encoding
//! - `nearstore-executor`: serde commands and the JSON boundary

#![warn(missing_docs)]

mod config;
mod database;
mod error;

pub mod prelude;

// Re-export main entry points
pub use config::NearStoreConfig;
pub use database::{NearStore, NearStoreBuilder};
pub use error::{Error, Result};

// Re-export member crates
pub use nearstore_core;
pub use nearstore_embed;
pub use nearstore_executor;
pub use nearstore_index;
