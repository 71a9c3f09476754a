//! Vector collections and nearest-neighbor search
//!
//! - **VectorIndexBackend**: Trait for swappable index implementations
//! - **BruteForceBackend**: O(n) exhaustive search, deterministic ordering
//! - **Collection**: One collection's points, payloads and operations
//! - **VectorStore**: Thread-safe registry of named collections

#![warn(missing_docs)]

pub mod backend;
pub mod brute_force;
pub mod collection;
pub mod search;
pub mod store;

pub use backend::{AcceptFn, IndexBackendFactory, VectorIndexBackend};
pub use brute_force::BruteForceBackend;
pub use collection::{validate_collection_name, Collection, MAX_COLLECTION_NAME_LEN};
pub use search::SearchRequest;
pub use store::{StoreOptions, VectorStore, DEFAULT_MAX_DIMENSION};
