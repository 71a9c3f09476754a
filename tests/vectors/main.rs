//! Vector Store Integration Test Suite
//!
//! Exercises the public `NearStore` API end to end.
//!
//! ## Running Tests
//!
//! ```bash
//! # Run all vector tests
//! cargo test --test vectors
//!
//! # Run filter tests only
//! cargo test --test vectors filters::
//! ```

use nearstore::prelude::*;

// Test modules
pub mod basic_ops;
pub mod concurrency;
pub mod edge_cases;
pub mod filters;

// =============================================================================
// SHARED TEST UTILITIES
// =============================================================================

/// Route `tracing` output through the test harness
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// The query used against [`cities_store`]
pub const CITY_QUERY: [f32; 4] = [0.2, 0.1, 0.9, 0.7];

/// Store with a 4-d dot-product "cities" collection of six points
pub fn cities_store() -> NearStore {
    init_tracing();
    let store = NearStore::new();
    store
        .create_collection("test_collection", CollectionConfig::parse(4, "dot").unwrap())
        .unwrap();
    store
        .upsert("test_collection", city_points())
        .unwrap();
    store
}

/// The six city points
pub fn city_points() -> Vec<PointStruct> {
    vec![
        PointStruct::new(1u64, vec![0.05, 0.61, 0.76, 0.74]).with_payload("city", "Berlin"),
        PointStruct::new(2u64, vec![0.19, 0.81, 0.75, 0.11]).with_payload("city", "London"),
        PointStruct::new(3u64, vec![0.36, 0.55, 0.47, 0.94]).with_payload("city", "Moscow"),
        PointStruct::new(4u64, vec![0.18, 0.01, 0.85, 0.80]).with_payload("city", "New York"),
        PointStruct::new(5u64, vec![0.24, 0.18, 0.22, 0.44]).with_payload("city", "Beijing"),
        PointStruct::new(6u64, vec![0.35, 0.08, 0.11, 0.44]).with_payload("city", "Mumbai"),
    ]
}

/// Ids of hits, in order
pub fn hit_ids(hits: &[SearchHit]) -> Vec<PointId> {
    hits.iter().map(|h| h.id.clone()).collect()
}

/// Shorthand for numeric ids
pub fn ids(raw: &[u64]) -> Vec<PointId> {
    raw.iter().map(|&n| PointId::Num(n)).collect()
}
