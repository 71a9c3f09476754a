//! Index backend trait
//!
//! Defines the interface for swappable vector index implementations. The
//! only backend today is [`BruteForceBackend`](crate::brute_force::BruteForceBackend),
//! which scores every candidate and is the reference for result ordering.
//!
//! Payloads never reach the backend. Filtering is passed in as an `accept`
//! predicate over point ids so an approximate backend can apply it during
//! traversal instead of after.

use crate::brute_force::BruteForceBackend;
use nearstore_core::{CollectionConfig, DistanceMetric, PointId, VectorResult};

/// Predicate deciding whether a point id is a search candidate
pub type AcceptFn<'a> = dyn Fn(&PointId) -> bool + 'a;

/// Trait for swappable vector index implementations
///
/// Do not add methods that assume exhaustive storage (like iterating every
/// vector); id ordering lives in the collection, not here.
pub trait VectorIndexBackend: Send + Sync {
    /// Insert a vector (upsert semantics)
    ///
    /// If the id already exists, the embedding is replaced.
    fn insert(&mut self, id: PointId, embedding: &[f32]) -> VectorResult<()>;

    /// Delete a vector
    ///
    /// Returns true if the vector existed and was deleted.
    fn delete(&mut self, id: &PointId) -> bool;

    /// Search for the `k` best candidates accepted by `accept`
    ///
    /// Returns `(id, score)` pairs with raw metric scores, ordered best-first
    /// in the metric's direction, ties broken by ascending id.
    fn search(&self, query: &[f32], k: usize, accept: &AcceptFn<'_>) -> Vec<(PointId, f32)>;

    /// Number of indexed vectors
    fn len(&self) -> usize;

    /// Check if empty
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Embedding dimension
    fn dimension(&self) -> usize;

    /// Distance metric
    fn metric(&self) -> DistanceMetric;

    /// Get a stored vector by id
    fn get(&self, id: &PointId) -> Option<&[f32]>;

    /// Check if a vector exists
    fn contains(&self, id: &PointId) -> bool;

    /// Drop every vector
    fn clear(&mut self);
}

/// Factory for creating index backends
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IndexBackendFactory {
    /// Exhaustive O(n) search
    #[default]
    BruteForce,
}

impl IndexBackendFactory {
    /// Create a new backend instance
    pub fn create(&self, config: &CollectionConfig) -> Box<dyn VectorIndexBackend> {
        match self {
            IndexBackendFactory::BruteForce => Box::new(BruteForceBackend::new(config)),
        }
    }
}
