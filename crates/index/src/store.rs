//! VectorStore: named collections and the operations on them
//!
//! ## Design
//!
//! The store holds a registry `RwLock<BTreeMap<String, Arc<RwLock<Collection>>>>`.
//! The outer lock is held only long enough to find, add or remove a
//! collection; operations then lock the one collection they touch. Searches
//! share that lock; upsert and delete batches hold it exclusively for the
//! whole batch, so readers never observe a partial write.
//!
//! BTreeMap keeps `list_collections` in name order.
//!
//! ## Thread Safety
//!
//! VectorStore is `Send + Sync` and can be shared across threads behind an `Arc`.

use crate::backend::IndexBackendFactory;
use crate::collection::Collection;
use crate::search::SearchRequest;
use nearstore_core::{
    CollectionConfig, CollectionInfo, Filter, PointId, PointRecord, PointStruct, SearchHit,
    VectorError, VectorResult,
};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Largest dimension accepted by default
pub const DEFAULT_MAX_DIMENSION: usize = 65_536;

/// Store-wide behavior switches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreOptions {
    /// `retrieve` fails with `PointNotFound` instead of skipping unknown ids
    pub strict_ids: bool,
    /// Upper bound on collection dimension
    pub max_dimension: usize,
}

impl Default for StoreOptions {
    fn default() -> Self {
        StoreOptions {
            strict_ids: false,
            max_dimension: DEFAULT_MAX_DIMENSION,
        }
    }
}

type SharedCollection = Arc<RwLock<Collection>>;

/// In-memory vector store
///
/// # Example
///
/// ```
/// use nearstore_core::{CollectionConfig, DistanceMetric, PointStruct};
/// use nearstore_index::{SearchRequest, VectorStore};
///
/// let store = VectorStore::new();
/// store
///     .create_collection("cities", CollectionConfig::new(2, DistanceMetric::Dot).unwrap())
///     .unwrap();
/// store
///     .upsert("cities", vec![PointStruct::new(1u64, vec![1.0, 0.0])])
///     .unwrap();
/// let hits = store
///     .search("cities", &SearchRequest::new(vec![1.0, 0.0], 1))
///     .unwrap();
/// assert_eq!(hits.len(), 1);
/// ```
pub struct VectorStore {
    collections: RwLock<BTreeMap<String, SharedCollection>>,
    backend_factory: IndexBackendFactory,
    options: StoreOptions,
}

impl Default for VectorStore {
    fn default() -> Self {
        Self::new()
    }
}

impl VectorStore {
    /// Create an empty store with default options
    pub fn new() -> Self {
        Self::with_options(StoreOptions::default())
    }

    /// Create an empty store
    pub fn with_options(options: StoreOptions) -> Self {
        Self::with_backend_factory(options, IndexBackendFactory::default())
    }

    /// Create an empty store with a custom backend factory
    pub fn with_backend_factory(options: StoreOptions, factory: IndexBackendFactory) -> Self {
        VectorStore {
            collections: RwLock::new(BTreeMap::new()),
            backend_factory: factory,
            options,
        }
    }

    /// Store options
    pub fn options(&self) -> &StoreOptions {
        &self.options
    }

    fn collection(&self, name: &str) -> VectorResult<SharedCollection> {
        self.collections
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| VectorError::CollectionNotFound {
                name: name.to_string(),
            })
    }

    fn check_limits(&self, config: &CollectionConfig) -> VectorResult<()> {
        config.validate()?;
        if config.dimension > self.options.max_dimension {
            return Err(VectorError::invalid_config(format!(
                "dimension {} exceeds maximum {}",
                config.dimension, self.options.max_dimension
            )));
        }
        Ok(())
    }

    // ========================================================================
    // Collection Management
    // ========================================================================

    /// Create a new collection
    ///
    /// # Errors
    /// - `InvalidCollectionName` if the name is invalid
    /// - `InvalidConfig` if the dimension is 0 or above `max_dimension`
    /// - `CollectionAlreadyExists` if the name is taken
    pub fn create_collection(
        &self,
        name: &str,
        config: CollectionConfig,
    ) -> VectorResult<CollectionInfo> {
        self.check_limits(&config)?;
        let collection = Collection::new(name, config, self.backend_factory)?;
        let info = collection.info();

        let mut collections = self.collections.write();
        if collections.contains_key(name) {
            return Err(VectorError::CollectionAlreadyExists {
                name: name.to_string(),
            });
        }
        collections.insert(name.to_string(), Arc::new(RwLock::new(collection)));

        info!(
            collection = name,
            dimension = config.dimension,
            metric = config.metric.name(),
            "created collection"
        );
        Ok(info)
    }

    /// Drop a collection if present, then create it empty
    pub fn recreate_collection(
        &self,
        name: &str,
        config: CollectionConfig,
    ) -> VectorResult<CollectionInfo> {
        self.check_limits(&config)?;
        let collection = Collection::new(name, config, self.backend_factory)?;
        let info = collection.info();

        let replaced = self
            .collections
            .write()
            .insert(name.to_string(), Arc::new(RwLock::new(collection)))
            .is_some();

        info!(
            collection = name,
            dimension = config.dimension,
            metric = config.metric.name(),
            replaced,
            "recreated collection"
        );
        Ok(info)
    }

    /// Delete a collection and all its points
    ///
    /// Returns false if it did not exist.
    pub fn delete_collection(&self, name: &str) -> bool {
        let removed = self.collections.write().remove(name).is_some();
        if removed {
            info!(collection = name, "deleted collection");
        }
        removed
    }

    /// Check if a collection exists
    pub fn collection_exists(&self, name: &str) -> bool {
        self.collections.read().contains_key(name)
    }

    /// All collections, sorted by name
    pub fn list_collections(&self) -> Vec<CollectionInfo> {
        let handles: Vec<SharedCollection> = self.collections.read().values().cloned().collect();
        handles.iter().map(|c| c.read().info()).collect()
    }

    /// Name, config and size of one collection
    pub fn collection_info(&self, name: &str) -> VectorResult<CollectionInfo> {
        Ok(self.collection(name)?.read().info())
    }

    // ========================================================================
    // Points
    // ========================================================================

    /// Insert or replace a batch of points
    ///
    /// Returns the batch length. If any point is invalid the batch is
    /// rejected and the collection is unchanged.
    pub fn upsert(&self, name: &str, points: Vec<PointStruct>) -> VectorResult<usize> {
        let collection = self.collection(name)?;
        let mut guard = collection.write();
        let batch = points.len();
        match guard.upsert(points) {
            Ok(count) => {
                debug!(collection = name, batch, "upserted points");
                Ok(count)
            }
            Err(e) => {
                warn!(collection = name, batch, error = %e, "rejected upsert batch");
                Err(e)
            }
        }
    }

    /// Delete points by id
    ///
    /// Unknown ids are ignored. Returns how many points were removed.
    pub fn delete(&self, name: &str, ids: &[PointId]) -> VectorResult<usize> {
        let collection = self.collection(name)?;
        let removed = collection.write().delete(ids);
        debug!(collection = name, requested = ids.len(), removed, "deleted points");
        Ok(removed)
    }

    /// Filtered nearest-neighbor search
    pub fn search(&self, name: &str, request: &SearchRequest) -> VectorResult<Vec<SearchHit>> {
        let collection = self.collection(name)?;
        let hits = collection.read().search(request)?;
        debug!(
            collection = name,
            limit = request.limit,
            filtered = request.filter.is_some(),
            hits = hits.len(),
            "search"
        );
        Ok(hits)
    }

    /// Look up points by id, in request order
    pub fn retrieve(
        &self,
        name: &str,
        ids: &[PointId],
        with_payload: bool,
        with_vector: bool,
    ) -> VectorResult<Vec<PointRecord>> {
        let collection = self.collection(name)?;
        let records =
            collection
                .read()
                .retrieve(ids, with_payload, with_vector, self.options.strict_ids)?;
        Ok(records)
    }

    /// Count points matching a filter
    pub fn count(&self, name: &str, filter: Option<&Filter>) -> VectorResult<usize> {
        let collection = self.collection(name)?;
        let count = collection.read().count(filter)?;
        Ok(count)
    }

    /// Page through points in id order
    pub fn scroll(
        &self,
        name: &str,
        filter: Option<&Filter>,
        offset: Option<&PointId>,
        limit: usize,
        with_payload: bool,
        with_vector: bool,
    ) -> VectorResult<(Vec<PointRecord>, Option<PointId>)> {
        let collection = self.collection(name)?;
        let page = collection
            .read()
            .scroll(filter, offset, limit, with_payload, with_vector)?;
        Ok(page)
    }
}
