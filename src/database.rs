//! Main entry point for nearstore.
//!
//! This module provides the `NearStore` struct, which ties the vector store
//! to an optional text embedder.

use crate::config::NearStoreConfig;
use crate::error::{Error, Result};
use nearstore_core::{
    CollectionConfig, CollectionInfo, Filter, PointId, PointRecord, PointStruct, SearchHit,
};
use nearstore_embed::{encode_checked, DocumentEncoder, Embedder, HashingEmbedder};
use nearstore_executor::Executor;
use nearstore_index::{IndexBackendFactory, SearchRequest, StoreOptions, VectorStore};
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// An in-process vector store.
///
/// Cheap to clone; clones share the same collections.
///
/// # Example
///
/// ```
/// use nearstore::prelude::*;
///
/// let store = NearStore::new();
/// store.create_collection("cities", CollectionConfig::parse(4, "dot")?)?;
/// store.upsert(
///     "cities",
///     vec![
///         PointStruct::new(1u64, vec![0.05, 0.61, 0.76, 0.74]).with_payload("city", "Berlin"),
///         PointStruct::new(2u64, vec![0.19, 0.81, 0.75, 0.11]).with_payload("city", "London"),
///     ],
/// )?;
///
/// let hits = store.search("cities", &SearchRequest::new(vec![0.2, 0.1, 0.9, 0.7], 1))?;
/// assert_eq!(hits[0].id, PointId::Num(1));
/// # Ok::<(), nearstore::Error>(())
/// ```
#[derive(Clone)]
pub struct NearStore {
    store: Arc<VectorStore>,
    embedder: Option<Arc<dyn Embedder>>,
}

impl Default for NearStore {
    fn default() -> Self {
        Self::new()
    }
}

impl NearStore {
    /// Empty store with default options and no embedder.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Create a builder for store configuration.
    ///
    /// # Example
    ///
    /// ```
    /// use nearstore::NearStore;
    ///
    /// let store = NearStore::builder()
    ///     .strict_ids(true)
    ///     .hashing_embedder(384)
    ///     .unwrap()
    ///     .build();
    /// assert!(store.has_embedder());
    /// ```
    pub fn builder() -> NearStoreBuilder {
        NearStoreBuilder::new()
    }

    /// Build from a parsed configuration.
    pub fn from_config(config: &NearStoreConfig) -> Result<Self> {
        config.validate()?;
        let mut builder = Self::builder().options(config.store_options());
        if let Some(embedder) = config.embedder {
            builder = builder.embedder(Arc::new(HashingEmbedder::with_config(embedder)?));
        }
        Ok(builder.build())
    }

    /// Build from a TOML config file.
    pub fn from_config_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_config(&NearStoreConfig::load(path)?)
    }

    /// The underlying vector store.
    pub fn store(&self) -> &Arc<VectorStore> {
        &self.store
    }

    /// Check if text operations are available.
    pub fn has_embedder(&self) -> bool {
        self.embedder.is_some()
    }

    /// Command executor sharing this store and embedder.
    pub fn executor(&self) -> Executor {
        let executor = Executor::new(Arc::clone(&self.store));
        match &self.embedder {
            Some(embedder) => executor.with_embedder(Arc::clone(embedder)),
            None => executor,
        }
    }

    fn embedder(&self) -> Result<&Arc<dyn Embedder>> {
        self.embedder
            .as_ref()
            .ok_or_else(|| Error::from(nearstore_executor::Error::EmbedderUnavailable))
    }

    // =========================================================================
    // Collections
    // =========================================================================

    /// Create an empty collection.
    pub fn create_collection(&self, name: &str, config: CollectionConfig) -> Result<CollectionInfo> {
        Ok(self.store.create_collection(name, config)?)
    }

    /// Drop a collection if present, then create it empty.
    pub fn recreate_collection(
        &self,
        name: &str,
        config: CollectionConfig,
    ) -> Result<CollectionInfo> {
        Ok(self.store.recreate_collection(name, config)?)
    }

    /// Delete a collection. Returns false if it did not exist.
    pub fn delete_collection(&self, name: &str) -> bool {
        self.store.delete_collection(name)
    }

    /// Check if a collection exists.
    pub fn collection_exists(&self, name: &str) -> bool {
        self.store.collection_exists(name)
    }

    /// All collections, sorted by name.
    pub fn list_collections(&self) -> Vec<CollectionInfo> {
        self.store.list_collections()
    }

    /// Name, config and size of one collection.
    pub fn collection_info(&self, name: &str) -> Result<CollectionInfo> {
        Ok(self.store.collection_info(name)?)
    }

    // =========================================================================
    // Points
    // =========================================================================

    /// Insert or replace points; all-or-nothing. Returns the batch length.
    pub fn upsert(&self, collection: &str, points: Vec<PointStruct>) -> Result<usize> {
        Ok(self.store.upsert(collection, points)?)
    }

    /// Delete points by id. Returns how many were removed.
    pub fn delete(&self, collection: &str, ids: &[PointId]) -> Result<usize> {
        Ok(self.store.delete(collection, ids)?)
    }

    /// Filtered nearest-neighbor search.
    pub fn search(&self, collection: &str, request: &SearchRequest) -> Result<Vec<SearchHit>> {
        Ok(self.store.search(collection, request)?)
    }

    /// Embed `text` and search with it.
    pub fn search_text(
        &self,
        collection: &str,
        text: &str,
        limit: usize,
        filter: Option<Filter>,
    ) -> Result<Vec<SearchHit>> {
        let vector = encode_checked(self.embedder()?.as_ref(), text)?;
        let mut request = SearchRequest::new(vector, limit);
        request.filter = filter;
        self.search(collection, &request)
    }

    /// Fetch points by id, in request order.
    pub fn retrieve(
        &self,
        collection: &str,
        ids: &[PointId],
        with_payload: bool,
        with_vector: bool,
    ) -> Result<Vec<PointRecord>> {
        Ok(self.store.retrieve(collection, ids, with_payload, with_vector)?)
    }

    /// Count points matching an optional filter.
    pub fn count(&self, collection: &str, filter: Option<&Filter>) -> Result<usize> {
        Ok(self.store.count(collection, filter)?)
    }

    /// Page through points in id order.
    ///
    /// Returns the page and the offset for the next call.
    pub fn scroll(
        &self,
        collection: &str,
        filter: Option<&Filter>,
        offset: Option<&PointId>,
        limit: usize,
    ) -> Result<(Vec<PointRecord>, Option<PointId>)> {
        Ok(self
            .store
            .scroll(collection, filter, offset, limit, true, false)?)
    }

    /// Embed JSON documents and upsert them.
    ///
    /// Point ids are the document positions; payloads are the documents.
    pub fn upload_documents(
        &self,
        collection: &str,
        documents: &[Value],
        text_field: &str,
    ) -> Result<usize> {
        let encoder = DocumentEncoder::new(Arc::clone(self.embedder()?), text_field);
        let points = encoder.encode(documents)?;
        let count = self.upsert(collection, points)?;
        info!(collection, documents = count, "uploaded documents");
        Ok(count)
    }
}

/// Builder for store configuration.
///
/// # Example
///
/// ```
/// use nearstore::NearStore;
///
/// let store = NearStore::builder()
///     .max_dimension(2048)
///     .build();
/// assert_eq!(store.store().options().max_dimension, 2048);
/// ```
#[derive(Default)]
pub struct NearStoreBuilder {
    options: StoreOptions,
    backend: IndexBackendFactory,
    embedder: Option<Arc<dyn Embedder>>,
}

impl NearStoreBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all store options.
    pub fn options(mut self, options: StoreOptions) -> Self {
        self.options = options;
        self
    }

    /// Fail retrieval of unknown ids instead of skipping them.
    pub fn strict_ids(mut self, strict: bool) -> Self {
        self.options.strict_ids = strict;
        self
    }

    /// Largest collection dimension accepted.
    pub fn max_dimension(mut self, max: usize) -> Self {
        self.options.max_dimension = max;
        self
    }

    /// Index backend for new collections.
    pub fn backend(mut self, backend: IndexBackendFactory) -> Self {
        self.backend = backend;
        self
    }

    /// Use a custom embedder for text operations.
    pub fn embedder(mut self, embedder: Arc<dyn Embedder>) -> Self {
        self.embedder = Some(embedder);
        self
    }

    /// Use a [`HashingEmbedder`] of the given dimension.
    pub fn hashing_embedder(self, dimension: usize) -> Result<Self> {
        Ok(self.embedder(Arc::new(HashingEmbedder::new(dimension)?)))
    }

    /// Build the store.
    pub fn build(self) -> NearStore {
        NearStore {
            store: Arc::new(VectorStore::with_backend_factory(self.options, self.backend)),
            embedder: self.embedder,
        }
    }
}
