//! A single collection: config, index backend and payloads
//!
//! `Collection` is not synchronized; [`VectorStore`](crate::store::VectorStore)
//! wraps each one in a lock. Every mutating method validates its whole input
//! before touching state, so a failed call leaves the collection unchanged.

use crate::backend::{IndexBackendFactory, VectorIndexBackend};
use crate::search::SearchRequest;
use nearstore_core::{
    check_finite, CollectionConfig, CollectionInfo, Filter, Payload, PointId, PointRecord,
    PointStruct, SearchHit, VectorError, VectorResult,
};
use std::collections::BTreeMap;
use std::ops::Bound;

/// Maximum collection name length in bytes
pub const MAX_COLLECTION_NAME_LEN: usize = 255;

/// Validate a collection name
///
/// Rules:
/// - Not empty
/// - At most 255 bytes
/// - No `/` or NUL characters
/// - No leading `_` (reserved for internal collections)
pub fn validate_collection_name(name: &str) -> VectorResult<()> {
    let reject = |reason: &str| {
        Err(VectorError::InvalidCollectionName {
            name: name.to_string(),
            reason: reason.to_string(),
        })
    };

    if name.is_empty() {
        return reject("name cannot be empty");
    }
    if name.len() > MAX_COLLECTION_NAME_LEN {
        return reject("name cannot exceed 255 bytes");
    }
    if name.starts_with('_') {
        return reject("names starting with '_' are reserved");
    }
    if name.contains('/') {
        return reject("name cannot contain '/'");
    }
    if name.contains('\0') {
        return reject("name cannot contain NUL");
    }
    Ok(())
}

/// One collection of points
pub struct Collection {
    name: String,
    config: CollectionConfig,
    backend: Box<dyn VectorIndexBackend>,
    /// Every stored point has an entry here, possibly empty. Also the
    /// id-ordered source for scrolling.
    payloads: BTreeMap<PointId, Payload>,
}

impl Collection {
    /// Create an empty collection
    pub fn new(
        name: impl Into<String>,
        config: CollectionConfig,
        factory: IndexBackendFactory,
    ) -> VectorResult<Self> {
        let name = name.into();
        validate_collection_name(&name)?;
        config.validate()?;
        Ok(Collection {
            name,
            backend: factory.create(&config),
            config,
            payloads: BTreeMap::new(),
        })
    }

    /// Collection name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Immutable configuration
    pub fn config(&self) -> &CollectionConfig {
        &self.config
    }

    /// Number of points
    pub fn len(&self) -> usize {
        self.payloads.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.payloads.is_empty()
    }

    /// Snapshot of name, config and size
    pub fn info(&self) -> CollectionInfo {
        CollectionInfo {
            name: self.name.clone(),
            config: self.config,
            points_count: self.len(),
        }
    }

    /// Check if a point exists
    pub fn contains(&self, id: &PointId) -> bool {
        self.payloads.contains_key(id)
    }

    // ========================================================================
    // Writes
    // ========================================================================

    /// Check a batch without applying it
    pub fn validate_points(&self, points: &[PointStruct]) -> VectorResult<()> {
        for point in points {
            self.config.check_dimension(&point.vector)?;
            check_finite(&point.vector).map_err(|e| match e {
                VectorError::InvalidVector { reason } => VectorError::InvalidVector {
                    reason: format!("point {}: {}", point.id, reason),
                },
                other => other,
            })?;
        }
        Ok(())
    }

    /// Insert or replace a batch of points
    ///
    /// All-or-nothing: if any point fails validation nothing is written.
    /// Returns the batch length.
    pub fn upsert(&mut self, points: Vec<PointStruct>) -> VectorResult<usize> {
        self.validate_points(&points)?;

        let count = points.len();
        for point in points {
            self.backend.insert(point.id.clone(), &point.vector)?;
            self.payloads.insert(point.id, point.payload);
        }
        Ok(count)
    }

    /// Remove points by id, ignoring unknown ids
    ///
    /// Returns how many points were actually removed.
    pub fn delete(&mut self, ids: &[PointId]) -> usize {
        let mut removed = 0;
        for id in ids {
            if self.payloads.remove(id).is_some() {
                self.backend.delete(id);
                removed += 1;
            }
        }
        removed
    }

    /// Remove every point
    pub fn clear(&mut self) {
        self.backend.clear();
        self.payloads.clear();
    }

    // ========================================================================
    // Reads
    // ========================================================================

    /// Filtered nearest-neighbor search
    ///
    /// Candidates are restricted by the filter first, then scored, ordered
    /// best-first (ties by ascending id) and cut to `limit` after `offset`.
    pub fn search(&self, request: &SearchRequest) -> VectorResult<Vec<SearchHit>> {
        self.config.check_dimension(&request.vector)?;
        check_finite(&request.vector)?;
        if let Some(filter) = &request.filter {
            filter.validate()?;
        }
        if let Some(threshold) = request.score_threshold {
            if !threshold.is_finite() {
                return Err(VectorError::InvalidVector {
                    reason: "score threshold must be finite".to_string(),
                });
            }
        }

        if request.limit == 0 {
            return Ok(Vec::new());
        }

        let accept = |id: &PointId| match &request.filter {
            None => true,
            Some(filter) => self.payloads.get(id).is_some_and(|p| filter.matches(p)),
        };

        let k = request.offset.saturating_add(request.limit);
        let metric = self.config.metric;
        let hits = self
            .backend
            .search(&request.vector, k, &accept)
            .into_iter()
            .filter(|(_, score)| {
                request
                    .score_threshold
                    .map_or(true, |t| metric.passes_threshold(*score, t))
            })
            .skip(request.offset)
            .take(request.limit)
            .map(|(id, score)| SearchHit {
                payload: self.payload_if(request.with_payload, &id),
                vector: self.vector_if(request.with_vector, &id),
                id,
                score,
            })
            .collect();
        Ok(hits)
    }

    /// Look up points by id, in request order
    ///
    /// Unknown ids are skipped, or fail with `PointNotFound` when `strict`.
    pub fn retrieve(
        &self,
        ids: &[PointId],
        with_payload: bool,
        with_vector: bool,
        strict: bool,
    ) -> VectorResult<Vec<PointRecord>> {
        let mut records = Vec::with_capacity(ids.len());
        for id in ids {
            if !self.contains(id) {
                if strict {
                    return Err(VectorError::PointNotFound { id: id.clone() });
                }
                continue;
            }
            records.push(self.record(id, with_payload, with_vector));
        }
        Ok(records)
    }

    /// Count points matching a filter (all points when `None`)
    pub fn count(&self, filter: Option<&Filter>) -> VectorResult<usize> {
        match filter {
            None => Ok(self.len()),
            Some(filter) => {
                filter.validate()?;
                Ok(self.payloads.values().filter(|p| filter.matches(p)).count())
            }
        }
    }

    /// Page through matching points in id order
    ///
    /// Starts at `offset` (inclusive). Returns the page and the id to pass
    /// as the next offset, or `None` when there are no more matches.
    pub fn scroll(
        &self,
        filter: Option<&Filter>,
        offset: Option<&PointId>,
        limit: usize,
        with_payload: bool,
        with_vector: bool,
    ) -> VectorResult<(Vec<PointRecord>, Option<PointId>)> {
        if let Some(filter) = filter {
            filter.validate()?;
        }

        let start = offset.map_or(Bound::Unbounded, Bound::Included);
        let mut matching = self
            .payloads
            .range((start, Bound::Unbounded))
            .filter(|(_, p)| filter.map_or(true, |f| f.matches(p)))
            .map(|(id, _)| id);

        let page: Vec<PointRecord> = matching
            .by_ref()
            .take(limit)
            .map(|id| self.record(id, with_payload, with_vector))
            .collect();
        let next = matching.next().cloned();
        Ok((page, next))
    }

    fn record(&self, id: &PointId, with_payload: bool, with_vector: bool) -> PointRecord {
        PointRecord {
            id: id.clone(),
            payload: self.payload_if(with_payload, id),
            vector: self.vector_if(with_vector, id),
        }
    }

    fn payload_if(&self, wanted: bool, id: &PointId) -> Option<Payload> {
        if wanted {
            self.payloads.get(id).cloned()
        } else {
            None
        }
    }

    fn vector_if(&self, wanted: bool, id: &PointId) -> Option<Vec<f32>> {
        if wanted {
            self.backend.get(id).map(<[f32]>::to_vec)
        } else {
            None
        }
    }
}
