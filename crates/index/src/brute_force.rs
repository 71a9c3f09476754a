//! Brute-force backend
//!
//! Scores every accepted vector against the query. Storage is a `BTreeMap`
//! so iteration, and with it every tie, is deterministic.

use crate::backend::{AcceptFn, VectorIndexBackend};
use nearstore_core::{CollectionConfig, DistanceMetric, PointId, VectorResult};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Exhaustive O(n) index
pub struct BruteForceBackend {
    config: CollectionConfig,
    vectors: BTreeMap<PointId, Vec<f32>>,
}

impl BruteForceBackend {
    /// Create an empty backend for a collection
    pub fn new(config: &CollectionConfig) -> Self {
        BruteForceBackend {
            config: *config,
            vectors: BTreeMap::new(),
        }
    }
}

impl VectorIndexBackend for BruteForceBackend {
    fn insert(&mut self, id: PointId, embedding: &[f32]) -> VectorResult<()> {
        self.config.check_dimension(embedding)?;
        self.vectors.insert(id, embedding.to_vec());
        Ok(())
    }

    fn delete(&mut self, id: &PointId) -> bool {
        self.vectors.remove(id).is_some()
    }

    fn search(&self, query: &[f32], k: usize, accept: &AcceptFn<'_>) -> Vec<(PointId, f32)> {
        if k == 0 {
            return Vec::new();
        }

        let metric = self.config.metric;
        let mut scored: Vec<(PointId, f32)> = self
            .vectors
            .iter()
            .filter(|(id, _)| accept(*id))
            .map(|(id, v)| (id.clone(), metric.score(query, v)))
            .collect();

        let order = |a: &(PointId, f32), b: &(PointId, f32)| -> Ordering {
            metric.compare(a.1, b.1).then_with(|| a.0.cmp(&b.0))
        };

        if scored.len() > k {
            scored.select_nth_unstable_by(k - 1, order);
            scored.truncate(k);
        }
        scored.sort_by(order);
        scored
    }

    fn len(&self) -> usize {
        self.vectors.len()
    }

    fn dimension(&self) -> usize {
        self.config.dimension
    }

    fn metric(&self) -> DistanceMetric {
        self.config.metric
    }

    fn get(&self, id: &PointId) -> Option<&[f32]> {
        self.vectors.get(id).map(Vec::as_slice)
    }

    fn contains(&self, id: &PointId) -> bool {
        self.vectors.contains_key(id)
    }

    fn clear(&mut self) {
        self.vectors.clear();
    }
}
