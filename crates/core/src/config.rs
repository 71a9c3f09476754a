//! Collection configuration
//!
//! Fixed at creation time and immutable for the collection's lifetime.

use crate::error::{VectorError, VectorResult};
use crate::metric::DistanceMetric;
use serde::{Deserialize, Serialize};

/// Collection configuration: dimension and distance metric
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionConfig {
    /// Embedding dimension (e.g. 4, 384, 1536). Must be > 0.
    pub dimension: usize,

    /// Distance metric used to score and rank points
    pub metric: DistanceMetric,
}

impl CollectionConfig {
    /// Create a config, rejecting a zero dimension
    pub fn new(dimension: usize, metric: DistanceMetric) -> VectorResult<Self> {
        let config = CollectionConfig { dimension, metric };
        config.validate()?;
        Ok(config)
    }

    /// Build a config from untyped inputs
    ///
    /// Fails with `InvalidConfig` if `dimension <= 0` or the metric name is
    /// not recognized.
    pub fn parse(dimension: i64, metric: &str) -> VectorResult<Self> {
        if dimension <= 0 {
            return Err(VectorError::invalid_config(format!(
                "dimension must be positive, got {}",
                dimension
            )));
        }
        let dimension = usize::try_from(dimension).map_err(|_| {
            VectorError::invalid_config(format!("dimension {} does not fit in usize", dimension))
        })?;
        Self::new(dimension, metric.parse()?)
    }

    /// Check invariants (used for configs that arrive through serde)
    pub fn validate(&self) -> VectorResult<()> {
        if self.dimension == 0 {
            return Err(VectorError::invalid_config(
                "dimension must be positive, got 0",
            ));
        }
        Ok(())
    }

    /// Validate a vector's length against this config
    pub fn check_dimension(&self, vector: &[f32]) -> VectorResult<()> {
        if vector.len() != self.dimension {
            return Err(VectorError::DimensionMismatch {
                expected: self.dimension,
                got: vector.len(),
            });
        }
        Ok(())
    }

    /// Config for all-MiniLM-L6-v2 sentence embeddings (384 dims)
    pub fn for_minilm() -> Self {
        CollectionConfig {
            dimension: 384,
            metric: DistanceMetric::Cosine,
        }
    }

    /// Config for all-mpnet-base-v2 (768 dims)
    pub fn for_mpnet() -> Self {
        CollectionConfig {
            dimension: 768,
            metric: DistanceMetric::Cosine,
        }
    }

    /// Config for OpenAI text-embedding-ada-002 (1536 dims)
    pub fn for_openai_ada() -> Self {
        CollectionConfig {
            dimension: 1536,
            metric: DistanceMetric::Cosine,
        }
    }
}

/// Check that every component of a vector is finite
pub fn check_finite(vector: &[f32]) -> VectorResult<()> {
    if let Some(pos) = vector.iter().position(|x| !x.is_finite()) {
        return Err(VectorError::InvalidVector {
            reason: format!("component {} is {}", pos, vector[pos]),
        });
    }
    Ok(())
}
