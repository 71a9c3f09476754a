//! Feature-hashing embedder
//!
//! Every token and every adjacent token pair is hashed with seeded xxh3.
//! The low bits pick a bucket, the top bit picks a sign, and the summed
//! vector is L2-normalized. Texts sharing words get positive cosine
//! similarity; unrelated texts land near zero. No model files needed.

use crate::embedder::{l2_normalize, Embedder};
use crate::error::{EmbedError, EmbedResult};
use crate::tokenizer::{bigrams, tokenize};
use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::xxh3_64_with_seed;

/// Hashing embedder settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashingConfig {
    /// Output dimension
    pub dimension: usize,
    /// Hash seed; different seeds give unrelated embeddings
    #[serde(default)]
    pub seed: u64,
}

impl Default for HashingConfig {
    fn default() -> Self {
        HashingConfig {
            dimension: 384,
            seed: 0,
        }
    }
}

/// Deterministic bag-of-words embedder
#[derive(Debug, Clone)]
pub struct HashingEmbedder {
    config: HashingConfig,
}

impl HashingEmbedder {
    /// Create an embedder with seed 0
    pub fn new(dimension: usize) -> EmbedResult<Self> {
        Self::with_config(HashingConfig { dimension, seed: 0 })
    }

    /// Create an embedder from settings
    pub fn with_config(config: HashingConfig) -> EmbedResult<Self> {
        if config.dimension == 0 {
            return Err(EmbedError::InvalidDimension {
                dimension: config.dimension,
            });
        }
        Ok(HashingEmbedder { config })
    }

    /// Settings in use
    pub fn config(&self) -> &HashingConfig {
        &self.config
    }

    fn add_feature(&self, v: &mut [f32], feature: &str) {
        let h = xxh3_64_with_seed(feature.as_bytes(), self.config.seed);
        let bucket = (h % self.config.dimension as u64) as usize;
        let sign = if h >> 63 == 0 { 1.0 } else { -1.0 };
        v[bucket] += sign;
    }
}

impl Embedder for HashingEmbedder {
    fn dimension(&self) -> usize {
        self.config.dimension
    }

    fn encode(&self, text: &str) -> EmbedResult<Vec<f32>> {
        let mut v = vec![0.0f32; self.config.dimension];
        let tokens = tokenize(text);
        for token in &tokens {
            self.add_feature(&mut v, token);
        }
        for pair in bigrams(&tokens) {
            self.add_feature(&mut v, &pair);
        }
        l2_normalize(&mut v);
        Ok(v)
    }
}
