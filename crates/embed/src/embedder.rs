//! The embedder interface

use crate::error::{EmbedError, EmbedResult};

/// Maps text to fixed-length vectors
///
/// Implementations must be deterministic for a given configuration and
/// always return `dimension()` components.
pub trait Embedder: Send + Sync {
    /// Output vector length
    fn dimension(&self) -> usize;

    /// Encode one text
    fn encode(&self, text: &str) -> EmbedResult<Vec<f32>>;

    /// Encode several texts, in order
    fn encode_batch(&self, texts: &[&str]) -> EmbedResult<Vec<Vec<f32>>> {
        texts.iter().map(|t| self.encode(t)).collect()
    }
}

/// Encode and verify the output length against `dimension()`
pub fn encode_checked(embedder: &dyn Embedder, text: &str) -> EmbedResult<Vec<f32>> {
    let vector = embedder.encode(text)?;
    if vector.len() != embedder.dimension() {
        return Err(EmbedError::OutputMismatch {
            expected: embedder.dimension(),
            got: vector.len(),
        });
    }
    Ok(vector)
}

/// Scale a vector to unit length in place; the zero vector is left alone
pub fn l2_normalize(v: &mut [f32]) {
    let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        v.iter_mut().for_each(|x| *x /= norm);
    }
}
