//! Distance metrics
//!
//! Scores are raw metric values, not normalized. Cosine and dot product are
//! similarities (higher = more similar); euclidean is a distance (lower =
//! more similar). [`DistanceMetric::compare`] hides the direction so callers
//! can rank best-first without caring which metric is in use.

use crate::error::VectorError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Distance metric for similarity calculation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceMetric {
    /// Cosine similarity: dot(a,b) / (||a|| * ||b||), 0 if either norm is 0
    #[default]
    Cosine,

    /// Dot product: sum(a_i * b_i)
    #[serde(alias = "dot_product")]
    Dot,

    /// Euclidean (L2) distance: sqrt(sum((a_i - b_i)^2))
    #[serde(alias = "euclid")]
    Euclidean,
}

impl DistanceMetric {
    /// Canonical lowercase name
    pub fn name(&self) -> &'static str {
        match self {
            DistanceMetric::Cosine => "cosine",
            DistanceMetric::Dot => "dot",
            DistanceMetric::Euclidean => "euclidean",
        }
    }

    /// Parse from string (case-insensitive, common aliases accepted)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "cosine" => Some(DistanceMetric::Cosine),
            "dot" | "dot_product" | "dot-product" | "inner_product" => Some(DistanceMetric::Dot),
            "euclidean" | "euclid" | "l2" => Some(DistanceMetric::Euclidean),
            _ => None,
        }
    }

    /// True when a larger score means a closer match
    pub fn higher_is_better(&self) -> bool {
        !matches!(self, DistanceMetric::Euclidean)
    }

    /// Score `candidate` against `query`
    ///
    /// Both slices must have the same length; the caller validates this.
    pub fn score(&self, query: &[f32], candidate: &[f32]) -> f32 {
        match self {
            DistanceMetric::Cosine => cosine_similarity(query, candidate),
            DistanceMetric::Dot => dot_product(query, candidate),
            DistanceMetric::Euclidean => euclidean_distance(query, candidate),
        }
    }

    /// Order two scores best-first
    ///
    /// Returns `Less` when `a` is the better score.
    pub fn compare(&self, a: f32, b: f32) -> Ordering {
        if self.higher_is_better() {
            b.total_cmp(&a)
        } else {
            a.total_cmp(&b)
        }
    }

    /// True if `score` is at least as good as `threshold`
    pub fn passes_threshold(&self, score: f32, threshold: f32) -> bool {
        if self.higher_is_better() {
            score >= threshold
        } else {
            score <= threshold
        }
    }
}

impl fmt::Display for DistanceMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DistanceMetric {
    type Err = VectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DistanceMetric::parse(s)
            .ok_or_else(|| VectorError::invalid_config(format!("unknown distance metric '{}'", s)))
    }
}

/// Dot product of two vectors
///
/// Sums in `f64`; a result beyond the `f32` range saturates to infinity.
pub fn dot_product(a: &[f32], b: &[f32]) -> f32 {
    dot_f64(a, b) as f32
}

/// L2 norm of a vector
pub fn l2_norm(v: &[f32]) -> f32 {
    norm_f64(v) as f32
}

/// Cosine similarity, 0 when either vector has zero norm
///
/// Computed entirely in `f64`, so finite inputs of any magnitude give a
/// finite result in `[-1, 1]`.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let norm_a = norm_f64(a);
    let norm_b = norm_f64(b);

    if norm_a == 0.0 || norm_b == 0.0 || !norm_a.is_finite() || !norm_b.is_finite() {
        return 0.0;
    }

    (dot_f64(a, b) / (norm_a * norm_b)).clamp(-1.0, 1.0) as f32
}

/// Euclidean distance
pub fn euclidean_distance(a: &[f32], b: &[f32]) -> f32 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = f64::from(*x) - f64::from(*y);
            d * d
        })
        .sum::<f64>()
        .sqrt() as f32
}

fn dot_f64(a: &[f32], b: &[f32]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| f64::from(*x) * f64::from(*y))
        .sum()
}

fn norm_f64(v: &[f32]) -> f64 {
    v.iter()
        .map(|x| f64::from(*x) * f64::from(*x))
        .sum::<f64>()
        .sqrt()
}
