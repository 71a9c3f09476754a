//! Search requests

use nearstore_core::Filter;
use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

/// Parameters for a nearest-neighbor query
///
/// Only `vector` and `limit` are required; the rest default to returning
/// payloads, no vectors, no threshold and no offset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Query vector, same dimension as the collection
    pub vector: Vec<f32>,

    /// Maximum number of hits
    pub limit: usize,

    /// Payload filter applied before scoring
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<Filter>,

    /// Attach payloads to hits
    #[serde(default = "default_true")]
    pub with_payload: bool,

    /// Attach stored vectors to hits
    #[serde(default)]
    pub with_vector: bool,

    /// Drop hits worse than this score (in the metric's direction)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score_threshold: Option<f32>,

    /// Skip this many ranked hits before taking `limit`
    #[serde(default)]
    pub offset: usize,
}

impl SearchRequest {
    /// New request with default options
    pub fn new(vector: Vec<f32>, limit: usize) -> Self {
        SearchRequest {
            vector,
            limit,
            filter: None,
            with_payload: true,
            with_vector: false,
            score_threshold: None,
            offset: 0,
        }
    }

    /// Restrict candidates by payload
    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Toggle payloads in results
    pub fn with_payload(mut self, yes: bool) -> Self {
        self.with_payload = yes;
        self
    }

    /// Toggle stored vectors in results
    pub fn with_vector(mut self, yes: bool) -> Self {
        self.with_vector = yes;
        self
    }

    /// Set a score threshold
    pub fn with_score_threshold(mut self, threshold: f32) -> Self {
        self.score_threshold = Some(threshold);
        self
    }

    /// Set a result offset
    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }
}
