//! Point and result types
//!
//! A point is one `(id, vector, payload)` record inside a collection.
//! Search and retrieval hand back [`SearchHit`] and [`PointRecord`] values,
//! which are transient and never stored.

use crate::config::CollectionConfig;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Payload attached to a point: a JSON object
pub type Payload = Map<String, Value>;

/// Point identifier: unsigned integer or string
///
/// Ordering puts every integer before every string. Integers compare
/// numerically, strings lexicographically. Search uses this order to break
/// score ties.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PointId {
    /// Numeric id
    Num(u64),
    /// String id (uuid, slug, ...)
    Str(String),
}

impl fmt::Display for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PointId::Num(n) => write!(f, "{}", n),
            PointId::Str(s) => f.write_str(s),
        }
    }
}

impl From<u64> for PointId {
    fn from(v: u64) -> Self {
        PointId::Num(v)
    }
}

impl From<u32> for PointId {
    fn from(v: u32) -> Self {
        PointId::Num(v as u64)
    }
}

impl From<usize> for PointId {
    fn from(v: usize) -> Self {
        PointId::Num(v as u64)
    }
}

impl From<String> for PointId {
    fn from(v: String) -> Self {
        PointId::Str(v)
    }
}

impl From<&str> for PointId {
    fn from(v: &str) -> Self {
        PointId::Str(v.to_string())
    }
}

/// A point to upsert
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointStruct {
    /// Unique id within the collection
    pub id: PointId,

    /// Embedding vector, length must equal the collection dimension
    pub vector: Vec<f32>,

    /// Metadata used for filtering
    #[serde(default)]
    pub payload: Payload,
}

impl PointStruct {
    /// Create a point with an empty payload
    pub fn new(id: impl Into<PointId>, vector: Vec<f32>) -> Self {
        PointStruct {
            id: id.into(),
            vector,
            payload: Payload::new(),
        }
    }

    /// Add a single payload field
    pub fn with_payload(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.payload.insert(key.into(), value.into());
        self
    }

    /// Replace the whole payload
    pub fn with_payload_map(mut self, payload: Payload) -> Self {
        self.payload = payload;
        self
    }

    /// Vector length
    pub fn dimension(&self) -> usize {
        self.vector.len()
    }
}

/// One search result
///
/// `score` follows the collection metric's direction: higher is better for
/// cosine and dot, lower is better for euclidean.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    /// Point id
    pub id: PointId,

    /// Raw metric score
    pub score: f32,

    /// Payload, when requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Payload>,

    /// Stored vector, when requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vector: Option<Vec<f32>>,
}

impl SearchHit {
    /// Look up a payload field by name
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.payload.as_ref().and_then(|p| p.get(key))
    }
}

/// A point returned by id lookup or scrolling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointRecord {
    /// Point id
    pub id: PointId,

    /// Payload, when requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Payload>,

    /// Stored vector, when requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vector: Option<Vec<f32>>,
}

/// Collection metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionInfo {
    /// Collection name
    pub name: String,

    /// Immutable configuration
    pub config: CollectionConfig,

    /// Current number of points
    pub points_count: usize,
}
