//! Commands accepted by the executor
//!
//! Commands are externally tagged in JSON:
//!
//! ```json
//! {"CreateCollection": {"collection": "cities", "dimension": 4, "metric": "dot"}}
//! {"Search": {"collection": "cities", "vector": [0.2, 0.1, 0.9, 0.7], "limit": 3}}
//! "ListCollections"
//! ```
//!
//! Filters travel as raw JSON and are parsed when the command runs, so a
//! malformed filter reports `InvalidFilter` rather than `InvalidCommand`.

use nearstore_core::{PointId, PointStruct};
use serde::{Deserialize, Serialize};
use serde_json::Value;

fn default_true() -> bool {
    true
}

fn default_scroll_limit() -> usize {
    10
}

/// A single operation against the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Command {
    /// Create an empty collection
    CreateCollection {
        /// Collection name
        collection: String,
        /// Vector dimension; must be positive
        dimension: i64,
        /// Metric name: cosine, dot or euclidean
        metric: String,
    },

    /// Drop a collection if present, then create it
    RecreateCollection {
        /// Collection name
        collection: String,
        /// Vector dimension; must be positive
        dimension: i64,
        /// Metric name: cosine, dot or euclidean
        metric: String,
    },

    /// Drop a collection
    DeleteCollection {
        /// Collection name
        collection: String,
    },

    /// List all collections
    ListCollections,

    /// Describe one collection
    CollectionInfo {
        /// Collection name
        collection: String,
    },

    /// Insert or replace points
    Upsert {
        /// Collection name
        collection: String,
        /// Points to write, all-or-nothing
        points: Vec<PointStruct>,
    },

    /// Remove points by id
    Delete {
        /// Collection name
        collection: String,
        /// Ids to remove; unknown ids are ignored
        ids: Vec<PointId>,
    },

    /// Nearest-neighbor search by vector
    Search {
        /// Collection name
        collection: String,
        /// Query vector
        vector: Vec<f32>,
        /// Maximum number of hits
        limit: usize,
        /// Optional payload filter
        #[serde(default, skip_serializing_if = "Option::is_none")]
        filter: Option<Value>,
        /// Attach payloads
        #[serde(default = "default_true")]
        with_payload: bool,
        /// Attach stored vectors
        #[serde(default)]
        with_vector: bool,
        /// Drop hits worse than this score
        #[serde(default, skip_serializing_if = "Option::is_none")]
        score_threshold: Option<f32>,
        /// Skip this many ranked hits
        #[serde(default)]
        offset: usize,
    },

    /// Nearest-neighbor search by text, through the configured embedder
    SearchText {
        /// Collection name
        collection: String,
        /// Query text
        text: String,
        /// Maximum number of hits
        limit: usize,
        /// Optional payload filter
        #[serde(default, skip_serializing_if = "Option::is_none")]
        filter: Option<Value>,
        /// Attach payloads
        #[serde(default = "default_true")]
        with_payload: bool,
        /// Attach stored vectors
        #[serde(default)]
        with_vector: bool,
        /// Drop hits worse than this score
        #[serde(default, skip_serializing_if = "Option::is_none")]
        score_threshold: Option<f32>,
        /// Skip this many ranked hits
        #[serde(default)]
        offset: usize,
    },

    /// Fetch points by id
    Retrieve {
        /// Collection name
        collection: String,
        /// Ids to fetch, returned in this order
        ids: Vec<PointId>,
        /// Attach payloads
        #[serde(default = "default_true")]
        with_payload: bool,
        /// Attach stored vectors
        #[serde(default)]
        with_vector: bool,
    },

    /// Count points, optionally filtered
    Count {
        /// Collection name
        collection: String,
        /// Optional payload filter
        #[serde(default, skip_serializing_if = "Option::is_none")]
        filter: Option<Value>,
    },

    /// Page through points in id order
    Scroll {
        /// Collection name
        collection: String,
        /// Optional payload filter
        #[serde(default, skip_serializing_if = "Option::is_none")]
        filter: Option<Value>,
        /// First id of the page (from a previous `next_offset`)
        #[serde(default, skip_serializing_if = "Option::is_none")]
        offset: Option<PointId>,
        /// Page size
        #[serde(default = "default_scroll_limit")]
        limit: usize,
        /// Attach payloads
        #[serde(default = "default_true")]
        with_payload: bool,
        /// Attach stored vectors
        #[serde(default)]
        with_vector: bool,
    },

    /// Embed JSON documents and upsert them as points
    UploadDocuments {
        /// Collection name
        collection: String,
        /// Documents; each becomes the payload of its point
        documents: Vec<Value>,
        /// Field whose text is embedded
        text_field: String,
        /// Id of the first document
        #[serde(default)]
        start_id: u64,
    },
}

impl Command {
    /// Variant name, for logging
    pub fn name(&self) -> &'static str {
        match self {
            Command::CreateCollection { .. } => "CreateCollection",
            Command::RecreateCollection { .. } => "RecreateCollection",
            Command::DeleteCollection { .. } => "DeleteCollection",
            Command::ListCollections => "ListCollections",
            Command::CollectionInfo { .. } => "CollectionInfo",
            Command::Upsert { .. } => "Upsert",
            Command::Delete { .. } => "Delete",
            Command::Search { .. } => "Search",
            Command::SearchText { .. } => "SearchText",
            Command::Retrieve { .. } => "Retrieve",
            Command::Count { .. } => "Count",
            Command::Scroll { .. } => "Scroll",
            Command::UploadDocuments { .. } => "UploadDocuments",
        }
    }
}
