//! Core data model for nearstore
//!
//! This crate holds everything the index and the outer surfaces share:
//!
//! - **CollectionConfig**: dimension and metric, fixed at creation
//! - **DistanceMetric**: Cosine, Dot, Euclidean scoring and ranking direction
//! - **PointStruct / SearchHit / PointRecord**: points in, results out
//! - **Filter**: boolean payload filters with a JSON form
//! - **VectorError**: error kinds with stable wire codes

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod filter;
pub mod metric;
pub mod types;

pub use config::{check_finite, CollectionConfig};
pub use error::{VectorError, VectorResult};
pub use filter::{Filter, MatchValue, Range};
pub use metric::{cosine_similarity, dot_product, euclidean_distance, l2_norm, DistanceMetric};
pub use types::{CollectionInfo, Payload, PointId, PointRecord, PointStruct, SearchHit};
