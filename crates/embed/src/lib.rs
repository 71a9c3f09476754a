//! Text embedding for nearstore
//!
//! The store itself only sees vectors. This crate supplies the
//! [`Embedder`] interface the text-search paths call, a model-free
//! [`HashingEmbedder`], and [`DocumentEncoder`] for bulk-loading JSON
//! documents as points.

#![warn(missing_docs)]

pub mod documents;
pub mod embedder;
pub mod error;
pub mod hashing;
pub mod tokenizer;

pub use documents::DocumentEncoder;
pub use embedder::{encode_checked, l2_normalize, Embedder};
pub use error::{EmbedError, EmbedResult};
pub use hashing::{HashingConfig, HashingEmbedder};
pub use tokenizer::tokenize;
