//! JSON documents to points
//!
//! Each document becomes one point: the id is its position (offset by a
//! start id), the vector is the embedding of one text field, and the payload
//! is the whole document.

use crate::embedder::{encode_checked, Embedder};
use crate::error::{EmbedError, EmbedResult};
use nearstore_core::{PointId, PointStruct};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Encodes JSON documents into points
#[derive(Clone)]
pub struct DocumentEncoder {
    embedder: Arc<dyn Embedder>,
    text_field: String,
    start_id: u64,
}

impl DocumentEncoder {
    /// Encoder embedding `text_field`, with ids starting at 0
    pub fn new(embedder: Arc<dyn Embedder>, text_field: impl Into<String>) -> Self {
        DocumentEncoder {
            embedder,
            text_field: text_field.into(),
            start_id: 0,
        }
    }

    /// Number ids from `start_id` instead of 0
    pub fn with_start_id(mut self, start_id: u64) -> Self {
        self.start_id = start_id;
        self
    }

    /// Field whose text is embedded
    pub fn text_field(&self) -> &str {
        &self.text_field
    }

    /// Encode a batch of documents
    ///
    /// Fails on the first document that is not an object, lacks a string
    /// text field, or whose id would exceed `u64::MAX`; nothing is returned
    /// for the batch in that case.
    pub fn encode(&self, documents: &[Value]) -> EmbedResult<Vec<PointStruct>> {
        let points = documents
            .iter()
            .enumerate()
            .map(|(index, doc)| self.encode_one(index, doc))
            .collect::<EmbedResult<Vec<_>>>()?;
        debug!(
            documents = points.len(),
            field = %self.text_field,
            "encoded documents"
        );
        Ok(points)
    }

    fn encode_one(&self, index: usize, doc: &Value) -> EmbedResult<PointStruct> {
        let missing = || EmbedError::MissingField {
            index,
            field: self.text_field.clone(),
        };
        let payload = doc.as_object().ok_or_else(missing)?;
        let text = payload
            .get(&self.text_field)
            .and_then(Value::as_str)
            .ok_or_else(missing)?;

        let id = u64::try_from(index)
            .ok()
            .and_then(|offset| self.start_id.checked_add(offset))
            .ok_or(EmbedError::IdOverflow {
                start_id: self.start_id,
                index,
            })?;

        let vector = encode_checked(self.embedder.as_ref(), text)?;
        Ok(PointStruct {
            id: PointId::Num(id),
            vector,
            payload: payload.clone(),
        })
    }
}
