//! The command executor
//!
//! [`Executor`] is the single dispatch point from [`Command`] to the store.
//! It owns no state of its own beyond handles to the store and the optional
//! embedder, so it is cheap to clone and share.

use std::sync::Arc;

use nearstore_core::{CollectionConfig, Filter};
use nearstore_embed::{encode_checked, DocumentEncoder, Embedder};
use nearstore_index::{SearchRequest, VectorStore};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::{Command, Error, Output, Result, WireError};

/// Response envelope for the JSON boundary
#[derive(Serialize)]
#[serde(rename_all = "lowercase")]
enum Response {
    Ok(Output),
    Error(WireError),
}

/// Executes commands against a [`VectorStore`]
#[derive(Clone)]
pub struct Executor {
    store: Arc<VectorStore>,
    embedder: Option<Arc<dyn Embedder>>,
}

impl Executor {
    /// Executor without an embedder; text commands fail with `ConfigError`
    pub fn new(store: Arc<VectorStore>) -> Self {
        Executor {
            store,
            embedder: None,
        }
    }

    /// Attach an embedder for `SearchText` and `UploadDocuments`
    pub fn with_embedder(mut self, embedder: Arc<dyn Embedder>) -> Self {
        self.embedder = Some(embedder);
        self
    }

    /// The underlying store
    pub fn store(&self) -> &Arc<VectorStore> {
        &self.store
    }

    fn embedder(&self) -> Result<&Arc<dyn Embedder>> {
        self.embedder.as_ref().ok_or(Error::EmbedderUnavailable)
    }

    /// Execute one command
    pub fn execute(&self, command: Command) -> Result<Output> {
        debug!(command = command.name(), "execute");
        match command {
            Command::CreateCollection {
                collection,
                dimension,
                metric,
            } => {
                let config = CollectionConfig::parse(dimension, &metric)?;
                self.store.create_collection(&collection, config)?;
                Ok(Output::Unit)
            }
            Command::RecreateCollection {
                collection,
                dimension,
                metric,
            } => {
                let config = CollectionConfig::parse(dimension, &metric)?;
                self.store.recreate_collection(&collection, config)?;
                Ok(Output::Unit)
            }
            Command::DeleteCollection { collection } => {
                Ok(Output::Bool(self.store.delete_collection(&collection)))
            }
            Command::ListCollections => Ok(Output::Collections(self.store.list_collections())),
            Command::CollectionInfo { collection } => Ok(Output::CollectionInfo(
                self.store.collection_info(&collection)?,
            )),
            Command::Upsert { collection, points } => {
                Ok(Output::Count(self.store.upsert(&collection, points)?))
            }
            Command::Delete { collection, ids } => {
                Ok(Output::Count(self.store.delete(&collection, &ids)?))
            }
            Command::Search {
                collection,
                vector,
                limit,
                filter,
                with_payload,
                with_vector,
                score_threshold,
                offset,
            } => {
                let mut request = SearchRequest::new(vector, limit)
                    .with_payload(with_payload)
                    .with_vector(with_vector)
                    .with_offset(offset);
                request.filter = parse_filter(filter.as_ref())?;
                request.score_threshold = score_threshold;
                Ok(Output::Hits(self.store.search(&collection, &request)?))
            }
            Command::SearchText {
                collection,
                text,
                limit,
                filter,
                with_payload,
                with_vector,
                score_threshold,
                offset,
            } => {
                let vector = encode_checked(self.embedder()?.as_ref(), &text)?;
                let mut request = SearchRequest::new(vector, limit)
                    .with_payload(with_payload)
                    .with_vector(with_vector)
                    .with_offset(offset);
                request.filter = parse_filter(filter.as_ref())?;
                request.score_threshold = score_threshold;
                Ok(Output::Hits(self.store.search(&collection, &request)?))
            }
            Command::Retrieve {
                collection,
                ids,
                with_payload,
                with_vector,
            } => Ok(Output::Points(self.store.retrieve(
                &collection,
                &ids,
                with_payload,
                with_vector,
            )?)),
            Command::Count { collection, filter } => {
                let filter = parse_filter(filter.as_ref())?;
                Ok(Output::Count(self.store.count(&collection, filter.as_ref())?))
            }
            Command::Scroll {
                collection,
                filter,
                offset,
                limit,
                with_payload,
                with_vector,
            } => {
                let filter = parse_filter(filter.as_ref())?;
                let (points, next_offset) = self.store.scroll(
                    &collection,
                    filter.as_ref(),
                    offset.as_ref(),
                    limit,
                    with_payload,
                    with_vector,
                )?;
                Ok(Output::Page {
                    points,
                    next_offset,
                })
            }
            Command::UploadDocuments {
                collection,
                documents,
                text_field,
                start_id,
            } => {
                let encoder = DocumentEncoder::new(Arc::clone(self.embedder()?), text_field)
                    .with_start_id(start_id);
                let points = encoder.encode(&documents)?;
                Ok(Output::Count(self.store.upsert(&collection, points)?))
            }
        }
    }

    /// Execute a JSON-encoded command and return a JSON envelope
    ///
    /// Success is `{"ok": <output>}`; failure is
    /// `{"error": {"code": ..., "message": ...}}`. Never panics on bad input.
    pub fn execute_json(&self, request: &str) -> String {
        let response = match serde_json::from_str::<Command>(request) {
            Ok(command) => match self.execute(command) {
                Ok(output) => Response::Ok(output),
                Err(e) => Response::Error(e.to_wire()),
            },
            Err(e) => Response::Error(
                Error::InvalidCommand {
                    reason: e.to_string(),
                }
                .to_wire(),
            ),
        };
        serde_json::to_string(&response).unwrap_or_else(|e| {
            format!(
                r#"{{"error":{{"code":"InvalidCommand","message":{}}}}}"#,
                Value::String(format!("response could not be encoded: {}", e))
            )
        })
    }
}

fn parse_filter(filter: Option<&Value>) -> Result<Option<Filter>> {
    Ok(filter.map(Filter::from_json).transpose()?)
}
