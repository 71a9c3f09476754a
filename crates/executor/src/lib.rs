//! Command execution layer for nearstore
//!
//! Every store operation is expressible as a serde [`Command`] producing an
//! [`Output`]. [`Executor::execute`] is the typed entry point;
//! [`Executor::execute_json`] is the JSON boundary for callers outside Rust.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use nearstore_executor::{Command, Executor, Output};
//! use nearstore_index::VectorStore;
//!
//! let executor = Executor::new(Arc::new(VectorStore::new()));
//! executor
//!     .execute(Command::CreateCollection {
//!         collection: "cities".into(),
//!         dimension: 4,
//!         metric: "dot".into(),
//!     })
//!     .unwrap();
//! let out = executor.execute_json(r#""ListCollections""#);
//! assert!(out.starts_with(r#"{"ok":{"Collections":"#));
//! ```

#![warn(missing_docs)]

mod command;
mod error;
mod executor;
mod output;


pub use command::Command;
pub use error::{Error, Result, WireError};
pub use executor::Executor;
pub use output::Output;
