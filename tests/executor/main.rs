//! Executor Integration Tests
//!
//! Drives the JSON boundary the way an outside caller would: one request
//! string in, one envelope string out.

use nearstore::prelude::*;
use serde_json::Value;

mod command_dispatch;
mod wire_errors;

// =============================================================================
// SHARED TEST UTILITIES
// =============================================================================

/// Executor over a fresh store with a small hashing embedder
pub fn create_executor() -> Executor {
    NearStore::builder()
        .hashing_embedder(64)
        .unwrap()
        .build()
        .executor()
}

/// Send a JSON request, parse the JSON response
pub fn call(executor: &Executor, request: Value) -> Value {
    let response = executor.execute_json(&request.to_string());
    serde_json::from_str(&response).unwrap()
}

/// Unwrap an `{"ok": ...}` envelope
pub fn ok(response: Value) -> Value {
    assert!(response.get("error").is_none(), "unexpected error: {}", response);
    response["ok"].clone()
}

/// Unwrap an `{"error": ...}` envelope and return its code
pub fn error_code(response: Value) -> String {
    response["error"]["code"]
        .as_str()
        .unwrap_or_else(|| panic!("expected error, got {}", response))
        .to_string()
}
