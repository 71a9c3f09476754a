//! Wire Error Tests
//!
//! Each failure kind surfaces with its canonical code.

use crate::*;
use serde_json::json;

fn setup() -> Executor {
    let executor = create_executor();
    ok(call(
        &executor,
        json!({"CreateCollection": {"collection": "c", "dimension": 2, "metric": "dot"}}),
    ));
    executor
}

#[test]
fn config_errors() {
    let executor = create_executor();
    for request in [
        json!({"CreateCollection": {"collection": "c", "dimension": 0, "metric": "dot"}}),
        json!({"CreateCollection": {"collection": "c", "dimension": -2, "metric": "dot"}}),
        json!({"CreateCollection": {"collection": "c", "dimension": 2, "metric": "jaccard"}}),
        json!({"CreateCollection": {"collection": "_c", "dimension": 2, "metric": "dot"}}),
    ] {
        assert_eq!(error_code(call(&executor, request)), "ConfigError");
    }
}

#[test]
fn already_exists() {
    let executor = setup();
    let code = error_code(call(
        &executor,
        json!({"CreateCollection": {"collection": "c", "dimension": 2, "metric": "dot"}}),
    ));
    assert_eq!(code, "AlreadyExists");
}

#[test]
fn dimension_mismatch_on_upsert_and_search() {
    let executor = setup();
    let code = error_code(call(
        &executor,
        json!({"Upsert": {"collection": "c", "points": [
            {"id": 1, "vector": [1.0, 0.0]},
            {"id": 2, "vector": [1.0, 0.0, 0.0]}
        ]}}),
    ));
    assert_eq!(code, "DimensionMismatch");
    assert_eq!(
        ok(call(&executor, json!({"Count": {"collection": "c"}}))),
        json!({"Count": 0})
    );

    let code = error_code(call(
        &executor,
        json!({"Search": {"collection": "c", "vector": [1.0], "limit": 1}}),
    ));
    assert_eq!(code, "DimensionMismatch");
}

#[test]
fn not_found() {
    let executor = create_executor();
    let code = error_code(call(
        &executor,
        json!({"Search": {"collection": "ghost", "vector": [1.0], "limit": 1}}),
    ));
    assert_eq!(code, "NotFound");
}

#[test]
fn invalid_filter() {
    let executor = setup();
    for filter in [
        json!({"must": [{"field": "x", "eq": 1, "lt": 3}]}),
        json!({"must": [{"field": "x", "gte": "ten"}]}),
        json!({"must": "x"}),
        json!([1, 2]),
    ] {
        let code = error_code(call(
            &executor,
            json!({"Search": {"collection": "c", "vector": [1.0, 0.0], "limit": 1, "filter": filter}}),
        ));
        assert_eq!(code, "InvalidFilter");
    }
}

#[test]
fn embedding_error() {
    let executor = setup();
    let code = error_code(call(
        &executor,
        json!({"UploadDocuments": {"collection": "c", "text_field": "body", "documents": [{"title": "x"}]}}),
    ));
    assert_eq!(code, "EmbeddingError");
}

#[test]
fn text_without_embedder_is_config_error() {
    let executor = NearStore::new().executor();
    let code = error_code(call(
        &executor,
        json!({"SearchText": {"collection": "c", "text": "hi", "limit": 1}}),
    ));
    assert_eq!(code, "ConfigError");
}

#[test]
fn invalid_command() {
    let executor = create_executor();
    for raw in ["", "[]", "{\"Nope\": {}}", "{\"Upsert\": {\"collection\": \"c\"}}"] {
        let response: Value = serde_json::from_str(&executor.execute_json(raw)).unwrap();
        assert_eq!(error_code(response), "InvalidCommand", "request {:?}", raw);
    }
}
