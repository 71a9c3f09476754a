//! Command Dispatch Tests
//!
//! Every command variant round-trips through `execute_json` and produces
//! the expected output variant.

use crate::*;
use serde_json::json;

fn setup() -> Executor {
    let executor = create_executor();
    ok(call(
        &executor,
        json!({"CreateCollection": {"collection": "test_collection", "dimension": 4, "metric": "dot"}}),
    ));
    ok(call(
        &executor,
        json!({"Upsert": {"collection": "test_collection", "points": [
            {"id": 1, "vector": [0.05, 0.61, 0.76, 0.74], "payload": {"city": "Berlin"}},
            {"id": 2, "vector": [0.19, 0.81, 0.75, 0.11], "payload": {"city": "London"}},
            {"id": 3, "vector": [0.36, 0.55, 0.47, 0.94], "payload": {"city": "Moscow"}}
        ]}}),
    ));
    executor
}

// ============================================================================
// Collection Commands
// ============================================================================

#[test]
fn create_returns_unit() {
    let executor = create_executor();
    let out = ok(call(
        &executor,
        json!({"CreateCollection": {"collection": "c", "dimension": 3, "metric": "euclidean"}}),
    ));
    assert_eq!(out, json!("Unit"));
}

#[test]
fn list_and_info() {
    let executor = setup();
    let list = ok(call(&executor, json!("ListCollections")));
    assert_eq!(list["Collections"][0]["name"], json!("test_collection"));
    assert_eq!(list["Collections"][0]["points_count"], json!(3));

    let info = ok(call(
        &executor,
        json!({"CollectionInfo": {"collection": "test_collection"}}),
    ));
    assert_eq!(
        info["CollectionInfo"]["config"],
        json!({"dimension": 4, "metric": "dot"})
    );
}

#[test]
fn recreate_and_delete_collection() {
    let executor = setup();
    ok(call(
        &executor,
        json!({"RecreateCollection": {"collection": "test_collection", "dimension": 2, "metric": "cosine"}}),
    ));
    let count = ok(call(&executor, json!({"Count": {"collection": "test_collection"}})));
    assert_eq!(count, json!({"Count": 0}));

    let deleted = ok(call(
        &executor,
        json!({"DeleteCollection": {"collection": "test_collection"}}),
    ));
    assert_eq!(deleted, json!({"Bool": true}));
    let again = ok(call(
        &executor,
        json!({"DeleteCollection": {"collection": "test_collection"}}),
    ));
    assert_eq!(again, json!({"Bool": false}));
}

// ============================================================================
// Point Commands
// ============================================================================

#[test]
fn search_top_hit() {
    let executor = setup();
    let out = ok(call(
        &executor,
        json!({"Search": {"collection": "test_collection", "vector": [0.2, 0.1, 0.9, 0.7], "limit": 1}}),
    ));
    let hits = out["Hits"].as_array().unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0]["id"], json!(1));
    assert!((hits[0]["score"].as_f64().unwrap() - 1.273).abs() < 1e-4);
}

#[test]
fn search_with_filter_and_vectors() {
    let executor = setup();
    let out = ok(call(
        &executor,
        json!({"Search": {
            "collection": "test_collection",
            "vector": [0.2, 0.1, 0.9, 0.7],
            "limit": 3,
            "filter": {"must_not": [{"field": "city", "eq": "Berlin"}]},
            "with_payload": false,
            "with_vector": true
        }}),
    ));
    let hits = out["Hits"].as_array().unwrap();
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0]["id"], json!(3));
    assert!(hits[0].get("payload").is_none());
    assert_eq!(hits[0]["vector"].as_array().unwrap().len(), 4);
}

#[test]
fn delete_retrieve_count_scroll() {
    let executor = setup();
    let out = ok(call(
        &executor,
        json!({"Delete": {"collection": "test_collection", "ids": [3, 42]}}),
    ));
    assert_eq!(out, json!({"Count": 1}));

    let out = ok(call(
        &executor,
        json!({"Retrieve": {"collection": "test_collection", "ids": [2, 3, 1]}}),
    ));
    let ids: Vec<_> = out["Points"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].clone())
        .collect();
    assert_eq!(ids, vec![json!(2), json!(1)]);

    let out = ok(call(
        &executor,
        json!({"Count": {"collection": "test_collection", "filter": {"must": [{"field": "city", "any": ["London", "Paris"]}]}}}),
    ));
    assert_eq!(out, json!({"Count": 1}));

    let out = ok(call(
        &executor,
        json!({"Scroll": {"collection": "test_collection", "limit": 1}}),
    ));
    assert_eq!(out["Page"]["points"][0]["id"], json!(1));
    assert_eq!(out["Page"]["next_offset"], json!(2));
}

#[test]
fn upload_and_search_text() {
    let executor = create_executor();
    ok(call(
        &executor,
        json!({"CreateCollection": {"collection": "notes", "dimension": 64, "metric": "cosine"}}),
    ));
    let out = ok(call(
        &executor,
        json!({"UploadDocuments": {
            "collection": "notes",
            "text_field": "text",
            "start_id": 100,
            "documents": [{"text": "buy milk"}, {"text": "call the dentist"}]
        }}),
    ));
    assert_eq!(out, json!({"Count": 2}));

    let out = ok(call(
        &executor,
        json!({"SearchText": {"collection": "notes", "text": "buy milk", "limit": 1}}),
    ));
    assert_eq!(out["Hits"][0]["id"], json!(100));
    assert_eq!(out["Hits"][0]["payload"], json!({"text": "buy milk"}));
}
