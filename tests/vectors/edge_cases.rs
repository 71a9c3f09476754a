//! Boundary conditions.

use crate::*;
use nearstore::prelude::*;

#[test]
fn test_wrong_length_query_changes_nothing() {
    let store = cities_store();
    let err = store
        .search("test_collection", &SearchRequest::new(vec![0.2, 0.1, 0.9], 3))
        .unwrap_err();
    assert!(matches!(err, Error::DimensionMismatch { expected: 4, got: 3 }));
    assert_eq!(store.count("test_collection", None).unwrap(), 6);
    let hits = store
        .search("test_collection", &SearchRequest::new(CITY_QUERY.to_vec(), 1))
        .unwrap();
    assert_eq!(hits[0].id, PointId::Num(4));
}

#[test]
fn test_limit_zero() {
    let store = cities_store();
    let hits = store
        .search("test_collection", &SearchRequest::new(CITY_QUERY.to_vec(), 0))
        .unwrap();
    assert!(hits.is_empty());
}

#[test]
fn test_empty_collection_search() {
    let store = NearStore::new();
    store
        .create_collection("empty", CollectionConfig::parse(3, "cosine").unwrap())
        .unwrap();
    assert!(store
        .search("empty", &SearchRequest::new(vec![1.0, 0.0, 0.0], 5))
        .unwrap()
        .is_empty());
}

#[test]
fn test_empty_batch_and_empty_delete() {
    let store = cities_store();
    assert_eq!(store.upsert("test_collection", vec![]).unwrap(), 0);
    assert_eq!(store.delete("test_collection", &[]).unwrap(), 0);
    assert_eq!(store.count("test_collection", None).unwrap(), 6);
}

#[test]
fn test_non_finite_vectors_rejected() {
    let store = cities_store();
    let err = store
        .upsert(
            "test_collection",
            vec![PointStruct::new(9u64, vec![0.1, f32::INFINITY, 0.1, 0.1])],
        )
        .unwrap_err();
    assert_eq!(err.code(), "InvalidVector");

    let err = store
        .search(
            "test_collection",
            &SearchRequest::new(vec![f32::NAN, 0.0, 0.0, 0.0], 1),
        )
        .unwrap_err();
    assert_eq!(err.code(), "InvalidVector");
}

#[test]
fn test_dimension_one_and_large() {
    let store = NearStore::new();
    store
        .create_collection("one", CollectionConfig::parse(1, "euclidean").unwrap())
        .unwrap();
    store
        .upsert(
            "one",
            vec![
                PointStruct::new(1u64, vec![-1.0]),
                PointStruct::new(2u64, vec![2.0]),
            ],
        )
        .unwrap();
    let hits = store
        .search("one", &SearchRequest::new(vec![0.0], 1))
        .unwrap();
    assert_eq!(hits[0].id, PointId::Num(1));

    store
        .create_collection("wide", CollectionConfig::parse(65_536, "cosine").unwrap())
        .unwrap();
    assert!(store
        .create_collection("too_wide", CollectionConfig::parse(65_537, "cosine").unwrap())
        .unwrap_err()
        .is_config_error());
}

#[test]
fn test_lenient_retrieve_skips_unknown() {
    let store = cities_store();
    let recs = store
        .retrieve("test_collection", &ids(&[1, 99]), true, false)
        .unwrap();
    assert_eq!(recs.len(), 1);
}

#[test]
fn test_scroll_with_limit_zero_and_past_end() {
    let store = cities_store();
    let (page, next) = store.scroll("test_collection", None, None, 0).unwrap();
    assert!(page.is_empty());
    assert_eq!(next, Some(PointId::Num(1)));

    let past = PointId::from("zzz");
    let (page, next) = store
        .scroll("test_collection", None, Some(&past), 10)
        .unwrap();
    assert!(page.is_empty());
    assert!(next.is_none());
}

#[test]
fn test_hit_serialization_shape() {
    let store = cities_store();
    let hits = store
        .search("test_collection", &SearchRequest::new(CITY_QUERY.to_vec(), 1))
        .unwrap();
    let value = serde_json::to_value(&hits[0]).unwrap();
    assert_eq!(value["id"], json!(4));
    assert_eq!(value["payload"], json!({"city": "New York"}));
    assert!(value.get("vector").is_none());
}
