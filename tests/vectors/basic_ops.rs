//! Upsert, delete, retrieve and count.

use crate::*;
use nearstore::prelude::*;

#[test]
fn test_upsert_returns_batch_length() {
    let store = NearStore::new();
    store
        .create_collection("c", CollectionConfig::parse(4, "dot").unwrap())
        .unwrap();
    assert_eq!(store.upsert("c", city_points()).unwrap(), 6);
    assert_eq!(store.collection_info("c").unwrap().points_count, 6);
}

#[test]
fn test_upsert_replaces_existing_id() {
    let store = cities_store();
    store
        .upsert(
            "test_collection",
            vec![PointStruct::new(2u64, vec![1.0, 1.0, 1.0, 1.0]).with_payload("city", "Paris")],
        )
        .unwrap();
    assert_eq!(store.count("test_collection", None).unwrap(), 6);
    let rec = store
        .retrieve("test_collection", &ids(&[2]), true, true)
        .unwrap();
    assert_eq!(rec[0].vector, Some(vec![1.0; 4]));
    assert_eq!(rec[0].payload.as_ref().unwrap()["city"], json!("Paris"));
}

#[test]
fn test_upsert_same_batch_twice_is_idempotent() {
    let store = cities_store();
    let before = store
        .search("test_collection", &SearchRequest::new(CITY_QUERY.to_vec(), 6))
        .unwrap();
    store.upsert("test_collection", city_points()).unwrap();
    let after = store
        .search("test_collection", &SearchRequest::new(CITY_QUERY.to_vec(), 6))
        .unwrap();
    assert_eq!(before, after);
}

#[test]
fn test_upsert_batch_is_all_or_nothing() {
    let store = cities_store();
    let err = store
        .upsert(
            "test_collection",
            vec![
                PointStruct::new(10u64, vec![0.1; 4]),
                PointStruct::new(11u64, vec![0.1; 5]),
                PointStruct::new(12u64, vec![0.1; 4]),
            ],
        )
        .unwrap_err();
    assert!(matches!(err, Error::DimensionMismatch { expected: 4, got: 5 }));
    assert_eq!(store.count("test_collection", None).unwrap(), 6);
    assert!(store
        .retrieve("test_collection", &ids(&[10, 12]), false, false)
        .unwrap()
        .is_empty());
}

#[test]
fn test_delete_counts_only_removed() {
    let store = cities_store();
    assert_eq!(store.delete("test_collection", &ids(&[1, 2, 100])).unwrap(), 2);
    assert_eq!(store.delete("test_collection", &ids(&[1])).unwrap(), 0);
    assert_eq!(store.count("test_collection", None).unwrap(), 4);
}

#[test]
fn test_deleted_points_never_returned() {
    let store = cities_store();
    store.delete("test_collection", &ids(&[4])).unwrap();
    let hits = store
        .search("test_collection", &SearchRequest::new(CITY_QUERY.to_vec(), 10))
        .unwrap();
    assert_eq!(hits.len(), 5);
    assert!(!hit_ids(&hits).contains(&PointId::Num(4)));
    assert_eq!(hits[0].id, PointId::Num(1));
}

#[test]
fn test_retrieve_in_request_order() {
    let store = cities_store();
    let recs = store
        .retrieve("test_collection", &ids(&[5, 1, 3]), true, false)
        .unwrap();
    let got: Vec<_> = recs.iter().map(|r| r.id.clone()).collect();
    assert_eq!(got, ids(&[5, 1, 3]));
    assert!(recs.iter().all(|r| r.vector.is_none()));
}

#[test]
fn test_string_and_numeric_ids_coexist() {
    let store = cities_store();
    store
        .upsert(
            "test_collection",
            vec![PointStruct::new("paris", vec![0.18, 0.01, 0.85, 0.80])],
        )
        .unwrap();
    let hits = store
        .search("test_collection", &SearchRequest::new(CITY_QUERY.to_vec(), 2))
        .unwrap();
    // same vector as id 4: tie broken by id, numbers first
    assert_eq!(hits[0].id, PointId::Num(4));
    assert_eq!(hits[1].id, PointId::from("paris"));
    assert_eq!(hits[0].score, hits[1].score);
}

#[test]
fn test_scroll_through_everything() {
    let store = cities_store();
    let mut offset = None;
    let mut seen = Vec::new();
    loop {
        let (page, next) = store
            .scroll("test_collection", None, offset.as_ref(), 4)
            .unwrap();
        seen.extend(page.into_iter().map(|r| r.id));
        match next {
            Some(n) => offset = Some(n),
            None => break,
        }
    }
    assert_eq!(seen, ids(&[1, 2, 3, 4, 5, 6]));
}
