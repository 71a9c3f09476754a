//! Payload filtering.

use crate::*;
use nearstore::prelude::*;

fn book_store() -> NearStore {
    init_tracing();
    let store = NearStore::new();
    store
        .create_collection("books", CollectionConfig::parse(2, "dot").unwrap())
        .unwrap();
    let books = [
        (1u64, "The Time Machine", 1895, "H.G. Wells"),
        (2, "The War of the Worlds", 1898, "H.G. Wells"),
        (3, "Dune", 1965, "Frank Herbert"),
        (4, "The Hunger Games", 2008, "Suzanne Collins"),
        (5, "The Three-Body Problem", 2008, "Liu Cixin"),
    ];
    let points = books
        .iter()
        .map(|&(id, name, year, author)| {
            PointStruct::new(id, vec![1.0, id as f32])
                .with_payload("name", name)
                .with_payload("year", year)
                .with_payload("author", json!({"name": author}))
        })
        .collect();
    store.upsert("books", points).unwrap();
    store
}

fn search_ids(store: &NearStore, filter: Filter) -> Vec<PointId> {
    let req = SearchRequest::new(vec![0.0, 1.0], 10).with_filter(filter);
    hit_ids(&store.search("books", &req).unwrap())
}

#[test]
fn test_london_filter_returns_only_london() {
    let store = cities_store();
    let req = SearchRequest::new(CITY_QUERY.to_vec(), 3)
        .with_filter(Filter::must(vec![Filter::eq("city", "London")]));
    let hits = store.search("test_collection", &req).unwrap();
    assert_eq!(hit_ids(&hits), ids(&[2]));
}

#[test]
fn test_filter_applies_before_limit() {
    // London ranks 4th unfiltered; still found with limit 1
    let store = cities_store();
    let req = SearchRequest::new(CITY_QUERY.to_vec(), 1)
        .with_filter(Filter::must(vec![Filter::eq("city", "London")]));
    assert_eq!(hit_ids(&store.search("test_collection", &req).unwrap()), ids(&[2]));
}

#[test]
fn test_range_gte() {
    let store = book_store();
    let got = search_ids(
        &store,
        Filter::must(vec![Filter::range("year", Range::new().gte(2000.0))]),
    );
    assert_eq!(got, ids(&[5, 4]));
}

#[test]
fn test_range_between() {
    let store = book_store();
    let got = search_ids(
        &store,
        Filter::range("year", Range::new().gt(1895.0).lt(2008.0)),
    );
    assert_eq!(got, ids(&[3, 2]));
}

#[test]
fn test_should_and_must_not() {
    let store = book_store();
    let got = search_ids(
        &store,
        Filter::must(vec![
            Filter::should(vec![
                Filter::eq("author.name", "H.G. Wells"),
                Filter::eq("name", "Dune"),
            ]),
            Filter::must_not(vec![Filter::eq("year", 1898)]),
        ]),
    );
    assert_eq!(got, ids(&[3, 1]));
}

#[test]
fn test_match_any() {
    let store = book_store();
    let got = search_ids(&store, Filter::any("year", vec![1895, 1965]));
    assert_eq!(got, ids(&[3, 1]));
}

#[test]
fn test_missing_field_matches_nothing() {
    let store = book_store();
    assert!(search_ids(&store, Filter::eq("genre", "sci-fi")).is_empty());
    assert!(search_ids(&store, Filter::range("name", Range::new().gte(0.0))).is_empty());
}

#[test]
fn test_no_match_is_empty_not_error() {
    let store = cities_store();
    let req = SearchRequest::new(CITY_QUERY.to_vec(), 3)
        .with_filter(Filter::eq("city", "Atlantis"));
    assert!(store.search("test_collection", &req).unwrap().is_empty());
}

#[test]
fn test_invalid_filter_errors() {
    let store = book_store();
    let req = SearchRequest::new(vec![0.0, 1.0], 3)
        .with_filter(Filter::range("year", Range::new()));
    assert!(store.search("books", &req).unwrap_err().is_invalid_filter());

    let err = Filter::from_json(&json!({"must": [{"field": "year", "between": [1, 2]}]}))
        .unwrap_err();
    assert_eq!(err.code(), "InvalidFilter");
}

#[test]
fn test_json_filter_form() {
    let store = book_store();
    let filter = Filter::from_json(&json!({
        "must": [{"key": "year", "gte": 2000}],
        "must_not": [{"field": "author.name", "eq": "Suzanne Collins"}]
    }))
    .unwrap();
    assert_eq!(search_ids(&store, filter), ids(&[5]));
}

#[test]
fn test_count_and_scroll_with_filter() {
    let store = book_store();
    let wells = Filter::eq("author.name", "H.G. Wells");
    assert_eq!(store.count("books", Some(&wells)).unwrap(), 2);
    let (page, next) = store.scroll("books", Some(&wells), None, 1).unwrap();
    assert_eq!(page[0].id, PointId::Num(1));
    assert_eq!(next, Some(PointId::Num(2)));
}
