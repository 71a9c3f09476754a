//! Concurrent readers and writers.

use crate::*;
use nearstore::prelude::*;
use std::sync::Barrier;
use std::thread;

#[test]
fn test_store_is_send_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<NearStore>();
}

#[test]
fn test_readers_never_see_partial_batches() {
    let store = cities_store();
    store
        .create_collection("pairs", CollectionConfig::parse(2, "dot").unwrap())
        .unwrap();

    let barrier = Barrier::new(5);
    thread::scope(|s| {
        for t in 0..4u64 {
            let store = store.clone();
            let barrier = &barrier;
            s.spawn(move || {
                barrier.wait();
                for i in 0..100u64 {
                    let base = t * 10_000 + i * 3;
                    let batch = (0..3)
                        .map(|k| PointStruct::new(base + k, vec![1.0, (i + k) as f32]))
                        .collect();
                    store.upsert("pairs", batch).unwrap();
                }
            });
        }

        let store = store.clone();
        let barrier = &barrier;
        s.spawn(move || {
            barrier.wait();
            for _ in 0..200 {
                assert_eq!(store.count("pairs", None).unwrap() % 3, 0);
                let hits = store
                    .search("pairs", &SearchRequest::new(vec![0.0, 1.0], 10))
                    .unwrap();
                assert!(hits.len() <= 10);
            }
        });
    });

    assert_eq!(store.count("pairs", None).unwrap(), 1200);
}

#[test]
fn test_concurrent_collection_creation() {
    let store = NearStore::new();
    let created: usize = thread::scope(|s| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = store.clone();
                s.spawn(move || {
                    store
                        .create_collection("race", CollectionConfig::parse(2, "dot").unwrap())
                        .is_ok() as usize
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).sum()
    });
    assert_eq!(created, 1);
}

#[test]
fn test_searches_during_deletes() {
    let store = cities_store();
    thread::scope(|s| {
        let writer = store.clone();
        s.spawn(move || {
            for id in 1..=6u64 {
                writer.delete("test_collection", &ids(&[id])).unwrap();
            }
        });
        let reader = store.clone();
        s.spawn(move || {
            for _ in 0..50 {
                let hits = reader
                    .search("test_collection", &SearchRequest::new(CITY_QUERY.to_vec(), 6))
                    .unwrap();
                assert!(hits.len() <= 6);
            }
        });
    });
    assert_eq!(store.count("test_collection", None).unwrap(), 0);
}
