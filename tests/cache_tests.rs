// SPDX-FileCopyrightText: 2025 RAprogramm
// SPDX-License-Identifier: MIT

use std::{
    cell::Cell,
    num::NonZeroUsize,
    panic::{AssertUnwindSafe, catch_unwind},
    sync::Arc,
    thread
};

use sql_query_summary::cache::QueryCache;

fn size(n: usize) -> NonZeroUsize {
    NonZeroUsize::new(n).unwrap()
}

#[test]
fn test_query_cache_new() {
    let cache: QueryCache<String> = QueryCache::new(size(100));
    assert!(cache.get("SELECT 1").is_none());
    assert!(cache.is_empty());
}

#[test]
fn test_fetch_computes_on_miss() {
    let cache = QueryCache::new(size(10));
    let calls = Cell::new(0);
    let value = cache.fetch("Q", || {
        calls.set(calls.get() + 1);
        String::from("R")
    });
    assert_eq!(value, "R");
    assert_eq!(calls.get(), 1);
    assert_eq!(cache.get("Q").as_deref(), Some("R"));
}

#[test]
fn test_fetch_hit_does_not_compute() {
    let cache = QueryCache::new(size(10));
    assert_eq!(cache.fetch("Q", || String::from("R")), "R");
    let second = cache.fetch("Q", || panic!("compute must not run on a hit"));
    assert_eq!(second, "R");
}

#[test]
fn test_fetch_keys_are_exact_text() {
    let cache = QueryCache::new(size(10));
    cache.fetch("SELECT 1", || 1);
    assert_eq!(cache.fetch("select 1", || 2), 2);
    assert_eq!(cache.fetch("SELECT 1 ", || 3), 3);
    assert_eq!(cache.len(), 3);
}

#[test]
fn test_panicking_compute_stores_nothing() {
    let cache: QueryCache<String> = QueryCache::new(size(10));
    let result = catch_unwind(AssertUnwindSafe(|| {
        cache.fetch("Q", || panic!("boom"));
    }));
    assert!(result.is_err());
    assert!(cache.get("Q").is_none());
    assert_eq!(cache.fetch("Q", || String::from("after")), "after");
}

#[test]
fn test_try_fetch_error_stores_nothing() {
    let cache: QueryCache<u32> = QueryCache::new(size(10));
    let result: Result<u32, &str> = cache.try_fetch("Q", || Err("failed"));
    assert_eq!(result, Err("failed"));
    assert!(cache.is_empty());

    let ok: Result<u32, &str> = cache.try_fetch("Q", || Ok(5));
    assert_eq!(ok, Ok(5));
    let hit: Result<u32, &str> = cache.try_fetch("Q", || Err("not called"));
    assert_eq!(hit, Ok(5));
}

#[test]
fn test_store_overwrites() {
    let cache = QueryCache::new(size(10));
    cache.store("a", 1);
    cache.store("a", 2);
    assert_eq!(cache.get("a"), Some(2));
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_fifo_eviction() {
    let cache = QueryCache::default();
    cache.configure(size(2));
    cache.store("a", 1);
    cache.store("b", 2);
    cache.store("c", 3);
    assert_eq!(cache.len(), 2);
    assert_eq!(cache.get("a"), None);
    assert_eq!(cache.get("b"), Some(2));
    assert_eq!(cache.get("c"), Some(3));
}

#[test]
fn test_reads_do_not_refresh_eviction_order() {
    let cache = QueryCache::new(size(2));
    cache.store("a", 1);
    cache.store("b", 2);
    assert_eq!(cache.get("a"), Some(1));
    assert_eq!(cache.fetch("a", || 100), 1);
    cache.store("c", 3);
    assert_eq!(cache.keys(), vec!["b", "c"]);
}

#[test]
fn test_fetch_miss_evicts_oldest() {
    let cache = QueryCache::new(size(3));
    for (i, key) in ["q1", "q2", "q3", "q4"].iter().enumerate() {
        cache.fetch(key, || i);
    }
    assert_eq!(cache.keys(), vec!["q2", "q3", "q4"]);
}

#[test]
fn test_configure_smaller_clears_everything() {
    let cache = QueryCache::new(size(10));
    for key in ["a", "b", "c"] {
        cache.store(key, key.len());
    }
    cache.configure(size(2));
    assert!(cache.is_empty());
    assert_eq!(cache.capacity().get(), 2);
}

#[test]
fn test_configure_equal_size_keeps_entries() {
    let cache = QueryCache::new(size(10));
    cache.store("a", 1);
    cache.store("b", 2);
    cache.configure(size(2));
    assert_eq!(cache.len(), 2);
}

#[test]
fn test_clear() {
    let cache = QueryCache::new(size(10));
    cache.store("a", 1);
    cache.clear();
    assert!(cache.is_empty());
}

#[test]
fn test_concurrent_fetch_is_bounded_and_consistent() {
    let cache = Arc::new(QueryCache::new(size(16)));
    let handles: Vec<_> = (0..8)
        .map(|t| {
            let cache = Arc::clone(&cache);
            thread::spawn(move || {
                for i in 0..200 {
                    let key = format!("SELECT {}", (i + t) % 32);
                    let value = cache.fetch(&key, || key.len());
                    assert_eq!(value, key.len());
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
    assert!(cache.len() <= 16);
}
