//! Bounded memoization of summaries keyed by exact query text.
//!
//! Entries are kept in insertion order. When the cache is full, inserting a
//! new key evicts the oldest inserted entry; reading an entry does not move
//! it. This is FIFO eviction rather than LRU.
//!
//! All operations go through one [`parking_lot::Mutex`], and [`QueryCache::fetch`]
//! holds it while the computation runs, so concurrent misses are serialized.
//! The computation must therefore be fast and free of I/O.

use std::num::NonZeroUsize;

use indexmap::IndexMap;
use parking_lot::Mutex;
use tracing::{debug, trace};

/// Default maximum number of cached entries.
pub const DEFAULT_CACHE_SIZE: NonZeroUsize = match NonZeroUsize::new(1000) {
    Some(size) => size,
    None => unreachable!()
};

/// Insertion-ordered cache with FIFO eviction
#[derive(Debug)]
pub struct QueryCache<V> {
    inner: Mutex<CacheInner<V>>
}

#[derive(Debug)]
struct CacheInner<V> {
    entries:  IndexMap<String, V>,
    max_size: NonZeroUsize
}

impl<V> CacheInner<V> {
    fn insert(&mut self, key: &str, value: V) {
        if let Some(slot) = self.entries.get_mut(key) {
            *slot = value;
            return;
        }
        if self.entries.len() >= self.max_size.get() {
            self.entries.shift_remove_index(0);
            trace!(max_size = self.max_size.get(), "evicted oldest cache entry");
        }
        self.entries.insert(key.to_owned(), value);
    }
}

impl<V: Clone> QueryCache<V> {
    #[must_use]
    pub fn new(max_size: NonZeroUsize) -> Self {
        Self {
            inner: Mutex::new(CacheInner {
                entries: IndexMap::new(),
                max_size
            })
        }
    }

    /// Return the cached value for `key`, computing and storing it on a miss.
    ///
    /// `compute` runs at most once per miss and never on a hit. If it panics,
    /// nothing is stored and the lock is released during unwinding.
    pub fn fetch<F>(&self, key: &str, compute: F) -> V
    where
        F: FnOnce() -> V
    {
        let mut inner = self.inner.lock();
        if let Some(value) = inner.entries.get(key) {
            return value.clone();
        }
        trace!("cache miss");
        let value = compute();
        inner.insert(key, value.clone());
        value
    }

    /// Fallible [`fetch`](Self::fetch): an `Err` is returned as is and
    /// nothing is stored.
    pub fn try_fetch<E, F>(&self, key: &str, compute: F) -> Result<V, E>
    where
        F: FnOnce() -> Result<V, E>
    {
        let mut inner = self.inner.lock();
        if let Some(value) = inner.entries.get(key) {
            return Ok(value.clone());
        }
        let value = compute()?;
        inner.insert(key, value.clone());
        Ok(value)
    }

    /// Insert or overwrite an entry.
    ///
    /// Overwriting keeps the entry's original position in eviction order.
    pub fn store(&self, key: &str, value: V) {
        self.inner.lock().insert(key, value);
    }

    pub fn get(&self, key: &str) -> Option<V> {
        self.inner.lock().entries.get(key).cloned()
    }

    /// Change the capacity.
    ///
    /// If more entries are held than the new capacity allows, the cache is
    /// cleared entirely.
    pub fn configure(&self, max_size: NonZeroUsize) {
        let mut inner = self.inner.lock();
        inner.max_size = max_size;
        if inner.entries.len() > max_size.get() {
            debug!(
                entries = inner.entries.len(),
                max_size = max_size.get(),
                "cache exceeds new capacity, clearing"
            );
            inner.entries.clear();
        } else {
            debug!(max_size = max_size.get(), "cache capacity changed");
        }
    }

    pub fn capacity(&self) -> NonZeroUsize {
        self.inner.lock().max_size
    }

    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().entries.is_empty()
    }

    pub fn clear(&self) {
        self.inner.lock().entries.clear();
    }

    /// Keys in eviction order, oldest first.
    pub fn keys(&self) -> Vec<String> {
        self.inner.lock().entries.keys().cloned().collect()
    }
}

impl<V: Clone> Default for QueryCache<V> {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_SIZE)
    }
}
