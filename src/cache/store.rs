//! Cache Store Module
//!
//! TTL cache engine: a HashMap of entries with lazy expiry on read and an
//! eager full sweep for the periodic cleanup task.

use std::collections::HashMap;
use std::time::Duration;

use crate::cache::entry::current_timestamp_ms;
use crate::cache::{CacheCounters, CacheEntry, CacheStats};

// == Cache Store ==
/// Keyed response cache with per-entry TTL.
///
/// Every operation is synchronous. Sharing across tasks goes through
/// [`SharedCache`](crate::cache::SharedCache).
#[derive(Debug)]
pub struct CacheStore<V> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<V>>,
    /// Lifetime counters
    counters: CacheCounters,
}

impl<V> Default for CacheStore<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> CacheStore<V> {
    // == Constructor ==
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            counters: CacheCounters::default(),
        }
    }

    // == Set ==
    /// Stores `value` under `key`, expiring `ttl` from now.
    ///
    /// Any existing entry for the key is replaced and its TTL reset.
    pub fn set(&mut self, key: impl Into<String>, value: V, ttl: Duration) {
        self.entries.insert(key.into(), CacheEntry::new(value, ttl));
    }

    // == Get ==
    /// Returns the value if present and fresh.
    ///
    /// An expired entry is evicted as a side effect and reported as a miss.
    pub fn get(&mut self, key: &str) -> Option<&V> {
        if self.evict_if_expired(key) || !self.entries.contains_key(key) {
            self.counters.record_miss();
            return None;
        }

        self.counters.record_hit();
        self.entries.get(key).map(|entry| &entry.value)
    }

    // == Has ==
    /// Same freshness check as [`get`](Self::get), without reading the value.
    pub fn has(&mut self, key: &str) -> bool {
        !self.evict_if_expired(key) && self.entries.contains_key(key)
    }

    // == Remove ==
    /// Deletes an entry; absent keys are ignored.
    pub fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }

    // == Clear ==
    /// Empties the store. Counters are kept.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    // == Cleanup ==
    /// Removes every expired entry and returns how many were dropped.
    ///
    /// Unexpired entries are never touched.
    pub fn cleanup(&mut self) -> usize {
        let now = current_timestamp_ms();
        let before = self.entries.len();

        self.entries.retain(|_, entry| entry.is_fresh_at(now));

        let removed = before - self.entries.len();
        self.counters.record_expirations(removed);
        removed
    }

    // == Stats ==
    /// Returns size and stored keys, including not-yet-swept expired ones.
    pub fn stats(&self) -> CacheStats {
        CacheStats::new(self.entries.keys().cloned().collect(), self.counters)
    }

    /// Raw entry access for diagnostics; performs no expiry check.
    pub fn peek(&self, key: &str) -> Option<&CacheEntry<V>> {
        self.entries.get(key)
    }

    // == Length ==
    /// Returns the current number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops `key` if it is stored and stale. Returns whether it was dropped.
    fn evict_if_expired(&mut self, key: &str) -> bool {
        let now = current_timestamp_ms();
        let expired = self
            .entries
            .get(key)
            .is_some_and(|entry| !entry.is_fresh_at(now));

        if expired {
            self.entries.remove(key);
            self.counters.record_expirations(1);
        }
        expired
    }
}

impl<V: Clone> CacheStore<V> {
    /// Owned variant of [`get`](Self::get).
    pub fn get_cloned(&mut self, key: &str) -> Option<V> {
        self.get(key).cloned()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use std::thread::sleep;

    const LONG: Duration = Duration::from_secs(300);

    #[test]
    fn test_store_new() {
        let store: CacheStore<Value> = CacheStore::new();
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
    }

    #[test]
    fn test_store_set_and_get() {
        let mut store = CacheStore::new();

        store.set("popular-movies-1", json!({"page": 1}), LONG);

        assert_eq!(store.get("popular-movies-1"), Some(&json!({"page": 1})));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_get_nonexistent() {
        let mut store: CacheStore<Value> = CacheStore::new();
        assert!(store.get("movie-603").is_none());
        assert!(!store.has("movie-603"));
    }

    #[test]
    fn test_store_overwrite() {
        let mut store = CacheStore::new();

        store.set("movie-603", "first", LONG);
        store.set("movie-603", "second", LONG);

        assert_eq!(store.get("movie-603"), Some(&"second"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_overwrite_resets_ttl() {
        let mut store = CacheStore::new();

        store.set("tv-1", 1, Duration::from_millis(30));
        store.set("tv-1", 2, LONG);
        sleep(Duration::from_millis(60));

        assert_eq!(store.get("tv-1"), Some(&2));
    }

    #[test]
    fn test_store_remove() {
        let mut store = CacheStore::new();

        store.set("a", 1, LONG);
        store.remove("a");

        assert!(store.is_empty());
        assert!(store.get("a").is_none());
    }

    #[test]
    fn test_store_remove_absent_is_noop() {
        let mut store = CacheStore::new();
        store.set("b", 1, LONG);

        store.remove("a");

        assert_eq!(store.stats().keys, vec!["b"]);
    }

    #[test]
    fn test_store_ttl_expiration_scenario() {
        let mut store = CacheStore::new();

        store.set("a", json!({"x": 1}), Duration::from_millis(100));
        assert_eq!(store.get("a"), Some(&json!({"x": 1})));

        sleep(Duration::from_millis(150));

        assert!(store.get("a").is_none());
        assert!(store.stats().keys.is_empty());
    }

    #[test]
    fn test_has_evicts_expired() {
        let mut store = CacheStore::new();

        store.set("search-batman-1", 1, Duration::from_millis(20));
        sleep(Duration::from_millis(50));

        // Still listed until someone looks at it
        assert_eq!(store.stats().size, 1);
        assert!(!store.has("search-batman-1"));
        assert_eq!(store.stats().size, 0);
    }

    #[test]
    fn test_store_clear() {
        let mut store = CacheStore::new();
        store.set("a", 1, LONG);
        store.set("b", 2, LONG);

        store.clear();

        assert!(store.stats().keys.is_empty());
    }

    #[test]
    fn test_store_counters() {
        let mut store = CacheStore::new();

        store.set("key1", "value1", LONG);
        store.get("key1"); // hit
        store.get("nonexistent"); // miss

        let stats = store.stats();
        assert_eq!(stats.counters.hits, 1);
        assert_eq!(stats.counters.misses, 1);
        assert_eq!(stats.size, 1);
    }

    #[test]
    fn test_store_cleanup_expired() {
        let mut store = CacheStore::new();

        store.set("key1", "value1", Duration::from_millis(20));
        store.set("key2", "value2", LONG);

        sleep(Duration::from_millis(50));

        let removed = store.cleanup();
        assert_eq!(removed, 1);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("key2"), Some(&"value2"));
        assert_eq!(store.stats().counters.expirations, 1);
    }

    #[test]
    fn test_get_cloned() {
        let mut store = CacheStore::new();
        store.set("tv-genres", vec![1, 2, 3], LONG);

        assert_eq!(store.get_cloned("tv-genres"), Some(vec![1, 2, 3]));
    }
}
