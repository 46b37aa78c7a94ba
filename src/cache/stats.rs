//! Cache Statistics Module
//!
//! Snapshot of the store for the debug overlay, plus running counters.

use serde::Serialize;

// == Cache Counters ==
/// Running counters kept by the store across its lifetime.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct CacheCounters {
    /// Number of fresh reads
    pub hits: u64,
    /// Number of reads that found nothing fresh
    pub misses: u64,
    /// Number of entries dropped because their TTL elapsed (lazily or by sweep)
    pub expirations: u64,
}

impl CacheCounters {
    /// Increments the hit counter.
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    /// Increments the miss counter.
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    /// Adds `count` expired evictions.
    pub fn record_expirations(&mut self, count: usize) {
        self.expirations += count as u64;
    }
}

// == Cache Stats ==
/// Point-in-time view of the store.
///
/// `keys` lists every stored key, including entries that have expired but
/// have not been swept yet.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Number of stored entries
    pub size: usize,
    /// Stored keys, sorted for stable output
    pub keys: Vec<String>,
    /// Lifetime counters
    #[serde(flatten)]
    pub counters: CacheCounters,
}

impl CacheStats {
    /// Builds a snapshot from the stored keys and the running counters.
    pub fn new(mut keys: Vec<String>, counters: CacheCounters) -> Self {
        keys.sort();
        Self {
            size: keys.len(),
            keys,
            counters,
        }
    }

    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 if no reads have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.counters.hits + self.counters.misses;
        if total == 0 {
            0.0
        } else {
            self.counters.hits as f64 / total as f64
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_sorted_keys() {
        let stats = CacheStats::new(
            vec!["tv-1".to_string(), "movie-603".to_string()],
            CacheCounters::default(),
        );
        assert_eq!(stats.size, 2);
        assert_eq!(stats.keys, vec!["movie-603", "tv-1"]);
    }

    #[test]
    fn test_hit_rate_no_requests() {
        let stats = CacheStats::default();
        assert_eq!(stats.hit_rate(), 0.0);
    }

    #[test]
    fn test_hit_rate_mixed() {
        let mut counters = CacheCounters::default();
        counters.record_hit();
        counters.record_hit();
        counters.record_hit();
        counters.record_miss();
        let stats = CacheStats::new(Vec::new(), counters);
        assert_eq!(stats.hit_rate(), 0.75);
    }

    #[test]
    fn test_record_expirations() {
        let mut counters = CacheCounters::default();
        counters.record_expirations(2);
        counters.record_expirations(1);
        assert_eq!(counters.expirations, 3);
    }

    #[test]
    fn test_stats_serialize_flattens_counters() {
        let stats = CacheStats::new(vec!["countries".to_string()], CacheCounters::default());
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["size"], 1);
        assert_eq!(json["keys"][0], "countries");
        assert_eq!(json["hits"], 0);
    }
}
