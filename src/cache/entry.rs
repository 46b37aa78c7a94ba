//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Smallest TTL an entry can carry, in milliseconds.
pub const MIN_TTL_MS: u64 = 1;

// == Cache Entry ==
/// Represents a single cache entry with its payload and freshness window.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry<V> {
    /// The stored payload
    pub value: V,
    /// Storage timestamp (Unix milliseconds)
    pub stored_at: u64,
    /// Expiration timestamp (Unix milliseconds), always `stored_at + ttl`
    pub expires_at: u64,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new cache entry stamped with the current time.
    ///
    /// A zero `ttl` is raised to [`MIN_TTL_MS`].
    pub fn new(value: V, ttl: Duration) -> Self {
        Self::stored_at(value, ttl, current_timestamp_ms())
    }

    /// Creates an entry as if it had been stored at `now` (Unix ms).
    pub fn stored_at(value: V, ttl: Duration, now: u64) -> Self {
        let ttl_ms = (ttl.as_millis() as u64).max(MIN_TTL_MS);

        Self {
            value,
            stored_at: now,
            expires_at: now.saturating_add(ttl_ms),
        }
    }

    // == Freshness ==
    /// An entry is fresh while `now <= expires_at`.
    pub fn is_fresh_at(&self, now: u64) -> bool {
        now <= self.expires_at
    }

    /// Checks whether the entry has outlived its TTL.
    pub fn is_expired(&self) -> bool {
        !self.is_fresh_at(current_timestamp_ms())
    }

    // == Time To Live ==
    /// Returns remaining TTL in milliseconds, zero once expired.
    pub fn ttl_remaining_ms(&self) -> u64 {
        self.expires_at.saturating_sub(current_timestamp_ms())
    }

    /// The TTL the entry was stored with.
    pub fn ttl(&self) -> Duration {
        Duration::from_millis(self.expires_at - self.stored_at)
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
