//! Cache Module
//!
//! In-memory response cache with per-entry TTL, lazy expiry on read and a
//! periodic sweep.

mod entry;
mod keys;
mod stats;
mod store;


use std::sync::Arc;

use serde_json::Value;
use tokio::sync::RwLock;

// Re-export public types
pub use entry::{current_timestamp_ms, CacheEntry, MIN_TTL_MS};
pub use keys::{CacheKey, QueryClass, TtlTable};
pub use stats::{CacheCounters, CacheStats};
pub use store::CacheStore;

/// Store of opaque JSON payloads shared between the data layer, the cleanup
/// task and the debug endpoints.
pub type SharedCache = Arc<RwLock<CacheStore<Value>>>;

/// Creates an empty [`SharedCache`].
pub fn shared_cache() -> SharedCache {
    Arc::new(RwLock::new(CacheStore::new()))
}
