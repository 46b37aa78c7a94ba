//! TTL-cache decorator over any access path.

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use super::{MediaSource, Query};
use crate::cache::{SharedCache, TtlTable};
use crate::error::Result;

/// Serves repeated queries from the shared cache within their class TTL.
///
/// Failures are never cached.
pub struct CachedSource<S> {
    inner: S,
    cache: SharedCache,
    ttls: TtlTable,
}

impl<S: MediaSource> CachedSource<S> {
    pub fn new(inner: S, cache: SharedCache, ttls: TtlTable) -> Self {
        Self { inner, cache, ttls }
    }

    /// Handle to the underlying store.
    pub fn cache(&self) -> &SharedCache {
        &self.cache
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Drops the cached payload of `query`, if any.
    pub async fn invalidate(&self, query: &Query) {
        self.cache.write().await.remove(query.cache_key().as_str());
    }

    /// Forces a round trip for `query` and caches the fresh result.
    pub async fn refetch(&self, query: &Query) -> Result<Value> {
        self.invalidate(query).await;
        self.fetch(query).await
    }
}

#[async_trait]
impl<S: MediaSource> MediaSource for CachedSource<S> {
    async fn fetch(&self, query: &Query) -> Result<Value> {
        let key = query.cache_key();

        if let Some(hit) = self.cache.write().await.get_cloned(key.as_str()) {
            debug!("cache hit: {}", key);
            return Ok(hit);
        }

        debug!("cache miss: {} (via {})", key, self.inner.name());
        let value = self.inner.fetch(query).await?;

        self.cache
            .write()
            .await
            .set(key.as_str(), value.clone(), self.ttls.ttl_for(key.class()));
        Ok(value)
    }

    fn name(&self) -> &'static str {
        self.inner.name()
    }
}
