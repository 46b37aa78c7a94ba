//! Cache Sweep Task
//!
//! Background task that periodically drops expired responses, so entries
//! nobody reads again do not linger until the process exits.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::SharedCache;

/// Spawns a background task that sweeps expired entries every `interval`.
///
/// The first sweep happens one interval after spawning. The returned handle
/// is aborted during graceful shutdown.
///
/// # Example
/// ```ignore
/// let cache = shared_cache();
/// let cleanup_handle = spawn_cleanup_task(cache.clone(), Duration::from_secs(600));
/// // Later, during shutdown:
/// cleanup_handle.abort();
/// ```
pub fn spawn_cleanup_task(cache: SharedCache, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(
            "Starting cache sweep task with interval of {} seconds",
            interval.as_secs_f64()
        );

        loop {
            tokio::time::sleep(interval).await;

            let (removed, remaining) = {
                let mut cache_guard = cache.write().await;
                let removed = cache_guard.cleanup();
                (removed, cache_guard.len())
            };

            if removed > 0 {
                info!(
                    "Cache sweep: removed {} expired entries, {} remaining",
                    removed, remaining
                );
            } else {
                debug!("Cache sweep: no expired entries found");
            }
        }
    })
}
