//! Cache Cleanup Task
//!
//! Background task that periodically purges expired cache entries, so an
//! expired task list snapshot does not sit in memory until the next read.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::CacheStore;

/// Spawns a background task that removes expired cache entries every
/// `cleanup_interval_secs` seconds.
///
/// Returns the task handle so it can be aborted during shutdown.
///
/// # Example
/// ```ignore
/// let cache = MemoryCache::new();
/// let cleanup_handle = spawn_cleanup_task(cache.store(), 60);
/// // Later, during shutdown:
/// cleanup_handle.abort();
/// ```
pub fn spawn_cleanup_task(
    cache: Arc<RwLock<CacheStore>>,
    cleanup_interval_secs: u64,
) -> JoinHandle<()> {
    let interval = Duration::from_secs(cleanup_interval_secs.max(1));

    tokio::spawn(async move {
        info!(
            "Starting cache cleanup task with interval of {} seconds",
            interval.as_secs()
        );

        loop {
            tokio::time::sleep(interval).await;

            let removed = cache.write().await.cleanup_expired();

            if removed > 0 {
                info!("Cache cleanup: removed {} expired entries", removed);
            } else {
                debug!("Cache cleanup: no expired entries found");
            }
        }
    })
}
