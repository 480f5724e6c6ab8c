//! Cache Backend Module
//!
//! The capability set the task service needs from a cache, plus the
//! in-process implementation used by the server.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::cache::{CacheStats, CacheStore};
use crate::error::CacheError;

// == Cache Backend ==
/// Best-effort key-value cache with per-entry TTL.
///
/// Every method may fail; callers treat failures as soft.
#[async_trait]
pub trait CacheBackend: Send + Sync {
    /// Returns the value under `key`, or `None` when absent or expired.
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Stores `value` under `key`, expiring `ttl_seconds` from now.
    async fn set_with_ttl(&self, key: &str, value: String, ttl_seconds: u64)
        -> Result<(), CacheError>;

    /// Removes `key`. Removing a missing key succeeds.
    async fn delete(&self, key: &str) -> Result<(), CacheError>;

    /// Checks that the backend is reachable.
    async fn ping(&self) -> Result<(), CacheError>;

    /// Returns backend statistics.
    async fn stats(&self) -> Result<CacheStats, CacheError>;
}

// == Memory Cache ==
/// `CacheBackend` over a shared in-process `CacheStore`.
#[derive(Debug, Clone, Default)]
pub struct MemoryCache {
    store: Arc<RwLock<CacheStore>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared handle to the underlying store, for the cleanup task.
    pub fn store(&self) -> Arc<RwLock<CacheStore>> {
        Arc::clone(&self.store)
    }
}

#[async_trait]
impl CacheBackend for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        // Write lock: expired entries are purged and stats updated on read
        Ok(self.store.write().await.get(key))
    }

    async fn set_with_ttl(
        &self,
        key: &str,
        value: String,
        ttl_seconds: u64,
    ) -> Result<(), CacheError> {
        self.store
            .write()
            .await
            .set(key.to_string(), value, ttl_seconds)
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.store.write().await.delete(key);
        Ok(())
    }

    async fn ping(&self) -> Result<(), CacheError> {
        Ok(())
    }

    async fn stats(&self) -> Result<CacheStats, CacheError> {
        Ok(self.store.read().await.stats())
    }
}
