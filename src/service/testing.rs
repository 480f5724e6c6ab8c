//! Store and cache doubles for service tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use uuid::Uuid;

use crate::cache::{CacheBackend, CacheStats};
use crate::error::{CacheError, StoreError};
use crate::models::{NewTask, Task, TaskPatch};
use crate::store::{MemoryTaskStore, StoreResult, TaskStore};

/// Memory store that counts list queries and successful writes.
#[derive(Debug, Default)]
pub struct CountingStore {
    inner: MemoryTaskStore,
    list_calls: AtomicUsize,
    write_calls: AtomicUsize,
}

impl CountingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The wrapped store, for reads that should not be counted.
    pub fn inner(&self) -> &MemoryTaskStore {
        &self.inner
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn write_calls(&self) -> usize {
        self.write_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TaskStore for CountingStore {
    async fn list_newest_first(&self) -> StoreResult<Vec<Task>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.list_newest_first().await
    }

    async fn get(&self, id: Uuid) -> StoreResult<Option<Task>> {
        self.inner.get(id).await
    }

    async fn insert(&self, new_task: NewTask) -> StoreResult<Task> {
        self.write_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.insert(new_task).await
    }

    async fn update(&self, id: Uuid, patch: TaskPatch) -> StoreResult<Option<Task>> {
        self.write_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.update(id, patch).await
    }

    async fn delete(&self, id: Uuid) -> StoreResult<bool> {
        self.write_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.delete(id).await
    }

    async fn ping(&self) -> StoreResult<()> {
        self.inner.ping().await
    }
}

/// Store whose every operation fails.
pub struct FailingStore;

fn store_down<T>() -> StoreResult<T> {
    Err(StoreError::Unavailable("connection refused".to_string()))
}

#[async_trait]
impl TaskStore for FailingStore {
    async fn list_newest_first(&self) -> StoreResult<Vec<Task>> {
        store_down()
    }

    async fn get(&self, _id: Uuid) -> StoreResult<Option<Task>> {
        store_down()
    }

    async fn insert(&self, _new_task: NewTask) -> StoreResult<Task> {
        store_down()
    }

    async fn update(&self, _id: Uuid, _patch: TaskPatch) -> StoreResult<Option<Task>> {
        store_down()
    }

    async fn delete(&self, _id: Uuid) -> StoreResult<bool> {
        store_down()
    }

    async fn ping(&self) -> StoreResult<()> {
        store_down()
    }
}

/// Cache whose every operation fails.
pub struct FailingCache;

fn cache_down<T>() -> Result<T, CacheError> {
    Err(CacheError::Unavailable("connection reset".to_string()))
}

#[async_trait]
impl CacheBackend for FailingCache {
    async fn get(&self, _key: &str) -> Result<Option<String>, CacheError> {
        cache_down()
    }

    async fn set_with_ttl(
        &self,
        _key: &str,
        _value: String,
        _ttl_seconds: u64,
    ) -> Result<(), CacheError> {
        cache_down()
    }

    async fn delete(&self, _key: &str) -> Result<(), CacheError> {
        cache_down()
    }

    async fn ping(&self) -> Result<(), CacheError> {
        cache_down()
    }

    async fn stats(&self) -> Result<CacheStats, CacheError> {
        cache_down()
    }
}
