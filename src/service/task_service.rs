//! Task Service
//!
//! Implements list/get/create/update/delete over a `TaskStore`, keeping the
//! full task list in a single cache slot.
//!
//! # Cache protocol
//! - `list` serves the slot when present and unexpired, otherwise reads the
//!   store newest-first and repopulates the slot with a fresh TTL.
//! - Every successful write deletes the slot. The slot is never patched.
//! - `get` never touches the cache.
//! - Cache failures are absorbed: a failed read is a miss, a failed write or
//!   delete is logged and counted, and the request continues on the store's
//!   result.

use std::fmt::Display;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::cache::{CacheBackend, CacheStats};
use crate::error::{AppError, Result, StoreOp};
use crate::models::{CreateTaskRequest, Task, UpdateTaskRequest};
use crate::store::TaskStore;

/// Cache key holding the serialized task list.
pub const TASKS_CACHE_KEY: &str = "todos";

/// TTL in seconds applied on every repopulation of the list slot.
pub const DEFAULT_CACHE_TTL: u64 = 3600;

// == Task Service ==
/// Orchestrates the task store and the list cache.
///
/// Cheap to clone; clones share backends and counters.
#[derive(Clone)]
pub struct TaskService {
    store: Arc<dyn TaskStore>,
    cache: Arc<dyn CacheBackend>,
    cache_ttl: u64,
    soft_failures: Arc<AtomicU64>,
}

impl TaskService {
    pub fn new(store: Arc<dyn TaskStore>, cache: Arc<dyn CacheBackend>, cache_ttl: u64) -> Self {
        Self {
            store,
            cache,
            cache_ttl,
            soft_failures: Arc::new(AtomicU64::new(0)),
        }
    }

    // == List ==
    /// Returns all tasks, newest first.
    pub async fn list(&self) -> Result<Vec<Task>> {
        if let Some(tasks) = self.cached_list().await {
            debug!(count = tasks.len(), "Task list served from cache");
            return Ok(tasks);
        }

        let tasks = self
            .store
            .list_newest_first()
            .await
            .map_err(AppError::store(StoreOp::Fetch))?;

        self.populate(&tasks).await;
        debug!(count = tasks.len(), "Task list loaded from store");

        Ok(tasks)
    }

    // == Get ==
    /// Returns a single task straight from the store.
    pub async fn get(&self, id: Uuid) -> Result<Task> {
        self.store
            .get(id)
            .await
            .map_err(AppError::store(StoreOp::Fetch))?
            .ok_or_else(|| AppError::NotFound(id.to_string()))
    }

    // == Create ==
    /// Validates and inserts a task, then invalidates the list slot.
    pub async fn create(&self, request: CreateTaskRequest) -> Result<Task> {
        let new_task = request.validate()?;

        let task = self
            .store
            .insert(new_task)
            .await
            .map_err(AppError::store(StoreOp::Create))?;

        self.invalidate().await;
        info!(id = %task.id, priority = %task.priority, "Task created");

        Ok(task)
    }

    // == Update ==
    /// Applies the fields present in `request`, then invalidates the list slot.
    pub async fn update(&self, id: Uuid, request: UpdateTaskRequest) -> Result<Task> {
        let patch = request.validate()?;
        if patch.is_empty() {
            debug!(id = %id, "Update carries no fields");
        }

        let task = self
            .store
            .update(id, patch)
            .await
            .map_err(AppError::store(StoreOp::Update))?
            .ok_or_else(|| AppError::NotFound(id.to_string()))?;

        self.invalidate().await;
        info!(id = %task.id, "Task updated");

        Ok(task)
    }

    // == Delete ==
    /// Removes a task permanently, then invalidates the list slot.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let removed = self
            .store
            .delete(id)
            .await
            .map_err(AppError::store(StoreOp::Delete))?;

        if !removed {
            return Err(AppError::NotFound(id.to_string()));
        }

        self.invalidate().await;
        info!(id = %id, "Task deleted");

        Ok(())
    }

    // == Observability ==
    /// Returns the cache backend's counters.
    ///
    /// An unreachable cache reports zeroed counters.
    pub async fn cache_stats(&self) -> CacheStats {
        match self.cache.stats().await {
            Ok(stats) => stats,
            Err(err) => {
                warn!(error = %err, "Cache stats unavailable");
                CacheStats::new()
            }
        }
    }

    /// Number of cache operations that failed and were absorbed.
    pub fn soft_failures(&self) -> u64 {
        self.soft_failures.load(Ordering::Relaxed)
    }

    /// Reports whether the store and the cache are reachable.
    pub async fn health(&self) -> (bool, bool) {
        let store_ok = self.store.ping().await.is_ok();
        let cache_ok = self.cache.ping().await.is_ok();
        (store_ok, cache_ok)
    }

    // == Cache Helpers ==
    async fn cached_list(&self) -> Option<Vec<Task>> {
        match self.cache.get(TASKS_CACHE_KEY).await {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(tasks) => Some(tasks),
                Err(err) => {
                    self.soft_failure("decode", err);
                    None
                }
            },
            Ok(None) => None,
            Err(err) => {
                self.soft_failure("get", err);
                None
            }
        }
    }

    async fn populate(&self, tasks: &[Task]) {
        let raw = match serde_json::to_string(tasks) {
            Ok(raw) => raw,
            Err(err) => {
                self.soft_failure("encode", err);
                return;
            }
        };

        if let Err(err) = self
            .cache
            .set_with_ttl(TASKS_CACHE_KEY, raw, self.cache_ttl)
            .await
        {
            self.soft_failure("set", err);
        }
    }

    async fn invalidate(&self) {
        if let Err(err) = self.cache.delete(TASKS_CACHE_KEY).await {
            self.soft_failure("delete", err);
        }
    }

    fn soft_failure(&self, operation: &str, err: impl Display) {
        self.soft_failures.fetch_add(1, Ordering::Relaxed);
        warn!(operation, error = %err, "Cache operation failed, continuing without cache");
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::cache::MemoryCache;
    use crate::models::Priority;
    use crate::service::testing::{CountingStore, FailingCache, FailingStore};
    use crate::views::{build_board, BoardFilter};

    fn service_with(store: Arc<CountingStore>, cache: Arc<dyn CacheBackend>) -> TaskService {
        TaskService::new(store, cache, DEFAULT_CACHE_TTL)
    }

    fn create_request(text: &str, priority: Option<&str>) -> CreateTaskRequest {
        CreateTaskRequest {
            task: text.to_string(),
            priority: priority.map(String::from),
            completed: None,
        }
    }

    #[tokio::test]
    async fn test_list_populates_cache_and_serves_hits() {
        let store = Arc::new(CountingStore::new());
        let cache = Arc::new(MemoryCache::new());
        let service = service_with(store.clone(), cache.clone());

        service.create(create_request("Buy milk", None)).await.unwrap();

        let first = service.list().await.unwrap();
        let second = service.list().await.unwrap();

        assert_eq!(first, second);
        assert_eq!(store.list_calls(), 1, "Second list should be a cache hit");
        assert_eq!(cache.stats().await.unwrap().hits, 1);
    }

    #[tokio::test]
    async fn test_every_write_invalidates() {
        let store = Arc::new(CountingStore::new());
        let service = service_with(store.clone(), Arc::new(MemoryCache::new()));

        let task = service.create(create_request("Buy milk", None)).await.unwrap();
        service.list().await.unwrap();
        service.list().await.unwrap();
        assert_eq!(store.list_calls(), 1);

        let update = UpdateTaskRequest {
            completed: Some(true),
            ..Default::default()
        };
        service.update(task.id, update).await.unwrap();
        service.list().await.unwrap();
        assert_eq!(store.list_calls(), 2, "Update should invalidate");

        service.create(create_request("Walk dog", None)).await.unwrap();
        service.list().await.unwrap();
        assert_eq!(store.list_calls(), 3, "Create should invalidate");

        service.delete(task.id).await.unwrap();
        let tasks = service.list().await.unwrap();
        assert_eq!(store.list_calls(), 4, "Delete should invalidate");
        assert_eq!(tasks.len(), 1);
    }

    #[tokio::test]
    async fn test_empty_update_still_invalidates() {
        let store = Arc::new(CountingStore::new());
        let service = service_with(store.clone(), Arc::new(MemoryCache::new()));

        let task = service.create(create_request("Buy milk", None)).await.unwrap();
        service.list().await.unwrap();

        let updated = service
            .update(task.id, UpdateTaskRequest::default())
            .await
            .unwrap();
        assert_eq!(updated, task);

        service.list().await.unwrap();
        assert_eq!(store.list_calls(), 2);
    }

    #[tokio::test]
    async fn test_ttl_expiry_forces_store_read() {
        let store = Arc::new(CountingStore::new());
        let service = TaskService::new(store.clone(), Arc::new(MemoryCache::new()), 1);

        service.list().await.unwrap();
        service.list().await.unwrap();
        assert_eq!(store.list_calls(), 1);

        tokio::time::sleep(Duration::from_millis(1100)).await;

        service.list().await.unwrap();
        assert_eq!(store.list_calls(), 2, "Expired slot must not be served");
    }

    #[tokio::test]
    async fn test_blank_text_touches_nothing() {
        let store = Arc::new(CountingStore::new());
        let cache = Arc::new(MemoryCache::new());
        let service = service_with(store.clone(), cache.clone());

        for text in ["", "   "] {
            let result = service.create(create_request(text, Some("high"))).await;
            assert!(matches!(result, Err(AppError::Validation(_))));
        }

        assert_eq!(store.write_calls(), 0);
        assert_eq!(cache.stats().await.unwrap().invalidations, 0);
    }

    #[tokio::test]
    async fn test_invalid_priority_touches_nothing() {
        let store = Arc::new(CountingStore::new());
        let cache = Arc::new(MemoryCache::new());
        let service = service_with(store.clone(), cache.clone());

        let result = service
            .create(create_request("Buy milk", Some("urgent")))
            .await;
        assert!(matches!(result, Err(AppError::Validation(_))));
        assert_eq!(store.write_calls(), 0);
        assert_eq!(cache.stats().await.unwrap().invalidations, 0);
    }

    #[tokio::test]
    async fn test_not_found_symmetry() {
        let store = Arc::new(CountingStore::new());
        let cache = Arc::new(MemoryCache::new());
        let service = service_with(store, cache.clone());
        let missing = Uuid::new_v4();

        assert!(matches!(
            service.get(missing).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            service.update(missing, UpdateTaskRequest::default()).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            service.delete(missing).await,
            Err(AppError::NotFound(_))
        ));

        assert_eq!(cache.stats().await.unwrap().invalidations, 0);
    }

    #[tokio::test]
    async fn test_get_bypasses_cache() {
        let store = Arc::new(CountingStore::new());
        let cache = Arc::new(MemoryCache::new());
        let service = service_with(store, cache.clone());

        let task = service.create(create_request("Buy milk", None)).await.unwrap();
        assert_eq!(service.get(task.id).await.unwrap(), task);

        let stats = cache.stats().await.unwrap();
        assert_eq!(stats.hits + stats.misses, 0);
        assert_eq!(stats.total_entries, 0);
    }

    #[tokio::test]
    async fn test_failing_cache_degrades_to_store() {
        let store = Arc::new(CountingStore::new());
        let service = service_with(store.clone(), Arc::new(FailingCache));

        let task = service.create(create_request("Buy milk", Some("low"))).await.unwrap();

        for expected_calls in 1..=3 {
            let tasks = service.list().await.unwrap();
            assert_eq!(tasks, vec![task.clone()]);
            assert_eq!(store.list_calls(), expected_calls);
        }

        let update = UpdateTaskRequest {
            task: Some("Buy oat milk".to_string()),
            ..Default::default()
        };
        let updated = service.update(task.id, update).await.unwrap();
        assert_eq!(updated.text, "Buy oat milk");
        service.delete(task.id).await.unwrap();
        assert!(service.list().await.unwrap().is_empty());

        // create + update + delete invalidations, 4 gets and 4 sets
        assert_eq!(service.soft_failures(), 11);
        assert_eq!(service.cache_stats().await.hits, 0);
    }

    #[tokio::test]
    async fn test_corrupt_cache_entry_is_a_miss() {
        let store = Arc::new(CountingStore::new());
        let cache = Arc::new(MemoryCache::new());
        let service = service_with(store.clone(), cache.clone());

        service.create(create_request("Buy milk", None)).await.unwrap();
        cache
            .set_with_ttl(TASKS_CACHE_KEY, "not json".to_string(), 60)
            .await
            .unwrap();

        let tasks = service.list().await.unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(store.list_calls(), 1);

        // The bad entry was replaced by a fresh snapshot
        service.list().await.unwrap();
        assert_eq!(store.list_calls(), 1);
        assert_eq!(service.soft_failures(), 1);
    }

    #[tokio::test]
    async fn test_store_failure_surfaces_per_operation() {
        let service = TaskService::new(
            Arc::new(FailingStore),
            Arc::new(MemoryCache::new()),
            DEFAULT_CACHE_TTL,
        );

        assert!(matches!(
            service.list().await,
            Err(AppError::Store { op: StoreOp::Fetch, .. })
        ));
        assert!(matches!(
            service.create(create_request("Buy milk", None)).await,
            Err(AppError::Store { op: StoreOp::Create, .. })
        ));
        assert!(matches!(
            service.update(Uuid::new_v4(), UpdateTaskRequest::default()).await,
            Err(AppError::Store { op: StoreOp::Update, .. })
        ));
        assert!(matches!(
            service.delete(Uuid::new_v4()).await,
            Err(AppError::Store { op: StoreOp::Delete, .. })
        ));
    }

    #[tokio::test]
    async fn test_health_reports_each_backend() {
        let healthy = service_with(Arc::new(CountingStore::new()), Arc::new(MemoryCache::new()));
        assert_eq!(healthy.health().await, (true, true));

        let no_cache = service_with(Arc::new(CountingStore::new()), Arc::new(FailingCache));
        assert_eq!(no_cache.health().await, (true, false));

        let no_store = TaskService::new(
            Arc::new(FailingStore),
            Arc::new(MemoryCache::new()),
            DEFAULT_CACHE_TTL,
        );
        assert_eq!(no_store.health().await, (false, true));
    }

    #[tokio::test]
    async fn test_end_to_end_board_scenario() {
        let store = Arc::new(CountingStore::new());
        let service = service_with(store, Arc::new(MemoryCache::new()));

        service.create(create_request("Old chore", Some("high"))).await.unwrap();
        tokio::time::sleep(Duration::from_millis(5)).await;
        let task = service
            .create(create_request("Buy milk", Some("high")))
            .await
            .unwrap();

        assert!(!task.completed);
        assert_eq!(task.priority, Priority::High);

        let board = build_board(&service.list().await.unwrap(), &BoardFilter::default());
        assert_eq!(board.high[0].id, task.id, "Newest task comes first");
        assert!(board.completed.is_empty());

        let update = UpdateTaskRequest {
            completed: Some(true),
            ..Default::default()
        };
        service.update(task.id, update).await.unwrap();

        let tasks = service.list().await.unwrap();
        let filter = BoardFilter {
            search: Some("milk".to_string()),
            priority: Some(Priority::Low),
        };
        let board = build_board(&tasks, &filter);
        assert!(board.high.iter().all(|t| t.id != task.id));
        // Completed view ignores the priority filter
        assert_eq!(board.completed.len(), 1);
        assert_eq!(board.completed[0].id, task.id);
    }
}
