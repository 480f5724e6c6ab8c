//! Task Store Module
//!
//! The durable task collection the service reads and writes through.

mod file;
mod memory;

use std::cmp::Ordering;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::StoreError;
use crate::models::{NewTask, Task, TaskPatch};

pub use file::FileTaskStore;
pub use memory::MemoryTaskStore;

/// Convenience Result type for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

// == Task Store ==
/// Durable task storage keyed by id.
///
/// A missing id is reported as `Ok(None)` / `Ok(false)`; errors are
/// reserved for the store itself failing.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Returns every task, newest `created_at` first.
    async fn list_newest_first(&self) -> StoreResult<Vec<Task>>;

    async fn get(&self, id: Uuid) -> StoreResult<Option<Task>>;

    /// Inserts a task, assigning its id and creation timestamp.
    async fn insert(&self, new_task: NewTask) -> StoreResult<Task>;

    /// Applies `patch` and returns the updated task.
    async fn update(&self, id: Uuid, patch: TaskPatch) -> StoreResult<Option<Task>>;

    /// Deletes a task. Returns whether it existed.
    async fn delete(&self, id: Uuid) -> StoreResult<bool>;

    /// Checks that the store is reachable.
    async fn ping(&self) -> StoreResult<()>;
}

/// Newest `created_at` first. Ties fall back to id so the order is stable.
fn newest_first(a: &Task, b: &Task) -> Ordering {
    b.created_at
        .cmp(&a.created_at)
        .then_with(|| b.id.cmp(&a.id))
}
