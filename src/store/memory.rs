//! In-memory task store.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{newest_first, StoreResult, TaskStore};
use crate::models::{NewTask, Task, TaskPatch};

// == Memory Task Store ==
/// `TaskStore` held in process memory.
///
/// Writes serialize through the write lock, so concurrent updates to the
/// same record apply one after the other.
#[derive(Debug, Default)]
pub struct MemoryTaskStore {
    tasks: RwLock<HashMap<Uuid, Task>>,
}

impl MemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskStore for MemoryTaskStore {
    async fn list_newest_first(&self) -> StoreResult<Vec<Task>> {
        let mut tasks: Vec<Task> = self.tasks.read().await.values().cloned().collect();
        tasks.sort_by(newest_first);
        Ok(tasks)
    }

    async fn get(&self, id: Uuid) -> StoreResult<Option<Task>> {
        Ok(self.tasks.read().await.get(&id).cloned())
    }

    async fn insert(&self, new_task: NewTask) -> StoreResult<Task> {
        let task = Task {
            id: Uuid::new_v4(),
            text: new_task.text,
            priority: new_task.priority,
            completed: new_task.completed,
            created_at: Utc::now(),
        };

        self.tasks.write().await.insert(task.id, task.clone());
        Ok(task)
    }

    async fn update(&self, id: Uuid, patch: TaskPatch) -> StoreResult<Option<Task>> {
        let mut tasks = self.tasks.write().await;
        Ok(tasks.get_mut(&id).map(|task| {
            patch.apply_to(task);
            task.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> StoreResult<bool> {
        Ok(self.tasks.write().await.remove(&id).is_some())
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}
