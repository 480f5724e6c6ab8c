//! JSON file task store.
//!
//! The whole collection lives in one JSON array on disk and in memory.
//! Every write rewrites the file through a temp file and a rename, so a
//! crash leaves either the old or the new snapshot behind.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use tokio::fs;
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use super::{newest_first, StoreResult, TaskStore};
use crate::error::StoreError;
use crate::models::{NewTask, Task, TaskPatch};

fn io_error(path: &Path, err: io::Error) -> StoreError {
    StoreError::Unavailable(format!("{}: {}", path.display(), err))
}

// == File Task Store ==
/// `TaskStore` persisted to a single JSON file.
///
/// A write is applied to a copy of the collection, flushed to disk, and only
/// then made visible. A failed flush leaves the store unchanged.
#[derive(Debug)]
pub struct FileTaskStore {
    path: PathBuf,
    tasks: RwLock<HashMap<Uuid, Task>>,
}

impl FileTaskStore {
    /// Opens the store at `path`, loading any tasks already saved there.
    ///
    /// A missing file is an empty store; the parent directory is created.
    pub async fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| io_error(parent, e))?;
        }

        let tasks = match fs::read(&path).await {
            Ok(raw) => {
                let saved: Vec<Task> = serde_json::from_slice(&raw).map_err(|e| {
                    StoreError::Corrupt(format!("{}: {}", path.display(), e))
                })?;
                saved.into_iter().map(|task| (task.id, task)).collect()
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => HashMap::new(),
            Err(err) => return Err(io_error(&path, err)),
        };

        info!(path = %path.display(), count = tasks.len(), "Opened task file");

        Ok(Self {
            path,
            tasks: RwLock::new(tasks),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn persist(&self, tasks: &HashMap<Uuid, Task>) -> StoreResult<()> {
        let mut snapshot: Vec<&Task> = tasks.values().collect();
        snapshot.sort_by(|a, b| newest_first(a, b));

        let raw = serde_json::to_vec_pretty(&snapshot)
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        let temp = self.path.with_extension("json.tmp");
        fs::write(&temp, raw).await.map_err(|e| io_error(&temp, e))?;
        fs::rename(&temp, &self.path)
            .await
            .map_err(|e| io_error(&self.path, e))?;

        debug!(path = %self.path.display(), count = snapshot.len(), "Task file written");
        Ok(())
    }
}

#[async_trait]
impl TaskStore for FileTaskStore {
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

        let mut tasks = self.tasks.write().await;
        let mut next = tasks.clone();
        next.insert(task.id, task.clone());
        self.persist(&next).await?;
        *tasks = next;

        Ok(task)
    }

    async fn update(&self, id: Uuid, patch: TaskPatch) -> StoreResult<Option<Task>> {
        let mut tasks = self.tasks.write().await;
        let Some(current) = tasks.get(&id) else {
            return Ok(None);
        };

        let mut updated = current.clone();
        patch.apply_to(&mut updated);

        let mut next = tasks.clone();
        next.insert(id, updated.clone());
        self.persist(&next).await?;
        *tasks = next;

        Ok(Some(updated))
    }

    async fn delete(&self, id: Uuid) -> StoreResult<bool> {
        let mut tasks = self.tasks.write().await;
        if !tasks.contains_key(&id) {
            return Ok(false);
        }

        let mut next = tasks.clone();
        next.remove(&id);
        self.persist(&next).await?;
        *tasks = next;

        Ok(true)
    }

    async fn ping(&self) -> StoreResult<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::metadata(dir).await.map_err(|e| io_error(dir, e))?;
        Ok(())
    }
}
