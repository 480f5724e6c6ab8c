//! Task Service Module
//!
//! Cache-aside orchestration of the task store and the list cache.

mod task_service;

#[cfg(test)]
mod testing;

pub use task_service::{TaskService, DEFAULT_CACHE_TTL, TASKS_CACHE_KEY};
