//! Taskboard - a priority task board backend
//!
//! Serves task CRUD over HTTP with a read-through, write-invalidate cache
//! holding the full task list.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod service;
pub mod store;
pub mod tasks;
pub mod views;

pub use api::AppState;
pub use config::Config;
pub use service::TaskService;
pub use tasks::spawn_cleanup_task;
