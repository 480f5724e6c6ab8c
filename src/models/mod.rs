//! Request, response and domain models for the task board API
//!
//! This module defines the task record plus the DTOs used for
//! serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;
pub mod task;
pub mod validation;

// Re-export commonly used types
pub use requests::{BoardQuery, CreateTaskRequest, UpdateTaskRequest};
pub use responses::{ErrorResponse, HealthResponse, StatsResponse};
pub use task::{NewTask, Priority, Task, TaskPatch};
