//! API Module
//!
//! HTTP handlers and routing for the task board REST API.
//!
//! # Endpoints
//! - `GET /api/health` - Store and cache reachability
//! - `GET /api/stats` - Cache statistics
//! - `GET /api/todos` - List tasks, newest first
//! - `GET /api/todos/board` - Tasks grouped for the board screen
//! - `POST /api/todos` - Create a task
//! - `GET /api/todos/:id` - Fetch one task
//! - `PUT /api/todos/:id` - Partially update a task
//! - `DELETE /api/todos/:id` - Delete a task

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
