//! API Handlers
//!
//! HTTP request handlers for each task board endpoint.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::cache::MemoryCache;
use crate::error::Result;
use crate::models::validation::parse_task_id;
use crate::models::{
    BoardQuery, CreateTaskRequest, HealthResponse, StatsResponse, Task, UpdateTaskRequest,
};
use crate::service::TaskService;
use crate::store::MemoryTaskStore;
use crate::views::{build_board, Board};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: TaskService,
}

impl AppState {
    pub fn new(service: TaskService) -> Self {
        Self { service }
    }

    /// State backed by a fresh in-memory store and cache.
    pub fn in_memory(cache_ttl: u64) -> Self {
        let service = TaskService::new(
            Arc::new(MemoryTaskStore::new()),
            Arc::new(MemoryCache::new()),
            cache_ttl,
        );
        Self::new(service)
    }
}

/// Handler for GET /api/todos
pub async fn list_handler(State(state): State<AppState>) -> Result<Json<Vec<Task>>> {
    Ok(Json(state.service.list().await?))
}

/// Handler for GET /api/todos/board
///
/// Builds the grouped board from the (cached) list.
pub async fn board_handler(
    State(state): State<AppState>,
    Query(query): Query<BoardQuery>,
) -> Result<Json<Board>> {
    let filter = query.into_filter()?;
    let tasks = state.service.list().await?;
    Ok(Json(build_board(&tasks, &filter)))
}

/// Handler for GET /api/todos/:id
pub async fn get_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Task>> {
    let id = parse_task_id(&id)?;
    Ok(Json(state.service.get(id).await?))
}

/// Handler for POST /api/todos
pub async fn create_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreateTaskRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Task>)> {
    let Json(req) = payload?;
    let task = state.service.create(req).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// Handler for PUT /api/todos/:id
pub async fn update_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: std::result::Result<Json<UpdateTaskRequest>, JsonRejection>,
) -> Result<Json<Task>> {
    let id = parse_task_id(&id)?;
    let Json(req) = payload?;
    Ok(Json(state.service.update(id, req).await?))
}

/// Handler for DELETE /api/todos/:id
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    let id = parse_task_id(&id)?;
    state.service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for GET /api/stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = state.service.cache_stats().await;
    Json(StatsResponse::new(stats, state.service.soft_failures()))
}

/// Handler for GET /api/health
///
/// Responds 503 when the store is unreachable. A missing cache only shows up
/// in the body.
pub async fn health_handler(
    State(state): State<AppState>,
) -> (StatusCode, Json<HealthResponse>) {
    let (store_ok, cache_ok) = state.service.health().await;
    let status = if store_ok {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(HealthResponse::from_checks(store_ok, cache_ok)))
}
