//! Error types for the task board
//!
//! Provides unified error handling using thiserror. Store and cache backends
//! have their own error enums; `AppError` is what the service and the HTTP
//! layer deal in.

use std::fmt;

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::error;

use crate::models::ErrorResponse;

// == Store Error ==
/// Failure reported by a task store backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The store could not be reached or rejected the operation
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// Persisted data could not be decoded
    #[error("Store data corrupt: {0}")]
    Corrupt(String),
}

// == Cache Error ==
/// Failure reported by a cache backend.
///
/// Never surfaced to API callers; the task service absorbs these.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// The cache could not be reached
    #[error("Cache unavailable: {0}")]
    Unavailable(String),

    /// Key or value rejected by the backend
    #[error("Invalid cache request: {0}")]
    InvalidRequest(String),
}

// == Store Operation ==
/// The task operation during which a store failure happened.
///
/// Used to pick the opaque message shown to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOp {
    Fetch,
    Create,
    Update,
    Delete,
}

impl fmt::Display for StoreOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self {
            StoreOp::Fetch => "fetch",
            StoreOp::Create => "create",
            StoreOp::Update => "update",
            StoreOp::Delete => "delete",
        };
        f.write_str(verb)
    }
}

// == App Error Enum ==
/// Unified error type for task operations.
#[derive(Error, Debug)]
pub enum AppError {
    /// Caller-supplied data violates a constraint
    #[error("Invalid request: {0}")]
    Validation(String),

    /// Referenced task does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// The durable store failed; fatal to the current request
    #[error("Failed to {op} todo: {source}")]
    Store {
        op: StoreOp,
        #[source]
        source: StoreError,
    },
}

impl AppError {
    /// Wraps a store failure with the operation it interrupted.
    pub fn store(op: StoreOp) -> impl FnOnce(StoreError) -> Self {
        move |source| AppError::Store { op, source }
    }

    /// Returns the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the message shown to callers. Store details are never leaked.
    pub fn public_message(&self) -> String {
        match self {
            AppError::Validation(msg) => msg.clone(),
            AppError::NotFound(_) => "Todo not found".to_string(),
            AppError::Store { op: StoreOp::Fetch, .. } => "Failed to fetch todos".to_string(),
            AppError::Store { op, .. } => format!("Failed to {} todo", op),
        }
    }
}

// == Body Rejections ==
/// Undecodable JSON bodies are reported like any other validation failure.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::Store { op, source } = &self {
            error!(operation = %op, error = %source, "Store operation failed");
        }

        let body = Json(ErrorResponse::new(self.public_message()));

        (self.status_code(), body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for task operations.
pub type Result<T> = std::result::Result<T, AppError>;
