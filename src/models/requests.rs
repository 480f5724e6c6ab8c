//! Request DTOs for the task board API
//!
//! Defines the structure of incoming HTTP request bodies and query strings.

use serde::Deserialize;

use super::validation::{parse_priority, validate_text};
use super::{NewTask, TaskPatch};
use crate::error::Result;
use crate::views::BoardFilter;

/// Request body for creating a task (POST /api/todos)
///
/// # Fields
/// - `task`: The task text, required and non-blank
/// - `priority`: Optional priority, defaults to medium
/// - `completed`: Optional completion flag, defaults to false
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateTaskRequest {
    #[serde(default)]
    pub task: String,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub completed: Option<bool>,
}

impl CreateTaskRequest {
    /// Validates the request and applies defaults.
    pub fn validate(self) -> Result<NewTask> {
        validate_text(&self.task)?;
        let priority = parse_priority(self.priority.as_deref())?.unwrap_or_default();

        Ok(NewTask {
            text: self.task,
            priority,
            completed: self.completed.unwrap_or(false),
        })
    }
}

/// Request body for updating a task (PUT /api/todos/:id)
///
/// Every field is optional; only those present are changed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTaskRequest {
    #[serde(default)]
    pub task: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub completed: Option<bool>,
}

impl UpdateTaskRequest {
    /// Validates the present fields into a patch.
    pub fn validate(self) -> Result<TaskPatch> {
        if let Some(text) = &self.task {
            validate_text(text)?;
        }
        let priority = parse_priority(self.priority.as_deref())?;

        Ok(TaskPatch {
            text: self.task,
            priority,
            completed: self.completed,
        })
    }
}

/// Query string for the board view (GET /api/todos/board)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BoardQuery {
    #[serde(default)]
    pub search: Option<String>,
    /// A priority name, or `all` for no filter
    #[serde(default)]
    pub priority: Option<String>,
}

impl BoardQuery {
    pub fn into_filter(self) -> Result<BoardFilter> {
        let priority = match self.priority.as_deref() {
            Some("all") => None,
            other => parse_priority(other)?,
        };

        Ok(BoardFilter {
            search: self.search.filter(|s| !s.is_empty()),
            priority,
        })
    }
}
