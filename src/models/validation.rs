//! Input validation run before any store or cache access.

use uuid::Uuid;

use super::Priority;
use crate::error::{AppError, Result};

/// Rejects empty or whitespace-only task text.
pub fn validate_text(text: &str) -> Result<()> {
    if text.trim().is_empty() {
        return Err(AppError::Validation("Task is required".to_string()));
    }
    Ok(())
}

/// Parses an optional priority. Absent and empty values yield `None`.
pub fn parse_priority(raw: Option<&str>) -> Result<Option<Priority>> {
    match raw {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(AppError::Validation),
    }
}

/// Parses a task id from a path segment.
///
/// A malformed id cannot name a stored task, so it is reported as not found.
pub fn parse_task_id(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::NotFound(raw.to_string()))
}
