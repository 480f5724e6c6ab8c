//! Board View
//!
//! Groups a task list the way the board screen shows it: pending tasks split
//! by priority, completed tasks in their own column, and a pending counter.

use serde::Serialize;

use crate::models::{Priority, Task};

/// Filters applied to the board.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardFilter {
    /// Case-insensitive substring matched against task text
    pub search: Option<String>,
    /// Restricts pending columns to one priority
    pub priority: Option<Priority>,
}

impl BoardFilter {
    fn matches_text(&self, task: &Task) -> bool {
        match &self.search {
            Some(needle) => task.text.to_lowercase().contains(&needle.to_lowercase()),
            None => true,
        }
    }

    fn matches_priority(&self, task: &Task) -> bool {
        self.priority.map_or(true, |p| task.priority == p)
    }
}

/// Tasks grouped for display. Each column keeps the input order.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub high: Vec<Task>,
    pub medium: Vec<Task>,
    pub low: Vec<Task>,
    pub completed: Vec<Task>,
    /// All pending tasks, regardless of filters
    pub pending_count: usize,
}

/// Builds the board from a newest-first task list.
///
/// Pending columns honor both text and priority filters. The completed
/// column honors the text filter only.
pub fn build_board(tasks: &[Task], filter: &BoardFilter) -> Board {
    let mut board = Board::default();

    for task in tasks {
        if task.completed {
            if filter.matches_text(task) {
                board.completed.push(task.clone());
            }
            continue;
        }

        board.pending_count += 1;
        if !(filter.matches_text(task) && filter.matches_priority(task)) {
            continue;
        }

        let column = match task.priority {
            Priority::High => &mut board.high,
            Priority::Medium => &mut board.medium,
            Priority::Low => &mut board.low,
        };
        column.push(task.clone());
    }

    board
}
