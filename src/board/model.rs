//! Board entities: tasks, comments, columns, and their validation helpers.
//!
//! These are plain data shapes. All mutation goes through the store; the only
//! behavior here is construction and validation of raw input.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Workflow state carried on a task.
///
/// Status is informational metadata: it does not drive (and is not derived
/// from) the column a task sits in. The two can legitimately disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    Todo,
    InProgress,
    Completed,
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::Todo => write!(f, "todo"),
            Status::InProgress => write!(f, "in-progress"),
            Status::Completed => write!(f, "completed"),
        }
    }
}

/// Task priority level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::Low => write!(f, "low"),
            Priority::Medium => write!(f, "medium"),
            Priority::High => write!(f, "high"),
        }
    }
}

/// A comment on a task. Immutable once created; never edited or deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub task_id: String,
    /// Stored as given (validation rejects whitespace-only content, but the
    /// accepted text is not trimmed).
    pub content: String,
    pub author: String,
    /// RFC 3339 creation timestamp.
    pub created_at: String,
}

/// A single work item on the board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: String,
    pub status: Status,
    pub priority: Priority,
    pub due_date: NaiveDate,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Append-only, insertion order preserved.
    #[serde(default)]
    pub comments: Vec<Comment>,
}

/// A named, ordered bucket of tasks. A task belongs to exactly one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub id: String,
    /// Display label only, not a key.
    pub title: String,
    pub tasks: Vec<Task>,
}

impl Column {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            tasks: Vec::new(),
        }
    }
}

/// The whole board: an ordered sequence of columns owning their tasks.
///
/// `Board` is the snapshot type: mutations in the store replace it wholesale,
/// so observers can rely on plain equality for change detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Board {
    pub columns: Vec<Column>,
}

impl Board {
    /// Build a board from an explicit column set. Column ids are fixed for
    /// the life of the process; there are no column lifecycle operations.
    pub fn with_columns(columns: Vec<Column>) -> Self {
        Self { columns }
    }

    /// The standard three-column board.
    pub fn standard() -> Self {
        Self::with_columns(vec![
            Column::new("todo", "To Do"),
            Column::new("in-progress", "In Progress"),
            Column::new("completed", "Completed"),
        ])
    }

    /// Iterate every task on the board, column by column.
    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.columns.iter().flat_map(|c| c.tasks.iter())
    }

    /// Total task count across all columns.
    pub fn task_count(&self) -> usize {
        self.columns.iter().map(|c| c.tasks.len()).sum()
    }

    /// Find a task anywhere on the board.
    pub fn find_task(&self, task_id: &str) -> Option<&Task> {
        self.tasks().find(|t| t.id == task_id)
    }
}

/// Raw input for creating or updating a task. The id and comment history are
/// owned by the store and never supplied by callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskDraft {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub status: Status,
    pub priority: Priority,
    /// Calendar date in `YYYY-MM-DD` form, parsed at the store boundary.
    pub due_date: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Parse a `YYYY-MM-DD` due date. Due dates carry no time component.
pub fn parse_due_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// Trim, lowercase, and deduplicate tags while keeping first-seen order.
///
/// The store accepts tags as given; this is the helper edit surfaces use to
/// keep tag sets unique before submitting a draft.
pub fn normalize_tags(tags: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(tags.len());
    for raw in tags {
        let tag = raw.trim().to_lowercase();
        if !tag.is_empty() && !out.contains(&tag) {
            out.push(tag);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_kebab_case() {
        assert_eq!(
            serde_json::to_string(&Status::InProgress).unwrap(),
            "\"in-progress\""
        );
        assert_eq!(
            serde_json::from_str::<Status>("\"todo\"").unwrap(),
            Status::Todo
        );
    }

    #[test]
    fn status_and_priority_display() {
        assert_eq!(format!("{}", Status::InProgress), "in-progress");
        assert_eq!(format!("{}", Priority::High), "high");
    }

    #[test]
    fn parses_iso_due_dates_only() {
        assert_eq!(
            parse_due_date("2024-03-25"),
            NaiveDate::from_ymd_opt(2024, 3, 25)
        );
        assert_eq!(parse_due_date(" 2024-03-25 "), parse_due_date("2024-03-25"));
        assert!(parse_due_date("03/25/2024").is_none());
        assert!(parse_due_date("not a date").is_none());
        assert!(parse_due_date("").is_none());
    }

    #[test]
    fn normalize_tags_trims_lowercases_dedupes() {
        let tags = vec![
            " Research ".to_string(),
            "research".to_string(),
            "UI".to_string(),
            "  ".to_string(),
        ];
        assert_eq!(normalize_tags(&tags), vec!["research", "ui"]);
    }

    #[test]
    fn standard_board_has_three_empty_columns() {
        let board = Board::standard();
        let ids: Vec<&str> = board.columns.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["todo", "in-progress", "completed"]);
        assert_eq!(board.task_count(), 0);
    }
}
