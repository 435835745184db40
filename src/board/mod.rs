//! Board state: entities, the snapshot store, and derived summaries.

mod model;
mod store;
mod summary;

pub use model::{
    normalize_tags, parse_due_date, Board, Column, Comment, Priority, Status, Task, TaskDraft,
};
pub use store::BoardStore;
pub use summary::{summarize, BoardSummary, ColumnCount, PriorityCount};

use thiserror::Error;

/// Errors returned by board store operations. Both kinds are local and
/// synchronous; callers handle them at the call site, the store never retries
/// or recovers on its own.
#[derive(Debug, Error)]
pub enum BoardError {
    /// Malformed input: empty title, empty comment, unparseable due date.
    #[error("invalid input: {0}")]
    Validation(String),

    /// An operation referenced a column id absent from the current state.
    #[error("column not found: {0}")]
    ColumnNotFound(String),

    /// An operation referenced a task id absent from the current state (or,
    /// for moves, absent from the named source column).
    #[error("task not found: {0}")]
    TaskNotFound(String),
}
