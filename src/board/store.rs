//! In-memory board store (non-persistent).
//!
//! The store owns the board state for the life of the process. Every mutation
//! builds a fresh [`Board`] snapshot, swaps it in wholesale, and broadcasts it
//! to subscribers; observers re-render from the latest snapshot and can use
//! plain equality to detect change. No operation touches disk or network.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::{broadcast, RwLock};
use uuid::Uuid;

use super::model::{parse_due_date, Board, Comment, Task, TaskDraft};
use super::BoardError;

/// Author label stamped on new comments. There is no authentication in this
/// design, so every comment carries the same label.
const COMMENT_AUTHOR: &str = "User";

/// Capacity of the snapshot broadcast channel.
const SNAPSHOT_CHANNEL_SIZE: usize = 64;

#[derive(Clone)]
pub struct BoardStore {
    state: Arc<RwLock<Board>>,
    snapshots: broadcast::Sender<Board>,
}

impl BoardStore {
    /// Create a store owning the given board. The first column in the board's
    /// ordering is the default column for newly created tasks.
    pub fn new(board: Board) -> Self {
        let (snapshots, _) = broadcast::channel(SNAPSHOT_CHANNEL_SIZE);
        Self {
            state: Arc::new(RwLock::new(board)),
            snapshots,
        }
    }

    /// Current board snapshot.
    pub async fn snapshot(&self) -> Board {
        self.state.read().await.clone()
    }

    /// Subscribe to board snapshots. A snapshot is sent after every mutation
    /// that actually changed state.
    pub fn subscribe(&self) -> broadcast::Receiver<Board> {
        self.snapshots.subscribe()
    }

    /// Run one mutation under a single write guard: clone the current board,
    /// apply `f` to the clone, and swap it in if it differs. The guard is
    /// held from read to swap, so concurrent mutations serialize instead of
    /// overwriting each other. Subscribers are notified only when state
    /// actually changed; an `Err` from `f` commits nothing.
    async fn mutate<T>(
        &self,
        f: impl FnOnce(&mut Board) -> Result<T, BoardError>,
    ) -> Result<T, BoardError> {
        let mut state = self.state.write().await;
        let mut next = state.clone();
        let out = f(&mut next)?;
        if *state != next {
            *state = next.clone();
            drop(state);
            // Ignore send errors: no subscribers is fine.
            let _ = self.snapshots.send(next);
        }
        Ok(out)
    }

    /// Validate a draft, returning the parsed due date.
    fn validate_draft(draft: &TaskDraft) -> Result<chrono::NaiveDate, BoardError> {
        if draft.title.trim().is_empty() {
            return Err(BoardError::Validation("title must not be empty".into()));
        }
        parse_due_date(&draft.due_date).ok_or_else(|| {
            BoardError::Validation(format!(
                "due date {:?} is not a YYYY-MM-DD calendar date",
                draft.due_date
            ))
        })
    }

    /// Create a task from a draft and append it to the default column.
    /// Returns the generated task id.
    pub async fn create_task(&self, draft: TaskDraft) -> Result<String, BoardError> {
        let due_date = Self::validate_draft(&draft)?;
        let task = Task {
            id: Uuid::new_v4().to_string(),
            title: draft.title,
            description: draft.description,
            status: draft.status,
            priority: draft.priority,
            due_date,
            tags: draft.tags,
            comments: Vec::new(),
        };
        let id = task.id.clone();

        self.mutate(|board| {
            let default_column = board
                .columns
                .first_mut()
                .ok_or_else(|| BoardError::ColumnNotFound("(default)".into()))?;
            tracing::debug!(task_id = %task.id, column = %default_column.id, "created task");
            default_column.tasks.push(task);
            Ok(())
        })
        .await?;
        Ok(id)
    }

    /// Replace every field of a task except its id and comment history.
    /// Column membership is unchanged by this operation.
    pub async fn update_task(&self, task_id: &str, draft: TaskDraft) -> Result<(), BoardError> {
        let due_date = Self::validate_draft(&draft)?;

        self.mutate(|board| {
            let task = board
                .columns
                .iter_mut()
                .flat_map(|c| c.tasks.iter_mut())
                .find(|t| t.id == task_id)
                .ok_or_else(|| BoardError::TaskNotFound(task_id.to_string()))?;
            task.title = draft.title;
            task.description = draft.description;
            task.status = draft.status;
            task.priority = draft.priority;
            task.due_date = due_date;
            task.tags = draft.tags;
            Ok(())
        })
        .await
    }

    /// Delete a task from whichever column holds it. Deleting an unknown id
    /// is a no-op, not an error: deletion is idempotent.
    pub async fn delete_task(&self, task_id: &str) {
        // Infallible: an absent id changes nothing and publishes nothing.
        let _ = self
            .mutate(|board| {
                let before = board.task_count();
                for column in board.columns.iter_mut() {
                    column.tasks.retain(|t| t.id != task_id);
                }
                if board.task_count() != before {
                    tracing::debug!(task_id, "deleted task");
                }
                Ok(())
            })
            .await;
    }

    /// Atomically move a task from `source_column_id` to `dest_column_id`,
    /// inserting at `dest_index` (clamped to the destination length). With
    /// source and destination equal this is a pure reorder. A move that lands
    /// the task where it already is leaves the state untouched.
    pub async fn move_task(
        &self,
        task_id: &str,
        source_column_id: &str,
        dest_column_id: &str,
        dest_index: usize,
    ) -> Result<(), BoardError> {
        self.mutate(|board| {
            let source_idx = board
                .columns
                .iter()
                .position(|c| c.id == source_column_id)
                .ok_or_else(|| BoardError::ColumnNotFound(source_column_id.to_string()))?;
            let dest_idx = board
                .columns
                .iter()
                .position(|c| c.id == dest_column_id)
                .ok_or_else(|| BoardError::ColumnNotFound(dest_column_id.to_string()))?;

            let task_pos = board.columns[source_idx]
                .tasks
                .iter()
                .position(|t| t.id == task_id)
                .ok_or_else(|| BoardError::TaskNotFound(task_id.to_string()))?;

            let task = board.columns[source_idx].tasks.remove(task_pos);
            let dest = &mut board.columns[dest_idx];
            let insert_at = dest_index.min(dest.tasks.len());
            dest.tasks.insert(insert_at, task);

            // mutate() drops identical boards, which covers the no-op move.
            Ok(())
        })
        .await
    }

    /// Append a comment to a task. Content that trims to empty is rejected;
    /// accepted content is stored as given. Returns the new comment id.
    pub async fn add_comment(&self, task_id: &str, content: &str) -> Result<String, BoardError> {
        if content.trim().is_empty() {
            return Err(BoardError::Validation(
                "comment content must not be empty".into(),
            ));
        }

        let comment = Comment {
            id: Uuid::new_v4().to_string(),
            task_id: task_id.to_string(),
            content: content.to_string(),
            author: COMMENT_AUTHOR.to_string(),
            created_at: Utc::now().to_rfc3339(),
        };
        let id = comment.id.clone();

        self.mutate(|board| {
            let task = board
                .columns
                .iter_mut()
                .flat_map(|c| c.tasks.iter_mut())
                .find(|t| t.id == task_id)
                .ok_or_else(|| BoardError::TaskNotFound(task_id.to_string()))?;
            task.comments.push(comment);
            Ok(())
        })
        .await?;
        Ok(id)
    }

    /// Per-column view of tasks matching `query` as a case-insensitive
    /// substring of the title, description, any tag, or any comment's
    /// content. An empty query returns every task. Read-only: stored order is
    /// untouched.
    pub async fn filtered_view(&self, query: &str) -> Board {
        let board = self.snapshot().await;
        if query.is_empty() {
            return board;
        }
        let needle = query.to_lowercase();
        Board {
            columns: board
                .columns
                .into_iter()
                .map(|mut column| {
                    column.tasks.retain(|t| task_matches(t, &needle));
                    column
                })
                .collect(),
        }
    }
}

fn task_matches(task: &Task, needle: &str) -> bool {
    task.title.to_lowercase().contains(needle)
        || task.description.to_lowercase().contains(needle)
        || task.tags.iter().any(|t| t.to_lowercase().contains(needle))
        || task
            .comments
            .iter()
            .any(|c| c.content.to_lowercase().contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::model::{Column, Priority, Status};

    fn draft(title: &str, due: &str) -> TaskDraft {
        TaskDraft {
            title: title.to_string(),
            description: String::new(),
            status: Status::Todo,
            priority: Priority::Medium,
            due_date: due.to_string(),
            tags: Vec::new(),
        }
    }

    fn three_column_store() -> BoardStore {
        BoardStore::new(Board::with_columns(vec![
            Column::new("todo", "To Do"),
            Column::new("doing", "Doing"),
            Column::new("done", "Done"),
        ]))
    }

    #[tokio::test]
    async fn create_appends_to_default_column_tail() {
        let store = three_column_store();
        let first = store.create_task(draft("A", "2024-03-25")).await.unwrap();
        let second = store.create_task(draft("B", "2024-03-26")).await.unwrap();
        assert_ne!(first, second);

        let board = store.snapshot().await;
        let todo = &board.columns[0];
        assert_eq!(todo.tasks.len(), 2);
        assert_eq!(todo.tasks[0].id, first);
        assert_eq!(todo.tasks[1].id, second);
        assert!(board.columns[1].tasks.is_empty());
        assert!(board.columns[2].tasks.is_empty());
    }

    #[tokio::test]
    async fn create_rejects_empty_title_and_bad_date() {
        let store = three_column_store();
        let err = store.create_task(draft("   ", "2024-03-25")).await;
        assert!(matches!(err, Err(BoardError::Validation(_))));

        let err = store.create_task(draft("A", "soon")).await;
        assert!(matches!(err, Err(BoardError::Validation(_))));

        assert_eq!(store.snapshot().await.task_count(), 0);
    }

    #[tokio::test]
    async fn update_replaces_fields_but_keeps_id_comments_and_column() {
        let store = three_column_store();
        let id = store.create_task(draft("A", "2024-03-25")).await.unwrap();
        store.move_task(&id, "todo", "doing", 0).await.unwrap();
        store.add_comment(&id, "first").await.unwrap();

        let mut updated = draft("A2", "2024-04-01");
        updated.status = Status::InProgress;
        updated.priority = Priority::High;
        updated.tags = vec!["urgent".into()];
        store.update_task(&id, updated).await.unwrap();

        let board = store.snapshot().await;
        assert!(board.columns[0].tasks.is_empty());
        let task = &board.columns[1].tasks[0];
        assert_eq!(task.id, id);
        assert_eq!(task.title, "A2");
        assert_eq!(task.status, Status::InProgress);
        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.comments.len(), 1);
    }

    #[tokio::test]
    async fn update_unknown_task_is_not_found() {
        let store = three_column_store();
        let err = store.update_task("missing", draft("A", "2024-03-25")).await;
        assert!(matches!(err, Err(BoardError::TaskNotFound(_))));
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let store = three_column_store();
        let id = store.create_task(draft("A", "2024-03-25")).await.unwrap();

        store.delete_task(&id).await;
        let after_first = store.snapshot().await;
        store.delete_task(&id).await;
        let after_second = store.snapshot().await;

        assert_eq!(after_first, after_second);
        assert_eq!(after_second.task_count(), 0);

        // Never-existed ids are equally silent.
        store.delete_task("never-existed").await;
    }

    #[tokio::test]
    async fn move_between_columns_preserves_count_and_uniqueness() {
        let store = three_column_store();
        let id = store.create_task(draft("A", "2024-03-25")).await.unwrap();
        store.create_task(draft("B", "2024-03-25")).await.unwrap();

        store.move_task(&id, "todo", "doing", 0).await.unwrap();

        let board = store.snapshot().await;
        assert_eq!(board.task_count(), 2);
        let holders: Vec<&str> = board
            .columns
            .iter()
            .filter(|c| c.tasks.iter().any(|t| t.id == id))
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(holders, vec!["doing"]);
    }

    #[tokio::test]
    async fn noop_move_leaves_ordering_unchanged() {
        let store = three_column_store();
        let a = store.create_task(draft("A", "2024-03-25")).await.unwrap();
        store.create_task(draft("B", "2024-03-25")).await.unwrap();

        let before = store.snapshot().await;
        store.move_task(&a, "todo", "todo", 0).await.unwrap();
        assert_eq!(store.snapshot().await, before);
    }

    #[tokio::test]
    async fn same_column_reorder_and_index_clamping() {
        let store = three_column_store();
        let a = store.create_task(draft("A", "2024-03-25")).await.unwrap();
        let b = store.create_task(draft("B", "2024-03-25")).await.unwrap();

        // Move A past the end: clamps to tail.
        store.move_task(&a, "todo", "todo", 99).await.unwrap();
        let board = store.snapshot().await;
        let order: Vec<&str> = board.columns[0].tasks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(order, vec![b.as_str(), a.as_str()]);
    }

    #[tokio::test]
    async fn move_with_unknown_column_or_task_fails() {
        let store = three_column_store();
        let id = store.create_task(draft("A", "2024-03-25")).await.unwrap();

        let err = store.move_task(&id, "todo", "nowhere", 0).await;
        assert!(matches!(err, Err(BoardError::ColumnNotFound(_))));

        let err = store.move_task(&id, "doing", "todo", 0).await;
        assert!(matches!(err, Err(BoardError::TaskNotFound(_))));

        // Failed moves leave the board intact.
        assert_eq!(store.snapshot().await.columns[0].tasks.len(), 1);
    }

    #[tokio::test]
    async fn created_task_lands_in_todo_then_moves_to_doing() {
        let store = three_column_store();
        let mut input = draft("A", "2024-03-25");
        input.priority = Priority::High;
        let id = store.create_task(input).await.unwrap();

        let board = store.snapshot().await;
        assert_eq!(board.columns[0].tasks.len(), 1);
        assert!(board.columns[1].tasks.is_empty());

        store.move_task(&id, "todo", "doing", 0).await.unwrap();
        let board = store.snapshot().await;
        assert!(board.columns[0].tasks.is_empty());
        assert_eq!(board.columns[1].tasks[0].id, id);
    }

    #[tokio::test]
    async fn comments_append_in_order_and_reject_whitespace() {
        let store = three_column_store();
        let id = store.create_task(draft("A", "2024-03-25")).await.unwrap();

        let err = store.add_comment(&id, "   ").await;
        assert!(matches!(err, Err(BoardError::Validation(_))));

        store.add_comment(&id, "first").await.unwrap();
        store.add_comment(&id, "looks good").await.unwrap();

        let board = store.snapshot().await;
        let task = board.find_task(&id).unwrap();
        assert_eq!(task.comments.len(), 2);
        assert_eq!(task.comments[0].content, "first");
        assert_eq!(task.comments[1].content, "looks good");
        assert_eq!(task.comments[1].author, "User");

        let err = store.add_comment("missing", "hello").await;
        assert!(matches!(err, Err(BoardError::TaskNotFound(_))));
    }

    #[tokio::test]
    async fn filtered_view_matches_title_description_tags_and_comments() {
        let store = three_column_store();
        let mut research = draft("Research competitors", "2024-03-25");
        research.tags = vec!["planning".into()];
        let research_id = store.create_task(research).await.unwrap();
        store.add_comment(&research_id, "check pricing pages").await.unwrap();

        let mut design = draft("Design system", "2024-03-20");
        design.description = "Update color palette".into();
        store.create_task(design).await.unwrap();

        // Empty query: everything, original order.
        let all = store.filtered_view("").await;
        assert_eq!(all, store.snapshot().await);

        // Title match, case-insensitive.
        let hit = store.filtered_view("RESEARCH").await;
        assert_eq!(hit.task_count(), 1);
        assert_eq!(hit.columns[0].tasks[0].id, research_id);

        // Description, tag, and comment matches.
        assert_eq!(store.filtered_view("palette").await.task_count(), 1);
        assert_eq!(store.filtered_view("plannING").await.task_count(), 1);
        assert_eq!(store.filtered_view("pricing").await.task_count(), 1);

        // Misses filter everything out but keep the column skeleton.
        let none = store.filtered_view("zzz").await;
        assert_eq!(none.task_count(), 0);
        assert_eq!(none.columns.len(), 3);

        // Stored order untouched by filtering.
        assert_eq!(store.snapshot().await.task_count(), 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_mutations_are_serialized_not_lost() {
        let store = three_column_store();

        let mut handles = Vec::new();
        for worker in 0..8 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                for i in 0..50 {
                    store
                        .create_task(draft(&format!("w{worker}-t{i}"), "2024-03-25"))
                        .await
                        .unwrap();
                }
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        // Every create survives: no write overwrites another.
        let board = store.snapshot().await;
        assert_eq!(board.task_count(), 8 * 50);
        let mut ids: Vec<String> = board.tasks().map(|t| t.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 8 * 50);
    }

    #[tokio::test]
    async fn subscribers_receive_snapshots_only_on_change() {
        let store = three_column_store();
        let mut rx = store.subscribe();

        let id = store.create_task(draft("A", "2024-03-25")).await.unwrap();
        let snap = rx.recv().await.unwrap();
        assert_eq!(snap.task_count(), 1);

        // Idempotent delete of a missing id publishes nothing.
        store.delete_task("missing").await;
        store.delete_task(&id).await;
        let snap = rx.recv().await.unwrap();
        assert_eq!(snap.task_count(), 0);
        assert!(rx.try_recv().is_err());
    }
}
