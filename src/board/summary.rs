//! Derived dashboard counts over a board snapshot.

use chrono::NaiveDate;
use serde::Serialize;

use super::model::{Board, Priority, Status};

/// Task count for one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnCount {
    pub column_id: String,
    pub title: String,
    pub tasks: usize,
}

/// Task counts split by priority.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PriorityCount {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
}

/// Read-only dashboard statistics for one board snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardSummary {
    pub total: usize,
    pub completed: usize,
    /// Due strictly after `today` and not completed.
    pub upcoming: usize,
    /// Due strictly before `today` and not completed.
    pub overdue: usize,
    pub by_column: Vec<ColumnCount>,
    pub by_priority: PriorityCount,
}

/// Summarize a snapshot relative to `today`. Pure: the board is not touched.
pub fn summarize(board: &Board, today: NaiveDate) -> BoardSummary {
    let mut summary = BoardSummary {
        total: 0,
        completed: 0,
        upcoming: 0,
        overdue: 0,
        by_column: board
            .columns
            .iter()
            .map(|c| ColumnCount {
                column_id: c.id.clone(),
                title: c.title.clone(),
                tasks: c.tasks.len(),
            })
            .collect(),
        by_priority: PriorityCount::default(),
    };

    for task in board.tasks() {
        summary.total += 1;
        let completed = task.status == Status::Completed;
        if completed {
            summary.completed += 1;
        }
        if !completed && task.due_date > today {
            summary.upcoming += 1;
        }
        if !completed && task.due_date < today {
            summary.overdue += 1;
        }
        match task.priority {
            Priority::Low => summary.by_priority.low += 1,
            Priority::Medium => summary.by_priority.medium += 1,
            Priority::High => summary.by_priority.high += 1,
        }
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::model::{Column, Task};

    fn task(id: &str, status: Status, priority: Priority, due: &str) -> Task {
        Task {
            id: id.to_string(),
            title: id.to_string(),
            description: String::new(),
            status,
            priority,
            due_date: NaiveDate::parse_from_str(due, "%Y-%m-%d").unwrap(),
            tags: Vec::new(),
            comments: Vec::new(),
        }
    }

    #[test]
    fn counts_totals_upcoming_overdue_and_priorities() {
        let mut todo = Column::new("todo", "To Do");
        todo.tasks.push(task("late", Status::Todo, Priority::High, "2024-03-10"));
        todo.tasks.push(task("soon", Status::InProgress, Priority::Medium, "2024-03-28"));
        let mut done = Column::new("completed", "Completed");
        // Completed tasks never count as upcoming or overdue.
        done.tasks.push(task("shipped", Status::Completed, Priority::Low, "2024-03-01"));
        let board = Board::with_columns(vec![todo, done]);

        let today = NaiveDate::from_ymd_opt(2024, 3, 20).unwrap();
        let summary = summarize(&board, today);

        assert_eq!(summary.total, 3);
        assert_eq!(summary.completed, 1);
        assert_eq!(summary.upcoming, 1);
        assert_eq!(summary.overdue, 1);
        assert_eq!(summary.by_column[0].tasks, 2);
        assert_eq!(summary.by_column[1].tasks, 1);
        assert_eq!(
            summary.by_priority,
            PriorityCount {
                low: 1,
                medium: 1,
                high: 1
            }
        );
    }

    #[test]
    fn due_today_is_neither_upcoming_nor_overdue() {
        let mut todo = Column::new("todo", "To Do");
        todo.tasks.push(task("today", Status::Todo, Priority::Low, "2024-03-20"));
        let board = Board::with_columns(vec![todo]);

        let today = NaiveDate::from_ymd_opt(2024, 3, 20).unwrap();
        let summary = summarize(&board, today);
        assert_eq!(summary.upcoming, 0);
        assert_eq!(summary.overdue, 0);
    }
}
