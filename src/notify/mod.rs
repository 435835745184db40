//! Outbound reminder notifications.
//!
//! The gateway is the one seam in the system that leaves the process. Its
//! contract is deliberately blunt: attempt delivery once, report `true` or
//! `false`, never raise past its own boundary. No retry, no queue, no rate
//! limiting.

mod emailjs;

pub use emailjs::{EmailJsConfig, EmailJsGateway};

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::board::Task;

/// The slice of task data a reminder carries. Captured synchronously from a
/// snapshot before any await point, so in-flight sends are unaffected by
/// concurrent edits or deletes.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskReminder {
    pub title: String,
    pub due_date: NaiveDate,
    pub description: String,
}

impl TaskReminder {
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            due_date: task.due_date,
            description: task.description.clone(),
        }
    }
}

/// Delivery seam for due-date reminders.
#[async_trait]
pub trait NotificationGateway: Send + Sync {
    /// Attempt to deliver one reminder to `email`. Returns `true` on
    /// confirmed dispatch and `false` on any failure.
    async fn send(&self, reminder: &TaskReminder, email: &str) -> bool;
}
