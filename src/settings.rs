//! Reminder settings storage.
//!
//! Holds the user-configurable notification settings (destination email and
//! lead time) as an explicitly owned store. State lives in memory for the
//! life of the process; nothing is persisted.

use tokio::sync::RwLock;

/// Notification settings the scanner reads on every pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReminderConfig {
    /// Destination address. With no address configured the scanner skips its
    /// pass entirely.
    pub email: Option<String>,
    /// Days before the due date at which a reminder fires (exact match).
    pub lead_days: i64,
}

/// In-memory store for reminder settings.
#[derive(Debug)]
pub struct ReminderSettings {
    inner: RwLock<ReminderConfig>,
}

impl ReminderSettings {
    pub fn new(config: ReminderConfig) -> Self {
        Self {
            inner: RwLock::new(config),
        }
    }

    /// Current settings snapshot.
    pub async fn current(&self) -> ReminderConfig {
        self.inner.read().await.clone()
    }

    /// Replace the settings wholesale. Takes effect on the next scan.
    pub async fn update(&self, email: Option<String>, lead_days: i64) {
        let mut inner = self.inner.write().await;
        inner.email = email;
        inner.lead_days = lead_days;
        tracing::debug!(
            configured = inner.email.is_some(),
            lead_days,
            "updated reminder settings"
        );
    }
}
