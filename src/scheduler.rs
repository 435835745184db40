//! Due-date reminder scheduling.
//!
//! A periodic sweep over the board that fires the notification gateway for
//! every task whose due date is exactly the configured lead time away. The
//! sweep runs once at startup and then on a fixed interval; a suspended
//! process gets no catch-up passes. The scanner only reads board state, it
//! never mutates it.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, NaiveDate, Utc};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::board::BoardStore;
use crate::notify::{NotificationGateway, TaskReminder};
use crate::settings::ReminderSettings;

/// Scanner state: waiting for the next tick, or mid-pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    Idle,
    Scanning,
}

/// Outcome of one full pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanReport {
    /// Tasks inspected.
    pub scanned: usize,
    /// Tasks whose due date matched the lead time exactly.
    pub matched: usize,
    /// Reminders the gateway confirmed. A `false` from the gateway means
    /// "not sent this cycle"; no retry, no escalation.
    pub sent: usize,
}

/// One-pass scanner over the board. Shared between the periodic job and
/// manual triggers.
pub struct DueDateScanner {
    store: BoardStore,
    gateway: Arc<dyn NotificationGateway>,
    settings: Arc<ReminderSettings>,
    scanning: AtomicBool,
}

/// Clears the scanning flag when the pass ends, including when the pass is
/// dropped mid-flight by an aborted job.
struct ScanGuard<'a>(&'a AtomicBool);

impl Drop for ScanGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl DueDateScanner {
    pub fn new(
        store: BoardStore,
        gateway: Arc<dyn NotificationGateway>,
        settings: Arc<ReminderSettings>,
    ) -> Self {
        Self {
            store,
            gateway,
            settings,
            scanning: AtomicBool::new(false),
        }
    }

    pub fn state(&self) -> ScanState {
        if self.scanning.load(Ordering::SeqCst) {
            ScanState::Scanning
        } else {
            ScanState::Idle
        }
    }

    /// Run one full pass over all tasks, relative to `now`.
    ///
    /// With no destination email configured the pass is skipped entirely.
    /// Each matching task triggers its own gateway call; failures are
    /// isolated per task and never abort the pass.
    pub async fn scan_once(&self, now: DateTime<Utc>) -> ScanReport {
        let config = self.settings.current().await;
        let Some(email) = config.email else {
            debug!("no notification email configured, skipping due-date scan");
            return ScanReport::default();
        };

        self.scanning.store(true, Ordering::SeqCst);
        let _guard = ScanGuard(&self.scanning);
        // Snapshot captured before any await on the gateway: edits and
        // deletes racing an in-flight send only ever see this copy.
        let board = self.store.snapshot().await;

        let mut report = ScanReport::default();
        for task in board.tasks() {
            report.scanned += 1;
            if days_until_due(task.due_date, now) != config.lead_days {
                continue;
            }
            report.matched += 1;
            let reminder = TaskReminder::from_task(task);
            if self.gateway.send(&reminder, &email).await {
                report.sent += 1;
                info!(task = %task.title, "reminder sent");
            } else {
                warn!(task = %task.title, "reminder not sent this cycle");
            }
        }

        debug!(
            scanned = report.scanned,
            matched = report.matched,
            sent = report.sent,
            "due-date scan complete"
        );
        report
    }
}

/// Whole days until midnight of `due`, rounded up. A task due tomorrow is 1
/// day out for the entire preceding day; overdue tasks go negative.
pub fn days_until_due(due: NaiveDate, now: DateTime<Utc>) -> i64 {
    let due_midnight = due.and_time(chrono::NaiveTime::MIN).and_utc();
    let seconds = (due_midnight - now).num_seconds();
    (seconds as f64 / 86_400.0).ceil() as i64
}

/// The periodic reminder job. Owns the spawned scan loop; dropping or
/// stopping the scheduler cancels the loop so no recurring callback leaks
/// past shutdown.
pub struct ReminderScheduler {
    scanner: Arc<DueDateScanner>,
    handle: Option<JoinHandle<()>>,
}

impl ReminderScheduler {
    /// Spawn the scan loop: one pass immediately, then one per `interval`.
    pub fn start(scanner: Arc<DueDateScanner>, interval: Duration) -> Self {
        let job = Arc::clone(&scanner);
        let handle = tokio::spawn(async move {
            loop {
                job.scan_once(Utc::now()).await;
                tokio::time::sleep(interval).await;
            }
        });
        info!(interval_secs = interval.as_secs(), "reminder scheduler started");
        Self {
            scanner,
            handle: Some(handle),
        }
    }

    /// Trigger a pass outside the regular schedule.
    pub async fn scan_now(&self) -> ScanReport {
        self.scanner.scan_once(Utc::now()).await
    }

    /// Cancel the periodic job.
    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            info!("reminder scheduler stopped");
        }
    }
}

impl Drop for ReminderScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}
