//! # TaskNest Core
//!
//! In-memory kanban board core with due-date email reminders.
//!
//! This library provides:
//! - A board store owning ordered columns of tasks, with create / update /
//!   delete / move / comment operations and a filtered read view
//! - Snapshot-based change notification for presentation layers
//! - A periodic due-date scanner that dispatches reminder emails through a
//!   pluggable notification gateway
//!
//! ## Architecture
//!
//! ```text
//!   presentation layer ──mutations──▶ ┌────────────┐
//!                      ◀──snapshots── │ BoardStore │
//!                                     └─────┬──────┘
//!                                           │ reads
//!                                     ┌─────▼──────────┐     ┌─────────────────┐
//!                                     │ DueDateScanner │────▶│ Notification    │
//!                                     │ (daily sweep)  │     │ Gateway (email) │
//!                                     └────────────────┘     └─────────────────┘
//! ```
//!
//! All board state lives in memory for the life of the process. Mutations
//! replace the board snapshot wholesale and broadcast it; the scanner reads
//! snapshots and never mutates.
//!
//! ## Modules
//! - `board`: entities, the snapshot store, and dashboard summaries
//! - `notify`: the notification gateway seam and the EmailJS implementation
//! - `scheduler`: the due-date scanner and its periodic job
//! - `settings`: runtime-mutable reminder settings
//! - `config`: environment-based startup configuration

pub mod board;
pub mod config;
pub mod notify;
pub mod scheduler;
pub mod settings;

pub use board::{Board, BoardError, BoardStore};
pub use config::Config;
pub use notify::{EmailJsGateway, NotificationGateway};
pub use scheduler::{DueDateScanner, ReminderScheduler};
pub use settings::{ReminderConfig, ReminderSettings};
