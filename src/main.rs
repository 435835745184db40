//! tasknest - process entry point.
//!
//! Builds the board store and starts the due-date reminder scheduler, then
//! runs until interrupted.

use std::sync::Arc;
use std::time::Duration;

use tasknest::board::{Board, BoardStore};
use tasknest::config::Config;
use tasknest::notify::EmailJsGateway;
use tasknest::scheduler::{DueDateScanner, ReminderScheduler};
use tasknest::settings::{ReminderConfig, ReminderSettings};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tasknest=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;
    info!(
        "Loaded configuration: lead_days={} notify_email={}",
        config.lead_days,
        if config.notify_email.is_some() {
            "(configured)"
        } else {
            "(none, scans will be skipped)"
        }
    );

    let store = BoardStore::new(Board::standard());
    let settings = Arc::new(ReminderSettings::new(ReminderConfig {
        email: config.notify_email.clone(),
        lead_days: config.lead_days,
    }));
    let gateway = Arc::new(EmailJsGateway::new(config.emailjs.clone()));
    let scanner = Arc::new(DueDateScanner::new(store.clone(), gateway, settings));

    let mut scheduler = ReminderScheduler::start(
        scanner,
        Duration::from_secs(config.scan_interval_secs),
    );

    tokio::signal::ctrl_c().await?;
    info!("Shutting down");
    scheduler.stop();

    Ok(())
}
