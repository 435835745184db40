//! Configuration management for TaskNest.
//!
//! Configuration is read from environment variables:
//! - `EMAILJS_SERVICE_ID` - Required. EmailJS service identifier.
//! - `EMAILJS_TEMPLATE_ID` - Required. EmailJS template identifier.
//! - `EMAILJS_PUBLIC_KEY` - Required. EmailJS public key.
//! - `NOTIFY_EMAIL` - Optional. Destination address for reminders; with no
//!   address set, due-date scans are skipped.
//! - `REMINDER_LEAD_DAYS` - Optional. Days before a due date at which a
//!   reminder fires. Defaults to `1`.
//! - `SCAN_INTERVAL_SECS` - Optional. Seconds between due-date scans.
//!   Defaults to `86400` (daily).

use thiserror::Error;

use crate::notify::EmailJsConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Destination address for due-date reminders
    pub notify_email: Option<String>,

    /// Days before a due date at which a reminder fires
    pub lead_days: i64,

    /// Seconds between due-date scans
    pub scan_interval_secs: u64,

    /// EmailJS gateway credentials
    pub emailjs: EmailJsConfig,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` if any EmailJS credential is not
    /// set, or `ConfigError::InvalidValue` for unparseable numeric values.
    pub fn from_env() -> Result<Self, ConfigError> {
        let require = |name: &str| {
            std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))
        };

        let emailjs = EmailJsConfig {
            service_id: require("EMAILJS_SERVICE_ID")?,
            template_id: require("EMAILJS_TEMPLATE_ID")?,
            public_key: require("EMAILJS_PUBLIC_KEY")?,
        };

        let notify_email = std::env::var("NOTIFY_EMAIL").ok().filter(|s| !s.is_empty());

        let lead_days = std::env::var("REMINDER_LEAD_DAYS")
            .unwrap_or_else(|_| "1".to_string())
            .parse()
            .map_err(|e| ConfigError::InvalidValue("REMINDER_LEAD_DAYS".to_string(), format!("{}", e)))?;

        let scan_interval_secs = std::env::var("SCAN_INTERVAL_SECS")
            .unwrap_or_else(|_| "86400".to_string())
            .parse()
            .map_err(|e| ConfigError::InvalidValue("SCAN_INTERVAL_SECS".to_string(), format!("{}", e)))?;

        Ok(Self {
            notify_email,
            lead_days,
            scan_interval_secs,
            emailjs,
        })
    }
}
