//! EmailJS delivery gateway.
//!
//! Posts one templated email per reminder to the EmailJS REST API. Every
//! failure mode (network, auth, malformed address, non-2xx status) is logged
//! and collapsed to a `false` result.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, warn};

use super::{NotificationGateway, TaskReminder};

const EMAILJS_API_URL: &str = "https://api.emailjs.com/api/v1.0/email/send";

/// EmailJS credentials, loaded from the environment at startup.
#[derive(Debug, Clone)]
pub struct EmailJsConfig {
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
}

pub struct EmailJsGateway {
    client: Client,
    config: EmailJsConfig,
}

#[derive(Serialize)]
struct SendRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: TemplateParams<'a>,
}

#[derive(Serialize)]
struct TemplateParams<'a> {
    to_email: &'a str,
    task_title: &'a str,
    task_description: &'a str,
    due_date: String,
}

impl EmailJsGateway {
    pub fn new(config: EmailJsConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }
}

#[async_trait]
impl NotificationGateway for EmailJsGateway {
    async fn send(&self, reminder: &TaskReminder, email: &str) -> bool {
        let request = SendRequest {
            service_id: &self.config.service_id,
            template_id: &self.config.template_id,
            user_id: &self.config.public_key,
            template_params: TemplateParams {
                to_email: email,
                task_title: &reminder.title,
                task_description: &reminder.description,
                due_date: reminder.due_date.format("%Y-%m-%d").to_string(),
            },
        };

        let response = match self
            .client
            .post(EMAILJS_API_URL)
            .json(&request)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!(task = %reminder.title, "failed to send reminder email: {}", e);
                return false;
            }
        };

        if response.status().is_success() {
            debug!(task = %reminder.title, "reminder email dispatched");
            true
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!(
                task = %reminder.title,
                %status,
                "EmailJS rejected reminder email: {}",
                body
            );
            false
        }
    }
}
