//! Resend email API client

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

use crate::infrastructure::ports::{Notification, NotificationPort, NotifyError};

use super::{render_text, subject_for};

/// Default Resend API base URL.
pub const DEFAULT_RESEND_BASE_URL: &str = "https://api.resend.com";

/// Sends appointment notifications as plain-text email through Resend.
#[derive(Clone)]
pub struct ResendNotifier {
    client: Client,
    base_url: String,
    api_key: String,
    from: String,
}

impl ResendNotifier {
    pub fn new(base_url: &str, api_key: &str, from: &str, timeout_secs: u64) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            from: from.to_string(),
        }
    }

    fn build_email(&self, notification: &Notification) -> ResendEmail {
        ResendEmail {
            from: self.from.clone(),
            to: vec![notification.recipient.email().to_string()],
            subject: subject_for(notification.kind, notification.recipient.role()),
            text: render_text(notification),
        }
    }
}

#[async_trait]
impl NotificationPort for ResendNotifier {
    async fn notify(&self, notification: Notification) -> Result<(), NotifyError> {
        let email = self.build_email(&notification);

        let response = self
            .client
            .post(format!("{}/emails", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&email)
            .send()
            .await
            .map_err(|e| NotifyError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .map_err(|e| NotifyError::RequestFailed(e.to_string()))?;
            return Err(NotifyError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        tracing::debug!(
            appointment_id = %notification.appointment.id,
            kind = %notification.kind,
            "Email notification sent"
        );
        Ok(())
    }
}

// =============================================================================
// Resend API types
// =============================================================================

#[derive(Debug, Serialize)]
struct ResendEmail {
    from: String,
    to: Vec<String>,
    subject: String,
    text: String,
}
