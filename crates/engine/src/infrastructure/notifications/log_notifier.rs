//! Notifier that only writes to the log. Used when no email provider is configured.

use async_trait::async_trait;

use crate::infrastructure::ports::{Notification, NotificationPort, NotifyError};

use super::subject_for;

#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl LogNotifier {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl NotificationPort for LogNotifier {
    async fn notify(&self, notification: Notification) -> Result<(), NotifyError> {
        tracing::info!(
            appointment_id = %notification.appointment.id,
            recipient = %notification.recipient.email(),
            kind = %notification.kind,
            subject = %subject_for(notification.kind, notification.recipient.role()),
            "Notification (not delivered, no email provider configured)"
        );
        Ok(())
    }
}
