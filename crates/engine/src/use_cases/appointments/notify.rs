//! Participant notification shared by the appointment use cases.
//!
//! Delivery is best effort: lookup and send failures are logged, never returned.

use std::sync::Arc;

use tutorbook_domain::{AppointmentAggregate, UserId};

use crate::infrastructure::ports::{Notification, NotificationKind, NotificationPort, UserDirectory};

pub struct ParticipantNotifier {
    notifier: Arc<dyn NotificationPort>,
    directory: Arc<dyn UserDirectory>,
}

impl ParticipantNotifier {
    pub fn new(notifier: Arc<dyn NotificationPort>, directory: Arc<dyn UserDirectory>) -> Self {
        Self {
            notifier,
            directory,
        }
    }

    /// Notify the tutor and the student about `appointment`.
    pub async fn notify_participants(
        &self,
        appointment: &AppointmentAggregate,
        kind: NotificationKind,
    ) {
        let view = appointment.to_view();
        let (tutor, student) = tokio::join!(
            self.notify_one(appointment.tutor_id(), kind, &view),
            self.notify_one(appointment.student_id(), kind, &view),
        );
        tracing::debug!(
            appointment_id = %appointment.id(),
            kind = %kind,
            tutor_notified = tutor,
            student_notified = student,
            "Participant notifications dispatched"
        );
    }

    async fn notify_one(
        &self,
        user_id: &UserId,
        kind: NotificationKind,
        view: &tutorbook_domain::AppointmentView,
    ) -> bool {
        let recipient = match self.directory.get_user(user_id.clone()).await {
            Ok(user) => user,
            Err(e) => {
                tracing::warn!(
                    user_id = %user_id,
                    appointment_id = %view.id,
                    error = %e,
                    "Could not resolve notification recipient"
                );
                return false;
            }
        };

        let notification = Notification {
            kind,
            recipient,
            appointment: view.clone(),
        };
        match self.notifier.notify(notification).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(
                    user_id = %user_id,
                    appointment_id = %view.id,
                    error = %e,
                    "Failed to send appointment notification"
                );
                false
            }
        }
    }
}
