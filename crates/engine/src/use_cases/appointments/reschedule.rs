//! Reschedule appointment use case.

use std::sync::Arc;

use tutorbook_domain::AppointmentAggregate;

use crate::infrastructure::ports::{AppointmentRepo, ClockPort, NotificationKind};

use super::error::AppointmentError;
use super::notify::ParticipantNotifier;
use super::{ensure_slot_free, load_for_update, log_changes, parse_instant};

/// Moves an appointment to a new instant and returns it to pending.
pub struct RescheduleAppointment {
    repo: Arc<dyn AppointmentRepo>,
    clock: Arc<dyn ClockPort>,
    notifier: Arc<ParticipantNotifier>,
}

impl RescheduleAppointment {
    pub fn new(
        repo: Arc<dyn AppointmentRepo>,
        clock: Arc<dyn ClockPort>,
        notifier: Arc<ParticipantNotifier>,
    ) -> Self {
        Self {
            repo,
            clock,
            notifier,
        }
    }

    pub async fn execute(
        &self,
        id: &str,
        new_date: &str,
    ) -> Result<AppointmentAggregate, AppointmentError> {
        let new_date = parse_instant(new_date)?;
        let current = load_for_update(self.repo.as_ref(), id).await?;

        let rescheduled = current.reschedule(new_date, self.clock.now())?;
        ensure_slot_free(self.repo.as_ref(), &rescheduled).await?;

        self.repo.save(&rescheduled).await?;

        log_changes(&rescheduled, &rescheduled.changes_since(&current));
        self.notifier
            .notify_participants(&rescheduled, NotificationKind::Updated)
            .await;

        Ok(rescheduled)
    }
}
