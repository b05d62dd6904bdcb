//! Delete appointment use case.

use std::sync::Arc;

use tutorbook_domain::AppointmentAggregate;

use crate::infrastructure::ports::{AppointmentRepo, ClockPort, NotificationKind};

use super::error::AppointmentError;
use super::notify::ParticipantNotifier;
use super::load_for_update;

/// Soft-deletes an appointment and tells both participants it is off.
pub struct DeleteAppointment {
    repo: Arc<dyn AppointmentRepo>,
    clock: Arc<dyn ClockPort>,
    notifier: Arc<ParticipantNotifier>,
}

impl DeleteAppointment {
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

    pub async fn execute(&self, id: &str) -> Result<AppointmentAggregate, AppointmentError> {
        let current = load_for_update(self.repo.as_ref(), id).await?;
        let deleted = current.delete(self.clock.now())?;

        self.repo.save(&deleted).await?;

        tracing::info!(appointment_id = %deleted.id(), "Appointment deleted");
        self.notifier
            .notify_participants(&deleted, NotificationKind::Cancelled)
            .await;

        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{
        MockAppointmentRepo, MockClockPort, MockNotificationPort, MockUserDirectory,
    };
    use crate::test_fixtures::{appointment, fixed_now, monday_at, user};
    use tutorbook_domain::{DomainError, UserRole};

    fn clock() -> MockClockPort {
        let mut clock = MockClockPort::new();
        clock.expect_now().returning(fixed_now);
        clock
    }

    #[tokio::test]
    async fn soft_deletes_and_sends_cancellation() {
        let mut repo = MockAppointmentRepo::new();
        let mut notifier = MockNotificationPort::new();
        let mut directory = MockUserDirectory::new();

        repo.expect_get()
            .returning(|_| Ok(Some(appointment("appt-0001", "t01", "s01", monday_at(10)))));
        repo.expect_save()
            .withf(|a| a.is_deleted() && a.timestamps().deleted_at() == Some(fixed_now()))
            .times(1)
            .returning(|_| Ok(()));
        directory
            .expect_get_user()
            .returning(|id| Ok(user(id.as_str(), UserRole::Tutor)));
        notifier
            .expect_notify()
            .withf(|n| n.kind == NotificationKind::Cancelled && n.appointment.deleted_at.is_some())
            .times(2)
            .returning(|_| Ok(()));

        let use_case = DeleteAppointment::new(
            Arc::new(repo),
            Arc::new(clock()),
            Arc::new(ParticipantNotifier::new(Arc::new(notifier), Arc::new(directory))),
        );

        let deleted = use_case.execute("appt-0001").await.unwrap();
        assert!(deleted.is_deleted());
    }

    #[tokio::test]
    async fn storage_failure_skips_notification() {
        let mut repo = MockAppointmentRepo::new();
        repo.expect_get()
            .returning(|_| Ok(Some(appointment("appt-0001", "t01", "s01", monday_at(10)))));
        repo.expect_save()
            .returning(|_| Err(crate::infrastructure::ports::RepoError::database("save", "disk full")));
        // No notification expected

        let use_case = DeleteAppointment::new(
            Arc::new(repo),
            Arc::new(clock()),
            Arc::new(ParticipantNotifier::new(
                Arc::new(MockNotificationPort::new()),
                Arc::new(MockUserDirectory::new()),
            )),
        );

        let err = use_case.execute("appt-0001").await.unwrap_err();
        assert_eq!(err.code(), "REPOSITORY_ERROR");
    }

    #[tokio::test]
    async fn second_delete_reports_already_deleted() {
        let mut repo = MockAppointmentRepo::new();
        repo.expect_get().returning(|_| {
            Ok(Some(
                appointment("appt-0001", "t01", "s01", monday_at(10))
                    .delete(fixed_now())
                    .unwrap(),
            ))
        });
        // No save expected

        let use_case = DeleteAppointment::new(
            Arc::new(repo),
            Arc::new(clock()),
            Arc::new(ParticipantNotifier::new(
                Arc::new(MockNotificationPort::new()),
                Arc::new(MockUserDirectory::new()),
            )),
        );

        let err = use_case.execute("appt-0001").await.unwrap_err();
        assert!(matches!(
            err,
            AppointmentError::Domain(DomainError::DeletedAppointment { .. })
        ));
        assert!(err.to_string().contains("already deleted"));
    }
}
