//! Create appointment use case.

use std::sync::Arc;

use tutorbook_domain::{AppointmentAggregate, AppointmentDate, Checklist, NewAppointment};

use crate::infrastructure::ports::{AppointmentRepo, ClockPort, NotificationKind};

use super::error::AppointmentError;
use super::notify::ParticipantNotifier;

/// Raw booking request as received from a client.
#[derive(Debug, Clone, Default)]
pub struct CreateAppointmentInput {
    pub tutor_id: String,
    pub student_id: String,
    /// RFC 3339 timestamp; the offset decides the local hour and weekday.
    pub appointment_date: String,
    pub checklist: Vec<String>,
    pub reason: Option<String>,
    pub id: Option<String>,
}

/// Books a new appointment.
///
/// Orchestrates: input validation, atomic conflict-checked insert, participant notification.
pub struct CreateAppointment {
    repo: Arc<dyn AppointmentRepo>,
    clock: Arc<dyn ClockPort>,
    notifier: Arc<ParticipantNotifier>,
}

impl CreateAppointment {
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
        input: CreateAppointmentInput,
    ) -> Result<AppointmentAggregate, AppointmentError> {
        let now = self.clock.now();

        let appointment_date = AppointmentDate::parse(&input.appointment_date, now)?;
        let appointment = AppointmentAggregate::create(
            NewAppointment {
                tutor_id: input.tutor_id,
                student_id: input.student_id,
                appointment_date: appointment_date.value(),
                checklist: Checklist::from_descriptions(input.checklist)?,
                reason: input.reason,
                id: input.id,
            },
            now,
        )?;

        self.repo.insert(&appointment).await?;

        tracing::info!(
            appointment_id = %appointment.id(),
            tutor_id = %appointment.tutor_id(),
            student_id = %appointment.student_id(),
            appointment_date = %appointment.appointment_date(),
            "Appointment created"
        );

        self.notifier
            .notify_participants(&appointment, NotificationKind::Created)
            .await;

        Ok(appointment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{
        MockAppointmentRepo, MockClockPort, MockNotificationPort, MockUserDirectory, NotifyError,
        RepoError,
    };
    use crate::test_fixtures::{fixed_now, user};
    use tutorbook_domain::{AppointmentStatus, UserRole};

    fn clock() -> MockClockPort {
        let mut clock = MockClockPort::new();
        clock.expect_now().returning(fixed_now);
        clock
    }

    fn directory() -> MockUserDirectory {
        let mut directory = MockUserDirectory::new();
        directory.expect_get_user().returning(|id| {
            let role = if id.as_str().starts_with('t') {
                UserRole::Tutor
            } else {
                UserRole::Student
            };
            Ok(user(id.as_str(), role))
        });
        directory
    }

    fn input() -> CreateAppointmentInput {
        CreateAppointmentInput {
            tutor_id: "t01".into(),
            student_id: "s01".into(),
            appointment_date: "2026-03-09T10:00:00-05:00".into(),
            checklist: vec!["quadratic equations".into()],
            reason: Some("exam next week".into()),
            id: None,
        }
    }

    #[tokio::test]
    async fn creates_and_notifies_both_participants() {
        let mut repo = MockAppointmentRepo::new();
        let mut notifier = MockNotificationPort::new();

        repo.expect_insert().times(1).returning(|_| Ok(()));
        notifier
            .expect_notify()
            .withf(|n| n.kind == NotificationKind::Created)
            .times(2)
            .returning(|_| Ok(()));

        let use_case = CreateAppointment::new(
            Arc::new(repo),
            Arc::new(clock()),
            Arc::new(ParticipantNotifier::new(Arc::new(notifier), Arc::new(directory()))),
        );

        let appointment = use_case.execute(input()).await.unwrap();
        assert_eq!(appointment.status(), AppointmentStatus::Pending);
        assert_eq!(appointment.checklist().len(), 1);
        assert_eq!(appointment.timestamps().created_at(), fixed_now());
    }

    #[tokio::test]
    async fn conflict_from_repo_is_reported() {
        let mut repo = MockAppointmentRepo::new();
        repo.expect_insert()
            .returning(|_| Err(RepoError::conflict("appt-0001")));
        // No notification expected

        let use_case = CreateAppointment::new(
            Arc::new(repo),
            Arc::new(clock()),
            Arc::new(ParticipantNotifier::new(
                Arc::new(MockNotificationPort::new()),
                Arc::new(MockUserDirectory::new()),
            )),
        );

        let err = use_case.execute(input()).await.unwrap_err();
        assert!(matches!(err, AppointmentError::Conflict(_)));
    }

    #[tokio::test]
    async fn invalid_date_never_reaches_the_repo() {
        let use_case = CreateAppointment::new(
            Arc::new(MockAppointmentRepo::new()),
            Arc::new(clock()),
            Arc::new(ParticipantNotifier::new(
                Arc::new(MockNotificationPort::new()),
                Arc::new(MockUserDirectory::new()),
            )),
        );

        let sunday = CreateAppointmentInput {
            appointment_date: "2026-03-08T10:00:00Z".into(),
            ..input()
        };
        let err = use_case.execute(sunday).await.unwrap_err();
        assert_eq!(err.code(), "VALIDATION_ERROR");

        let garbage = CreateAppointmentInput {
            appointment_date: "next tuesday".into(),
            ..input()
        };
        assert!(use_case.execute(garbage).await.is_err());
    }

    #[tokio::test]
    async fn notification_failure_does_not_fail_creation() {
        let mut repo = MockAppointmentRepo::new();
        let mut notifier = MockNotificationPort::new();

        repo.expect_insert().returning(|_| Ok(()));
        notifier
            .expect_notify()
            .returning(|_| Err(NotifyError::RequestFailed("provider down".into())));

        let use_case = CreateAppointment::new(
            Arc::new(repo),
            Arc::new(clock()),
            Arc::new(ParticipantNotifier::new(Arc::new(notifier), Arc::new(directory()))),
        );

        assert!(use_case.execute(input()).await.is_ok());
    }
}
