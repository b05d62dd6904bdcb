//! Change appointment status use case.

use std::sync::Arc;

use tutorbook_domain::{AppointmentAggregate, AppointmentStatus};

use crate::infrastructure::ports::{AppointmentRepo, ClockPort};

use super::error::AppointmentError;
use super::notify::ParticipantNotifier;
use super::{load_for_update, log_changes, notification_kind_for};

/// A requested lifecycle step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusChange {
    Confirm,
    Cancel,
    Complete { mark_checklist_done: bool },
    NoShow,
}

impl StatusChange {
    /// The step that leads to `status`, if one exists.
    ///
    /// Returns `None` for `pending`, which is only reached by rescheduling.
    pub fn for_status(status: AppointmentStatus) -> Option<Self> {
        match status {
            AppointmentStatus::Confirmed => Some(Self::Confirm),
            AppointmentStatus::Cancelled => Some(Self::Cancel),
            AppointmentStatus::Completed => Some(Self::Complete {
                mark_checklist_done: false,
            }),
            AppointmentStatus::NoShow => Some(Self::NoShow),
            AppointmentStatus::Pending => None,
        }
    }
}

pub struct ChangeAppointmentStatus {
    repo: Arc<dyn AppointmentRepo>,
    clock: Arc<dyn ClockPort>,
    notifier: Arc<ParticipantNotifier>,
}

impl ChangeAppointmentStatus {
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
        change: StatusChange,
    ) -> Result<AppointmentAggregate, AppointmentError> {
        let current = load_for_update(self.repo.as_ref(), id).await?;
        let now = self.clock.now();

        let updated = match change {
            StatusChange::Confirm => current.confirm(now)?,
            StatusChange::Cancel => current.cancel(now)?,
            StatusChange::Complete {
                mark_checklist_done,
            } => current.complete(mark_checklist_done, now)?,
            StatusChange::NoShow => current.mark_as_no_show(now)?,
        };

        self.repo.save(&updated).await?;

        let events = updated.changes_since(&current);
        log_changes(&updated, &events);
        self.notifier
            .notify_participants(&updated, notification_kind_for(&events))
            .await;

        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{
        MockAppointmentRepo, MockClockPort, MockNotificationPort, MockUserDirectory,
        NotificationKind,
    };
    use crate::test_fixtures::{appointment, fixed_now, monday_at, user};
    use chrono::{Duration, TimeZone, Utc};
    use tutorbook_domain::{DomainError, UserRole};

    fn clock_at(now: chrono::DateTime<Utc>) -> MockClockPort {
        let mut clock = MockClockPort::new();
        clock.expect_now().returning(move || now);
        clock
    }

    fn quiet_notifier() -> Arc<ParticipantNotifier> {
        Arc::new(ParticipantNotifier::new(
            Arc::new(MockNotificationPort::new()),
            Arc::new(MockUserDirectory::new()),
        ))
    }

    #[tokio::test]
    async fn confirm_persists_and_notifies_update() {
        let mut repo = MockAppointmentRepo::new();
        let mut notifier = MockNotificationPort::new();
        let mut directory = MockUserDirectory::new();

        repo.expect_get()
            .returning(|_| Ok(Some(appointment("appt-0001", "t01", "s01", monday_at(10)))));
        repo.expect_save()
            .withf(|a| a.is_confirmed())
            .times(1)
            .returning(|_| Ok(()));
        directory
            .expect_get_user()
            .returning(|id| Ok(user(id.as_str(), UserRole::Tutor)));
        notifier
            .expect_notify()
            .withf(|n| n.kind == NotificationKind::Updated && n.appointment.status == AppointmentStatus::Confirmed)
            .times(2)
            .returning(|_| Ok(()));

        let use_case = ChangeAppointmentStatus::new(
            Arc::new(repo),
            Arc::new(clock_at(fixed_now())),
            Arc::new(ParticipantNotifier::new(Arc::new(notifier), Arc::new(directory))),
        );

        let updated = use_case.execute("appt-0001", StatusChange::Confirm).await.unwrap();
        assert!(updated.is_confirmed());
    }

    #[tokio::test]
    async fn complete_after_the_session_marks_checklist() {
        let after = Utc.with_ymd_and_hms(2026, 3, 9, 11, 0, 0).unwrap();
        let mut repo = MockAppointmentRepo::new();
        repo.expect_get().returning(|_| {
            Ok(Some(
                appointment("appt-0001", "t01", "s01", monday_at(10))
                    .confirm(fixed_now())
                    .unwrap(),
            ))
        });
        repo.expect_save().returning(|_| Ok(()));

        let mut directory = MockUserDirectory::new();
        directory
            .expect_get_user()
            .returning(|id| Err(crate::infrastructure::ports::DirectoryError::NotFound(id.to_string())));

        let use_case = ChangeAppointmentStatus::new(
            Arc::new(repo),
            Arc::new(clock_at(after)),
            Arc::new(ParticipantNotifier::new(
                Arc::new(MockNotificationPort::new()),
                Arc::new(directory),
            )),
        );

        let done = use_case
            .execute(
                "appt-0001",
                StatusChange::Complete {
                    mark_checklist_done: true,
                },
            )
            .await
            .unwrap();
        assert!(done.is_completed());
        assert!(done.checklist().is_fully_completed());
    }

    #[tokio::test]
    async fn illegal_transition_is_not_saved() {
        let mut repo = MockAppointmentRepo::new();
        repo.expect_get().returning(|_| {
            Ok(Some(
                appointment("appt-0001", "t01", "s01", monday_at(10))
                    .cancel(fixed_now())
                    .unwrap(),
            ))
        });
        // No save expected

        let use_case = ChangeAppointmentStatus::new(
            Arc::new(repo),
            Arc::new(clock_at(fixed_now() + Duration::minutes(1))),
            quiet_notifier(),
        );

        let err = use_case
            .execute("appt-0001", StatusChange::Confirm)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AppointmentError::Domain(DomainError::InvalidTransition { .. })
        ));
        assert_eq!(err.code(), "INVALID_TRANSITION");
    }

    #[tokio::test]
    async fn unknown_appointment_is_not_found() {
        let mut repo = MockAppointmentRepo::new();
        repo.expect_get().returning(|_| Ok(None));

        let use_case = ChangeAppointmentStatus::new(
            Arc::new(repo),
            Arc::new(clock_at(fixed_now())),
            quiet_notifier(),
        );

        assert!(matches!(
            use_case.execute("appt-0404", StatusChange::Cancel).await,
            Err(AppointmentError::NotFound(_))
        ));
    }

    #[test]
    fn pending_has_no_direct_step() {
        assert_eq!(StatusChange::for_status(AppointmentStatus::Pending), None);
        assert_eq!(
            StatusChange::for_status(AppointmentStatus::Cancelled),
            Some(StatusChange::Cancel)
        );
    }
}
