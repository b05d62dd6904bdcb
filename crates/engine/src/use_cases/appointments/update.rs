//! Update appointment use case.

use std::sync::Arc;

use tutorbook_domain::{
    AppointmentAggregate, AppointmentPatch, AppointmentStatus, Checklist, ChecklistItem,
    ChecklistItemRecord, DomainError,
};

use crate::infrastructure::ports::{AppointmentRepo, ClockPort};

use super::error::AppointmentError;
use super::notify::ParticipantNotifier;
use super::{ensure_slot_free, load_for_update, log_changes, notification_kind_for, parse_instant};

/// Raw partial update. Absent fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateAppointmentInput {
    pub status: Option<String>,
    pub appointment_date: Option<String>,
    /// Replaces the whole checklist when present, completion flags included.
    pub checklist: Option<Vec<ChecklistItemRecord>>,
    /// `Some(None)` clears the reason.
    pub reason: Option<Option<String>>,
}

/// Applies a partial update atomically.
///
/// A date change is checked for conflicts with the participants' other appointments.
pub struct UpdateAppointment {
    repo: Arc<dyn AppointmentRepo>,
    clock: Arc<dyn ClockPort>,
    notifier: Arc<ParticipantNotifier>,
}

impl UpdateAppointment {
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
        input: UpdateAppointmentInput,
    ) -> Result<AppointmentAggregate, AppointmentError> {
        let patch = AppointmentPatch {
            status: input
                .status
                .as_deref()
                .map(str::parse::<AppointmentStatus>)
                .transpose()?,
            appointment_date: input.appointment_date.as_deref().map(parse_instant).transpose()?,
            checklist: input.checklist.map(checklist_from_items).transpose()?,
            reason: input.reason,
        };
        if patch.is_empty() {
            return Err(AppointmentError::InvalidInput(
                "No fields to update".into(),
            ));
        }

        let current = load_for_update(self.repo.as_ref(), id).await?;
        let updated = current.update(patch, self.clock.now())?;

        if updated.appointment_date() != current.appointment_date() {
            ensure_slot_free(self.repo.as_ref(), &updated).await?;
        }

        self.repo.save(&updated).await?;

        let events = updated.changes_since(&current);
        log_changes(&updated, &events);
        if !events.is_empty() {
            self.notifier
                .notify_participants(&updated, notification_kind_for(&events))
                .await;
        }

        Ok(updated)
    }
}

fn checklist_from_items(items: Vec<ChecklistItemRecord>) -> Result<Checklist, DomainError> {
    items
        .into_iter()
        .map(|item| ChecklistItem::new(item.description, item.completed))
        .collect::<Result<Vec<_>, _>>()
        .map(Checklist::new)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{
        MockAppointmentRepo, MockClockPort, MockNotificationPort, MockUserDirectory,
        NotificationKind,
    };
    use crate::test_fixtures::{appointment, fixed_now, monday_at, user};
    use tutorbook_domain::{DomainError, UserRole};

    fn clock() -> MockClockPort {
        let mut clock = MockClockPort::new();
        clock.expect_now().returning(fixed_now);
        clock
    }

    fn notifier(expected: Option<NotificationKind>) -> Arc<ParticipantNotifier> {
        let mut notifier = MockNotificationPort::new();
        let mut directory = MockUserDirectory::new();
        if let Some(kind) = expected {
            directory
                .expect_get_user()
                .returning(|id| Ok(user(id.as_str(), UserRole::Student)));
            notifier
                .expect_notify()
                .withf(move |n| n.kind == kind)
                .times(2)
                .returning(|_| Ok(()));
        }
        Arc::new(ParticipantNotifier::new(Arc::new(notifier), Arc::new(directory)))
    }

    fn stored() -> AppointmentAggregate {
        appointment("appt-0001", "t01", "s01", monday_at(10))
    }

    #[tokio::test]
    async fn reschedules_after_conflict_check() {
        let mut repo = MockAppointmentRepo::new();
        repo.expect_get().returning(|_| Ok(Some(stored())));
        repo.expect_find_conflicting()
            .withf(|_, _, _, exclude| exclude.as_ref().map(|id| id.as_str()) == Some("appt-0001"))
            .times(1)
            .returning(|_, _, _, _| Ok(vec![]));
        repo.expect_save()
            .withf(|a| a.appointment_date().value() == monday_at(15))
            .times(1)
            .returning(|_| Ok(()));

        let use_case = UpdateAppointment::new(
            Arc::new(repo),
            Arc::new(clock()),
            notifier(Some(NotificationKind::Updated)),
        );

        let updated = use_case
            .execute(
                "appt-0001",
                UpdateAppointmentInput {
                    appointment_date: Some("2026-03-09T15:00:00Z".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(updated.is_pending());
    }

    #[tokio::test]
    async fn date_conflict_blocks_the_save() {
        let mut repo = MockAppointmentRepo::new();
        repo.expect_get().returning(|_| Ok(Some(stored())));
        repo.expect_find_conflicting().returning(|_, _, _, _| {
            Ok(vec![appointment("appt-0002", "t01", "s02", monday_at(15))])
        });
        // No save expected

        let use_case = UpdateAppointment::new(Arc::new(repo), Arc::new(clock()), notifier(None));

        let err = use_case
            .execute(
                "appt-0001",
                UpdateAppointmentInput {
                    appointment_date: Some("2026-03-09T15:30:00Z".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppointmentError::Conflict(ref id) if id == "appt-0002"));
    }

    #[tokio::test]
    async fn status_cancel_sends_cancellation() {
        let mut repo = MockAppointmentRepo::new();
        repo.expect_get().returning(|_| Ok(Some(stored())));
        repo.expect_save()
            .withf(|a| a.is_cancelled())
            .returning(|_| Ok(()));

        let use_case = UpdateAppointment::new(
            Arc::new(repo),
            Arc::new(clock()),
            notifier(Some(NotificationKind::Cancelled)),
        );

        use_case
            .execute(
                "appt-0001",
                UpdateAppointmentInput {
                    status: Some("cancelled".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn domain_rejection_leaves_store_untouched() {
        let mut repo = MockAppointmentRepo::new();
        repo.expect_get()
            .returning(|_| Ok(Some(stored().delete(fixed_now()).unwrap())));

        let use_case = UpdateAppointment::new(Arc::new(repo), Arc::new(clock()), notifier(None));

        let err = use_case
            .execute(
                "appt-0001",
                UpdateAppointmentInput {
                    reason: Some(Some("moved online".into())),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AppointmentError::Domain(DomainError::DeletedAppointment { .. })
        ));
    }

    #[tokio::test]
    async fn checklist_replace_keeps_completion_flags() {
        let mut repo = MockAppointmentRepo::new();
        repo.expect_get().returning(|_| Ok(Some(stored())));
        repo.expect_save()
            .withf(|a| a.checklist().completed_count() == 1)
            .times(1)
            .returning(|_| Ok(()));

        let use_case = UpdateAppointment::new(
            Arc::new(repo),
            Arc::new(clock()),
            notifier(Some(NotificationKind::Updated)),
        );

        let updated = use_case
            .execute(
                "appt-0001",
                UpdateAppointmentInput {
                    checklist: Some(vec![
                        ChecklistItemRecord {
                            description: "read ch 1".into(),
                            completed: true,
                        },
                        ChecklistItemRecord {
                            description: "read ch 2".into(),
                            completed: false,
                        },
                    ]),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let items: Vec<_> = updated
            .checklist()
            .items()
            .iter()
            .map(|item| (item.description.as_str(), item.completed))
            .collect();
        assert_eq!(items, vec![("read ch 1", true), ("read ch 2", false)]);
    }

    #[tokio::test]
    async fn blank_checklist_item_is_rejected() {
        let use_case = UpdateAppointment::new(
            Arc::new(MockAppointmentRepo::new()),
            Arc::new(clock()),
            notifier(None),
        );
        let err = use_case
            .execute(
                "appt-0001",
                UpdateAppointmentInput {
                    checklist: Some(vec![ChecklistItemRecord {
                        description: "   ".into(),
                        completed: true,
                    }]),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.code(), "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn empty_patch_is_invalid_input() {
        let use_case = UpdateAppointment::new(
            Arc::new(MockAppointmentRepo::new()),
            Arc::new(clock()),
            notifier(None),
        );
        let err = use_case
            .execute("appt-0001", UpdateAppointmentInput::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppointmentError::InvalidInput(_)));
    }
}
