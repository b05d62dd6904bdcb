//! Appointment aggregate - the tutoring session of record
//!
//! The aggregate owns every status transition and the date/checklist/reason
//! rules that guard them.
//!
//! # Rustic DDD Design
//!
//! - **Private fields**: all state is reached through accessors
//! - **Valid by construction**: `create()` and `from_record()` validate every field
//! - **Persistent updates**: mutators take `&self` and return a new snapshot,
//!   so a loaded aggregate can be shared freely between request handlers
//! - **Explicit time**: every time-dependent rule receives `now`
//!
//! # Precondition order
//!
//! Each mutator checks, in order: not deleted, status legality, then date rules.

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::events::AppointmentEvent;
use crate::ids::{AppointmentId, UserId};
use crate::value_objects::{
    AppointmentDate, AppointmentStatus, Checklist, ChecklistItem, Reason, TimeStamps,
};

/// Input for booking a new appointment.
#[derive(Debug, Clone)]
pub struct NewAppointment {
    pub tutor_id: String,
    pub student_id: String,
    pub appointment_date: DateTime<FixedOffset>,
    pub checklist: Checklist,
    pub reason: Option<String>,
    /// Externally supplied id; generated when absent.
    pub id: Option<String>,
}

/// Partial update applied by [`AppointmentAggregate::update`].
///
/// Sub-updates run in a fixed order: status, date, checklist, reason.
#[derive(Debug, Clone, Default)]
pub struct AppointmentPatch {
    pub status: Option<AppointmentStatus>,
    pub appointment_date: Option<DateTime<FixedOffset>>,
    pub checklist: Option<Checklist>,
    /// `Some(None)` clears the reason.
    pub reason: Option<Option<String>>,
}

impl AppointmentPatch {
    pub fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.appointment_date.is_none()
            && self.checklist.is_none()
            && self.reason.is_none()
    }
}

/// A tutoring appointment between a tutor and a student.
///
/// # Invariants
///
/// - Every mutator except `delete` is rejected once the record is soft-deleted
/// - Status only moves along the transition table of [`AppointmentStatus`]
/// - Date, checklist and reason edits require a pending or confirmed status
/// - Equality is by id only
///
/// # Example
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use tutorbook_domain::aggregates::{AppointmentAggregate, NewAppointment};
/// use tutorbook_domain::Checklist;
///
/// // Monday 09:00 UTC, booking the following Monday at 10:00
/// let now = Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap();
/// let at = Utc.with_ymd_and_hms(2026, 3, 9, 10, 0, 0).unwrap().fixed_offset();
///
/// let appointment = AppointmentAggregate::create(
///     NewAppointment {
///         tutor_id: "tutor-1".into(),
///         student_id: "student-1".into(),
///         appointment_date: at,
///         checklist: Checklist::empty(),
///         reason: None,
///         id: None,
///     },
///     now,
/// )
/// .unwrap();
///
/// assert!(appointment.is_pending());
/// let confirmed = appointment.confirm(now).unwrap();
/// assert!(confirmed.is_confirmed());
/// ```
#[derive(Debug, Clone)]
pub struct AppointmentAggregate {
    id: AppointmentId,
    tutor_id: UserId,
    student_id: UserId,
    status: AppointmentStatus,
    appointment_date: AppointmentDate,
    checklist: Checklist,
    reason: Option<Reason>,
    timestamps: TimeStamps,
}

impl AppointmentAggregate {
    // =========================================================================
    // Factories
    // =========================================================================

    /// Book a new appointment. Status starts as pending.
    pub fn create(input: NewAppointment, now: DateTime<Utc>) -> Result<Self, DomainError> {
        let id = match input.id {
            Some(id) => AppointmentId::parse(id)?,
            None => AppointmentId::generate(now),
        };

        Ok(Self {
            id,
            tutor_id: UserId::parse(input.tutor_id)?,
            student_id: UserId::parse(input.student_id)?,
            status: AppointmentStatus::Pending,
            appointment_date: AppointmentDate::new(input.appointment_date, now)?,
            checklist: input.checklist,
            reason: Reason::optional(input.reason)?,
            timestamps: TimeStamps::new(now),
        })
    }

    /// Rehydrate from storage.
    ///
    /// The stored date is not re-checked against the booking window.
    pub fn from_record(record: AppointmentRecord) -> Result<Self, DomainError> {
        let checklist = record
            .checklist
            .into_iter()
            .map(|item| ChecklistItem::new(item.description, item.completed))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            id: AppointmentId::parse(record.id)?,
            tutor_id: UserId::parse(record.tutor_id)?,
            student_id: UserId::parse(record.student_id)?,
            status: record.status.parse()?,
            appointment_date: AppointmentDate::from_persisted(record.appointment_date),
            checklist: Checklist::new(checklist),
            reason: Reason::optional(record.reason)?,
            timestamps: TimeStamps::from_dates(
                record.created_at,
                record.updated_at,
                record.deleted_at,
            )?,
        })
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub fn id(&self) -> &AppointmentId {
        &self.id
    }

    #[inline]
    pub fn tutor_id(&self) -> &UserId {
        &self.tutor_id
    }

    #[inline]
    pub fn student_id(&self) -> &UserId {
        &self.student_id
    }

    #[inline]
    pub fn status(&self) -> AppointmentStatus {
        self.status
    }

    #[inline]
    pub fn appointment_date(&self) -> AppointmentDate {
        self.appointment_date
    }

    #[inline]
    pub fn checklist(&self) -> &Checklist {
        &self.checklist
    }

    #[inline]
    pub fn reason(&self) -> Option<&Reason> {
        self.reason.as_ref()
    }

    #[inline]
    pub fn timestamps(&self) -> TimeStamps {
        self.timestamps
    }

    // =========================================================================
    // Status transitions
    // =========================================================================

    pub fn confirm(&self, now: DateTime<Utc>) -> Result<Self, DomainError> {
        self.ensure_not_deleted("confirm")?;
        self.ensure_transition(AppointmentStatus::Confirmed)?;
        if self.appointment_date.is_past_due(now) {
            return Err(DomainError::validation(
                "Cannot confirm an appointment whose date has already passed",
            ));
        }
        Ok(self.with_status(AppointmentStatus::Confirmed, now))
    }

    pub fn cancel(&self, now: DateTime<Utc>) -> Result<Self, DomainError> {
        self.ensure_not_deleted("cancel")?;
        self.ensure_transition(AppointmentStatus::Cancelled)?;
        Ok(self.with_status(AppointmentStatus::Cancelled, now))
    }

    /// Close a session that has taken place.
    ///
    /// With `mark_checklist_done`, every checklist item is marked completed.
    pub fn complete(
        &self,
        mark_checklist_done: bool,
        now: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        self.ensure_not_deleted("complete")?;
        self.ensure_transition(AppointmentStatus::Completed)?;
        if self.appointment_date.is_in_future(now) {
            return Err(DomainError::validation(
                "Cannot complete an appointment that has not happened yet",
            ));
        }
        let mut next = self.with_status(AppointmentStatus::Completed, now);
        if mark_checklist_done {
            next.checklist = self.checklist.with_all_completed();
        }
        Ok(next)
    }

    pub fn mark_as_no_show(&self, now: DateTime<Utc>) -> Result<Self, DomainError> {
        self.ensure_not_deleted("mark as no-show")?;
        self.ensure_transition(AppointmentStatus::NoShow)?;
        if self.appointment_date.is_in_future(now) {
            return Err(DomainError::validation(
                "Cannot mark as no-show an appointment that has not happened yet",
            ));
        }
        Ok(self.with_status(AppointmentStatus::NoShow, now))
    }

    /// Move the appointment to a new instant; status goes back to pending.
    ///
    /// The notice window is judged on the *current* date, before the new one
    /// is validated.
    pub fn reschedule(
        &self,
        new_date: DateTime<FixedOffset>,
        now: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        self.ensure_not_deleted("reschedule")?;
        self.ensure_modifiable("reschedule")?;
        if !self.appointment_date.can_be_rescheduled(now) {
            return Err(DomainError::reschedule_window(
                "Cannot reschedule an appointment with less than 2 hours notice",
            ));
        }
        let appointment_date = AppointmentDate::new(new_date, now).map_err(|err| match err {
            DomainError::Validation(msg) => DomainError::reschedule_window(msg),
            other => other,
        })?;

        Ok(Self {
            status: AppointmentStatus::Pending,
            appointment_date,
            timestamps: self.timestamps.mark_as_updated(now),
            ..self.clone()
        })
    }

    // =========================================================================
    // Content edits
    // =========================================================================

    /// Replace the whole checklist.
    pub fn replace_checklist(
        &self,
        checklist: Checklist,
        now: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        self.ensure_not_deleted("update the checklist of")?;
        self.ensure_modifiable("update the checklist of")?;
        Ok(Self {
            checklist,
            timestamps: self.timestamps.mark_as_updated(now),
            ..self.clone()
        })
    }

    /// Set or clear the reason. Blank text clears it.
    pub fn change_reason(
        &self,
        reason: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        self.ensure_not_deleted("change the reason of")?;
        self.ensure_modifiable("change the reason of")?;
        Ok(Self {
            reason: Reason::optional(reason)?,
            timestamps: self.timestamps.mark_as_updated(now),
            ..self.clone()
        })
    }

    /// Apply a patch atomically: either every sub-update succeeds or the
    /// original snapshot is left untouched and the first error is returned.
    pub fn update(&self, patch: AppointmentPatch, now: DateTime<Utc>) -> Result<Self, DomainError> {
        self.ensure_not_deleted("update")?;
        self.ensure_modifiable("update")?;

        let mut next = self.clone();

        if let Some(status) = patch.status {
            if status != next.status {
                next = next.transition_to(status, now)?;
            }
        }
        if let Some(date) = patch.appointment_date {
            next = next.reschedule(date, now)?;
        }
        if let Some(checklist) = patch.checklist {
            next = next.replace_checklist(checklist, now)?;
        }
        if let Some(reason) = patch.reason {
            next = next.change_reason(reason, now)?;
        }

        Ok(next)
    }

    /// Soft-delete. The record is kept with `deleted_at` set.
    pub fn delete(&self, now: DateTime<Utc>) -> Result<Self, DomainError> {
        self.ensure_not_deleted("delete")?;
        Ok(Self {
            timestamps: self.timestamps.mark_as_deleted(now),
            ..self.clone()
        })
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn is_pending(&self) -> bool {
        self.status.is_pending()
    }

    pub fn is_confirmed(&self) -> bool {
        self.status.is_confirmed()
    }

    pub fn is_cancelled(&self) -> bool {
        self.status.is_cancelled()
    }

    pub fn is_completed(&self) -> bool {
        self.status.is_completed()
    }

    pub fn is_no_show(&self) -> bool {
        self.status.is_no_show()
    }

    pub fn is_deleted(&self) -> bool {
        self.timestamps.is_deleted()
    }

    pub fn can_be_modified(&self) -> bool {
        !self.is_deleted() && self.status.can_be_modified()
    }

    pub fn can_be_rescheduled(&self, now: DateTime<Utc>) -> bool {
        self.can_be_modified() && self.appointment_date.can_be_rescheduled(now)
    }

    pub fn is_upcoming(&self, now: DateTime<Utc>) -> bool {
        self.appointment_date.is_in_future(now) && !self.is_deleted()
    }

    pub fn is_past_due(&self, now: DateTime<Utc>) -> bool {
        self.appointment_date.is_past_due(now)
    }

    // =========================================================================
    // Events
    // =========================================================================

    /// Event announcing this appointment's creation.
    pub fn created_event(&self) -> AppointmentEvent {
        AppointmentEvent::Created {
            appointment_id: self.id.clone(),
            tutor_id: self.tutor_id.clone(),
            student_id: self.student_id.clone(),
            appointment_date: self.appointment_date,
        }
    }

    /// Events describing how this snapshot differs from `previous`.
    pub fn changes_since(&self, previous: &Self) -> Vec<AppointmentEvent> {
        let mut events = Vec::new();

        if self.status != previous.status {
            events.push(AppointmentEvent::StatusChanged {
                from: previous.status,
                to: self.status,
            });
            if self.status.is_completed() {
                events.push(AppointmentEvent::Completed {
                    completed_at: self.timestamps.updated_at(),
                });
            }
        }
        if self.appointment_date != previous.appointment_date {
            events.push(AppointmentEvent::Rescheduled {
                from: previous.appointment_date,
                to: self.appointment_date,
            });
        }
        if self.checklist != previous.checklist {
            events.push(AppointmentEvent::ChecklistUpdated {
                completed: self.checklist.completed_count(),
                total: self.checklist.len(),
            });
        }
        if self.reason != previous.reason {
            events.push(AppointmentEvent::ReasonChanged {
                from: previous.reason.clone(),
                to: self.reason.clone(),
            });
        }
        if let (Some(deleted_at), false) = (self.timestamps.deleted_at(), previous.is_deleted()) {
            events.push(AppointmentEvent::Deleted { deleted_at });
        }

        events
    }

    // =========================================================================
    // Serialization views
    // =========================================================================

    /// JSON projection for API responses.
    pub fn to_view(&self) -> AppointmentView {
        AppointmentView {
            id: self.id.to_string(),
            tutor_id: self.tutor_id.to_string(),
            student_id: self.student_id.to_string(),
            status: self.status,
            appointment_date: self.appointment_date.value(),
            checklist: self.checklist.clone(),
            reason: self.reason.as_ref().map(|r| r.to_string()),
            created_at: self.timestamps.created_at(),
            updated_at: self.timestamps.updated_at(),
            deleted_at: self.timestamps.deleted_at(),
        }
    }

    /// Field-for-field record for storage.
    pub fn to_record(&self) -> AppointmentRecord {
        AppointmentRecord {
            id: self.id.to_string(),
            tutor_id: self.tutor_id.to_string(),
            student_id: self.student_id.to_string(),
            status: self.status.to_string(),
            appointment_date: self.appointment_date.value(),
            checklist: self
                .checklist
                .items()
                .iter()
                .map(|item| ChecklistItemRecord {
                    description: item.description.to_string(),
                    completed: item.completed,
                })
                .collect(),
            reason: self.reason.as_ref().map(|r| r.to_string()),
            created_at: self.timestamps.created_at(),
            updated_at: self.timestamps.updated_at(),
            deleted_at: self.timestamps.deleted_at(),
        }
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn ensure_not_deleted(&self, operation: &'static str) -> Result<(), DomainError> {
        if self.is_deleted() {
            return Err(DomainError::deleted(operation));
        }
        Ok(())
    }

    fn ensure_transition(&self, target: AppointmentStatus) -> Result<(), DomainError> {
        if !self.status.can_transition_to(target) {
            return Err(DomainError::invalid_transition(self.status, target));
        }
        Ok(())
    }

    fn ensure_modifiable(&self, operation: &'static str) -> Result<(), DomainError> {
        if !self.status.can_be_modified() {
            return Err(DomainError::unmodifiable(operation, self.status));
        }
        Ok(())
    }

    /// Route a requested status through the operation that owns its guards.
    fn transition_to(
        &self,
        target: AppointmentStatus,
        now: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        match target {
            AppointmentStatus::Confirmed => self.confirm(now),
            AppointmentStatus::Cancelled => self.cancel(now),
            AppointmentStatus::Completed => self.complete(false, now),
            AppointmentStatus::NoShow => self.mark_as_no_show(now),
            AppointmentStatus::Pending => {
                self.ensure_not_deleted("reopen")?;
                self.ensure_transition(AppointmentStatus::Pending)?;
                Ok(self.with_status(AppointmentStatus::Pending, now))
            }
        }
    }

    fn with_status(&self, status: AppointmentStatus, now: DateTime<Utc>) -> Self {
        Self {
            status,
            timestamps: self.timestamps.mark_as_updated(now),
            ..self.clone()
        }
    }
}

impl PartialEq for AppointmentAggregate {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for AppointmentAggregate {}

// =============================================================================
// Projections
// =============================================================================

/// API response shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentView {
    pub id: String,
    pub tutor_id: String,
    pub student_id: String,
    pub status: AppointmentStatus,
    pub appointment_date: DateTime<FixedOffset>,
    pub checklist: Checklist,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Storage shape. Plain fields; validation happens in
/// [`AppointmentAggregate::from_record`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppointmentRecord {
    pub id: String,
    pub tutor_id: String,
    pub student_id: String,
    pub status: String,
    pub appointment_date: DateTime<FixedOffset>,
    #[serde(default)]
    pub checklist: Vec<ChecklistItemRecord>,
    #[serde(default)]
    pub reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItemRecord {
    pub description: String,
    pub completed: bool,
}
