//! Repository port for appointment storage.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tutorbook_domain::{AppointmentAggregate, AppointmentId, UserId};

use super::error::RepoError;
use super::types::{AppointmentFilter, Page, PageRequest};

/// Half-width of the window in which two appointments are considered to clash.
pub const CONFLICT_WINDOW_MINUTES: i64 = 60;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AppointmentRepo: Send + Sync {
    /// Fetch by id, including soft-deleted records.
    async fn get(&self, id: AppointmentId) -> Result<Option<AppointmentAggregate>, RepoError>;

    /// Store a new appointment.
    ///
    /// Fails with `RepoError::Conflict` if the tutor or the student already has an
    /// active appointment within the conflict window. The check and the write are
    /// one atomic step.
    async fn insert(&self, appointment: &AppointmentAggregate) -> Result<(), RepoError>;

    /// Overwrite an existing appointment. Fails with `NotFound` if it was never inserted.
    async fn save(&self, appointment: &AppointmentAggregate) -> Result<(), RepoError>;

    /// Non-deleted appointments matching `filter`, newest appointment date first.
    async fn list(
        &self,
        filter: AppointmentFilter,
        page: PageRequest,
    ) -> Result<Page<AppointmentAggregate>, RepoError>;

    /// Active (pending or confirmed, not deleted) appointments for either
    /// participant within the conflict window around `at`.
    async fn find_conflicting(
        &self,
        tutor_id: UserId,
        student_id: UserId,
        at: DateTime<Utc>,
        exclude: Option<AppointmentId>,
    ) -> Result<Vec<AppointmentAggregate>, RepoError>;
}

/// True when `candidate` blocks a booking for `tutor_id`/`student_id` at `at`.
///
/// Shared by adapters so every backend applies the same rule.
pub fn is_conflicting(
    candidate: &AppointmentAggregate,
    tutor_id: &UserId,
    student_id: &UserId,
    at: DateTime<Utc>,
    exclude: Option<&AppointmentId>,
) -> bool {
    if exclude == Some(candidate.id()) || candidate.is_deleted() {
        return false;
    }
    if !(candidate.is_pending() || candidate.is_confirmed()) {
        return false;
    }
    if candidate.tutor_id() != tutor_id && candidate.student_id() != student_id {
        return false;
    }
    let gap = candidate
        .appointment_date()
        .to_utc()
        .signed_duration_since(at)
        .num_seconds()
        .abs();
    gap <= CONFLICT_WINDOW_MINUTES * 60
}
