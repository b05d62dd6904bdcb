//! Appointment use cases.
//!
//! Every mutation follows the same path: load, apply the domain operation with
//! the clock's `now`, persist, then notify the participants. Notification
//! failures are logged and never undo or fail the mutation.

mod change_status;
mod create;
mod delete;
mod error;
mod get;
mod list;
mod notify;
mod reschedule;
mod update;

pub use change_status::{ChangeAppointmentStatus, StatusChange};
pub use create::{CreateAppointment, CreateAppointmentInput};
pub use delete::DeleteAppointment;
pub use error::AppointmentError;
pub use get::GetAppointment;
pub use list::{ListAppointments, ListAppointmentsQuery};
pub use notify::ParticipantNotifier;
pub use reschedule::RescheduleAppointment;
pub use update::{UpdateAppointment, UpdateAppointmentInput};

use std::sync::Arc;

use chrono::{DateTime, FixedOffset};
use tutorbook_domain::{AppointmentAggregate, AppointmentEvent, AppointmentId};

use crate::infrastructure::ports::{AppointmentRepo, NotificationKind};

/// Container for appointment use cases.
pub struct AppointmentUseCases {
    pub create: Arc<CreateAppointment>,
    pub get: Arc<GetAppointment>,
    pub list: Arc<ListAppointments>,
    pub update: Arc<UpdateAppointment>,
    pub change_status: Arc<ChangeAppointmentStatus>,
    pub reschedule: Arc<RescheduleAppointment>,
    pub delete: Arc<DeleteAppointment>,
}

impl AppointmentUseCases {
    pub fn new(
        create: Arc<CreateAppointment>,
        get: Arc<GetAppointment>,
        list: Arc<ListAppointments>,
        update: Arc<UpdateAppointment>,
        change_status: Arc<ChangeAppointmentStatus>,
        reschedule: Arc<RescheduleAppointment>,
        delete: Arc<DeleteAppointment>,
    ) -> Self {
        Self {
            create,
            get,
            list,
            update,
            change_status,
            reschedule,
            delete,
        }
    }
}

/// Load an appointment for mutation. Soft-deleted records are returned so the
/// domain can reject the operation with its own error.
async fn load_for_update(
    repo: &dyn AppointmentRepo,
    id: &str,
) -> Result<AppointmentAggregate, AppointmentError> {
    let id = AppointmentId::parse(id)?;
    repo.get(id.clone())
        .await?
        .ok_or_else(|| AppointmentError::NotFound(id.to_string()))
}

/// Fail with `Conflict` if another active appointment for either participant
/// sits within the conflict window of `appointment`'s date.
async fn ensure_slot_free(
    repo: &dyn AppointmentRepo,
    appointment: &AppointmentAggregate,
) -> Result<(), AppointmentError> {
    let conflicts = repo
        .find_conflicting(
            appointment.tutor_id().clone(),
            appointment.student_id().clone(),
            appointment.appointment_date().to_utc(),
            Some(appointment.id().clone()),
        )
        .await?;
    match conflicts.first() {
        Some(existing) => Err(AppointmentError::Conflict(existing.id().to_string())),
        None => Ok(()),
    }
}

/// Parse a client-supplied RFC 3339 instant, keeping its offset.
fn parse_instant(raw: &str) -> Result<DateTime<FixedOffset>, AppointmentError> {
    DateTime::parse_from_rfc3339(raw.trim()).map_err(|_| {
        AppointmentError::InvalidInput(format!("'{raw}' is not a valid RFC 3339 timestamp"))
    })
}

/// Cancellation notices for cancellations and deletions, updates for anything else.
fn notification_kind_for(events: &[AppointmentEvent]) -> NotificationKind {
    if events.iter().any(AppointmentEvent::is_cancellation) {
        NotificationKind::Cancelled
    } else {
        NotificationKind::Updated
    }
}

fn log_changes(appointment: &AppointmentAggregate, events: &[AppointmentEvent]) {
    for event in events {
        tracing::info!(
            appointment_id = %appointment.id(),
            event = event.event_type(),
            "Appointment changed"
        );
    }
}
