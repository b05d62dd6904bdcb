//! Appointment change events.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::value_objects::{AppointmentDate, AppointmentStatus, Reason};
use crate::{AppointmentId, UserId};

/// Something that happened to an appointment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum AppointmentEvent {
    Created {
        appointment_id: AppointmentId,
        tutor_id: UserId,
        student_id: UserId,
        appointment_date: AppointmentDate,
    },
    StatusChanged {
        from: AppointmentStatus,
        to: AppointmentStatus,
    },
    Rescheduled {
        from: AppointmentDate,
        to: AppointmentDate,
    },
    Completed {
        completed_at: DateTime<Utc>,
    },
    ChecklistUpdated {
        completed: usize,
        total: usize,
    },
    ReasonChanged {
        from: Option<Reason>,
        to: Option<Reason>,
    },
    Deleted {
        deleted_at: DateTime<Utc>,
    },
}

impl AppointmentEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::Created { .. } => "appointment_created",
            Self::StatusChanged { .. } => "appointment_status_changed",
            Self::Rescheduled { .. } => "appointment_rescheduled",
            Self::Completed { .. } => "appointment_completed",
            Self::ChecklistUpdated { .. } => "checklist_updated",
            Self::ReasonChanged { .. } => "reason_changed",
            Self::Deleted { .. } => "appointment_deleted",
        }
    }

    /// True for events that should produce a cancellation notice.
    pub fn is_cancellation(&self) -> bool {
        matches!(
            self,
            Self::StatusChanged {
                to: AppointmentStatus::Cancelled,
                ..
            } | Self::Deleted { .. }
        )
    }
}
