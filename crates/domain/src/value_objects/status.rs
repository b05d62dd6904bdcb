//! Appointment status and its transition table

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Lifecycle state of an appointment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
    NoShow,
}

/// Adjacency table: current state -> states it may move to.
///
/// Cancelled and no-show appointments re-open to pending through a reschedule;
/// completed is terminal.
const TRANSITIONS: [(AppointmentStatus, &[AppointmentStatus]); 5] = [
    (
        AppointmentStatus::Pending,
        &[AppointmentStatus::Confirmed, AppointmentStatus::Cancelled],
    ),
    (
        AppointmentStatus::Confirmed,
        &[
            AppointmentStatus::Completed,
            AppointmentStatus::Cancelled,
            AppointmentStatus::NoShow,
        ],
    ),
    (AppointmentStatus::Cancelled, &[AppointmentStatus::Pending]),
    (AppointmentStatus::Completed, &[]),
    (AppointmentStatus::NoShow, &[AppointmentStatus::Pending]),
];

impl AppointmentStatus {
    /// Every status, in declaration order.
    pub const ALL: [AppointmentStatus; 5] = [
        Self::Pending,
        Self::Confirmed,
        Self::Cancelled,
        Self::Completed,
        Self::NoShow,
    ];

    /// Wire name of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
            Self::Completed => "completed",
            Self::NoShow => "no_show",
        }
    }

    /// The states reachable from this one in a single step.
    pub fn allowed_transitions(&self) -> &'static [AppointmentStatus] {
        TRANSITIONS
            .iter()
            .find(|(from, _)| from == self)
            .map(|(_, targets)| *targets)
            .unwrap_or(&[])
    }

    pub fn can_transition_to(&self, target: AppointmentStatus) -> bool {
        self.allowed_transitions().contains(&target)
    }

    /// Date, checklist and reason edits are only allowed while pending or confirmed.
    pub fn can_be_modified(&self) -> bool {
        matches!(self, Self::Pending | Self::Confirmed)
    }

    pub fn is_terminal(&self) -> bool {
        self.allowed_transitions().is_empty()
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    pub fn is_confirmed(&self) -> bool {
        matches!(self, Self::Confirmed)
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }

    pub fn is_no_show(&self) -> bool {
        matches!(self, Self::NoShow)
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppointmentStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "cancelled" => Ok(Self::Cancelled),
            "completed" => Ok(Self::Completed),
            "no_show" => Ok(Self::NoShow),
            other => Err(DomainError::validation(format!(
                "Invalid appointment status: {}. Valid statuses: pending, confirmed, cancelled, completed, no_show",
                other
            ))),
        }
    }
}
