//! Unified error types for the domain layer
//!
//! Every failure the appointment core can produce is one of these variants.
//! The core never catches or logs them; callers decide what the user sees,
//! typically by matching on the variant or on [`DomainError::code`].

use thiserror::Error;

use crate::value_objects::AppointmentStatus;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Malformed identifier, email, date, or task text
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Status change not permitted from the current state
    #[error("Invalid state transition: {from} -> {to}")]
    InvalidTransition {
        from: AppointmentStatus,
        to: AppointmentStatus,
    },

    /// A mutator was invoked on a soft-deleted appointment
    #[error("Appointment is already deleted; cannot {operation}")]
    DeletedAppointment { operation: &'static str },

    /// A mutator that needs a modifiable status was invoked on a closed appointment
    #[error("Cannot {operation} an appointment in status {status}")]
    UnmodifiableState {
        operation: &'static str,
        status: AppointmentStatus,
    },

    /// Reschedule attempted inside the notice window, or the new date is invalid
    #[error("Reschedule not allowed: {0}")]
    RescheduleWindow(String),

    /// Parse error (for value objects)
    #[error("Parse error: {0}")]
    Parse(String),
}

impl DomainError {
    /// Creates a validation error for malformed input.
    ///
    /// # Example
    /// ```ignore
    /// if id.trim().is_empty() {
    ///     return Err(DomainError::validation("User ID cannot be empty"));
    /// }
    /// ```
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create an invalid transition error naming both states
    pub fn invalid_transition(from: AppointmentStatus, to: AppointmentStatus) -> Self {
        Self::InvalidTransition { from, to }
    }

    /// Create a deleted appointment error for the named operation
    pub fn deleted(operation: &'static str) -> Self {
        Self::DeletedAppointment { operation }
    }

    /// Create an unmodifiable state error for the named operation
    pub fn unmodifiable(operation: &'static str, status: AppointmentStatus) -> Self {
        Self::UnmodifiableState { operation, status }
    }

    /// Create a reschedule window violation
    pub fn reschedule_window(msg: impl Into<String>) -> Self {
        Self::RescheduleWindow(msg.into())
    }

    /// Creates a parse error for string-to-type conversion failures.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Stable machine-readable code for this error.
    ///
    /// Collaborators map these to transport status codes instead of
    /// inspecting message text.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::DeletedAppointment { .. } => "DELETED_APPOINTMENT",
            Self::UnmodifiableState { .. } => "UNMODIFIABLE_STATE",
            Self::RescheduleWindow(_) => "RESCHEDULE_WINDOW_VIOLATION",
            Self::Parse(_) => "PARSE_ERROR",
        }
    }
}
