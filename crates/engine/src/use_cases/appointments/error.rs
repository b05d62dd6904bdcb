//! Appointment use case errors.

use crate::infrastructure::ports::RepoError;
use tutorbook_domain::DomainError;

/// Errors that can occur during appointment use cases.
#[derive(Debug, thiserror::Error)]
pub enum AppointmentError {
    #[error("Appointment not found: {0}")]
    NotFound(String),
    #[error("Scheduling conflict: the tutor or student already has an appointment at that time ({0})")]
    Conflict(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("Repository error: {0}")]
    Repo(RepoError),
}

impl AppointmentError {
    /// Stable machine-readable code, for mapping onto transport status codes.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NOT_FOUND",
            Self::Conflict(_) => "SCHEDULING_CONFLICT",
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::Domain(e) => e.code(),
            Self::Repo(_) => "REPOSITORY_ERROR",
        }
    }
}

impl From<RepoError> for AppointmentError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound { id, .. } => Self::NotFound(id),
            RepoError::Conflict { conflicting_id } => Self::Conflict(conflicting_id),
            RepoError::AlreadyExists { id, .. } => {
                Self::InvalidInput(format!("Appointment id '{id}' is already in use"))
            }
            other => Self::Repo(other),
        }
    }
}
