//! Error types for port operations.

/// Repository operation errors with context for debugging.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    /// Entity not found - includes entity type and ID for actionable error messages.
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Storage operation failed - includes operation name for tracing.
    #[error("Database error in {operation}: {message}")]
    Database {
        operation: &'static str,
        message: String,
    },

    /// Another appointment already occupies the requested slot.
    #[error("Scheduling conflict with appointment {conflicting_id}")]
    Conflict { conflicting_id: String },

    /// A record with this id is already stored.
    #[error("{entity_type} already exists: {id}")]
    AlreadyExists {
        entity_type: &'static str,
        id: String,
    },
}

impl RepoError {
    /// Create a NotFound error with entity type and ID context.
    pub fn not_found(entity_type: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity_type,
            id: id.to_string(),
        }
    }

    /// Create a Database error with operation context.
    pub fn database(operation: &'static str, message: impl ToString) -> Self {
        Self::Database {
            operation,
            message: message.to_string(),
        }
    }

    pub fn conflict(conflicting_id: impl ToString) -> Self {
        Self::Conflict {
            conflicting_id: conflicting_id.to_string(),
        }
    }

    pub fn already_exists(entity_type: &'static str, id: impl ToString) -> Self {
        Self::AlreadyExists {
            entity_type,
            id: id.to_string(),
        }
    }

    /// Check if this is a NotFound error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Failures delivering a notification.
#[derive(Debug, Clone, thiserror::Error)]
pub enum NotifyError {
    #[error("Notification request failed: {0}")]
    RequestFailed(String),
    #[error("Notification provider rejected the message ({status}): {body}")]
    Rejected { status: u16, body: String },
}

/// Failures resolving a user from the directory.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DirectoryError {
    #[error("User not found: {0}")]
    NotFound(String),
    #[error("User directory request failed: {0}")]
    RequestFailed(String),
    #[error("Invalid user profile: {0}")]
    InvalidProfile(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_entity_and_id() {
        let err = RepoError::not_found("Appointment", "appt-0001");
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Appointment not found: appt-0001");
    }

    #[test]
    fn conflict_is_not_a_not_found() {
        let err = RepoError::conflict("appt-0002");
        assert!(!err.is_not_found());
        assert!(err.to_string().contains("appt-0002"));
    }
}
