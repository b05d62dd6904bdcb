//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - Appointment storage (in-memory today, a database tomorrow)
//! - Notification delivery (email provider or log)
//! - User lookup (external auth service)
//! - Clock (for testing)

mod error;
mod external;
mod repos;
mod testing;
pub mod types;

pub use error::{DirectoryError, NotifyError, RepoError};
pub use external::{NotificationPort, UserDirectory};
pub use repos::{is_conflicting, AppointmentRepo, CONFLICT_WINDOW_MINUTES};
pub use testing::ClockPort;
pub use types::{
    AppointmentFilter, Notification, NotificationKind, Page, PageRequest, PaginationMeta,
    DEFAULT_PAGE, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT,
};

// =============================================================================
// Test-Only Mocks (only available during test builds)
// =============================================================================
#[cfg(test)]
pub use external::{MockNotificationPort, MockUserDirectory};
#[cfg(test)]
pub use repos::MockAppointmentRepo;
#[cfg(test)]
pub use testing::MockClockPort;
