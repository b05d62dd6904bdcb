//! Tutorbook domain: the appointment lifecycle and the value objects it is built from.
//!
//! Pure code only. No I/O, no logging, no ambient clock; every time-dependent
//! rule takes `now` from the caller.

pub mod aggregates;
pub mod error;
pub mod events;
pub mod ids;
pub mod value_objects;

pub use aggregates::{
    AppointmentAggregate, AppointmentPatch, AppointmentRecord, AppointmentView,
    ChecklistItemRecord, NewAppointment,
};
pub use error::DomainError;
pub use events::AppointmentEvent;
pub use ids::{AppointmentId, UserId};
pub use value_objects::{
    AppointmentDate, AppointmentStatus, Checklist, ChecklistItem, EmailAddress, Reason,
    TaskDescription, TimeStamps, UserInfo, UserRole, CLOSING_HOUR, MAX_ADVANCE_DAYS,
    MIN_NOTICE_MINUTES, OPENING_HOUR, RESCHEDULE_NOTICE_HOURS,
};
