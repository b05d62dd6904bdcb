//! Value objects - Immutable objects defined by their attributes

mod appointment_date;
mod checklist;
mod email;
mod status;
mod timestamps;
mod user_info;

pub use appointment_date::{
    AppointmentDate, CLOSING_HOUR, MAX_ADVANCE_DAYS, MIN_NOTICE_MINUTES, OPENING_HOUR,
    RESCHEDULE_NOTICE_HOURS,
};
pub use checklist::{Checklist, ChecklistItem, Reason, TaskDescription};
pub use email::EmailAddress;
pub use status::AppointmentStatus;
pub use timestamps::TimeStamps;
pub use user_info::{UserInfo, UserRole};
