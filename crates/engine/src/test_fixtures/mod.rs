//! Common test helpers: a fixed clock reading and ready-made appointments and users.
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::test_fixtures::{appointment, fixed_now, monday_at};
//!
//! let appt = appointment("appt-0001", "t01", "s01", monday_at(10));
//! ```

use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use tutorbook_domain::{
    AppointmentAggregate, AppointmentId, Checklist, EmailAddress, NewAppointment, UserId,
    UserInfo, UserRole,
};

/// Monday 2026-03-02 09:00 UTC.
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap()
}

/// The following Monday (2026-03-09) at `hour`:00 UTC.
pub fn monday_at(hour: u32) -> DateTime<FixedOffset> {
    Utc.with_ymd_and_hms(2026, 3, 9, hour, 0, 0)
        .unwrap()
        .fixed_offset()
}

/// Weekday `day` of March 2026 at `hour`:`minute` UTC.
pub fn march_at(day: u32, hour: u32, minute: u32) -> DateTime<FixedOffset> {
    Utc.with_ymd_and_hms(2026, 3, day, hour, minute, 0)
        .unwrap()
        .fixed_offset()
}

/// A pending appointment booked at [`fixed_now`].
pub fn appointment(
    id: &str,
    tutor_id: &str,
    student_id: &str,
    at: DateTime<FixedOffset>,
) -> AppointmentAggregate {
    AppointmentAggregate::create(
        NewAppointment {
            tutor_id: tutor_id.into(),
            student_id: student_id.into(),
            appointment_date: at,
            checklist: Checklist::from_descriptions(["warm-up exercises"]).unwrap(),
            reason: None,
            id: Some(id.into()),
        },
        fixed_now(),
    )
    .unwrap()
}

pub fn appointment_id(id: &str) -> AppointmentId {
    AppointmentId::parse(id).unwrap()
}

pub fn user_id(id: &str) -> UserId {
    UserId::parse(id).unwrap()
}

pub fn user(id: &str, role: UserRole) -> UserInfo {
    UserInfo::new(
        user_id(id),
        EmailAddress::new(format!("{id}@example.com")).unwrap(),
        format!("User {id}"),
        role,
    )
    .unwrap()
}
