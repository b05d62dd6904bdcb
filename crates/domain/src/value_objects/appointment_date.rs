//! Calendar-constrained appointment instant
//!
//! An [`AppointmentDate`] is valid by construction: at least 30 minutes and at
//! most 365 days ahead of "now", during business hours (08:00-20:00 local),
//! and never on a Sunday. "Local" means the UTC offset the instant was
//! supplied with, so a client booking at `10:00-05:00` is judged at 10:00.
//!
//! The current instant is always passed in; nothing here reads the clock.

use std::fmt;

use chrono::{DateTime, Datelike, Duration, FixedOffset, Timelike, Utc, Weekday};
use serde::Serialize;

use crate::error::DomainError;

/// Minimum lead time for a new appointment.
pub const MIN_NOTICE_MINUTES: i64 = 30;

/// Furthest ahead an appointment may be booked.
pub const MAX_ADVANCE_DAYS: i64 = 365;

/// First bookable local hour (inclusive).
pub const OPENING_HOUR: u32 = 8;

/// Last bookable local hour (exclusive).
pub const CLOSING_HOUR: u32 = 20;

/// An existing appointment may only be moved with more than this many hours' notice.
pub const RESCHEDULE_NOTICE_HOURS: i64 = 2;

const MS_PER_HOUR: i64 = 3_600_000;
const MS_PER_DAY: i64 = 86_400_000;

/// A validated appointment instant.
///
/// Serialize-only: the booking window depends on "now", so stored instants come
/// back through [`AppointmentDate::from_persisted`] or [`AppointmentDate::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AppointmentDate(DateTime<FixedOffset>);

impl AppointmentDate {
    /// Validate `at` against the booking rules, relative to `now`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` naming the first rule broken, checked
    /// in order: minimum notice, maximum advance, business hours, weekday.
    pub fn new(at: DateTime<FixedOffset>, now: DateTime<Utc>) -> Result<Self, DomainError> {
        if at < now + Duration::minutes(MIN_NOTICE_MINUTES) {
            return Err(DomainError::validation(
                "Appointment date must be at least 30 minutes in the future",
            ));
        }
        if at > now + Duration::days(MAX_ADVANCE_DAYS) {
            return Err(DomainError::validation(
                "Appointment date cannot be more than one year in the future",
            ));
        }
        if at.hour() < OPENING_HOUR || at.hour() >= CLOSING_HOUR {
            return Err(DomainError::validation(
                "Appointment must be scheduled between 8:00 AM and 8:00 PM",
            ));
        }
        if at.weekday() == Weekday::Sun {
            return Err(DomainError::validation(
                "Appointments cannot be scheduled on Sundays",
            ));
        }
        Ok(Self(at))
    }

    /// Parse an RFC 3339 timestamp and validate it.
    pub fn parse(value: &str, now: DateTime<Utc>) -> Result<Self, DomainError> {
        let at = DateTime::parse_from_rfc3339(value.trim())
            .map_err(|_| DomainError::validation("Appointment date is not a valid timestamp"))?;
        Self::new(at, now)
    }

    /// Rehydrate a stored instant without re-applying the booking window.
    ///
    /// Stored appointments legitimately drift into the past.
    pub fn from_persisted(at: DateTime<FixedOffset>) -> Self {
        Self(at)
    }

    /// The instant with the offset it was booked in.
    pub fn value(&self) -> DateTime<FixedOffset> {
        self.0
    }

    pub fn to_utc(&self) -> DateTime<Utc> {
        self.0.with_timezone(&Utc)
    }

    pub fn is_in_past(&self, now: DateTime<Utc>) -> bool {
        self.0 < now
    }

    pub fn is_in_future(&self, now: DateTime<Utc>) -> bool {
        self.0 > now
    }

    /// Strictly before the current instant.
    pub fn is_past_due(&self, now: DateTime<Utc>) -> bool {
        self.0 < now
    }

    /// Same calendar day as `now`, judged in the appointment's offset.
    pub fn is_today(&self, now: DateTime<Utc>) -> bool {
        now.with_timezone(self.0.offset()).date_naive() == self.0.date_naive()
    }

    /// Whole days until the appointment, rounded up.
    pub fn days_until(&self, now: DateTime<Utc>) -> i64 {
        ceil_div(self.millis_until(now), MS_PER_DAY)
    }

    /// Whole hours until the appointment, rounded up.
    pub fn hours_until(&self, now: DateTime<Utc>) -> i64 {
        ceil_div(self.millis_until(now), MS_PER_HOUR)
    }

    /// True while more than two (rounded-up) hours remain.
    pub fn can_be_rescheduled(&self, now: DateTime<Utc>) -> bool {
        self.hours_until(now) > RESCHEDULE_NOTICE_HOURS
    }

    fn millis_until(&self, now: DateTime<Utc>) -> i64 {
        self.to_utc()
            .signed_duration_since(now)
            .num_milliseconds()
    }
}

impl fmt::Display for AppointmentDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

fn ceil_div(n: i64, d: i64) -> i64 {
    let q = n.div_euclid(d);
    if n.rem_euclid(d) == 0 {
        q
    } else {
        q + 1
    }
}
