use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Defines an opaque, validated string identifier.
///
/// Ids are supplied by other services (users) or by clients, so they stay
/// strings; the only invariants are non-blank and a minimum length.
macro_rules! define_id {
    ($name:ident, $label:literal, $min_len:expr) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Minimum accepted length.
            pub const MIN_LENGTH: usize = $min_len;

            /// Parse and validate an externally supplied id.
            ///
            /// # Errors
            ///
            /// Returns `DomainError::Validation` if the id is blank or
            /// shorter than [`Self::MIN_LENGTH`].
            pub fn parse(value: impl Into<String>) -> Result<Self, DomainError> {
                let value = value.into();
                if value.trim().is_empty() {
                    return Err(DomainError::validation(concat!($label, " cannot be empty")));
                }
                if value.chars().count() < Self::MIN_LENGTH {
                    return Err(DomainError::validation(format!(
                        "{} must be at least {} characters",
                        $label,
                        Self::MIN_LENGTH
                    )));
                }
                Ok(Self(value))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = DomainError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::parse(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> String {
                value.0
            }
        }

        impl std::str::FromStr for $name {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }
    };
}

define_id!(AppointmentId, "Appointment ID", 5);
define_id!(UserId, "User ID", 3);

impl AppointmentId {
    /// Generate a fresh id: creation timestamp (hex millis) plus a random suffix.
    pub fn generate(now: DateTime<Utc>) -> Self {
        let suffix = Uuid::new_v4().simple().to_string();
        Self(format!("{:x}{}", now.timestamp_millis(), &suffix[..12]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn appointment_id_rejects_blank_and_short() {
        assert!(AppointmentId::parse("").is_err());
        assert!(AppointmentId::parse("    ").is_err());
        let err = AppointmentId::parse("abcd").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation failed: Appointment ID must be at least 5 characters"
        );
        assert_eq!(AppointmentId::parse("abcde").unwrap().as_str(), "abcde");
    }

    #[test]
    fn user_id_requires_three_characters() {
        assert!(UserId::parse("ab").is_err());
        assert!(UserId::parse("").is_err());
        assert_eq!(UserId::parse("t01").unwrap().to_string(), "t01");
    }

    #[test]
    fn generated_ids_are_valid_and_unique() {
        let now = Utc.with_ymd_and_hms(2026, 3, 2, 10, 0, 0).unwrap();
        let a = AppointmentId::generate(now);
        let b = AppointmentId::generate(now);
        assert_ne!(a, b);
        assert!(a.as_str().starts_with(&format!("{:x}", now.timestamp_millis())));
        assert!(AppointmentId::parse(a.as_str()).is_ok());
    }

    #[test]
    fn ids_deserialize_through_validation() {
        let ok: UserId = serde_json::from_str("\"tutor-1\"").unwrap();
        assert_eq!(ok.as_str(), "tutor-1");
        assert!(serde_json::from_str::<UserId>("\"x\"").is_err());
    }
}
