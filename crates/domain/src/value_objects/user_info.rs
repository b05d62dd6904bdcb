//! Contact data for a tutor or student, as resolved from the user directory

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::ids::UserId;
use crate::value_objects::EmailAddress;

const MAX_USER_NAME_LENGTH: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Tutor,
    Student,
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tutor => write!(f, "tutor"),
            Self::Student => write!(f, "student"),
        }
    }
}

impl FromStr for UserRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tutor" => Ok(Self::Tutor),
            "student" | "alumno" => Ok(Self::Student),
            other => Err(DomainError::parse(format!("Unknown user role: {}", other))),
        }
    }
}

/// A user known to the directory. Identity is by id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    id: UserId,
    email: EmailAddress,
    name: String,
    role: UserRole,
}

impl UserInfo {
    pub fn new(
        id: UserId,
        email: EmailAddress,
        name: impl Into<String>,
        role: UserRole,
    ) -> Result<Self, DomainError> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("User name cannot be empty"));
        }
        if trimmed.chars().count() > MAX_USER_NAME_LENGTH {
            return Err(DomainError::validation(format!(
                "User name cannot exceed {} characters",
                MAX_USER_NAME_LENGTH
            )));
        }
        Ok(Self {
            id,
            email,
            name: trimmed.to_string(),
            role,
        })
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role(&self) -> UserRole {
        self.role
    }

    pub fn is_tutor(&self) -> bool {
        self.role == UserRole::Tutor
    }

    pub fn is_student(&self) -> bool {
        self.role == UserRole::Student
    }
}

impl PartialEq for UserInfo {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for UserInfo {}

#[cfg(test)]
mod tests {
    use super::*;

    fn email() -> EmailAddress {
        EmailAddress::new("ana@example.com").unwrap()
    }

    #[test]
    fn trims_name_and_keeps_role() {
        let user = UserInfo::new(UserId::parse("t01").unwrap(), email(), "  Ana  ", UserRole::Tutor)
            .unwrap();
        assert_eq!(user.name(), "Ana");
        assert!(user.is_tutor());
        assert!(!user.is_student());
    }

    #[test]
    fn rejects_empty_or_long_names() {
        let id = UserId::parse("s01").unwrap();
        assert!(UserInfo::new(id.clone(), email(), " ", UserRole::Student).is_err());
        assert!(UserInfo::new(id, email(), "x".repeat(101), UserRole::Student).is_err());
    }

    #[test]
    fn role_parses_legacy_student_name() {
        assert_eq!("alumno".parse::<UserRole>().unwrap(), UserRole::Student);
        assert_eq!("Tutor".parse::<UserRole>().unwrap(), UserRole::Tutor);
        assert!("admin".parse::<UserRole>().is_err());
    }
}
