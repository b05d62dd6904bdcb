//! Validated email address

use std::fmt;
use std::sync::OnceLock;

use regex_lite::Regex;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Maximum length of an email address (RFC 5321 path limit)
const MAX_EMAIL_LENGTH: usize = 254;

static EMAIL_PATTERN: OnceLock<Option<Regex>> = OnceLock::new();

/// A lowercase, trimmed `local@domain` address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if:
    /// - The address is empty after trimming
    /// - It does not match `local@domain.tld`
    /// - It exceeds 254 characters
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("Email address cannot be empty"));
        }
        let well_formed = EMAIL_PATTERN
            .get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok())
            .as_ref()
            .is_some_and(|pattern| pattern.is_match(trimmed));
        if !well_formed {
            return Err(DomainError::validation(
                "Email address does not have a valid format",
            ));
        }
        if trimmed.chars().count() > MAX_EMAIL_LENGTH {
            return Err(DomainError::validation(format!(
                "Email address cannot exceed {} characters",
                MAX_EMAIL_LENGTH
            )));
        }
        Ok(Self(trimmed.to_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn local_part(&self) -> &str {
        self.0.split_once('@').map(|(local, _)| local).unwrap_or("")
    }

    pub fn domain(&self) -> &str {
        self.0.split_once('@').map(|(_, domain)| domain).unwrap_or("")
    }

    pub fn is_in_domain(&self, domain: &str) -> bool {
        self.domain().eq_ignore_ascii_case(domain)
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<EmailAddress> for String {
    fn from(email: EmailAddress) -> String {
        email.0
    }
}
