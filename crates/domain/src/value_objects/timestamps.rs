//! Audit timestamps with soft-delete semantics

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Created/updated/deleted audit triple.
///
/// # Invariants
///
/// - `updated_at >= created_at`
/// - `deleted_at >= created_at` when present
/// - Records are never hard-deleted; `deleted_at` marks them as gone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTimeStamps")]
pub struct TimeStamps {
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

/// Unchecked wire shape, validated through [`TimeStamps::from_dates`].
#[derive(Deserialize)]
struct RawTimeStamps {
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    #[serde(default)]
    deleted_at: Option<DateTime<Utc>>,
}

impl TryFrom<RawTimeStamps> for TimeStamps {
    type Error = DomainError;

    fn try_from(raw: RawTimeStamps) -> Result<Self, Self::Error> {
        Self::from_dates(raw.created_at, raw.updated_at, raw.deleted_at)
    }
}

impl TimeStamps {
    /// Fresh timestamps for a record created at `now`.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    /// Rebuild from stored values, enforcing the ordering invariants.
    pub fn from_dates(
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
        deleted_at: Option<DateTime<Utc>>,
    ) -> Result<Self, DomainError> {
        if updated_at < created_at {
            return Err(DomainError::validation(
                "Update date cannot be earlier than creation date",
            ));
        }
        if deleted_at.is_some_and(|deleted| deleted < created_at) {
            return Err(DomainError::validation(
                "Deletion date cannot be earlier than creation date",
            ));
        }
        Ok(Self {
            created_at,
            updated_at,
            deleted_at,
        })
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Refresh `updated_at`. A clock that went backwards never breaks the ordering.
    pub fn mark_as_updated(&self, now: DateTime<Utc>) -> Self {
        Self {
            updated_at: now.max(self.created_at),
            ..*self
        }
    }

    pub fn mark_as_deleted(&self, now: DateTime<Utc>) -> Self {
        let at = now.max(self.created_at);
        Self {
            updated_at: at,
            deleted_at: Some(at),
            ..*self
        }
    }

    pub fn days_since_creation(&self, now: DateTime<Utc>) -> i64 {
        now.signed_duration_since(self.created_at).num_days()
    }

    pub fn hours_since_last_update(&self, now: DateTime<Utc>) -> i64 {
        now.signed_duration_since(self.updated_at).num_hours()
    }

    pub fn was_recently_updated(&self, now: DateTime<Utc>, threshold_hours: i64) -> bool {
        self.hours_since_last_update(now) <= threshold_hours
    }
}
