//! Plain data carried across the port boundaries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tutorbook_domain::{AppointmentStatus, AppointmentView, UserId, UserInfo};

/// Default page number when the caller gives none.
pub const DEFAULT_PAGE: u32 = 1;

/// Default page size when the caller gives none.
pub const DEFAULT_PAGE_LIMIT: u32 = 10;

/// Hard cap on page size.
pub const MAX_PAGE_LIMIT: u32 = 100;

// =============================================================================
// Listing
// =============================================================================

/// Criteria for listing appointments. Soft-deleted records are never listed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppointmentFilter {
    pub tutor_id: Option<UserId>,
    pub student_id: Option<UserId>,
    pub status: Option<AppointmentStatus>,
    /// Inclusive lower bound on the appointment instant.
    pub from: Option<DateTime<Utc>>,
    /// Inclusive upper bound on the appointment instant.
    pub to: Option<DateTime<Utc>>,
}

/// One-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

impl PageRequest {
    /// Missing or zero values fall back to the defaults; the limit is capped.
    pub fn new(page: Option<u32>, limit: Option<u32>) -> Self {
        let page = page.filter(|p| *p > 0).unwrap_or(DEFAULT_PAGE);
        let limit = limit
            .filter(|l| *l > 0)
            .unwrap_or(DEFAULT_PAGE_LIMIT)
            .min(MAX_PAGE_LIMIT);
        Self { page, limit }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Number of records to skip.
    pub fn offset(&self) -> usize {
        (self.page as usize - 1) * self.limit as usize
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub page: u32,
    pub limit: u32,
    pub total: usize,
    pub total_pages: u32,
    pub has_next: bool,
    pub has_prev: bool,
}

impl PaginationMeta {
    pub fn new(request: PageRequest, total: usize) -> Self {
        let limit = request.limit() as usize;
        let total_pages = total.div_ceil(limit) as u32;
        Self {
            page: request.page(),
            limit: request.limit(),
            total,
            total_pages,
            has_next: request.page() < total_pages,
            has_prev: request.page() > 1,
        }
    }
}

/// A page of results with its metadata.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: PaginationMeta,
}

impl<T> Page<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            pagination: self.pagination,
        }
    }
}

// =============================================================================
// Notifications
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Created,
    Updated,
    Cancelled,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A message about one appointment, addressed to one participant.
#[derive(Debug, Clone)]
pub struct Notification {
    pub kind: NotificationKind,
    pub recipient: UserInfo,
    pub appointment: AppointmentView,
}
