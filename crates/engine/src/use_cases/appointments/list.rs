//! List appointments use case.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tutorbook_domain::{AppointmentStatus, AppointmentView, UserId};

use crate::infrastructure::ports::{AppointmentFilter, AppointmentRepo, Page, PageRequest};

use super::error::AppointmentError;

/// Raw list query; every field is optional.
#[derive(Debug, Clone, Default)]
pub struct ListAppointmentsQuery {
    pub tutor_id: Option<String>,
    pub student_id: Option<String>,
    pub status: Option<String>,
    /// RFC 3339 lower bound (inclusive).
    pub from: Option<String>,
    /// RFC 3339 upper bound (inclusive).
    pub to: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

pub struct ListAppointments {
    repo: Arc<dyn AppointmentRepo>,
}

impl ListAppointments {
    pub fn new(repo: Arc<dyn AppointmentRepo>) -> Self {
        Self { repo }
    }

    pub async fn execute(
        &self,
        query: ListAppointmentsQuery,
    ) -> Result<Page<AppointmentView>, AppointmentError> {
        let filter = AppointmentFilter {
            tutor_id: query.tutor_id.map(UserId::parse).transpose()?,
            student_id: query.student_id.map(UserId::parse).transpose()?,
            status: query
                .status
                .as_deref()
                .map(str::parse::<AppointmentStatus>)
                .transpose()?,
            from: parse_bound("from", query.from.as_deref())?,
            to: parse_bound("to", query.to.as_deref())?,
        };
        if let (Some(from), Some(to)) = (filter.from, filter.to) {
            if from > to {
                return Err(AppointmentError::InvalidInput(
                    "'from' must not be later than 'to'".into(),
                ));
            }
        }

        let page = self
            .repo
            .list(filter, PageRequest::new(query.page, query.limit))
            .await?;
        Ok(page.map(|appointment| appointment.to_view()))
    }
}

fn parse_bound(name: &str, value: Option<&str>) -> Result<Option<DateTime<Utc>>, AppointmentError> {
    value
        .map(|raw| {
            DateTime::parse_from_rfc3339(raw)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(|_| {
                    AppointmentError::InvalidInput(format!("'{name}' is not a valid timestamp"))
                })
        })
        .transpose()
}
