//! Get appointment use case.

use std::sync::Arc;

use tutorbook_domain::{AppointmentAggregate, AppointmentId};

use crate::infrastructure::ports::AppointmentRepo;

use super::error::AppointmentError;

/// Fetch a single live appointment. Soft-deleted appointments read as not found.
pub struct GetAppointment {
    repo: Arc<dyn AppointmentRepo>,
}

impl GetAppointment {
    pub fn new(repo: Arc<dyn AppointmentRepo>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, id: &str) -> Result<AppointmentAggregate, AppointmentError> {
        let id = AppointmentId::parse(id)?;
        self.repo
            .get(id.clone())
            .await?
            .filter(|appointment| !appointment.is_deleted())
            .ok_or_else(|| AppointmentError::NotFound(id.to_string()))
    }
}
