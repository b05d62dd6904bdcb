//! In-memory appointment store for development and testing
//!
//! Everything lives behind one `RwLock`, so the conflict check in `insert`
//! and the write that follows happen under the same guard.
//! Nothing is persisted.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tutorbook_domain::{AppointmentAggregate, AppointmentId, UserId};

use crate::infrastructure::ports::{
    is_conflicting, AppointmentFilter, AppointmentRepo, Page, PageRequest, PaginationMeta,
    RepoError,
};

#[derive(Clone, Default)]
pub struct InMemoryAppointmentRepo {
    appointments: Arc<RwLock<HashMap<AppointmentId, AppointmentAggregate>>>,
}

impl InMemoryAppointmentRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records, soft-deleted ones included.
    pub async fn len(&self) -> usize {
        self.appointments.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.appointments.read().await.is_empty()
    }
}

fn matches_filter(appointment: &AppointmentAggregate, filter: &AppointmentFilter) -> bool {
    if appointment.is_deleted() {
        return false;
    }
    if let Some(tutor_id) = &filter.tutor_id {
        if appointment.tutor_id() != tutor_id {
            return false;
        }
    }
    if let Some(student_id) = &filter.student_id {
        if appointment.student_id() != student_id {
            return false;
        }
    }
    if let Some(status) = filter.status {
        if appointment.status() != status {
            return false;
        }
    }
    let at = appointment.appointment_date().to_utc();
    if filter.from.is_some_and(|from| at < from) {
        return false;
    }
    if filter.to.is_some_and(|to| at > to) {
        return false;
    }
    true
}

#[async_trait]
impl AppointmentRepo for InMemoryAppointmentRepo {
    async fn get(&self, id: AppointmentId) -> Result<Option<AppointmentAggregate>, RepoError> {
        Ok(self.appointments.read().await.get(&id).cloned())
    }

    async fn insert(&self, appointment: &AppointmentAggregate) -> Result<(), RepoError> {
        let mut appointments = self.appointments.write().await;

        if appointments.contains_key(appointment.id()) {
            return Err(RepoError::already_exists("Appointment", appointment.id()));
        }

        let at = appointment.appointment_date().to_utc();
        if let Some(existing) = appointments.values().find(|existing| {
            is_conflicting(
                existing,
                appointment.tutor_id(),
                appointment.student_id(),
                at,
                None,
            )
        }) {
            return Err(RepoError::conflict(existing.id()));
        }

        appointments.insert(appointment.id().clone(), appointment.clone());
        Ok(())
    }

    async fn save(&self, appointment: &AppointmentAggregate) -> Result<(), RepoError> {
        let mut appointments = self.appointments.write().await;
        match appointments.get_mut(appointment.id()) {
            Some(slot) => {
                *slot = appointment.clone();
                Ok(())
            }
            None => Err(RepoError::not_found("Appointment", appointment.id())),
        }
    }

    async fn list(
        &self,
        filter: AppointmentFilter,
        page: PageRequest,
    ) -> Result<Page<AppointmentAggregate>, RepoError> {
        let appointments = self.appointments.read().await;

        let mut matching: Vec<&AppointmentAggregate> = appointments
            .values()
            .filter(|a| matches_filter(a, &filter))
            .collect();
        matching.sort_by(|a, b| {
            b.appointment_date()
                .to_utc()
                .cmp(&a.appointment_date().to_utc())
                .then_with(|| a.id().cmp(b.id()))
        });

        let total = matching.len();
        let items = matching
            .into_iter()
            .skip(page.offset())
            .take(page.limit() as usize)
            .cloned()
            .collect();

        Ok(Page {
            items,
            pagination: PaginationMeta::new(page, total),
        })
    }

    async fn find_conflicting(
        &self,
        tutor_id: UserId,
        student_id: UserId,
        at: DateTime<Utc>,
        exclude: Option<AppointmentId>,
    ) -> Result<Vec<AppointmentAggregate>, RepoError> {
        let appointments = self.appointments.read().await;
        Ok(appointments
            .values()
            .filter(|a| is_conflicting(a, &tutor_id, &student_id, at, exclude.as_ref()))
            .cloned()
            .collect())
    }
}
