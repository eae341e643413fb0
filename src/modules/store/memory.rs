use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{AppointmentStore, PolicyRepository};
use crate::core::error::{Result, SchedulingError};
use crate::features::scheduling::models::{
    Appointment, AppointmentPatch, CategoryRef, ServiceCategory,
};

/// In-memory appointment store for tests and embedders without durable
/// storage.
#[derive(Default)]
pub struct InMemoryAppointmentStore {
    appointments: RwLock<HashMap<Uuid, Appointment>>,
}

impl InMemoryAppointmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, appointment: Appointment) {
        self.appointments
            .write()
            .await
            .insert(appointment.id, appointment);
    }
}

#[async_trait]
impl AppointmentStore for InMemoryAppointmentStore {
    async fn fetch_by_staff_and_date(
        &self,
        staff_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<Appointment>> {
        Ok(self
            .appointments
            .read()
            .await
            .values()
            .filter(|a| a.staff_id == Some(staff_id) && a.date == date)
            .cloned()
            .collect())
    }

    async fn fetch_by_date(&self, date: NaiveDate) -> Result<Vec<Appointment>> {
        Ok(self
            .appointments
            .read()
            .await
            .values()
            .filter(|a| a.date == date)
            .cloned()
            .collect())
    }

    async fn fetch_by_id(&self, id: Uuid) -> Result<Option<Appointment>> {
        Ok(self.appointments.read().await.get(&id).cloned())
    }

    async fn persist(&self, appointment: Appointment) -> Result<()> {
        self.insert(appointment).await;
        Ok(())
    }

    async fn update(&self, id: Uuid, patch: AppointmentPatch) -> Result<()> {
        let mut appointments = self.appointments.write().await;
        let appointment = appointments
            .get_mut(&id)
            .ok_or_else(|| SchedulingError::Lookup(format!("Appointment {} not found", id)))?;

        if let Some(status) = patch.status {
            appointment.status = status;
        }
        if let Some(staff_id) = patch.staff_id {
            appointment.staff_id = staff_id;
        }
        if let Some(time) = patch.time {
            appointment.time = time;
        }
        if let Some(duration) = patch.duration_minutes {
            appointment.duration_minutes = Some(duration);
        }
        if let Some(end_time) = patch.end_time {
            appointment.end_time = end_time;
        }

        Ok(())
    }
}

/// In-memory policy repository: categories plus a service -> category mapping.
#[derive(Default)]
pub struct InMemoryPolicyRepository {
    categories: RwLock<HashMap<Uuid, ServiceCategory>>,
    services: RwLock<HashMap<Uuid, Uuid>>,
}

impl InMemoryPolicyRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_category(&self, category: ServiceCategory) {
        self.categories.write().await.insert(category.id, category);
    }

    /// Register a bookable service under a category.
    pub async fn register_service(&self, service_id: Uuid, category_id: Uuid) {
        self.services.write().await.insert(service_id, category_id);
    }
}

#[async_trait]
impl PolicyRepository for InMemoryPolicyRepository {
    async fn fetch_by_service(&self, service_id: Uuid) -> Result<Option<ServiceCategory>> {
        let category_id = match self.services.read().await.get(&service_id) {
            Some(id) => *id,
            None => return Ok(None),
        };
        Ok(self.categories.read().await.get(&category_id).cloned())
    }

    async fn fetch_by_category(&self, category: &CategoryRef) -> Result<Option<ServiceCategory>> {
        let categories = self.categories.read().await;
        Ok(match category {
            CategoryRef::ById(id) => categories.get(id).cloned(),
            CategoryRef::ByName(name) => {
                categories.values().find(|c| &c.name == name).cloned()
            }
        })
    }
}
