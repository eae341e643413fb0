//! Collaborator contracts for the surrounding booking application.
//!
//! The engine never owns storage; it reads snapshots through these traits and
//! the caller persists accepted results. Implementations are injected so
//! validation stays deterministic under test.

mod memory;

pub use memory::{InMemoryAppointmentStore, InMemoryPolicyRepository};

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::core::error::Result;
use crate::features::scheduling::models::{
    Appointment, AppointmentPatch, CategoryRef, ServiceCategory,
};

/// Read/write access to the appointment records of the host application.
///
/// Every error must surface as `SchedulingError::Lookup`; a failed fetch is
/// never the same thing as "no appointments found".
#[async_trait]
pub trait AppointmentStore: Send + Sync {
    async fn fetch_by_staff_and_date(
        &self,
        staff_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<Appointment>>;

    /// All appointments on a date, across all staff.
    async fn fetch_by_date(&self, date: NaiveDate) -> Result<Vec<Appointment>>;

    async fn fetch_by_id(&self, id: Uuid) -> Result<Option<Appointment>>;

    async fn persist(&self, appointment: Appointment) -> Result<()>;

    async fn update(&self, id: Uuid, patch: AppointmentPatch) -> Result<()>;
}

/// Read-only access to service/category policy data.
#[async_trait]
pub trait PolicyRepository: Send + Sync {
    /// Category of a bookable service, or `None` when the service is unknown.
    async fn fetch_by_service(&self, service_id: Uuid) -> Result<Option<ServiceCategory>>;

    /// Category by stored reference (id or display name).
    async fn fetch_by_category(&self, category: &CategoryRef) -> Result<Option<ServiceCategory>>;
}
