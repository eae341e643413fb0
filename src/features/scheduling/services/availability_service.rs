use std::sync::Arc;

use chrono::NaiveDate;
use uuid::Uuid;

use super::overlap;
use crate::core::error::Result;
use crate::features::scheduling::dtos::Availability;
use crate::modules::store::AppointmentStore;
use crate::shared::time;

/// Checks one staff member's bookings on one date for overlapping intervals.
///
/// Advisory: a conflict is reported, not enforced, so administrative flows
/// can proceed past it deliberately. A store failure propagates as `Lookup`
/// rather than reading as "available".
pub struct AvailabilityService {
    store: Arc<dyn AppointmentStore>,
}

impl AvailabilityService {
    pub fn new(store: Arc<dyn AppointmentStore>) -> Self {
        Self { store }
    }

    /// `exclude_appointment_id` drops the appointment being edited so it does
    /// not conflict with its own prior slot.
    pub async fn check_availability(
        &self,
        staff_id: Uuid,
        date: NaiveDate,
        start_time: &str,
        duration_minutes: i64,
        exclude_appointment_id: Option<Uuid>,
    ) -> Result<Availability> {
        let candidate_start = time::to_minutes(start_time)?;
        let candidate_end = candidate_start + duration_minutes.max(0);

        let appointments = self.store.fetch_by_staff_and_date(staff_id, date).await?;
        let active: Vec<_> = appointments
            .into_iter()
            .filter(|a| a.is_active())
            .filter(|a| Some(a.id) != exclude_appointment_id)
            .collect();

        let conflicts: Vec<_> = overlap::find_overlapping(candidate_start, candidate_end, &active)?
            .into_iter()
            .cloned()
            .collect();

        if !conflicts.is_empty() {
            tracing::warn!(
                "Staff {} has {} conflicting booking(s) on {} at {}",
                staff_id,
                conflicts.len(),
                date,
                start_time
            );
        }

        Ok(Availability {
            available: conflicts.is_empty(),
            conflicts,
        })
    }
}
