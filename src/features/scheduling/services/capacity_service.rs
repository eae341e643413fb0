use std::sync::Arc;

use chrono::NaiveDate;
use uuid::Uuid;

use super::overlap;
use crate::core::error::Result;
use crate::features::scheduling::dtos::CapacityReport;
use crate::features::scheduling::models::{Appointment, CategoryPolicy};
use crate::modules::store::AppointmentStore;
use crate::shared::time;

/// Enforces a category's concurrent-booking limit across all staff.
///
/// Distinct from the staff availability check: capacity models "N chairs or
/// machines for this treatment type", so it counts same-category bookings at
/// the candidate slot regardless of who performs them.
pub struct CapacityService {
    store: Arc<dyn AppointmentStore>,
}

impl CapacityService {
    pub fn new(store: Arc<dyn AppointmentStore>) -> Self {
        Self { store }
    }

    /// Exact-start-time variant: counts active same-category bookings whose
    /// start equals the candidate's.
    pub async fn check_capacity(
        &self,
        policy: &CategoryPolicy,
        date: NaiveDate,
        start_time: &str,
        exclude_appointment_id: Option<Uuid>,
    ) -> Result<CapacityReport> {
        let candidate_start = time::to_minutes(start_time)?;

        let mut count = 0u32;
        for appointment in self.same_category(policy, date, exclude_appointment_id).await? {
            // compare in minutes so "9:00" and "09:00" records agree
            if time::to_minutes(&appointment.time)? == candidate_start {
                count += 1;
            }
        }

        Ok(self.report(policy, date, start_time, count))
    }

    /// Duration-aware variant for categories sharing one machine: counts
    /// active same-category bookings whose interval overlaps the candidate's.
    pub async fn check_overlap_capacity(
        &self,
        policy: &CategoryPolicy,
        date: NaiveDate,
        start_time: &str,
        duration_minutes: i64,
        exclude_appointment_id: Option<Uuid>,
    ) -> Result<CapacityReport> {
        let candidate_start = time::to_minutes(start_time)?;
        let candidate_end = candidate_start + duration_minutes.max(0);

        let same_category = self.same_category(policy, date, exclude_appointment_id).await?;
        let count =
            overlap::find_overlapping(candidate_start, candidate_end, &same_category)?.len() as u32;

        Ok(self.report(policy, date, start_time, count))
    }

    async fn same_category(
        &self,
        policy: &CategoryPolicy,
        date: NaiveDate,
        exclude_appointment_id: Option<Uuid>,
    ) -> Result<Vec<Appointment>> {
        let appointments = self.store.fetch_by_date(date).await?;
        Ok(appointments
            .into_iter()
            .filter(|a| a.is_active())
            .filter(|a| Some(a.id) != exclude_appointment_id)
            .filter(|a| policy.matches(&a.category))
            .collect())
    }

    fn report(
        &self,
        policy: &CategoryPolicy,
        date: NaiveDate,
        start_time: &str,
        count: u32,
    ) -> CapacityReport {
        let limit = policy.booking_limit;
        let at_limit = limit.is_some_and(|l| count >= l);

        if at_limit {
            tracing::warn!(
                "Category '{}' at booking limit on {} {}: {}/{}",
                policy.category_name,
                date,
                start_time,
                count,
                limit.unwrap_or_default()
            );
        }

        CapacityReport {
            count,
            limit,
            at_limit,
        }
    }
}
