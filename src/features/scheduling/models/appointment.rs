use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::CategoryRef;
use crate::core::error::Result;
use crate::shared::constants::DEFAULT_APPOINTMENT_DURATION_MINUTES;
use crate::shared::time;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    /// Active appointments count toward conflicts and capacity; completed and
    /// cancelled ones never block a new booking.
    pub fn is_active(&self) -> bool {
        matches!(self, AppointmentStatus::Pending | AppointmentStatus::Confirmed)
    }
}

/// The unit under scheduling.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: Uuid,
    /// Unassigned bookings are valid.
    pub staff_id: Option<Uuid>,
    pub service_id: Uuid,
    pub category: CategoryRef,
    pub date: NaiveDate,
    /// Start time, `HH:MM`.
    pub time: String,
    pub duration_minutes: Option<i64>,
    /// Derived `time + duration`, stored for display only.
    pub end_time: String,
    pub status: AppointmentStatus,
}

impl Appointment {
    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    /// Stored duration, defaulting to 60 minutes when missing or non-positive.
    pub fn effective_duration(&self) -> i64 {
        self.duration_minutes
            .filter(|d| *d > 0)
            .unwrap_or(DEFAULT_APPOINTMENT_DURATION_MINUTES)
    }

    /// Half-open `[start, end)` interval in minutes since midnight.
    ///
    /// Always re-derived from `time` and duration; the stored `end_time` can
    /// be stale on cancelled records and is never consulted for conflicts.
    pub fn interval(&self) -> Result<(i64, i64)> {
        let start = time::to_minutes(&self.time)?;
        Ok((start, start + self.effective_duration()))
    }
}

/// Partial update applied through the appointment store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentPatch {
    pub status: Option<AppointmentStatus>,
    pub staff_id: Option<Option<Uuid>>,
    pub time: Option<String>,
    pub duration_minutes: Option<i64>,
    pub end_time: Option<String>,
}
