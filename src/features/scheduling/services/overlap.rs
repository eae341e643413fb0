//! Half-open interval overlap detection.
//!
//! Policy-agnostic: callers filter out non-active appointments before asking
//! about overlaps. Intervals are minutes since midnight on one calendar day.

use crate::core::error::Result;
use crate::features::scheduling::models::Appointment;

/// Half-open interval test: `[a_start, a_end)` against `[b_start, b_end)`.
/// Back-to-back intervals (one ending exactly when the other starts) do not
/// overlap.
pub fn overlaps(a_start: i64, a_end: i64, b_start: i64, b_end: i64) -> bool {
    a_start < b_end && a_end > b_start
}

/// Existing appointments whose interval overlaps the candidate's.
///
/// Each appointment's interval re-derives from its stored start and duration
/// (60-minute fallback). A malformed stored time is an error, not a skip.
pub fn find_overlapping<'a>(
    candidate_start: i64,
    candidate_end: i64,
    existing: &'a [Appointment],
) -> Result<Vec<&'a Appointment>> {
    let mut conflicting = Vec::new();
    for appointment in existing {
        let (start, end) = appointment.interval()?;
        if overlaps(candidate_start, candidate_end, start, end) {
            conflicting.push(appointment);
        }
    }
    Ok(conflicting)
}
