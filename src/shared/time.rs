//! Clock-time arithmetic over `HH:MM` strings.
//!
//! Appointments store wall-clock times as strings; every comparison in the
//! engine happens on minutes since midnight. Values are deliberately not
//! clamped to a 24-hour day: a start of `23:30` plus 90 minutes yields
//! `"25:00"`, which the policy layer surfaces against the category's latest
//! end time instead of silently wrapping.

use crate::core::error::{Result, SchedulingError};
use crate::shared::validation::HHMM_REGEX;

const MINUTES_PER_DAY: i64 = 1440;

/// Parse `HH:MM` into minutes since midnight.
///
/// Only the shape is checked; `"25:00"` parses to 1500. Whether a value is a
/// legal booking time is decided by category policy, not here.
pub fn to_minutes(hhmm: &str) -> Result<i64> {
    let trimmed = hhmm.trim();
    if !HHMM_REGEX.is_match(trimmed) {
        return Err(SchedulingError::ParseTime(hhmm.to_string()));
    }

    let (hours, minutes) = trimmed
        .split_once(':')
        .ok_or_else(|| SchedulingError::ParseTime(hhmm.to_string()))?;

    let hours: i64 = hours
        .parse()
        .map_err(|_| SchedulingError::ParseTime(hhmm.to_string()))?;
    let minutes: i64 = minutes
        .parse()
        .map_err(|_| SchedulingError::ParseTime(hhmm.to_string()))?;

    Ok(hours * 60 + minutes)
}

/// Format minutes since midnight as zero-padded `HH:MM`.
///
/// Values >= 1440 are preserved (`1500` -> `"25:00"`); use
/// [`to_time_string_wrapped`] when wraparound is explicitly wanted.
pub fn to_time_string(minutes: i64) -> String {
    let minutes = minutes.max(0);
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Format minutes modulo one day, for callers that want next-day rollover.
pub fn to_time_string_wrapped(minutes: i64) -> String {
    to_time_string(minutes.rem_euclid(MINUTES_PER_DAY))
}

/// End time of an appointment starting at `start` and running
/// `duration_minutes`. Negative durations are coerced to 0; duration sanity
/// is the request DTO's job, this keeps arithmetic total.
pub fn compute_end_time(start: &str, duration_minutes: i64) -> Result<String> {
    Ok(to_time_string(to_minutes(start)? + duration_minutes.max(0)))
}
