use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::features::scheduling::models::Appointment;
use crate::shared::validation::validate_hhmm;

/// A candidate booking submitted for validation.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub service_id: Uuid,

    /// Proposed staff member; omit for unassigned bookings.
    pub staff_id: Option<Uuid>,

    pub date: NaiveDate,

    /// Start time, `HH:MM`.
    #[validate(custom(function = validate_hhmm, message = "Time must be HH:MM"))]
    pub time: String,

    #[validate(range(min = 1, message = "Duration must be at least one minute"))]
    pub duration_minutes: i64,

    /// When re-validating an edit, the appointment's own id so its prior slot
    /// does not conflict with itself.
    pub exclude_appointment_id: Option<Uuid>,

    /// Privileged callers (admin flows) may proceed past a staff conflict if
    /// the engine config allows the override.
    #[serde(default)]
    pub privileged: bool,

    /// Explicit caller consent to commit a `Warned` decision. Never implied.
    #[serde(default)]
    pub confirm_warnings: bool,
}

/// Outcome of the staff availability check. Advisory: the caller decides
/// whether a conflict blocks submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Availability {
    pub available: bool,
    pub conflicts: Vec<Appointment>,
}

/// Outcome of the category capacity check.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapacityReport {
    /// Active same-category bookings counted at the candidate slot,
    /// excluding the candidate itself.
    pub count: u32,
    /// `None` when the category enforces no limit.
    pub limit: Option<u32>,
    /// The limit is reached: admitting the candidate needs confirmation.
    pub at_limit: bool,
}

impl CapacityReport {
    /// The limit was already surpassed before the candidate; always a hard block.
    pub fn exceeded(&self) -> bool {
        self.limit.is_some_and(|limit| self.count > limit)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecisionStatus {
    Accepted,
    Warned,
    Rejected,
}

/// One classified problem with a candidate booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ValidationIssue {
    ForbiddenStartTime { time: String },
    UnlistedFixedSlot { time: String },
    ExceedsMaxEndTime { end_time: String, max_end_time: String },
    StaffConflict { conflict_count: usize },
    CapacityAtLimit { count: u32, limit: u32 },
    CapacityExceeded { count: u32, limit: u32 },
}

/// The orchestrator's verdict on one candidate booking. Classification only;
/// nothing is persisted by producing a decision.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Decision {
    pub status: DecisionStatus,
    pub reasons: Vec<ValidationIssue>,
    /// Overlapping active appointments of the proposed staff member.
    pub conflicts: Vec<Appointment>,
    pub capacity: Option<CapacityReport>,
    /// Candidate end time derived from start + duration.
    pub end_time: String,
}

impl Decision {
    pub fn is_blocked(&self) -> bool {
        self.status == DecisionStatus::Rejected
    }
}

/// Result of the atomic validate-and-commit path.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitOutcome {
    pub decision: Decision,
    /// The persisted record, present only when the decision allowed a commit.
    pub appointment: Option<Appointment>,
}
