use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::constants::{
    DEFAULT_FIXED_TIME_SLOTS, DEFAULT_FORBIDDEN_START_TIMES, DEFAULT_MAX_END_TIME,
};

/// Time model of a service category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeType {
    /// Bookings may only start at one of the category's enumerated slots.
    Fixed,
    /// Bookings may start at any time, subject to the forbidden-start
    /// blacklist and the latest allowed end time.
    Flexible,
}

/// Reference to a service category as stored on appointment records.
///
/// Historical records carry either the category id or its display name; both
/// forms are accepted on ingestion and canonicalized to an id when the engine
/// creates records itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CategoryRef {
    ById(Uuid),
    ByName(String),
}

/// Service category record as the policy repository returns it.
/// Optional fields fall back to clinic-wide defaults at policy resolution.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceCategory {
    pub id: Uuid,
    pub name: String,
    pub time_type: TimeType,
    pub fixed_time_slots: Option<Vec<String>>,
    pub forbidden_start_times: Option<Vec<String>>,
    pub max_end_time: Option<String>,
    /// Maximum simultaneously active bookings of this category at one start
    /// time across all staff. `None` means no limit is enforced.
    pub booking_limit: Option<u32>,
    /// Count capacity over overlapping intervals instead of identical start
    /// times (shared-machine categories such as laser sessions).
    #[serde(default)]
    pub overlap_capacity: bool,
}

/// Fully resolved policy for one validation call, with all defaults applied.
/// Immutable for the duration of the call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPolicy {
    pub category_id: Uuid,
    pub category_name: String,
    pub time_type: TimeType,
    pub fixed_time_slots: Vec<String>,
    pub forbidden_start_times: Vec<String>,
    pub max_end_time: String,
    pub booking_limit: Option<u32>,
    pub overlap_capacity: bool,
}

impl CategoryPolicy {
    pub fn from_category(category: &ServiceCategory) -> Self {
        let defaults =
            |values: &Option<Vec<String>>, fallback: &[&str]| -> Vec<String> {
                match values {
                    Some(v) if !v.is_empty() => v.clone(),
                    _ => fallback.iter().map(|s| s.to_string()).collect(),
                }
            };

        Self {
            category_id: category.id,
            category_name: category.name.clone(),
            time_type: category.time_type,
            fixed_time_slots: defaults(&category.fixed_time_slots, DEFAULT_FIXED_TIME_SLOTS),
            forbidden_start_times: defaults(
                &category.forbidden_start_times,
                DEFAULT_FORBIDDEN_START_TIMES,
            ),
            max_end_time: category
                .max_end_time
                .clone()
                .unwrap_or_else(|| DEFAULT_MAX_END_TIME.to_string()),
            booking_limit: category.booking_limit,
            overlap_capacity: category.overlap_capacity,
        }
    }

    pub fn is_fixed_time(&self) -> bool {
        self.time_type == TimeType::Fixed
    }

    pub fn is_flexible_time(&self) -> bool {
        self.time_type == TimeType::Flexible
    }

    /// Whether a stored category reference points at this category, matching
    /// by id or by display name.
    pub fn matches(&self, category: &CategoryRef) -> bool {
        match category {
            CategoryRef::ById(id) => *id == self.category_id,
            CategoryRef::ByName(name) => name == &self.category_name,
        }
    }
}
