use std::env;

use serde::{Deserialize, Serialize};

/// How a policy breach is reported to the caller.
///
/// `Warn` produces a `Warned` decision that the caller may confirm past;
/// `Block` rejects outright. The source application applied these
/// inconsistently between the admin and customer flows, so both are
/// configuration here rather than hard-coded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warn,
    Block,
}

impl Severity {
    fn parse(value: &str) -> Result<Self, String> {
        match value.trim().to_ascii_lowercase().as_str() {
            "warn" => Ok(Severity::Warn),
            "block" => Ok(Severity::Block),
            other => Err(format!(
                "Invalid severity '{}', expected 'warn' or 'block'",
                other
            )),
        }
    }
}

/// Engine-wide validation policy.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Severity of an appointment ending past the category's latest end time.
    pub max_end_time_severity: Severity,
    /// Severity of a category reaching its concurrent-booking limit.
    /// Exceeding the limit is always a hard block regardless of this setting.
    pub capacity_severity: Severity,
    /// Whether privileged callers may proceed past a staff double-booking.
    pub allow_staff_override: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_end_time_severity: Severity::Warn,
            capacity_severity: Severity::Warn,
            allow_staff_override: true,
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if exists, ignore if not found (optional for production)
        if let Err(e) = dotenvy::dotenv() {
            if !e.to_string().contains("not found") {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        let defaults = Self::default();

        let max_end_time_severity = match env::var("SCHEDULING_MAX_END_TIME_SEVERITY") {
            Ok(v) => Severity::parse(&v)
                .map_err(|e| format!("SCHEDULING_MAX_END_TIME_SEVERITY: {}", e))?,
            Err(_) => defaults.max_end_time_severity,
        };

        let capacity_severity = match env::var("SCHEDULING_CAPACITY_SEVERITY") {
            Ok(v) => {
                Severity::parse(&v).map_err(|e| format!("SCHEDULING_CAPACITY_SEVERITY: {}", e))?
            }
            Err(_) => defaults.capacity_severity,
        };

        let allow_staff_override = env::var("SCHEDULING_ALLOW_STAFF_OVERRIDE")
            .unwrap_or_else(|_| defaults.allow_staff_override.to_string())
            .parse::<bool>()
            .map_err(|_| "SCHEDULING_ALLOW_STAFF_OVERRIDE must be true or false".to_string())?;

        Ok(Self {
            max_end_time_severity,
            capacity_severity,
            allow_staff_override,
        })
    }
}
