use thiserror::Error;

/// Failures the scheduling engine surfaces to its caller.
///
/// Classification outcomes (forbidden start time, capacity at limit, staff
/// conflict, ...) are not errors; they travel inside a `Decision`. An error
/// here means the engine could not produce a decision at all. In particular a
/// store failure is `Lookup`, never a silent "no conflicts found".
#[derive(Debug, Error)]
pub enum SchedulingError {
    #[error("Invalid time string: {0}")]
    ParseTime(String),

    #[error("Policy not found: {0}")]
    PolicyNotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Lookup failed: {0}")]
    Lookup(String),
}

pub type Result<T> = std::result::Result<T, SchedulingError>;
