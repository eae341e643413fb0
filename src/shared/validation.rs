use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

lazy_static! {
    /// Regex for clock-time fields in `HH:MM` form.
    /// Hours are not range-checked here; computed end times past midnight
    /// (e.g. "25:00") are legal strings whose acceptability is a policy concern.
    /// - Valid: "09:00", "9:05", "23:59", "25:00"
    /// - Invalid: "9", "09:5", "ab:cd", "09:00:00", ""
    pub static ref HHMM_REGEX: Regex = Regex::new(r"^\d{1,2}:\d{2}$").unwrap();
}

/// `validator` hook for request DTO time fields.
pub fn validate_hhmm(time: &str) -> Result<(), ValidationError> {
    if HHMM_REGEX.is_match(time) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_time"))
    }
}
