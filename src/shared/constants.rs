/// Clinic-standard start slots used when a fixed-time category does not
/// enumerate its own.
pub const DEFAULT_FIXED_TIME_SLOTS: &[&str] = &[
    "09:00", "10:00", "11:00", "12:00", "14:00", "15:00", "16:00", "17:00", "18:00",
];

/// Start times never offered to flexible-time bookings unless the category
/// overrides the blacklist (lunch turnover).
pub const DEFAULT_FORBIDDEN_START_TIMES: &[&str] = &["13:00", "13:30"];

/// Clinic closing time; the latest an appointment may end unless the category
/// sets its own bound.
pub const DEFAULT_MAX_END_TIME: &str = "20:00";

/// Fallback duration for stored appointments with no duration recorded.
pub const DEFAULT_APPOINTMENT_DURATION_MINUTES: i64 = 60;
