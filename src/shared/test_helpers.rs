#[cfg(test)]
use chrono::NaiveDate;
#[cfg(test)]
use uuid::Uuid;

#[cfg(test)]
use crate::features::scheduling::models::{
    Appointment, AppointmentStatus, CategoryRef, ServiceCategory, TimeType,
};
#[cfg(test)]
use crate::shared::time;

#[cfg(test)]
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[cfg(test)]
pub fn date(s: &str) -> NaiveDate {
    s.parse().expect("test date must be YYYY-MM-DD")
}

#[cfg(test)]
pub fn make_category(name: &str, time_type: TimeType) -> ServiceCategory {
    ServiceCategory {
        id: Uuid::new_v4(),
        name: name.to_string(),
        time_type,
        fixed_time_slots: None,
        forbidden_start_times: None,
        max_end_time: None,
        booking_limit: None,
        overlap_capacity: false,
    }
}

#[cfg(test)]
pub fn make_appointment(
    category: &ServiceCategory,
    staff_id: Option<Uuid>,
    date: NaiveDate,
    start: &str,
    duration_minutes: i64,
    status: AppointmentStatus,
) -> Appointment {
    Appointment {
        id: Uuid::new_v4(),
        staff_id,
        service_id: Uuid::new_v4(),
        category: CategoryRef::ById(category.id),
        date,
        time: start.to_string(),
        duration_minutes: Some(duration_minutes),
        end_time: time::compute_end_time(start, duration_minutes).expect("valid test time"),
        status,
    }
}
