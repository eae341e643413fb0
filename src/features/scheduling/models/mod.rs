mod appointment;
mod category;

pub use appointment::{Appointment, AppointmentPatch, AppointmentStatus};
pub use category::{CategoryPolicy, CategoryRef, ServiceCategory, TimeType};
