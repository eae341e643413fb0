//! Appointment scheduling & conflict-resolution feature.
//!
//! Decides whether a candidate booking (service, date, start time, staff,
//! duration) is legal: per-category time policy, staff double-booking,
//! category capacity. The engine classifies; the surrounding application
//! persists.
//!
//! | Service | Responsibility |
//! |---------|----------------|
//! | `PolicyService` | service/category -> time-model policy with defaults |
//! | `AvailabilityService` | per-staff overlapping-interval conflicts |
//! | `CapacityService` | per-category concurrent-booking limits |
//! | `BookingValidator` | orchestrates the above into one decision |

pub mod dtos;
pub mod models;
pub mod services;

pub use services::{AvailabilityService, BookingValidator, CapacityService, PolicyService};
