//! Glowdesk scheduling engine.
//!
//! Pure decision logic over a snapshot of appointment records: given a
//! candidate booking, resolve the service category's time model, derive the
//! end time, detect staff double-bookings, enforce per-category capacity
//! limits, and return one structured decision (accept / warn / reject with
//! reasons). Storage and state transitions belong to the embedding
//! application, which injects [`AppointmentStore`] and [`PolicyRepository`]
//! implementations.

pub mod core;
pub mod features;
pub mod modules;
pub mod shared;

pub use crate::core::config::{EngineConfig, Severity};
pub use crate::core::error::{Result, SchedulingError};
pub use crate::features::scheduling::dtos::{
    Availability, BookingRequest, CapacityReport, CommitOutcome, Decision, DecisionStatus,
    ValidationIssue,
};
pub use crate::features::scheduling::models::{
    Appointment, AppointmentPatch, AppointmentStatus, CategoryPolicy, CategoryRef,
    ServiceCategory, TimeType,
};
pub use crate::features::scheduling::{
    AvailabilityService, BookingValidator, CapacityService, PolicyService,
};
pub use crate::modules::store::{
    AppointmentStore, InMemoryAppointmentStore, InMemoryPolicyRepository, PolicyRepository,
};
