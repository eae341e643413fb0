mod availability_service;
mod booking_validator;
mod capacity_service;
pub mod overlap;
mod policy_service;

pub use availability_service::AvailabilityService;
pub use booking_validator::BookingValidator;
pub use capacity_service::CapacityService;
pub use policy_service::PolicyService;
