mod booking_dto;

pub use booking_dto::{
    Availability, BookingRequest, CapacityReport, CommitOutcome, Decision, DecisionStatus,
    ValidationIssue,
};
