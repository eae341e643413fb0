use std::sync::Arc;

use tokio::sync::Mutex;
use uuid::Uuid;
use validator::Validate;

use super::{AvailabilityService, CapacityService, PolicyService};
use crate::core::config::{EngineConfig, Severity};
use crate::core::error::{Result, SchedulingError};
use crate::features::scheduling::dtos::{
    BookingRequest, CapacityReport, CommitOutcome, Decision, DecisionStatus, ValidationIssue,
};
use crate::features::scheduling::models::{
    Appointment, AppointmentStatus, CategoryPolicy, CategoryRef,
};
use crate::modules::store::{AppointmentStore, PolicyRepository};
use crate::shared::time;

/// Orchestrates policy resolution, time bounds, staff availability and
/// category capacity into one decision for a candidate booking.
///
/// `validate` is phase one of a two-phase contract: it classifies and never
/// mutates; the caller persists after an `Accepted` or explicitly-confirmed
/// `Warned` decision. `validate_and_commit` offers both phases atomically,
/// serialized behind an internal lock to close the check-then-create race.
pub struct BookingValidator {
    policy: PolicyService,
    availability: AvailabilityService,
    capacity: CapacityService,
    store: Arc<dyn AppointmentStore>,
    config: EngineConfig,
    commit_lock: Mutex<()>,
}

/// Running tally of issues while a request moves through the checks.
#[derive(Default)]
struct IssueLog {
    reasons: Vec<ValidationIssue>,
    blocked: bool,
    warned: bool,
}

impl IssueLog {
    fn push(&mut self, issue: ValidationIssue, severity: Severity) {
        self.reasons.push(issue);
        match severity {
            Severity::Block => self.blocked = true,
            Severity::Warn => self.warned = true,
        }
    }

    fn status(&self) -> DecisionStatus {
        if self.blocked {
            DecisionStatus::Rejected
        } else if self.warned {
            DecisionStatus::Warned
        } else {
            DecisionStatus::Accepted
        }
    }
}

impl BookingValidator {
    pub fn new(
        policy_repo: Arc<dyn PolicyRepository>,
        store: Arc<dyn AppointmentStore>,
        config: EngineConfig,
    ) -> Self {
        Self {
            policy: PolicyService::new(policy_repo),
            availability: AvailabilityService::new(Arc::clone(&store)),
            capacity: CapacityService::new(Arc::clone(&store)),
            store,
            config,
            commit_lock: Mutex::new(()),
        }
    }

    /// Classify a candidate booking. Never mutates persisted state.
    pub async fn validate(&self, request: &BookingRequest) -> Result<Decision> {
        let policy = self.resolve(request).await?;
        self.validate_with_policy(request, &policy).await
    }

    /// Atomic variant: validate and, when the decision permits, persist the
    /// appointment under one lock so two concurrent requests cannot both pass
    /// the same check.
    pub async fn validate_and_commit(&self, request: &BookingRequest) -> Result<CommitOutcome> {
        let _guard = self.commit_lock.lock().await;

        let policy = self.resolve(request).await?;
        let decision = self.validate_with_policy(request, &policy).await?;

        let committable = match decision.status {
            DecisionStatus::Accepted => true,
            // soft-limit breaches require explicit caller consent
            DecisionStatus::Warned => request.confirm_warnings,
            DecisionStatus::Rejected => false,
        };
        if !committable {
            return Ok(CommitOutcome {
                decision,
                appointment: None,
            });
        }

        let appointment = Appointment {
            id: Uuid::new_v4(),
            staff_id: request.staff_id,
            service_id: request.service_id,
            // canonicalized at ingestion; legacy name references stay on old records
            category: CategoryRef::ById(policy.category_id),
            date: request.date,
            time: request.time.clone(),
            duration_minutes: Some(request.duration_minutes),
            end_time: decision.end_time.clone(),
            status: AppointmentStatus::Pending,
        };
        self.store.persist(appointment.clone()).await?;

        tracing::info!(
            "Committed appointment {} ({} {} for {} min)",
            appointment.id,
            appointment.date,
            appointment.time,
            request.duration_minutes
        );

        Ok(CommitOutcome {
            decision,
            appointment: Some(appointment),
        })
    }

    /// Capacity re-check for an existing pending appointment before the
    /// caller flips it to confirmed. The appointment excludes itself from the
    /// count; the caller applies the status transition.
    pub async fn validate_confirmation(&self, appointment_id: Uuid) -> Result<Decision> {
        let appointment = self
            .store
            .fetch_by_id(appointment_id)
            .await?
            .ok_or_else(|| {
                SchedulingError::Lookup(format!("Appointment {} not found", appointment_id))
            })?;

        let policy = self.policy.resolve_by_category(&appointment.category).await?;
        let duration = appointment.effective_duration();
        let capacity = self
            .check_capacity(
                &policy,
                appointment.date,
                &appointment.time,
                duration,
                Some(appointment.id),
            )
            .await?;

        let mut log = IssueLog::default();
        self.classify_capacity(&capacity, &mut log);

        Ok(Decision {
            status: log.status(),
            reasons: log.reasons,
            conflicts: vec![],
            capacity: Some(capacity),
            end_time: time::compute_end_time(&appointment.time, duration)?,
        })
    }

    async fn resolve(&self, request: &BookingRequest) -> Result<CategoryPolicy> {
        request
            .validate()
            .map_err(|e| SchedulingError::Validation(e.to_string()))?;
        self.policy.resolve_policy(request.service_id).await
    }

    async fn validate_with_policy(
        &self,
        request: &BookingRequest,
        policy: &CategoryPolicy,
    ) -> Result<Decision> {
        let start = time::to_minutes(&request.time)?;
        let end_time = time::compute_end_time(&request.time, request.duration_minutes)?;
        let mut log = IssueLog::default();

        if policy.is_fixed_time() {
            let listed = policy
                .fixed_time_slots
                .iter()
                .filter_map(|slot| time::to_minutes(slot).ok())
                .any(|slot| slot == start);
            if !listed {
                log.push(
                    ValidationIssue::UnlistedFixedSlot {
                        time: request.time.clone(),
                    },
                    Severity::Block,
                );
            }
        } else {
            let forbidden = policy
                .forbidden_start_times
                .iter()
                .filter_map(|t| time::to_minutes(t).ok())
                .any(|t| t == start);
            if forbidden {
                log.push(
                    ValidationIssue::ForbiddenStartTime {
                        time: request.time.clone(),
                    },
                    Severity::Block,
                );
            }

            if time::to_minutes(&end_time)? > time::to_minutes(&policy.max_end_time)? {
                log.push(
                    ValidationIssue::ExceedsMaxEndTime {
                        end_time: end_time.clone(),
                        max_end_time: policy.max_end_time.clone(),
                    },
                    self.config.max_end_time_severity,
                );
            }
        }

        let mut conflicts = vec![];
        if let Some(staff_id) = request.staff_id {
            let availability = self
                .availability
                .check_availability(
                    staff_id,
                    request.date,
                    &request.time,
                    request.duration_minutes,
                    request.exclude_appointment_id,
                )
                .await?;

            if !availability.available {
                let severity = if request.privileged && self.config.allow_staff_override {
                    Severity::Warn
                } else {
                    Severity::Block
                };
                log.push(
                    ValidationIssue::StaffConflict {
                        conflict_count: availability.conflicts.len(),
                    },
                    severity,
                );
                conflicts = availability.conflicts;
            }
        }

        let capacity = self
            .check_capacity(
                policy,
                request.date,
                &request.time,
                request.duration_minutes,
                request.exclude_appointment_id,
            )
            .await?;
        self.classify_capacity(&capacity, &mut log);

        Ok(Decision {
            status: log.status(),
            reasons: log.reasons,
            conflicts,
            capacity: Some(capacity),
            end_time,
        })
    }

    async fn check_capacity(
        &self,
        policy: &CategoryPolicy,
        date: chrono::NaiveDate,
        start_time: &str,
        duration_minutes: i64,
        exclude: Option<Uuid>,
    ) -> Result<CapacityReport> {
        if policy.overlap_capacity {
            self.capacity
                .check_overlap_capacity(policy, date, start_time, duration_minutes, exclude)
                .await
        } else {
            self.capacity
                .check_capacity(policy, date, start_time, exclude)
                .await
        }
    }

    fn classify_capacity(&self, capacity: &CapacityReport, log: &mut IssueLog) {
        let Some(limit) = capacity.limit else {
            return;
        };

        if capacity.exceeded() {
            log.push(
                ValidationIssue::CapacityExceeded {
                    count: capacity.count,
                    limit,
                },
                Severity::Block,
            );
        } else if capacity.at_limit {
            log.push(
                ValidationIssue::CapacityAtLimit {
                    count: capacity.count,
                    limit,
                },
                self.config.capacity_severity,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::scheduling::models::{ServiceCategory, TimeType};
    use crate::modules::store::{InMemoryAppointmentStore, InMemoryPolicyRepository};
    use crate::shared::test_helpers::{date, init_tracing, make_appointment, make_category};

    struct Fixture {
        validator: BookingValidator,
        store: Arc<InMemoryAppointmentStore>,
        category: ServiceCategory,
        service_id: Uuid,
    }

    async fn fixture(category: ServiceCategory, config: EngineConfig) -> Fixture {
        init_tracing();
        let repo = Arc::new(InMemoryPolicyRepository::new());
        let service_id = Uuid::new_v4();
        repo.register_service(service_id, category.id).await;
        repo.insert_category(category.clone()).await;

        let store = Arc::new(InMemoryAppointmentStore::new());
        let validator = BookingValidator::new(
            repo,
            Arc::clone(&store) as Arc<dyn AppointmentStore>,
            config,
        );

        Fixture {
            validator,
            store,
            category,
            service_id,
        }
    }

    fn request(f: &Fixture, time: &str, duration: i64) -> BookingRequest {
        BookingRequest {
            service_id: f.service_id,
            staff_id: None,
            date: date("2024-03-05"),
            time: time.to_string(),
            duration_minutes: duration,
            exclude_appointment_id: None,
            privileged: false,
            confirm_warnings: false,
        }
    }

    #[tokio::test]
    async fn test_flexible_booking_accepted() {
        let f = fixture(
            make_category("Massage", TimeType::Flexible),
            EngineConfig::default(),
        )
        .await;

        let decision = f.validator.validate(&request(&f, "10:00", 60)).await.unwrap();

        assert_eq!(decision.status, DecisionStatus::Accepted);
        assert!(decision.reasons.is_empty());
        assert_eq!(decision.end_time, "11:00");
    }

    #[tokio::test]
    async fn test_unknown_service_is_policy_not_found() {
        let f = fixture(
            make_category("Massage", TimeType::Flexible),
            EngineConfig::default(),
        )
        .await;
        let mut bad = request(&f, "10:00", 60);
        bad.service_id = Uuid::new_v4();

        let err = f.validator.validate(&bad).await.unwrap_err();
        assert!(matches!(err, SchedulingError::PolicyNotFound(_)));
    }

    #[tokio::test]
    async fn test_forbidden_start_time_rejected() {
        let f = fixture(
            make_category("Massage", TimeType::Flexible),
            EngineConfig::default(),
        )
        .await;

        // 13:00 is on the default blacklist
        let decision = f.validator.validate(&request(&f, "13:00", 30)).await.unwrap();

        assert_eq!(decision.status, DecisionStatus::Rejected);
        assert!(matches!(
            decision.reasons[0],
            ValidationIssue::ForbiddenStartTime { .. }
        ));
    }

    #[tokio::test]
    async fn test_max_end_time_severity_is_configurable() {
        let warn = fixture(
            make_category("Massage", TimeType::Flexible),
            EngineConfig::default(),
        )
        .await;
        // ends 20:30, past the default 20:00 close
        let decision = warn.validator.validate(&request(&warn, "19:30", 60)).await.unwrap();
        assert_eq!(decision.status, DecisionStatus::Warned);
        assert!(matches!(
            decision.reasons[0],
            ValidationIssue::ExceedsMaxEndTime { .. }
        ));

        let block = fixture(
            make_category("Massage", TimeType::Flexible),
            EngineConfig {
                max_end_time_severity: Severity::Block,
                ..EngineConfig::default()
            },
        )
        .await;
        let decision = block
            .validator
            .validate(&request(&block, "19:30", 60))
            .await
            .unwrap();
        assert_eq!(decision.status, DecisionStatus::Rejected);
    }

    #[tokio::test]
    async fn test_fixed_category_requires_listed_slot() {
        let mut category = make_category("Facial", TimeType::Fixed);
        category.fixed_time_slots = Some(vec!["09:00".to_string(), "14:00".to_string()]);
        let f = fixture(category, EngineConfig::default()).await;

        let listed = f.validator.validate(&request(&f, "14:00", 45)).await.unwrap();
        assert_eq!(listed.status, DecisionStatus::Accepted);

        let unlisted = f.validator.validate(&request(&f, "14:30", 45)).await.unwrap();
        assert_eq!(unlisted.status, DecisionStatus::Rejected);
        assert!(matches!(
            unlisted.reasons[0],
            ValidationIssue::UnlistedFixedSlot { .. }
        ));
    }

    #[tokio::test]
    async fn test_staff_conflict_blocks_unless_privileged() {
        let f = fixture(
            make_category("Massage", TimeType::Flexible),
            EngineConfig::default(),
        )
        .await;
        let staff = Uuid::new_v4();
        f.store
            .insert(make_appointment(
                &f.category,
                Some(staff),
                date("2024-03-05"),
                "10:00",
                60,
                AppointmentStatus::Confirmed,
            ))
            .await;

        let mut overlapping = request(&f, "10:30", 60);
        overlapping.staff_id = Some(staff);

        let decision = f.validator.validate(&overlapping).await.unwrap();
        assert_eq!(decision.status, DecisionStatus::Rejected);
        assert_eq!(decision.conflicts.len(), 1);

        overlapping.privileged = true;
        let decision = f.validator.validate(&overlapping).await.unwrap();
        assert_eq!(decision.status, DecisionStatus::Warned);
        assert_eq!(decision.conflicts.len(), 1);
    }

    #[tokio::test]
    async fn test_staff_override_can_be_disabled() {
        let f = fixture(
            make_category("Massage", TimeType::Flexible),
            EngineConfig {
                allow_staff_override: false,
                ..EngineConfig::default()
            },
        )
        .await;
        let staff = Uuid::new_v4();
        f.store
            .insert(make_appointment(
                &f.category,
                Some(staff),
                date("2024-03-05"),
                "10:00",
                60,
                AppointmentStatus::Confirmed,
            ))
            .await;

        let mut overlapping = request(&f, "10:30", 60);
        overlapping.staff_id = Some(staff);
        overlapping.privileged = true;

        let decision = f.validator.validate(&overlapping).await.unwrap();
        assert_eq!(decision.status, DecisionStatus::Rejected);
    }

    #[tokio::test]
    async fn test_capacity_at_limit_warns_and_needs_confirmation_to_commit() {
        let mut category = make_category("Laser", TimeType::Flexible);
        category.booking_limit = Some(1);
        let f = fixture(category, EngineConfig::default()).await;
        f.store
            .insert(make_appointment(
                &f.category,
                None,
                date("2024-03-05"),
                "10:00",
                60,
                AppointmentStatus::Pending,
            ))
            .await;

        let candidate = request(&f, "10:00", 60);
        let outcome = f.validator.validate_and_commit(&candidate).await.unwrap();
        assert_eq!(outcome.decision.status, DecisionStatus::Warned);
        assert!(outcome.appointment.is_none());

        let mut confirmed = candidate;
        confirmed.confirm_warnings = true;
        let outcome = f.validator.validate_and_commit(&confirmed).await.unwrap();
        assert_eq!(outcome.decision.status, DecisionStatus::Warned);
        let appointment = outcome.appointment.expect("confirmed warn commits");
        assert_eq!(appointment.status, AppointmentStatus::Pending);
        assert_eq!(appointment.end_time, "11:00");
        assert!(f
            .store
            .fetch_by_id(appointment.id)
            .await
            .unwrap()
            .is_some());
    }

    #[tokio::test]
    async fn test_overlap_capacity_hard_blocks_when_exceeded() {
        let mut category = make_category("Laser", TimeType::Flexible);
        category.booking_limit = Some(1);
        category.overlap_capacity = true;
        let f = fixture(category, EngineConfig::default()).await;
        // two staggered sessions already overlap the candidate window
        f.store
            .insert(make_appointment(
                &f.category,
                None,
                date("2024-03-05"),
                "10:00",
                60,
                AppointmentStatus::Confirmed,
            ))
            .await;
        f.store
            .insert(make_appointment(
                &f.category,
                None,
                date("2024-03-05"),
                "10:30",
                60,
                AppointmentStatus::Confirmed,
            ))
            .await;

        let decision = f.validator.validate(&request(&f, "10:15", 60)).await.unwrap();

        assert_eq!(decision.status, DecisionStatus::Rejected);
        assert!(matches!(
            decision.reasons[0],
            ValidationIssue::CapacityExceeded { count: 2, limit: 1 }
        ));
    }

    #[tokio::test]
    async fn test_validate_and_commit_accepts_and_persists() {
        let f = fixture(
            make_category("Massage", TimeType::Flexible),
            EngineConfig::default(),
        )
        .await;

        let outcome = f
            .validator
            .validate_and_commit(&request(&f, "11:00", 45))
            .await
            .unwrap();

        assert_eq!(outcome.decision.status, DecisionStatus::Accepted);
        let appointment = outcome.appointment.unwrap();
        assert_eq!(appointment.category, CategoryRef::ById(f.category.id));
        assert_eq!(appointment.end_time, "11:45");

        // a second identical request for the same staff-less slot still passes
        // (no staff, unbounded category), but a rejected one never persists
        let rejected = f
            .validator
            .validate_and_commit(&request(&f, "13:00", 45))
            .await
            .unwrap();
        assert!(rejected.appointment.is_none());
        assert_eq!(
            f.store.fetch_by_date(date("2024-03-05")).await.unwrap().len(),
            1
        );
    }

    #[tokio::test]
    async fn test_confirmation_recheck_excludes_itself() {
        let mut category = make_category("Laser", TimeType::Flexible);
        category.booking_limit = Some(1);
        let f = fixture(category, EngineConfig::default()).await;

        let pending = make_appointment(
            &f.category,
            None,
            date("2024-03-05"),
            "10:00",
            60,
            AppointmentStatus::Pending,
        );
        let pending_id = pending.id;
        f.store.insert(pending).await;

        // alone at the slot: limit not reached once it excludes itself
        let decision = f.validator.validate_confirmation(pending_id).await.unwrap();
        assert_eq!(decision.status, DecisionStatus::Accepted);

        // a rival pending booking fills the slot; confirmation now warns
        f.store
            .insert(make_appointment(
                &f.category,
                None,
                date("2024-03-05"),
                "10:00",
                60,
                AppointmentStatus::Pending,
            ))
            .await;
        let decision = f.validator.validate_confirmation(pending_id).await.unwrap();
        assert_eq!(decision.status, DecisionStatus::Warned);
        assert!(matches!(
            decision.reasons[0],
            ValidationIssue::CapacityAtLimit { count: 1, limit: 1 }
        ));
    }

    #[tokio::test]
    async fn test_confirmation_of_unknown_appointment_is_lookup_error() {
        let f = fixture(
            make_category("Massage", TimeType::Flexible),
            EngineConfig::default(),
        )
        .await;

        let err = f
            .validator
            .validate_confirmation(Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(matches!(err, SchedulingError::Lookup(_)));
    }

    #[tokio::test]
    async fn test_malformed_request_is_validation_error() {
        let f = fixture(
            make_category("Massage", TimeType::Flexible),
            EngineConfig::default(),
        )
        .await;
        let mut bad = request(&f, "10:00", 60);
        bad.duration_minutes = 0;

        let err = f.validator.validate(&bad).await.unwrap_err();
        assert!(matches!(err, SchedulingError::Validation(_)));
    }
}
