use std::sync::Arc;

use uuid::Uuid;

use crate::core::error::{Result, SchedulingError};
use crate::features::scheduling::models::{CategoryPolicy, CategoryRef};
use crate::modules::store::PolicyRepository;

/// Resolves a service or category reference to its fully-defaulted policy.
pub struct PolicyService {
    repo: Arc<dyn PolicyRepository>,
}

impl PolicyService {
    pub fn new(repo: Arc<dyn PolicyRepository>) -> Self {
        Self { repo }
    }

    /// Policy for a bookable service, with clinic defaults substituted for
    /// any absent category fields. Resolved once per validation call.
    pub async fn resolve_policy(&self, service_id: Uuid) -> Result<CategoryPolicy> {
        let category = self
            .repo
            .fetch_by_service(service_id)
            .await?
            .ok_or_else(|| {
                SchedulingError::PolicyNotFound(format!(
                    "No category policy for service {}",
                    service_id
                ))
            })?;

        tracing::debug!(
            "Resolved service {} to category '{}' ({:?})",
            service_id,
            category.name,
            category.time_type
        );

        Ok(CategoryPolicy::from_category(&category))
    }

    /// Policy for a stored category reference (id or display name).
    pub async fn resolve_by_category(&self, category: &CategoryRef) -> Result<CategoryPolicy> {
        let category_record = self
            .repo
            .fetch_by_category(category)
            .await?
            .ok_or_else(|| {
                SchedulingError::PolicyNotFound(format!("No category for reference {:?}", category))
            })?;

        Ok(CategoryPolicy::from_category(&category_record))
    }
}
