//! Booking schedule service (weekday selections against listing constraints)

use crate::{
    calculators::ScheduleValidator,
    error::{AppError, AppResult},
    models::{
        lease::Lease,
        schedule::{
            ListingConstraints, RecordScheduleRequest, ScheduleValidationResult,
            SoftConstraintPolicy, ValidateScheduleRequest,
        },
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct SchedulesService {
    repository: Repository,
    default_policy: SoftConstraintPolicy,
}

impl SchedulesService {
    pub fn new(repository: Repository, default_policy: SoftConstraintPolicy) -> Self {
        Self {
            repository,
            default_policy,
        }
    }

    /// Validate a selection against inline constraints or a stored listing
    pub async fn validate(
        &self,
        request: &ValidateScheduleRequest,
    ) -> AppResult<ScheduleValidationResult> {
        let constraints = match request.listing_id {
            Some(ref listing_id) => Some(self.listing_constraints(listing_id).await?),
            None => request.listing.clone(),
        };

        let validator = ScheduleValidator::new(request.policy.unwrap_or(self.default_policy));
        validator.validate(&request.selected_day_indices, constraints.as_ref())
    }

    /// Validate a selection against the lease's listing and store it on the lease.
    ///
    /// An invalid selection leaves the lease untouched.
    pub async fn record_for_lease(
        &self,
        lease_id: &str,
        request: &RecordScheduleRequest,
    ) -> AppResult<(Lease, ScheduleValidationResult)> {
        let lease = self.repository.leases.get_by_id(lease_id).await?;
        let constraints = match lease.listing_id {
            Some(ref listing_id) => Some(self.listing_constraints(listing_id).await?),
            None => None,
        };

        let validator = ScheduleValidator::new(request.policy.unwrap_or(self.default_policy));
        let result = validator.validate(&request.selected_day_indices, constraints.as_ref())?;

        if !result.valid {
            let reasons: Vec<&str> = result.fatal_errors().map(|v| v.message.as_str()).collect();
            tracing::warn!(lease_id = %lease_id, reasons = ?reasons, "Rejected weekly schedule");
            return Err(AppError::BusinessRule(format!(
                "Schedule rejected: {}",
                reasons.join("; ")
            )));
        }

        let lease = self.repository.leases.update_schedule(lease_id, &result).await?;
        tracing::info!(
            lease_id = %lease_id,
            nights = result.nights_count,
            warnings = result.warnings().count(),
            "Recorded weekly schedule"
        );
        Ok((lease, result))
    }

    async fn listing_constraints(&self, listing_id: &str) -> AppResult<ListingConstraints> {
        let listing = self.repository.listings.get_by_id(listing_id).await?;
        Ok(listing.constraints())
    }
}
