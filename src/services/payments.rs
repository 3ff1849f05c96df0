//! Payment schedule service
//!
//! Computes schedules with the pure calculator and, when asked to persist,
//! writes every cycle as a payment record plus the lease aggregate in one
//! all-or-nothing step.

use std::sync::Arc;

use crate::{
    calculators::{calculate_payment_schedule, parse_terms},
    error::{AppError, AppResult},
    models::payment::{
        PaymentRecord, PaymentSchedule, PaymentScheduleRequest, PaymentScheduleResult,
    },
    repository::payments::PaymentRecordStore,
};

use super::ids::IdGenerator;

#[derive(Clone)]
pub struct PaymentsService {
    store: Arc<dyn PaymentRecordStore>,
    ids: Arc<dyn IdGenerator>,
}

impl PaymentsService {
    pub fn new(store: Arc<dyn PaymentRecordStore>, ids: Arc<dyn IdGenerator>) -> Self {
        Self { store, ids }
    }

    /// Compute a schedule without storing anything
    pub fn preview(&self, request: &PaymentScheduleRequest) -> AppResult<PaymentSchedule> {
        let terms = parse_terms(request)?;
        calculate_payment_schedule(&terms)
    }

    /// Compute a schedule and store it against its lease
    pub async fn generate(
        &self,
        request: &PaymentScheduleRequest,
    ) -> AppResult<PaymentScheduleResult> {
        let lease_id = request
            .lease_id
            .as_deref()
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| AppError::Validation("leaseId is required".to_string()))?;

        let schedule = self.preview(request)?;

        if !self.store.lease_exists(lease_id).await? {
            return Err(AppError::NotFound(format!("Lease {} not found", lease_id)));
        }

        let records = schedule
            .cycles
            .iter()
            .map(|cycle| {
                let id = self
                    .ids
                    .next_id()
                    .map_err(|e| AppError::Sync(format!("Id generation failed: {}", e)))?;
                Ok(PaymentRecord::from_cycle(id, lease_id, cycle))
            })
            .collect::<AppResult<Vec<_>>>()?;

        self.store
            .insert_schedule(lease_id, &records, schedule.total_compensation_amount)
            .await?;

        tracing::info!(
            lease_id = %lease_id,
            rental_type = %schedule.rental_type,
            records = records.len(),
            total = %schedule.total_compensation_amount,
            "Stored payment schedule"
        );

        Ok(PaymentScheduleResult {
            payment_record_ids: records.into_iter().map(|r| r.id).collect(),
            total_compensation: schedule.total_compensation_amount,
            record_count: schedule.cycles.len(),
            lease_id: lease_id.to_string(),
        })
    }

    /// Stored payment records of a lease
    pub async fn list_records(&self, lease_id: &str) -> AppResult<Vec<PaymentRecord>> {
        if !self.store.lease_exists(lease_id).await? {
            return Err(AppError::NotFound(format!("Lease {} not found", lease_id)));
        }
        self.store.list_for_lease(lease_id).await
    }
}
