//! Pricing tier service

use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::{
    calculators::calculate_pricing_tiers,
    error::{AppError, AppResult},
    models::pricing::{PricingTierRequest, PricingTierResult, SelectTierRequest, TierSelection},
    repository::Repository,
};

#[derive(Clone)]
pub struct PricingService {
    repository: Repository,
}

impl PricingService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub fn calculate(&self, request: &PricingTierRequest) -> AppResult<PricingTierResult> {
        request.validate()?;
        calculate_pricing_tiers(
            request.base_price_cents,
            request.current_buyout_price_cents,
            request.urgency_multiplier,
        )
    }

    /// Record the tier a user picked. Prices are recomputed server-side so
    /// the stored price always matches the tier.
    pub async fn select(&self, request: &SelectTierRequest) -> AppResult<TierSelection> {
        request.validate()?;
        let result = calculate_pricing_tiers(
            request.base_price_cents,
            request.current_buyout_price_cents,
            request.urgency_multiplier,
        )?;

        let tier = result
            .tiers
            .iter()
            .find(|t| t.tier_id == request.tier_id)
            .ok_or_else(|| {
                AppError::Calculation(format!("Tier {} missing from result", request.tier_id))
            })?;

        let selection = TierSelection {
            id: Uuid::new_v4(),
            tier_id: request.tier_id.as_str().to_string(),
            price_cents: tier.price_cents,
            base_price_cents: request.base_price_cents,
            anchor_price_cents: result.anchor_price_cents,
            urgency_multiplier: tier_urgency(request.urgency_multiplier),
            date_change_request_id: request.date_change_request_id.clone(),
            session_id: request.session_id.clone(),
            user_agent: request.user_agent.clone(),
            referrer: request.referrer.clone(),
            selected_at: Utc::now(),
        };

        let stored = self.repository.pricing.record_selection(&selection).await?;
        tracing::info!(
            tier = %request.tier_id,
            price_cents = stored.price_cents,
            date_change_request_id = ?stored.date_change_request_id,
            "Recorded pricing tier selection"
        );
        Ok(stored)
    }
}

fn tier_urgency(urgency: Option<f64>) -> f64 {
    urgency.unwrap_or(crate::calculators::pricing_tiers::DEFAULT_URGENCY)
}
