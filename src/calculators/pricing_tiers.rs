//! Anchored three-tier pricing

use rust_decimal::{prelude::FromPrimitive, Decimal};

use crate::{
    error::{AppError, AppResult},
    models::{
        enums::TierId,
        pricing::{PricingTier, PricingTierResult},
    },
};

use super::common::{round_percentage, round_to_cents};

pub const DEFAULT_URGENCY: f64 = 1.0;
pub const MAX_URGENCY: f64 = 2.0;
/// From this urgency on, premium becomes the recommended tier
pub const PREMIUM_RECOMMENDATION_URGENCY: f64 = 1.5;

const RECOMMENDED_BADGE: &str = "Recommended";
const BUDGET_BADGE: &str = "Best value";

/// Tier id and its multiplier in hundredths
const TIERS: [(TierId, i64); 3] = [
    (TierId::Budget, 90),
    (TierId::Recommended, 100),
    (TierId::Premium, 115),
];

/// Compute the three price points for a base price.
///
/// The anchor is the buyout price when one is offered above the base price,
/// otherwise the base price itself; savings are measured against it.
pub fn calculate_pricing_tiers(
    base_price_cents: i64,
    current_buyout_price_cents: Option<i64>,
    urgency_multiplier: Option<f64>,
) -> AppResult<PricingTierResult> {
    if base_price_cents <= 0 {
        return Err(AppError::Validation(
            "basePriceCents must be positive".to_string(),
        ));
    }

    let urgency = urgency_multiplier.unwrap_or(DEFAULT_URGENCY);
    if !urgency.is_finite() || !(DEFAULT_URGENCY..=MAX_URGENCY).contains(&urgency) {
        return Err(AppError::Validation(format!(
            "urgencyMultiplier must be between {:.1} and {:.1}",
            DEFAULT_URGENCY, MAX_URGENCY
        )));
    }
    let urgency_factor = Decimal::from_f64(urgency)
        .ok_or_else(|| AppError::Calculation(format!("Unrepresentable urgency {}", urgency)))?;

    let anchor_price_cents = match current_buyout_price_cents {
        Some(buyout) if buyout > base_price_cents => buyout,
        _ => base_price_cents,
    };

    let recommended_tier_id = if urgency >= PREMIUM_RECOMMENDATION_URGENCY {
        TierId::Premium
    } else {
        TierId::Recommended
    };

    let base = Decimal::from(base_price_cents);
    let anchor = Decimal::from(anchor_price_cents);

    let tiers = TIERS
        .iter()
        .map(|&(tier_id, hundredths)| {
            let multiplier = Decimal::new(hundredths, 2);
            let price_cents = round_to_cents(base * multiplier * urgency_factor)?;
            let savings_cents = (anchor_price_cents - price_cents).max(0);
            let savings_percentage =
                round_percentage(Decimal::from(savings_cents) / anchor * Decimal::ONE_HUNDRED);

            let badge_text = if tier_id == recommended_tier_id {
                Some(RECOMMENDED_BADGE.to_string())
            } else if tier_id == TierId::Budget && savings_cents > 0 {
                Some(BUDGET_BADGE.to_string())
            } else {
                None
            };

            Ok(PricingTier {
                tier_id,
                multiplier: hundredths as f64 / 100.0,
                price_cents,
                savings_cents,
                savings_percentage,
                badge_text,
            })
        })
        .collect::<AppResult<Vec<_>>>()?;

    Ok(PricingTierResult {
        tiers,
        anchor_price_cents,
        recommended_tier_id,
    })
}
