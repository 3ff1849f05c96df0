//! Pricing tier models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::enums::TierId;

/// One anchored price point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PricingTier {
    pub tier_id: TierId,
    pub multiplier: f64,
    pub price_cents: i64,
    pub savings_cents: i64,
    /// Savings relative to the anchor price, 2 decimals
    pub savings_percentage: f64,
    pub badge_text: Option<String>,
}

/// Pricing tier calculation request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PricingTierRequest {
    #[validate(range(min = 1, message = "basePriceCents must be positive"))]
    pub base_price_cents: i64,
    /// Buyout offer used as the anchor when it exceeds the base price
    pub current_buyout_price_cents: Option<i64>,
    #[validate(range(min = 1.0, max = 2.0, message = "urgencyMultiplier must be between 1.0 and 2.0"))]
    pub urgency_multiplier: Option<f64>,
}

/// Three tiers plus the anchor they are measured against
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PricingTierResult {
    pub tiers: Vec<PricingTier>,
    pub anchor_price_cents: i64,
    pub recommended_tier_id: TierId,
}

/// Request recording which tier a user picked
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SelectTierRequest {
    pub tier_id: TierId,
    #[validate(range(min = 1, message = "basePriceCents must be positive"))]
    pub base_price_cents: i64,
    pub current_buyout_price_cents: Option<i64>,
    #[validate(range(min = 1.0, max = 2.0, message = "urgencyMultiplier must be between 1.0 and 2.0"))]
    pub urgency_multiplier: Option<f64>,
    /// Date-change request whose price follows the chosen tier
    pub date_change_request_id: Option<String>,
    pub session_id: Option<String>,
    pub user_agent: Option<String>,
    pub referrer: Option<String>,
}

/// Stored tier selection
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TierSelection {
    pub id: Uuid,
    pub tier_id: String,
    pub price_cents: i64,
    pub base_price_cents: i64,
    pub anchor_price_cents: i64,
    pub urgency_multiplier: f64,
    pub date_change_request_id: Option<String>,
    pub session_id: Option<String>,
    pub user_agent: Option<String>,
    pub referrer: Option<String>,
    pub selected_at: DateTime<Utc>,
}
