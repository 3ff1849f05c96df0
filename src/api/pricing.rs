//! Pricing tier endpoints

use axum::{extract::State, http::StatusCode, Json};

use crate::{
    error::AppResult,
    models::pricing::{PricingTierRequest, PricingTierResult, SelectTierRequest, TierSelection},
    AppState,
};

/// Compute budget, recommended and premium prices for a base price
#[utoipa::path(
    post,
    path = "/pricing-tiers/calculate",
    tag = "pricing",
    request_body = PricingTierRequest,
    responses(
        (status = 200, description = "Pricing tiers", body = PricingTierResult),
        (status = 400, description = "Invalid base price or urgency", body = crate::error::ErrorResponse)
    )
)]
pub async fn calculate_tiers(
    State(state): State<AppState>,
    Json(request): Json<PricingTierRequest>,
) -> AppResult<Json<PricingTierResult>> {
    let result = state.services.pricing.calculate(&request)?;
    Ok(Json(result))
}

/// Record the tier a user selected
#[utoipa::path(
    post,
    path = "/pricing-tiers/select",
    tag = "pricing",
    request_body = SelectTierRequest,
    responses(
        (status = 201, description = "Selection recorded", body = TierSelection),
        (status = 400, description = "Invalid request", body = crate::error::ErrorResponse),
        (status = 404, description = "Date change request not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn select_tier(
    State(state): State<AppState>,
    Json(request): Json<SelectTierRequest>,
) -> AppResult<(StatusCode, Json<TierSelection>)> {
    let selection = state.services.pricing.select(&request).await?;
    Ok((StatusCode::CREATED, Json(selection)))
}
