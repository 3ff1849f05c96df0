//! Booking schedule endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::{
        lease::Lease,
        schedule::{RecordScheduleRequest, ScheduleValidationResult, ValidateScheduleRequest},
    },
    AppState,
};

/// Lease after a schedule was recorded, with the validation it passed
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeaseScheduleResponse {
    pub lease: Lease,
    pub validation: ScheduleValidationResult,
}

/// Validate a weekday selection
#[utoipa::path(
    post,
    path = "/schedules/validate",
    tag = "schedules",
    request_body = ValidateScheduleRequest,
    responses(
        (status = 200, description = "Validation result, valid or not", body = ScheduleValidationResult),
        (status = 400, description = "Day index out of range or malformed constraints", body = crate::error::ErrorResponse),
        (status = 404, description = "Listing not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn validate_schedule(
    State(state): State<AppState>,
    Json(request): Json<ValidateScheduleRequest>,
) -> AppResult<Json<ScheduleValidationResult>> {
    let result = state.services.schedules.validate(&request).await?;
    Ok(Json(result))
}

/// Validate a selection against the lease's listing and store it
#[utoipa::path(
    post,
    path = "/leases/{id}/schedule",
    tag = "schedules",
    params(
        ("id" = String, Path, description = "Lease ID")
    ),
    request_body = RecordScheduleRequest,
    responses(
        (status = 200, description = "Schedule recorded", body = LeaseScheduleResponse),
        (status = 404, description = "Lease or listing not found", body = crate::error::ErrorResponse),
        (status = 422, description = "Selection violates a schedule rule", body = crate::error::ErrorResponse)
    )
)]
pub async fn record_lease_schedule(
    State(state): State<AppState>,
    Path(lease_id): Path<String>,
    Json(request): Json<RecordScheduleRequest>,
) -> AppResult<Json<LeaseScheduleResponse>> {
    let (lease, validation) = state
        .services
        .schedules
        .record_for_lease(&lease_id, &request)
        .await?;
    Ok(Json(LeaseScheduleResponse { lease, validation }))
}
