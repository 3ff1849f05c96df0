//! Payment schedule endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::payment::{
        PaymentRecord, PaymentSchedule, PaymentScheduleRequest, PaymentScheduleResult,
    },
    AppState,
};

/// Compute a payment schedule without storing it
#[utoipa::path(
    post,
    path = "/payment-schedules/preview",
    tag = "payments",
    request_body = PaymentScheduleRequest,
    responses(
        (status = 200, description = "Computed schedule", body = PaymentSchedule),
        (status = 400, description = "Invalid lease terms", body = crate::error::ErrorResponse)
    )
)]
pub async fn preview_payment_schedule(
    State(state): State<AppState>,
    Json(request): Json<PaymentScheduleRequest>,
) -> AppResult<Json<PaymentSchedule>> {
    let schedule = state.services.payments.preview(&request)?;
    Ok(Json(schedule))
}

/// Compute a payment schedule and store it as payment records of its lease
#[utoipa::path(
    post,
    path = "/payment-schedules",
    tag = "payments",
    request_body = PaymentScheduleRequest,
    responses(
        (status = 201, description = "Schedule stored", body = PaymentScheduleResult),
        (status = 400, description = "Invalid lease terms", body = crate::error::ErrorResponse),
        (status = 404, description = "Lease not found", body = crate::error::ErrorResponse),
        (status = 503, description = "Records could not be stored; nothing was written", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_payment_schedule(
    State(state): State<AppState>,
    Json(request): Json<PaymentScheduleRequest>,
) -> AppResult<(StatusCode, Json<PaymentScheduleResult>)> {
    let result = state.services.payments.generate(&request).await?;
    Ok((StatusCode::CREATED, Json(result)))
}

/// Stored payment records of a lease
#[utoipa::path(
    get,
    path = "/leases/{id}/payment-records",
    tag = "payments",
    params(
        ("id" = String, Path, description = "Lease ID")
    ),
    responses(
        (status = 200, description = "Payment records in cycle order", body = Vec<PaymentRecord>),
        (status = 404, description = "Lease not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_payment_records(
    State(state): State<AppState>,
    Path(lease_id): Path<String>,
) -> AppResult<Json<Vec<PaymentRecord>>> {
    let records = state.services.payments.list_records(&lease_id).await?;
    Ok(Json(records))
}
