//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{health, payments, pricing, schedules};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Weekstay API",
        version = "1.0.0",
        description = "Booking schedules, payment schedules and pricing tiers for flexible-term rentals"
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Schedules
        schedules::validate_schedule,
        schedules::record_lease_schedule,
        // Payments
        payments::preview_payment_schedule,
        payments::create_payment_schedule,
        payments::list_payment_records,
        // Pricing
        pricing::calculate_tiers,
        pricing::select_tier,
    ),
    components(
        schemas(
            // Schedules
            crate::models::schedule::ValidateScheduleRequest,
            crate::models::schedule::RecordScheduleRequest,
            crate::models::schedule::ListingConstraints,
            crate::models::schedule::SoftConstraintPolicy,
            crate::models::schedule::ScheduleRule,
            crate::models::schedule::Severity,
            crate::models::schedule::ScheduleViolation,
            crate::models::schedule::ScheduleValidationResult,
            crate::models::lease::Lease,
            schedules::LeaseScheduleResponse,
            // Payments
            crate::models::enums::RentalType,
            crate::models::enums::WeekPattern,
            crate::models::payment::PaymentScheduleRequest,
            crate::models::payment::PaymentCycle,
            crate::models::payment::PaymentSchedule,
            crate::models::payment::PaymentScheduleResult,
            crate::models::payment::PaymentRecord,
            // Pricing
            crate::models::enums::TierId,
            crate::models::pricing::PricingTierRequest,
            crate::models::pricing::PricingTier,
            crate::models::pricing::PricingTierResult,
            crate::models::pricing::SelectTierRequest,
            crate::models::pricing::TierSelection,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "schedules", description = "Weekly booking schedule validation"),
        (name = "payments", description = "Lease payment schedules"),
        (name = "pricing", description = "Anchored pricing tiers")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
