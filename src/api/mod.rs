//! API handlers for Weekstay REST endpoints

pub mod health;
pub mod openapi;
pub mod payments;
pub mod pricing;
pub mod schedules;

use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, Request, State},
    http::HeaderMap,
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{error::AppError, AppState};

/// Header a trusted gateway may set to identify the caller
pub const CLIENT_ID_HEADER: &str = "x-client-id";

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Booking schedules
        .route("/schedules/validate", post(schedules::validate_schedule))
        .route("/leases/:id/schedule", post(schedules::record_lease_schedule))
        // Payment schedules
        .route("/payment-schedules/preview", post(payments::preview_payment_schedule))
        .route("/payment-schedules", post(payments::create_payment_schedule))
        .route("/leases/:id/payment-records", get(payments::list_payment_records))
        // Pricing tiers
        .route("/pricing-tiers/calculate", post(pricing::calculate_tiers))
        .route("/pricing-tiers/select", post(pricing::select_tier))
        .layer(middleware::from_fn_with_state(state.clone(), rate_limit))
        .with_state(state);

    // OpenAPI documentation
    let openapi = openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Reject callers that spent their request budget for the current window
async fn rate_limit(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if let Some(ref limiter) = state.services.rate_limiter {
        let peer = request
            .extensions()
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip().to_string());
        let client = client_key(request.headers(), peer);
        limiter.check(&client).await?;
    }
    Ok(next.run(request).await)
}

/// Identify the caller: explicit client id, then first forwarded address,
/// then the socket peer.
fn client_key(headers: &HeaderMap, peer: Option<String>) -> String {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.split(',').next().unwrap_or("").trim().to_string())
            .filter(|value| !value.is_empty())
    };

    header(CLIENT_ID_HEADER)
        .or_else(|| header("x-forwarded-for"))
        .or(peer)
        .unwrap_or_else(|| "anonymous".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_client_key_prefers_client_header() {
        let mut headers = HeaderMap::new();
        headers.insert(CLIENT_ID_HEADER, HeaderValue::from_static("partner-7"));
        headers.insert("x-forwarded-for", HeaderValue::from_static("203.0.113.9"));
        assert_eq!(client_key(&headers, Some("10.0.0.1".to_string())), "partner-7");
    }

    #[test]
    fn test_client_key_uses_first_forwarded_address() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("203.0.113.9, 10.0.0.2"),
        );
        assert_eq!(client_key(&headers, None), "203.0.113.9");
    }

    #[test]
    fn test_client_key_falls_back() {
        let headers = HeaderMap::new();
        assert_eq!(client_key(&headers, Some("10.0.0.1".to_string())), "10.0.0.1");
        assert_eq!(client_key(&headers, None), "anonymous");
    }
}
