//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET /health`                  - Cache reachability and counters (public)
//! - `GET /api/v1/weather/current`  - Current conditions
//! - `GET /api/v1/weather/forecast` - Forecast for a date range
//! - `GET /api/v1/weather/historical` - Past weather for a date range
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket on the weather routes
//! - **Path normalization** - Trailing slash handling

use crate::api::handlers::health_handler;
use crate::api::middleware::rate_limit::RateLimitLayer;
use crate::api::middleware::tracing;
use crate::api::routes::weather_routes;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// `rate_limit` is applied to the weather routes only; `/health` stays reachable
/// for probes. Pass `None` where no peer address is available (in-process tests).
pub fn app_router(state: AppState, rate_limit: Option<RateLimitLayer>) -> NormalizePath<Router> {
    let weather = match rate_limit {
        Some(limit) => weather_routes().layer(limit),
        None => weather_routes(),
    };

    let router = Router::new()
        .route("/health", get(health_handler))
        .nest("/api/v1/weather", weather)
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
