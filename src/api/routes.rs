//! API route configuration.

use crate::api::handlers::{current_handler, forecast_handler, historical_handler};
use crate::state::AppState;
use axum::{Router, routing::get};

/// Weather lookup routes, nested under `/api/v1/weather`.
///
/// # Endpoints
///
/// - `GET /current`    - Current conditions (`location`)
/// - `GET /forecast`   - Forecast (`location`, `startDate`, `endDate`)
/// - `GET /historical` - Past weather (`location`, `startDate`, `endDate`)
pub fn weather_routes() -> Router<AppState> {
    Router::new()
        .route("/current", get(current_handler))
        .route("/forecast", get(forecast_handler))
        .route("/historical", get(historical_handler))
}
