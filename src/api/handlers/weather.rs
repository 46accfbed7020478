//! Handlers for the weather lookup endpoints.

use axum::{
    Json,
    extract::{Query, State},
};

use crate::api::dto::weather::{CurrentParams, RangeParams};
use crate::domain::entities::WeatherResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Current conditions for a location.
///
/// # Endpoint
///
/// `GET /api/v1/weather/current?location=Hanoi`
///
/// # Errors
///
/// - **400**: location empty or shorter than 2 characters, or rejected upstream
/// - **503**: upstream unavailable and nothing cached
pub async fn current_handler(
    State(state): State<AppState>,
    Query(params): Query<CurrentParams>,
) -> Result<Json<WeatherResponse>, AppError> {
    let response = state
        .weather
        .execute(params.into_query(), &state.shutdown.child_token())
        .await?;

    Ok(Json(response))
}

/// Forecast over an inclusive date range of at most 15 days.
///
/// # Endpoint
///
/// `GET /api/v1/weather/forecast?location=Hanoi&startDate=2024-06-16&endDate=2024-06-20`
///
/// The start date may be at most 15 days ahead of today.
pub async fn forecast_handler(
    State(state): State<AppState>,
    Query(params): Query<RangeParams>,
) -> Result<Json<WeatherResponse>, AppError> {
    let query = params.into_forecast()?;
    let response = state
        .weather
        .execute(query, &state.shutdown.child_token())
        .await?;

    Ok(Json(response))
}

/// Past weather over an inclusive date range of at most 15 days.
///
/// # Endpoint
///
/// `GET /api/v1/weather/historical?location=Hanoi&startDate=2024-01-01&endDate=2024-01-07`
///
/// Neither date may lie in the future.
pub async fn historical_handler(
    State(state): State<AppState>,
    Query(params): Query<RangeParams>,
) -> Result<Json<WeatherResponse>, AppError> {
    let query = params.into_historical()?;
    let response = state
        .weather
        .execute(query, &state.shutdown.child_token())
        .await?;

    Ok(Json(response))
}
