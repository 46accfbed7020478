//! Error codes surfaced to API clients.

use serde::Serialize;
use std::fmt;

/// Stable error codes with their default messages.
///
/// The `WEATHER_0xx` range is client-caused; `WEATHER_5xx` is upstream/service-caused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Client errors
    InvalidParameters,
    MissingRequiredParameter,
    UpstreamRejected,
    LocationTooShort,
    LocationEmpty,
    StartDateAfterEndDate,
    StartDateTooFarFuture,
    HistoricalDateFuture,
    MaxDaysExceeded,

    // Server errors
    WeatherApiUnavailable,
    WeatherApiServerError,
    RequestCancelled,

    UnexpectedError,
}

impl ErrorCode {
    /// Wire code, e.g. `WEATHER_006`.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidParameters => "WEATHER_002",
            Self::MissingRequiredParameter => "WEATHER_003",
            Self::UpstreamRejected => "WEATHER_004",
            Self::LocationTooShort => "WEATHER_006",
            Self::LocationEmpty => "WEATHER_007",
            Self::StartDateAfterEndDate => "WEATHER_008",
            Self::StartDateTooFarFuture => "WEATHER_009",
            Self::HistoricalDateFuture => "WEATHER_010",
            Self::MaxDaysExceeded => "WEATHER_011",
            Self::WeatherApiUnavailable => "WEATHER_501",
            Self::WeatherApiServerError => "WEATHER_502",
            Self::RequestCancelled => "WEATHER_503",
            Self::UnexpectedError => "WEATHER_999",
        }
    }

    /// Default human-readable message.
    pub fn message(&self) -> &'static str {
        match self {
            Self::InvalidParameters => "Invalid parameters provided",
            Self::MissingRequiredParameter => "Required parameter is missing",
            Self::UpstreamRejected => "Weather API rejected the request",
            Self::LocationTooShort => "Location must be at least 2 characters long",
            Self::LocationEmpty => "Location cannot be null or empty",
            Self::StartDateAfterEndDate => "Start date cannot be after end date",
            Self::StartDateTooFarFuture => "Start date cannot be more than 15 days in the future",
            Self::HistoricalDateFuture => "Historical data cannot include future dates",
            Self::MaxDaysExceeded => "Maximum days cannot be more than 15 days",
            Self::WeatherApiUnavailable => "Weather API service is currently unavailable",
            Self::WeatherApiServerError => "Weather API server error. Please try again later",
            Self::RequestCancelled => "Request was cancelled before completion",
            Self::UnexpectedError => "An unexpected error occurred. Please try again later",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
