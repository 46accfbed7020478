//! Weather payload returned by the upstream provider and served to clients.

use serde::{Deserialize, Serialize};

/// Weather data for a resolved location.
///
/// Field names follow the provider's timeline JSON (`resolvedAddress`, `days`, `alerts`),
/// so the same type is used for decoding upstream responses and encoding client responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct WeatherResponse {
    pub resolved_address: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,

    #[serde(default)]
    pub days: Vec<DayWeather>,

    #[serde(default)]
    pub alerts: Vec<WeatherAlert>,
}

/// Daily weather summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DayWeather {
    /// Calendar date as reported by the provider (`yyyy-MM-dd`).
    pub datetime: String,
    pub tempmax: f64,
    pub tempmin: f64,

    #[serde(default)]
    pub conditions: String,

    #[serde(default)]
    pub description: String,
}

/// Severe weather alert attached to a response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct WeatherAlert {
    pub event: String,

    #[serde(default)]
    pub description: String,
}
