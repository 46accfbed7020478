//! Type-tagged cache envelope.

use serde::{Deserialize, Serialize};

use super::weather::WeatherResponse;

/// A value as stored in the cache backend.
///
/// The backend only transports strings, so every entry is encoded with an explicit
/// `@type` discriminator next to its `value`. Readers decode an entry without knowing
/// in advance what was stored under the key:
///
/// ```json
/// { "@type": "WeatherResponse", "value": { "resolvedAddress": "...", "days": [...] } }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "@type", content = "value")]
pub enum CacheEntry {
    #[serde(rename = "WeatherResponse")]
    Weather(WeatherResponse),
}

impl CacheEntry {
    /// Name of the concrete payload type, as written in the `@type` tag.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Weather(_) => "WeatherResponse",
        }
    }

    /// Encodes the entry to its tagged JSON form.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Decodes a tagged JSON entry.
    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }

    /// Unwraps the weather payload.
    pub fn into_weather(self) -> WeatherResponse {
        match self {
            Self::Weather(response) => response,
        }
    }
}

impl From<WeatherResponse> for CacheEntry {
    fn from(response: WeatherResponse) -> Self {
        Self::Weather(response)
    }
}
