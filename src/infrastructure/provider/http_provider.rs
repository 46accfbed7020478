use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

use crate::domain::entities::WeatherResponse;
use crate::domain::provider::{ProviderError, WeatherProvider};

/// Visual Crossing timeline endpoint.
pub const DEFAULT_BASE_URL: &str =
    "https://weather.visualcrossing.com/VisualCrossingWebServices/rest/services/timeline";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Longest upstream error body kept in a [`ProviderError`] message.
const MAX_ERROR_BODY: usize = 200;

/// Connection settings for [`HttpWeatherProvider`].
#[derive(Debug, Clone)]
pub struct ProviderSettings {
    pub base_url: String,
    pub api_key: String,
    pub unit_group: String,
    pub timeout: Duration,
}

/// Client for the Visual Crossing timeline API.
///
/// Requests `{base}/{location}/{start}/{end}` for dated queries and
/// `{base}/{location}/today` for current conditions. Status codes are mapped to
/// [`ProviderError`] so the caller can decide what to retry:
///
/// | Upstream outcome                 | Error                        |
/// |----------------------------------|------------------------------|
/// | 4xx                              | [`ProviderError::Client`]     |
/// | 5xx or undecodable body          | [`ProviderError::Server`]     |
/// | connect failure or timeout       | [`ProviderError::Connection`] |
pub struct HttpWeatherProvider {
    client: Client,
    base_url: Url,
    api_key: String,
    unit_group: String,
}

impl HttpWeatherProvider {
    /// Builds the HTTP client.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL cannot be parsed or cannot carry path segments,
    /// or if the TLS backend fails to initialise.
    pub fn new(settings: ProviderSettings) -> anyhow::Result<Self> {
        let base_url = Url::parse(&settings.base_url)?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("WEATHER_API_BASE_URL must be a hierarchical URL");
        }

        let client = Client::builder().timeout(settings.timeout).build()?;

        Ok(Self {
            client,
            base_url,
            api_key: settings.api_key,
            unit_group: settings.unit_group,
        })
    }

    fn request_url(
        &self,
        location: &str,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Url, ProviderError> {
        let mut url = self.base_url.clone();

        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                ProviderError::Connection("base URL cannot carry path segments".to_string())
            })?;
            segments.pop_if_empty().push(location);

            match (start, end) {
                (Some(start), Some(end)) => {
                    segments
                        .push(&start.format(DATE_FORMAT).to_string())
                        .push(&end.format(DATE_FORMAT).to_string());
                }
                (Some(day), None) | (None, Some(day)) => {
                    segments.push(&day.format(DATE_FORMAT).to_string());
                }
                (None, None) => {
                    segments.push("today");
                }
            }
        }

        url.query_pairs_mut()
            .append_pair("key", &self.api_key)
            .append_pair("unitGroup", &self.unit_group)
            .append_pair("include", "days,alerts")
            .append_pair("contentType", "json");

        Ok(url)
    }
}

fn truncate(body: &str) -> String {
    let body = body.trim();
    match body.char_indices().nth(MAX_ERROR_BODY) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

fn classify_status(status: StatusCode, body: &str) -> ProviderError {
    let message = if body.trim().is_empty() {
        status
            .canonical_reason()
            .unwrap_or("Unknown status")
            .to_string()
    } else {
        truncate(body)
    };

    if status.is_client_error() {
        ProviderError::Client {
            status: status.as_u16(),
            message,
        }
    } else {
        ProviderError::Server {
            status: status.as_u16(),
            message,
        }
    }
}

fn classify_transport(e: reqwest::Error) -> ProviderError {
    if e.is_timeout() {
        ProviderError::Connection("request timed out".to_string())
    } else {
        // Strip the URL, it carries the API key.
        ProviderError::Connection(e.without_url().to_string())
    }
}

#[async_trait]
impl WeatherProvider for HttpWeatherProvider {
    #[instrument(skip(self), level = "debug")]
    async fn fetch(
        &self,
        location: &str,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<WeatherResponse, ProviderError> {
        let url = self.request_url(location, start, end)?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(classify_transport)?;

        let status = response.status();
        let body = response.text().await.map_err(classify_transport)?;

        if !status.is_success() {
            debug!("Weather API returned {}", status);
            return Err(classify_status(status, &body));
        }

        serde_json::from_str::<WeatherResponse>(&body).map_err(|e| ProviderError::Server {
            status: status.as_u16(),
            message: format!("invalid response body: {}", e),
        })
    }
}
