//! Upstream weather provider contract.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::entities::WeatherResponse;

/// Failure kinds reported by a provider.
///
/// Only [`ProviderError::Server`] and [`ProviderError::Connection`] are transient.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    /// The provider rejected the request (4xx). Not retried.
    #[error("provider rejected request ({status}): {message}")]
    Client { status: u16, message: String },

    /// The provider failed to serve the request (5xx or malformed body).
    #[error("provider server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// The provider could not be reached (connect failure, timeout).
    #[error("provider connection error: {0}")]
    Connection(String),
}

impl ProviderError {
    /// Whether the failure may succeed on retry.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Server { .. } | Self::Connection(_))
    }
}

/// Source of weather data.
///
/// `start`/`end` are both `None` for current conditions and both `Some` for dated queries.
///
/// # Implementations
///
/// - [`crate::infrastructure::provider::HttpWeatherProvider`] - Visual Crossing timeline API
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn fetch(
        &self,
        location: &str,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<WeatherResponse, ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classification() {
        assert!(
            ProviderError::Server {
                status: 503,
                message: "down".into()
            }
            .is_transient()
        );
        assert!(ProviderError::Connection("refused".into()).is_transient());
        assert!(
            !ProviderError::Client {
                status: 400,
                message: "Bad location".into()
            }
            .is_transient()
        );
    }
}
