//! Upstream weather providers.
//!
//! - [`HttpWeatherProvider`] - Visual Crossing timeline API over HTTPS

mod http_provider;

pub use http_provider::{DEFAULT_BASE_URL, HttpWeatherProvider, ProviderSettings};
