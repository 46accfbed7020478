//! Rate limiting middleware using token bucket algorithm.

use anyhow::{Context, Result};
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::PeerIpKeyExtractor,
};

pub type RateLimitLayer =
    GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>;

/// Creates a per-IP rate limiter for the weather endpoints.
///
/// Every upstream miss spends provider quota, so the limit protects the provider
/// as much as this service. Requests exceeding the limit receive `429 Too Many Requests`.
///
/// Keys are the socket peer address; the server must be started with
/// `into_make_service_with_connect_info::<SocketAddr>`.
///
/// # Errors
///
/// Returns an error if `per_second` or `burst` is zero.
///
/// # Example
///
/// ```rust,ignore
/// let app = Router::new()
///     .nest("/api/v1/weather", weather_routes())
///     .layer(rate_limit::layer(5, 50)?);
/// ```
pub fn layer(per_second: u64, burst: u32) -> Result<RateLimitLayer> {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(per_second)
            .burst_size(burst)
            .finish()
            .context("rate limit period and burst size must be non-zero")?,
    );

    Ok(GovernorLayer::new(governor_conf))
}
