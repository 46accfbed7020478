//! # Weather Gateway
//!
//! A caching, validating facade in front of a rate-limited weather data provider,
//! built with Axum and Redis.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Queries, weather payloads, cache keys and validation rules
//! - **Application Layer** ([`application`]) - The weather facade and retry policy
//! - **Infrastructure Layer** ([`infrastructure`]) - Cache stores and the upstream HTTP client
//! - **API Layer** ([`api`]) - REST handlers, DTOs, and middleware
//!
//! ## Request Flow
//!
//! 1. Validate the query (location, date range, forecast horizon, historical bounds)
//! 2. Serve from the cache class matching the query kind when possible
//! 3. Otherwise call the provider, retrying transient failures
//! 4. Cache successful responses; when retries run out, serve the last cached copy
//!
//! ## Quick Start
//!
//! ```bash
//! export WEATHER_API_KEY="..."
//! export REDIS_URL="redis://localhost:6379"  # Optional
//!
//! cargo run
//! curl "http://localhost:3000/api/v1/weather/current?location=Hanoi"
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::retry::RetryPolicy;
    pub use crate::application::services::WeatherFacade;
    pub use crate::domain::entities::{WeatherQuery, WeatherResponse};
    pub use crate::domain::provider::{ProviderError, WeatherProvider};
    pub use crate::error::AppError;
    pub use crate::infrastructure::cache::{CacheClass, CacheStore, CacheTtls};
    pub use crate::state::AppState;
}
