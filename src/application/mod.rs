//! Application layer orchestrating validation, caching and upstream calls.
//!
//! # Available Components
//!
//! - [`services::weather_facade::WeatherFacade`] - Validated, cached, resilient weather lookups
//! - [`retry::RetryPolicy`] - Injectable retry/backoff policy for upstream calls

pub mod retry;
pub mod services;
