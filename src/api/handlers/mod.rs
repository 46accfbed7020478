//! HTTP request handlers for API endpoints.

pub mod health;
pub mod weather;

pub use health::health_handler;
pub use weather::{current_handler, forecast_handler, historical_handler};
