//! Core domain entities representing the weather data model.
//!
//! # Entity Types
//!
//! - [`WeatherQuery`] - A validated-or-not request for weather data
//! - [`WeatherResponse`] - The provider payload (days and alerts)
//! - [`CacheEntry`] - Type-tagged envelope stored in the cache backend

pub mod cache_entry;
pub mod query;
pub mod weather;

pub use cache_entry::CacheEntry;
pub use query::{DateBounds, QueryKind, WeatherQuery};
pub use weather::{DayWeather, WeatherAlert, WeatherResponse};
