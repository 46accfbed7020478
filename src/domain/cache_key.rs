//! Deterministic cache key derivation.
//!
//! A key is the normalized location (trimmed, lowercased) followed by either the
//! literal `today` token (current weather) or the ISO `start:end` dates:
//!
//! ```text
//! hanoi:today
//! hanoi:2024-01-01:2024-01-02
//! ```
//!
//! Semantically equivalent queries always map to byte-identical keys. The facade relies
//! on this to rebuild the fallback key after a failed upstream call.

use chrono::NaiveDate;
use std::fmt;

use crate::domain::entities::WeatherQuery;

const DATE_FORMAT: &str = "%Y-%m-%d";
const CURRENT_TOKEN: &str = "today";

/// A derived cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CacheKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Normalizes a location for key purposes.
pub fn normalize_location(location: &str) -> String {
    location.trim().to_lowercase()
}

/// Derives the cache key for a query.
///
/// Pure and total. A dated query with a missing bound renders that bound as an empty
/// segment; validation rejects such queries before any key is derived for I/O.
pub fn derive_key(query: &WeatherQuery) -> CacheKey {
    let location = normalize_location(query.location());

    match query {
        WeatherQuery::Current { .. } => CacheKey(format!("{location}:{CURRENT_TOKEN}")),
        WeatherQuery::Forecast { dates, .. } | WeatherQuery::Historical { dates, .. } => {
            CacheKey(format!(
                "{}:{}:{}",
                location,
                format_date(dates.start),
                format_date(dates.end)
            ))
        }
    }
}

fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format(DATE_FORMAT).to_string())
        .unwrap_or_default()
}
