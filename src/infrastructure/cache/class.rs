//! Cache classes and their TTL configuration.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::domain::entities::QueryKind;

/// Namespace of a cache entry. One per query kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheClass {
    Current,
    Forecast,
    Historical,
}

impl CacheClass {
    pub const ALL: [CacheClass; 3] = [Self::Current, Self::Forecast, Self::Historical];

    /// Namespace used in backend keys (`weathers-forecast::hanoi:...`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Current => "weathers-current",
            Self::Forecast => "weathers-forecast",
            Self::Historical => "weathers-historical",
        }
    }
}

impl From<QueryKind> for CacheClass {
    fn from(kind: QueryKind) -> Self {
        match kind {
            QueryKind::Current => Self::Current,
            QueryKind::Forecast => Self::Forecast,
            QueryKind::Historical => Self::Historical,
        }
    }
}

impl fmt::Display for CacheClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CacheClass {
    type Err = String;

    /// Accepts both the short (`forecast`) and namespaced (`weathers-forecast`) names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "current" | "weathers-current" => Ok(Self::Current),
            "forecast" | "weathers-forecast" => Ok(Self::Forecast),
            "historical" | "weathers-historical" => Ok(Self::Historical),
            other => Err(format!(
                "unknown cache class '{}', expected current, forecast or historical",
                other
            )),
        }
    }
}

/// Independently configured TTL per cache class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheTtls {
    pub current: Duration,
    pub forecast: Duration,
    pub historical: Duration,
}

impl CacheTtls {
    pub fn for_class(&self, class: CacheClass) -> Duration {
        match class {
            CacheClass::Current => self.current,
            CacheClass::Forecast => self.forecast,
            CacheClass::Historical => self.historical,
        }
    }
}

impl Default for CacheTtls {
    fn default() -> Self {
        Self {
            current: Duration::from_secs(30 * 60),
            forecast: Duration::from_secs(2 * 60 * 60),
            historical: Duration::from_secs(24 * 60 * 60),
        }
    }
}
