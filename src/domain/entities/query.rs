//! Weather query model.

use chrono::NaiveDate;
use std::fmt;

/// The three data classes served by the facade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKind {
    Current,
    Forecast,
    Historical,
}

impl QueryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Current => "current",
            Self::Forecast => "forecast",
            Self::Historical => "historical",
        }
    }
}

impl fmt::Display for QueryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optional start/end dates of a dated query.
///
/// Both bounds are optional at this level so that a request with missing parameters
/// can still be represented and rejected by validation with a precise error code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateBounds {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateBounds {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    /// Both bounds, when present.
    pub fn both(&self) -> Option<(NaiveDate, NaiveDate)> {
        self.start.zip(self.end)
    }
}

/// A logical request for weather data.
///
/// `Current` carries no dates. `Forecast` and `Historical` must carry both bounds with
/// `start <= end` once validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WeatherQuery {
    Current { location: String },
    Forecast { location: String, dates: DateBounds },
    Historical { location: String, dates: DateBounds },
}

impl WeatherQuery {
    pub fn current(location: impl Into<String>) -> Self {
        Self::Current {
            location: location.into(),
        }
    }

    pub fn forecast(location: impl Into<String>, start: NaiveDate, end: NaiveDate) -> Self {
        Self::Forecast {
            location: location.into(),
            dates: DateBounds::new(start, end),
        }
    }

    pub fn historical(location: impl Into<String>, start: NaiveDate, end: NaiveDate) -> Self {
        Self::Historical {
            location: location.into(),
            dates: DateBounds::new(start, end),
        }
    }

    pub fn kind(&self) -> QueryKind {
        match self {
            Self::Current { .. } => QueryKind::Current,
            Self::Forecast { .. } => QueryKind::Forecast,
            Self::Historical { .. } => QueryKind::Historical,
        }
    }

    pub fn location(&self) -> &str {
        match self {
            Self::Current { location }
            | Self::Forecast { location, .. }
            | Self::Historical { location, .. } => location,
        }
    }

    /// Date bounds of the query. Always empty for `Current`.
    pub fn dates(&self) -> DateBounds {
        match self {
            Self::Current { .. } => DateBounds::default(),
            Self::Forecast { dates, .. } | Self::Historical { dates, .. } => *dates,
        }
    }

    pub fn start_date(&self) -> Option<NaiveDate> {
        self.dates().start
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        self.dates().end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_current_has_no_dates() {
        let query = WeatherQuery::current("Hanoi");

        assert_eq!(query.kind(), QueryKind::Current);
        assert_eq!(query.location(), "Hanoi");
        assert_eq!(query.start_date(), None);
        assert_eq!(query.end_date(), None);
    }

    #[test]
    fn test_dated_queries_expose_bounds() {
        let query = WeatherQuery::historical("Hanoi", date("2024-01-01"), date("2024-01-03"));

        assert_eq!(query.kind(), QueryKind::Historical);
        assert_eq!(
            query.dates().both(),
            Some((date("2024-01-01"), date("2024-01-03")))
        );
    }

    #[test]
    fn test_partial_bounds() {
        let query = WeatherQuery::Forecast {
            location: "Hanoi".to_string(),
            dates: DateBounds {
                start: Some(date("2024-01-01")),
                end: None,
            },
        };

        assert_eq!(query.dates().both(), None);
        assert_eq!(query.kind().to_string(), "forecast");
    }
}
