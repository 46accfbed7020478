//! Validation rules and their results.

use chrono::{Days, NaiveDate};

use super::error_code::ErrorCode;
use crate::domain::entities::WeatherQuery;

/// Maximum number of days (inclusive) a dated query may span.
pub const MAX_RANGE_DAYS: i64 = 15;

/// How far ahead of today a forecast may start.
pub const FORECAST_HORIZON_DAYS: u64 = 15;

/// Minimum trimmed location length, in characters.
pub const MIN_LOCATION_LEN: usize = 2;

/// Category a rule is registered under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationCategory {
    Location,
    DateRange,
    Forecast,
    Historical,
}

/// Outcome of a rule or of a whole pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    Valid,
    Invalid { code: ErrorCode, message: String },
}

impl ValidationResult {
    /// Failure with the code's default message.
    pub fn failure(code: ErrorCode) -> Self {
        Self::Invalid {
            code,
            message: code.message().to_string(),
        }
    }

    /// Failure with a custom message.
    pub fn failure_with(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::Invalid {
            code,
            message: message.into(),
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            Self::Valid => None,
            Self::Invalid { code, .. } => Some(*code),
        }
    }
}

/// A named, stateless predicate over a query.
///
/// `today` is supplied by the pipeline so that every rule of one run sees the same date.
pub trait ValidationRule: Send + Sync {
    fn category(&self) -> ValidationCategory;

    fn validate(&self, query: &WeatherQuery, today: NaiveDate) -> ValidationResult;
}

/// Location must be present and at least two characters once trimmed.
#[derive(Debug, Default)]
pub struct LocationRule;

impl ValidationRule for LocationRule {
    fn category(&self) -> ValidationCategory {
        ValidationCategory::Location
    }

    fn validate(&self, query: &WeatherQuery, _today: NaiveDate) -> ValidationResult {
        let location = query.location().trim();

        if location.is_empty() {
            return ValidationResult::failure(ErrorCode::LocationEmpty);
        }
        if location.chars().count() < MIN_LOCATION_LEN {
            return ValidationResult::failure(ErrorCode::LocationTooShort);
        }

        ValidationResult::Valid
    }
}

/// Both dates present, ordered, and spanning at most [`MAX_RANGE_DAYS`] days inclusive.
#[derive(Debug, Default)]
pub struct DateRangeRule;

impl ValidationRule for DateRangeRule {
    fn category(&self) -> ValidationCategory {
        ValidationCategory::DateRange
    }

    fn validate(&self, query: &WeatherQuery, _today: NaiveDate) -> ValidationResult {
        let Some((start, end)) = query.dates().both() else {
            return ValidationResult::failure_with(
                ErrorCode::MissingRequiredParameter,
                "Both start and end dates are required",
            );
        };

        if start > end {
            return ValidationResult::failure(ErrorCode::StartDateAfterEndDate);
        }

        let number_of_days = (end - start).num_days() + 1;
        if number_of_days > MAX_RANGE_DAYS {
            return ValidationResult::failure(ErrorCode::MaxDaysExceeded);
        }

        ValidationResult::Valid
    }
}

/// Forecast must not start more than [`FORECAST_HORIZON_DAYS`] days after today.
#[derive(Debug, Default)]
pub struct ForecastHorizonRule;

impl ValidationRule for ForecastHorizonRule {
    fn category(&self) -> ValidationCategory {
        ValidationCategory::Forecast
    }

    fn validate(&self, query: &WeatherQuery, today: NaiveDate) -> ValidationResult {
        let Some(start) = query.start_date() else {
            return ValidationResult::failure(ErrorCode::MissingRequiredParameter);
        };

        let horizon = today
            .checked_add_days(Days::new(FORECAST_HORIZON_DAYS))
            .unwrap_or(NaiveDate::MAX);

        if start > horizon {
            return ValidationResult::failure(ErrorCode::StartDateTooFarFuture);
        }

        ValidationResult::Valid
    }
}

/// Historical ranges may not include any date after today.
#[derive(Debug, Default)]
pub struct HistoricalRule;

impl ValidationRule for HistoricalRule {
    fn category(&self) -> ValidationCategory {
        ValidationCategory::Historical
    }

    fn validate(&self, query: &WeatherQuery, today: NaiveDate) -> ValidationResult {
        let Some((start, end)) = query.dates().both() else {
            return ValidationResult::failure(ErrorCode::MissingRequiredParameter);
        };

        if start > today || end > today {
            return ValidationResult::failure(ErrorCode::HistoricalDateFuture);
        }

        ValidationResult::Valid
    }
}
