//! Query parameters of the weather endpoints.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::domain::entities::{DateBounds, WeatherQuery};
use crate::error::AppError;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// `?location=` for current conditions.
#[derive(Debug, Deserialize)]
pub struct CurrentParams {
    pub location: Option<String>,
}

/// `?location=&startDate=&endDate=` for forecast and historical lookups.
///
/// Dates use `yyyy-MM-dd`. Absent parameters are passed on as absent so the
/// validation pipeline can report exactly which rule failed.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeParams {
    pub location: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl CurrentParams {
    pub fn into_query(self) -> WeatherQuery {
        WeatherQuery::current(self.location.unwrap_or_default())
    }
}

impl RangeParams {
    pub fn into_forecast(self) -> Result<WeatherQuery, AppError> {
        let dates = self.bounds()?;
        Ok(WeatherQuery::Forecast {
            location: self.location.unwrap_or_default(),
            dates,
        })
    }

    pub fn into_historical(self) -> Result<WeatherQuery, AppError> {
        let dates = self.bounds()?;
        Ok(WeatherQuery::Historical {
            location: self.location.unwrap_or_default(),
            dates,
        })
    }

    fn bounds(&self) -> Result<DateBounds, AppError> {
        Ok(DateBounds {
            start: parse_date("startDate", self.start_date.as_deref())?,
            end: parse_date("endDate", self.end_date.as_deref())?,
        })
    }
}

fn parse_date(name: &str, value: Option<&str>) -> Result<Option<NaiveDate>, AppError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => NaiveDate::parse_from_str(raw, DATE_FORMAT)
            .map(Some)
            .map_err(|_| {
                AppError::invalid_parameter(format!(
                    "Invalid {} '{}': expected format yyyy-MM-dd",
                    name, raw
                ))
            }),
    }
}
