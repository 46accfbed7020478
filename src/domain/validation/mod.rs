//! Request validation.
//!
//! Validation is organised as a registry of stateless rules, each registered under a
//! [`ValidationCategory`]. A query kind maps to an ordered list of categories:
//!
//! | Kind         | Categories                              |
//! |--------------|-----------------------------------------|
//! | `Current`    | `Location`                              |
//! | `Forecast`   | `Location`, `DateRange`, `Forecast`     |
//! | `Historical` | `Location`, `DateRange`, `Historical`   |
//!
//! The pipeline evaluates categories in order and stops at the first failure. Later
//! rules rely on this: the forecast and historical checks only run once the date range
//! rule has established that both dates are present.

pub mod clock;
pub mod error_code;
pub mod pipeline;
pub mod rules;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error_code::ErrorCode;
pub use pipeline::RequestValidationPipeline;
pub use rules::{
    DateRangeRule, ForecastHorizonRule, HistoricalRule, LocationRule, ValidationCategory,
    ValidationResult, ValidationRule,
};
