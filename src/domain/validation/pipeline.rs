//! Ordered, short-circuiting validation pipeline.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use super::clock::Clock;
use super::error_code::ErrorCode;
use super::rules::{
    DateRangeRule, ForecastHorizonRule, HistoricalRule, LocationRule, ValidationCategory,
    ValidationResult, ValidationRule,
};
use crate::domain::entities::{QueryKind, WeatherQuery};

/// Registry of validation rules and per-kind category plans.
///
/// Built once at startup and read-only afterwards. Supporting a new query kind means
/// registering a new ordered category list with [`Self::with_plan`]; existing rules
/// are untouched.
pub struct RequestValidationPipeline {
    rules: HashMap<ValidationCategory, Arc<dyn ValidationRule>>,
    plans: HashMap<QueryKind, Vec<ValidationCategory>>,
    clock: Arc<dyn Clock>,
}

impl RequestValidationPipeline {
    /// Creates an empty pipeline with no rules and no plans.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            rules: HashMap::new(),
            plans: HashMap::new(),
            clock,
        }
    }

    /// Creates the pipeline with the four standard rules and the plans for
    /// current, forecast and historical queries.
    pub fn standard(clock: Arc<dyn Clock>) -> Self {
        use ValidationCategory::*;

        Self::new(clock)
            .with_rule(LocationRule)
            .with_rule(DateRangeRule)
            .with_rule(ForecastHorizonRule)
            .with_rule(HistoricalRule)
            .with_plan(QueryKind::Current, vec![Location])
            .with_plan(QueryKind::Forecast, vec![Location, DateRange, Forecast])
            .with_plan(QueryKind::Historical, vec![Location, DateRange, Historical])
    }

    /// Registers a rule under its own category, replacing any previous one.
    pub fn with_rule(mut self, rule: impl ValidationRule + 'static) -> Self {
        self.rules.insert(rule.category(), Arc::new(rule));
        self
    }

    /// Registers the ordered category list for a query kind.
    pub fn with_plan(mut self, kind: QueryKind, categories: Vec<ValidationCategory>) -> Self {
        self.plans.insert(kind, categories);
        self
    }

    /// Ordered categories registered for a query kind.
    pub fn categories_for(&self, kind: QueryKind) -> Option<&[ValidationCategory]> {
        self.plans.get(&kind).map(Vec::as_slice)
    }

    /// Validates a query against the plan registered for its kind.
    ///
    /// A kind without a plan fails with [`ErrorCode::InvalidParameters`].
    pub fn validate_query(&self, query: &WeatherQuery) -> ValidationResult {
        match self.categories_for(query.kind()) {
            Some(categories) => self.validate(categories, query),
            None => ValidationResult::failure_with(
                ErrorCode::InvalidParameters,
                format!("No validation plan for {} queries", query.kind()),
            ),
        }
    }

    /// Evaluates the rules for `categories` in order, stopping at the first failure.
    ///
    /// A category with no registered rule fails with [`ErrorCode::InvalidParameters`].
    pub fn validate(
        &self,
        categories: &[ValidationCategory],
        query: &WeatherQuery,
    ) -> ValidationResult {
        let today = self.clock.today();

        for category in categories {
            let Some(rule) = self.rules.get(category) else {
                return ValidationResult::failure_with(
                    ErrorCode::InvalidParameters,
                    format!("Unsupported validation type: {:?}", category),
                );
            };

            let result = rule.validate(query, today);
            if !result.is_valid() {
                debug!(?category, ?result, "Validation failed");
                return result;
            }
        }

        ValidationResult::Valid
    }
}
