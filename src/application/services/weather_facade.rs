//! Validated, cached, resilient weather lookups.

use chrono::NaiveDate;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use tokio_retry::RetryIf;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::application::retry::RetryPolicy;
use crate::domain::cache_key::{CacheKey, derive_key};
use crate::domain::entities::{CacheEntry, QueryKind, WeatherQuery, WeatherResponse};
use crate::domain::provider::{ProviderError, WeatherProvider};
use crate::domain::validation::{RequestValidationPipeline, ValidationResult};
use crate::error::AppError;
use crate::infrastructure::cache::{CacheClass, CacheStore, CacheTtls};

/// Why an upstream fetch did not produce a response.
enum FetchFailure {
    /// Non-transient provider error; surfaced as-is.
    Rejected(ProviderError),
    /// Transient errors on every attempt; `attempts` calls were made.
    Exhausted { cause: ProviderError, attempts: u32 },
    Cancelled,
}

/// Facade in front of the upstream weather provider.
///
/// Each request moves through
/// `VALIDATING → CACHE_LOOKUP → (HIT | MISS → FETCHING → (SUCCESS | EXHAUSTED → FALLBACK_LOOKUP))`
/// and never revisits a state:
///
/// 1. Validate with the [`RequestValidationPipeline`]; failures return before any I/O.
/// 2. Derive the cache key and read the cache class matching the query kind.
/// 3. On hit, return without contacting upstream.
/// 4. On miss, call the provider, retrying transient failures per the [`RetryPolicy`].
///    Client errors from the provider are not retried.
/// 5. On success, write the response under the same key with the class TTL.
/// 6. When retries are exhausted, read the same key once more and return it if present;
///    otherwise fail with a service-unavailable error naming the failed call.
///
/// Cache read failures degrade to a miss and write failures are logged; neither fails
/// the request on its own.
pub struct WeatherFacade {
    pipeline: Arc<RequestValidationPipeline>,
    cache: Arc<dyn CacheStore>,
    provider: Arc<dyn WeatherProvider>,
    retry: RetryPolicy,
    ttls: CacheTtls,
}

impl WeatherFacade {
    /// Creates a new facade.
    pub fn new(
        pipeline: Arc<RequestValidationPipeline>,
        cache: Arc<dyn CacheStore>,
        provider: Arc<dyn WeatherProvider>,
        retry: RetryPolicy,
        ttls: CacheTtls,
    ) -> Self {
        Self {
            pipeline,
            cache,
            provider,
            retry,
            ttls,
        }
    }

    /// Current conditions for a location.
    pub async fn get_current(&self, location: &str) -> Result<WeatherResponse, AppError> {
        self.execute(WeatherQuery::current(location), &CancellationToken::new())
            .await
    }

    /// Forecast for a location over `start..=end`.
    pub async fn get_forecast(
        &self,
        location: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<WeatherResponse, AppError> {
        self.execute(
            WeatherQuery::forecast(location, start, end),
            &CancellationToken::new(),
        )
        .await
    }

    /// Historical weather for a location over `start..=end`.
    pub async fn get_historical(
        &self,
        location: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<WeatherResponse, AppError> {
        self.execute(
            WeatherQuery::historical(location, start, end),
            &CancellationToken::new(),
        )
        .await
    }

    /// Runs a query through validation, cache, upstream and fallback.
    ///
    /// # Cancellation
    ///
    /// If `cancel` fires while the upstream call or a retry wait is pending, the remaining
    /// attempts are abandoned and [`AppError::Cancelled`] is returned. Nothing is written to
    /// the cache and no fallback is read.
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] when the query fails validation
    /// - [`AppError::UpstreamRejected`] when the provider rejects the query
    /// - [`AppError::Unavailable`] when retries are exhausted and no cached value exists
    /// - [`AppError::Cancelled`] when `cancel` fires first
    pub async fn execute(
        &self,
        query: WeatherQuery,
        cancel: &CancellationToken,
    ) -> Result<WeatherResponse, AppError> {
        if let ValidationResult::Invalid { code, message } = self.pipeline.validate_query(&query)
        {
            return Err(AppError::validation(code, message));
        }

        let kind = query.kind();
        let class = CacheClass::from(kind);
        let key = derive_key(&query);

        match self.cache.get(class, key.as_str()).await {
            Ok(Some(entry)) => {
                debug!("Cache HIT for {}::{}", class, key);
                return Ok(entry.into_weather());
            }
            Ok(None) => debug!("Cache MISS for {}::{}", class, key),
            Err(e) => warn!("Cache lookup failed for {}::{}: {}. Fetching upstream", class, key, e),
        }

        match self.fetch_with_retry(&query, cancel).await {
            Ok(response) => {
                record_upstream(kind, "success");
                self.store(class, &key, &response).await;
                Ok(response)
            }
            Err(FetchFailure::Rejected(cause)) => {
                record_upstream(kind, "rejected");
                warn!("Upstream rejected {} request for '{}': {}", kind, query.location(), cause);
                Err(AppError::upstream_rejected(format!(
                    "Weather API rejected {} request for '{}': {}",
                    kind,
                    query.location().trim(),
                    cause
                )))
            }
            Err(FetchFailure::Cancelled) => {
                record_upstream(kind, "cancelled");
                info!("{} request for '{}' cancelled", kind, query.location());
                Err(AppError::Cancelled)
            }
            Err(FetchFailure::Exhausted { cause, attempts }) => {
                record_upstream(kind, "exhausted");
                self.fallback(&query, class, &key, cause, attempts).await
            }
        }
    }

    /// Calls the provider, retrying transient failures until the policy is exhausted.
    async fn fetch_with_retry(
        &self,
        query: &WeatherQuery,
        cancel: &CancellationToken,
    ) -> Result<WeatherResponse, FetchFailure> {
        let kind = query.kind();
        let location = query.location().trim();
        let (start, end) = (query.start_date(), query.end_date());
        let max_attempts = self.retry.max_attempts();
        let attempts = AtomicU32::new(0);

        let action = || {
            attempts.fetch_add(1, Ordering::Relaxed);
            self.provider.fetch(location, start, end)
        };
        let condition = |error: &ProviderError| {
            let transient = error.is_transient();
            let attempt = attempts.load(Ordering::Relaxed);
            if transient && attempt < max_attempts {
                warn!(
                    kind = %kind,
                    attempt,
                    max_attempts,
                    "Retrying upstream call after: {}",
                    error
                );
            }
            transient
        };

        let retrying = RetryIf::spawn(self.retry.delays(), action, condition);

        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(FetchFailure::Cancelled),
            result = retrying => result,
        };

        result.map_err(|cause| {
            if cause.is_transient() {
                FetchFailure::Exhausted {
                    cause,
                    attempts: attempts.load(Ordering::Relaxed),
                }
            } else {
                FetchFailure::Rejected(cause)
            }
        })
    }

    /// Writes a fresh response to the cache. Failures are logged only.
    async fn store(&self, class: CacheClass, key: &CacheKey, response: &WeatherResponse) {
        let entry = CacheEntry::from(response.clone());
        let ttl = self.ttls.for_class(class);

        if let Err(e) = self.cache.put(class, key.as_str(), &entry, ttl).await {
            warn!("Failed to cache {}::{}: {}", class, key, e);
        }
    }

    /// Last-resort read of the key a successful fetch would have written.
    async fn fallback(
        &self,
        query: &WeatherQuery,
        class: CacheClass,
        key: &CacheKey,
        cause: ProviderError,
        attempts: u32,
    ) -> Result<WeatherResponse, AppError> {
        let kind = query.kind();
        warn!(
            "Upstream {} call for '{}' failed after {} attempt(s): {}. Trying cached fallback",
            kind,
            query.location(),
            attempts,
            cause
        );

        let unavailable = || {
            AppError::unavailable(
                format!(
                    "Weather API {} request for '{}' failed after {} attempt(s): {}",
                    kind,
                    query.location().trim(),
                    attempts,
                    cause
                ),
                &cause,
            )
        };

        match self.cache.get(class, key.as_str()).await {
            Ok(Some(entry)) => {
                record_fallback(kind, "hit");
                info!("Serving cached fallback for {}::{}", class, key);
                Ok(entry.into_weather())
            }
            Ok(None) => {
                record_fallback(kind, "miss");
                Err(unavailable())
            }
            Err(e) => {
                record_fallback(kind, "error");
                warn!("Fallback cache read failed for {}::{}: {}", class, key, e);
                Err(unavailable())
            }
        }
    }
}

fn record_upstream(kind: QueryKind, outcome: &'static str) {
    metrics::counter!(
        "weather_upstream_requests_total",
        "kind" => kind.as_str(),
        "outcome" => outcome
    )
    .increment(1);
}

fn record_fallback(kind: QueryKind, outcome: &'static str) {
    metrics::counter!(
        "weather_fallback_total",
        "kind" => kind.as_str(),
        "outcome" => outcome
    )
    .increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::DayWeather;
    use crate::domain::provider::MockWeatherProvider;
    use crate::domain::validation::{ErrorCode, FixedClock};
    use crate::infrastructure::cache::{CacheError, MemoryCache, MockCacheStore};
    use chrono::TimeDelta;
    use mockall::Sequence;
    use std::time::Duration;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn plus(days: i64) -> NaiveDate {
        today() + TimeDelta::days(days)
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn response(address: &str) -> WeatherResponse {
        WeatherResponse {
            resolved_address: address.to_string(),
            timezone: None,
            days: vec![DayWeather {
                datetime: "2024-01-01".to_string(),
                tempmax: 20.0,
                tempmin: 12.0,
                conditions: "Clear".to_string(),
                description: String::new(),
            }],
            alerts: vec![],
        }
    }

    fn server_error() -> ProviderError {
        ProviderError::Server {
            status: 500,
            message: "Internal Server Error".to_string(),
        }
    }

    fn facade(
        cache: Arc<dyn CacheStore>,
        provider: MockWeatherProvider,
        retry: RetryPolicy,
    ) -> WeatherFacade {
        WeatherFacade::new(
            Arc::new(RequestValidationPipeline::standard(Arc::new(FixedClock(
                today(),
            )))),
            cache,
            Arc::new(provider),
            retry,
            CacheTtls::default(),
        )
    }

    fn quick_retry() -> RetryPolicy {
        RetryPolicy::fixed(3, Duration::ZERO)
    }

    #[tokio::test]
    async fn test_invalid_location_rejected_without_io() {
        let mut provider = MockWeatherProvider::new();
        provider.expect_fetch().times(0);
        let cache = MockCacheStore::new();

        let service = facade(Arc::new(cache), provider, quick_retry());

        let err = service.get_current("a").await.unwrap_err();

        assert!(matches!(
            err,
            AppError::Validation {
                code: ErrorCode::LocationTooShort,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_forecast_too_far_ahead_rejected() {
        let mut provider = MockWeatherProvider::new();
        provider.expect_fetch().times(0);

        let service = facade(Arc::new(MemoryCache::new()), provider, quick_retry());

        let err = service
            .get_forecast("Hanoi", plus(20), plus(25))
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::StartDateTooFarFuture);
    }

    #[tokio::test]
    async fn test_current_second_call_served_from_cache() {
        let mut provider = MockWeatherProvider::new();
        provider
            .expect_fetch()
            .withf(|location, start, end| location == "Hanoi" && start.is_none() && end.is_none())
            .times(1)
            .returning(|_, _, _| Ok(response("Hanoi, Vietnam")));

        let service = facade(Arc::new(MemoryCache::new()), provider, quick_retry());

        let first = service.get_current("Hanoi").await.unwrap();
        let second = service.get_current("Hanoi").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(second.resolved_address, "Hanoi, Vietnam");
    }

    #[tokio::test]
    async fn test_normalized_locations_share_cache_entry() {
        let mut provider = MockWeatherProvider::new();
        provider
            .expect_fetch()
            .times(1)
            .returning(|_, _, _| Ok(response("Hanoi")));

        let service = facade(Arc::new(MemoryCache::new()), provider, quick_retry());

        service.get_current("Hanoi").await.unwrap();
        service.get_current("  HANOI ").await.unwrap();
    }

    #[tokio::test]
    async fn test_historical_second_call_makes_no_upstream_call() {
        let mut provider = MockWeatherProvider::new();
        provider
            .expect_fetch()
            .withf(|_, start, end| *start == Some(plus(-7)) && *end == Some(plus(-1)))
            .times(1)
            .returning(|_, _, _| Ok(response("Hanoi")));

        let service = facade(Arc::new(MemoryCache::new()), provider, quick_retry());

        service
            .get_historical("Hanoi", plus(-7), plus(-1))
            .await
            .unwrap();
        service
            .get_historical("Hanoi", plus(-7), plus(-1))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_success_written_with_class_ttl() {
        let mut provider = MockWeatherProvider::new();
        provider
            .expect_fetch()
            .times(1)
            .returning(|_, _, _| Ok(response("Hanoi")));

        let mut cache = MockCacheStore::new();
        cache.expect_get().times(1).returning(|_, _| Ok(None));
        cache
            .expect_put()
            .withf(|class, key, value, ttl| {
                *class == CacheClass::Forecast
                    && key == "hanoi:2024-06-16:2024-06-17"
                    && matches!(value, CacheEntry::Weather(w) if w.resolved_address == "Hanoi")
                    && *ttl == Duration::from_secs(2 * 60 * 60)
            })
            .times(1)
            .returning(|_, _, _, _| Ok(()));

        let service = facade(Arc::new(cache), provider, quick_retry());

        service
            .get_forecast("Hanoi", plus(1), plus(2))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_transient_failures_retried_then_succeed() {
        let mut seq = Sequence::new();
        let mut provider = MockWeatherProvider::new();
        provider
            .expect_fetch()
            .times(2)
            .in_sequence(&mut seq)
            .returning(|_, _, _| Err(server_error()));
        provider
            .expect_fetch()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _, _| Ok(response("Hanoi")));

        let cache = Arc::new(MemoryCache::new());
        let service = facade(cache.clone(), provider, quick_retry());

        let result = service.get_forecast("Hanoi", plus(1), plus(1)).await.unwrap();

        assert_eq!(result.resolved_address, "Hanoi");
        assert!(
            cache
                .get(CacheClass::Forecast, "hanoi:2024-06-16:2024-06-16")
                .await
                .unwrap()
                .is_some()
        );
    }

    #[tokio::test]
    async fn test_client_error_not_retried_and_cache_untouched() {
        let mut provider = MockWeatherProvider::new();
        provider.expect_fetch().times(1).returning(|_, _, _| {
            Err(ProviderError::Client {
                status: 400,
                message: "Invalid location".to_string(),
            })
        });

        let mut cache = MockCacheStore::new();
        cache.expect_get().times(1).returning(|_, _| Ok(None));
        cache.expect_put().times(0);

        let service = facade(Arc::new(cache), provider, quick_retry());

        let err = service.get_current("Atlantis").await.unwrap_err();

        assert!(matches!(
            err,
            AppError::UpstreamRejected {
                code: ErrorCode::UpstreamRejected,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_exhausted_retries_fall_back_to_cached_value() {
        let cached = response("Hanoi (cached)");

        let mut provider = MockWeatherProvider::new();
        provider
            .expect_fetch()
            .times(3)
            .returning(|_, _, _| Err(server_error()));

        let mut seq = Sequence::new();
        let mut cache = MockCacheStore::new();
        cache
            .expect_get()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Err(CacheError::ConnectionError("timeout".to_string())));
        let fallback = CacheEntry::from(cached.clone());
        cache
            .expect_get()
            .withf(|class, key| {
                *class == CacheClass::Forecast && key == "hanoi:2024-01-01:2024-01-02"
            })
            .times(1)
            .in_sequence(&mut seq)
            .returning(move |_, _| Ok(Some(fallback.clone())));
        cache.expect_put().times(0);

        let service = facade(Arc::new(cache), provider, quick_retry());

        let result = service
            .get_forecast("hanoi", date("2024-01-01"), date("2024-01-02"))
            .await
            .unwrap();

        assert_eq!(result, cached);
    }

    #[tokio::test]
    async fn test_exhausted_without_fallback_is_unavailable() {
        let mut provider = MockWeatherProvider::new();
        provider
            .expect_fetch()
            .times(3)
            .returning(|_, _, _| Err(ProviderError::Connection("connection refused".to_string())));

        let service = facade(Arc::new(MemoryCache::new()), provider, quick_retry());

        let err = service
            .get_historical("Hanoi", plus(-3), plus(-1))
            .await
            .unwrap_err();

        match err {
            AppError::Unavailable { code, message } => {
                assert_eq!(code, ErrorCode::WeatherApiUnavailable);
                assert!(message.contains("historical"));
                assert!(message.contains("Hanoi"));
                assert!(message.contains("3 attempt"));
                assert!(message.contains("connection refused"));
            }
            other => panic!("expected Unavailable, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_retry_count_follows_policy() {
        let mut provider = MockWeatherProvider::new();
        provider
            .expect_fetch()
            .times(5)
            .returning(|_, _, _| Err(server_error()));

        let service = facade(
            Arc::new(MemoryCache::new()),
            provider,
            RetryPolicy::fixed(5, Duration::ZERO),
        );

        let err = service.get_current("Hanoi").await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::WeatherApiServerError);
    }

    #[tokio::test]
    async fn test_cache_write_failure_still_returns_response() {
        let mut provider = MockWeatherProvider::new();
        provider
            .expect_fetch()
            .times(1)
            .returning(|_, _, _| Ok(response("Hanoi")));

        let mut cache = MockCacheStore::new();
        cache.expect_get().times(1).returning(|_, _| Ok(None));
        cache
            .expect_put()
            .times(1)
            .returning(|_, _, _, _| Err(CacheError::OperationError("OOM".to_string())));

        let service = facade(Arc::new(cache), provider, quick_retry());

        assert!(service.get_current("Hanoi").await.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancellation_abandons_retries() {
        let mut provider = MockWeatherProvider::new();
        provider
            .expect_fetch()
            .times(1)
            .returning(|_, _, _| Err(server_error()));

        let mut cache = MockCacheStore::new();
        cache.expect_get().times(1).returning(|_, _| Ok(None));
        cache.expect_put().times(0);

        let service = facade(
            Arc::new(cache),
            provider,
            RetryPolicy::fixed(3, Duration::from_secs(60)),
        );

        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(1)).await;
            trigger.cancel();
        });

        let err = service
            .execute(WeatherQuery::current("Hanoi"), &cancel)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Cancelled));
    }
}
