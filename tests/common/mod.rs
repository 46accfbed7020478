#![allow(dead_code)]

use async_trait::async_trait;
use axum::{Router, routing::get};
use chrono::NaiveDate;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use weather_gateway::api::handlers::health_handler;
use weather_gateway::api::routes::weather_routes;
use weather_gateway::application::retry::RetryPolicy;
use weather_gateway::application::services::WeatherFacade;
use weather_gateway::domain::entities::{DayWeather, WeatherResponse};
use weather_gateway::domain::provider::{ProviderError, WeatherProvider};
use weather_gateway::domain::validation::{FixedClock, RequestValidationPipeline};
use weather_gateway::infrastructure::cache::{
    CacheStore, CacheTtls, MemoryCache, ObservableCache,
};
use weather_gateway::state::AppState;

/// "Today" as seen by the validation pipeline in handler tests.
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
}

pub fn sample_response(address: &str) -> WeatherResponse {
    WeatherResponse {
        resolved_address: address.to_string(),
        timezone: Some("Asia/Bangkok".to_string()),
        days: vec![DayWeather {
            datetime: "2024-06-15".to_string(),
            tempmax: 34.0,
            tempmin: 27.5,
            conditions: "Partially cloudy".to_string(),
            description: "Hot and humid".to_string(),
        }],
        alerts: vec![],
    }
}

/// Provider that replays scripted results and records every call.
///
/// Once the script is exhausted, every call succeeds with [`sample_response`].
pub struct StubProvider {
    script: Mutex<VecDeque<Result<WeatherResponse, ProviderError>>>,
    calls: AtomicUsize,
    requests: Mutex<Vec<(String, Option<NaiveDate>, Option<NaiveDate>)>>,
}

impl StubProvider {
    pub fn new() -> Self {
        Self::scripted(Vec::new())
    }

    pub fn scripted(results: Vec<Result<WeatherResponse, ProviderError>>) -> Self {
        Self {
            script: Mutex::new(results.into()),
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<(String, Option<NaiveDate>, Option<NaiveDate>)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl WeatherProvider for StubProvider {
    async fn fetch(
        &self,
        location: &str,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<WeatherResponse, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests
            .lock()
            .unwrap()
            .push((location.to_string(), start, end));

        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(sample_response(location)))
    }
}

pub fn create_test_state_with(
    provider: Arc<StubProvider>,
    store: Arc<dyn CacheStore>,
) -> AppState {
    let cache = Arc::new(ObservableCache::new(store));
    let pipeline = Arc::new(RequestValidationPipeline::standard(Arc::new(FixedClock(
        today(),
    ))));

    let weather = WeatherFacade::new(
        pipeline,
        cache.clone(),
        provider,
        RetryPolicy::fixed(3, Duration::ZERO),
        CacheTtls::default(),
    );

    AppState::new(Arc::new(weather), cache)
}

pub fn create_test_state(provider: Arc<StubProvider>) -> AppState {
    create_test_state_with(provider, Arc::new(MemoryCache::new()))
}

/// Application routes without rate limiting (no peer address in-process).
pub fn test_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .nest("/api/v1/weather", weather_routes())
        .with_state(state)
}
