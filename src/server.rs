//! HTTP server initialization and runtime setup.
//!
//! Handles cache backend selection, service wiring, and the Axum server lifecycle.

use crate::api::middleware::rate_limit;
use crate::application::services::WeatherFacade;
use crate::config::Config;
use crate::domain::validation::{RequestValidationPipeline, SystemClock};
use crate::infrastructure::cache::{CacheStore, MemoryCache, ObservableCache, RedisCache};
use crate::infrastructure::provider::HttpWeatherProvider;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::Result;
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Connects the configured cache backend.
///
/// Falls back to [`MemoryCache`] when Redis is not configured or unreachable at startup.
async fn connect_cache(config: &Config) -> Arc<dyn CacheStore> {
    let Some(redis_url) = &config.redis_url else {
        tracing::info!("Cache: in-memory (Redis not configured)");
        return Arc::new(MemoryCache::new());
    };

    match RedisCache::connect(redis_url).await {
        Ok(redis) => {
            tracing::info!("Cache enabled (Redis)");
            Arc::new(redis)
        }
        Err(e) => {
            tracing::warn!("Failed to connect to Redis: {}. Using in-memory cache.", e);
            Arc::new(MemoryCache::new())
        }
    }
}

/// Wires the cache, provider, validation pipeline and facade into [`AppState`].
///
/// # Errors
///
/// Returns an error if the HTTP client for the weather API cannot be built.
pub async fn build_state(config: &Config) -> Result<AppState> {
    let cache = Arc::new(ObservableCache::new(connect_cache(config).await));
    let provider = Arc::new(HttpWeatherProvider::new(config.provider_settings())?);
    let pipeline = Arc::new(RequestValidationPipeline::standard(Arc::new(SystemClock)));

    let weather = WeatherFacade::new(
        pipeline,
        cache.clone(),
        provider,
        config.retry_policy(),
        config.cache_ttls(),
    );

    Ok(AppState::new(Arc::new(weather), cache))
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Cache backend (Redis, or in-memory fallback) behind the recording decorator
/// - Weather API client and facade
/// - Axum HTTP server with graceful shutdown on Ctrl+C / SIGTERM
///
/// On shutdown the state's cancellation token fires, so requests waiting on upstream
/// retries return promptly instead of holding the drain open.
///
/// # Errors
///
/// Returns an error if:
/// - The weather API client cannot be built
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let state = build_state(&config).await?;
    let shutdown = state.shutdown.clone();

    let limiter = rate_limit::layer(config.rate_limit_per_second, config.rate_limit_burst)?;
    let app = app_router(state, Some(limiter));

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal(shutdown))
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal(token: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining connections");
    token.cancel();
}
