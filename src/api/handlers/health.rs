//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CacheCheck, HealthChecks, HealthResponse};
use crate::infrastructure::cache::CacheStore;
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: Cache backend reachable
/// - **503 Service Unavailable**: Cache backend unreachable
///
/// The upstream weather API is not probed; each probe would spend provider quota.
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "cache": {
///       "status": "ok",
///       "backend": "redis",
///       "stats": { "hits": 10, "misses": 2, "inserts": 2, "evictions": 0, "clears": 0, "errors": 0 }
///     }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let cache_check = check_cache(&state).await;
    let healthy = cache_check.status == "ok";

    let response = HealthResponse {
        status: if healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks { cache: cache_check },
    };

    if healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

/// Checks cache backend connectivity.
async fn check_cache(state: &AppState) -> CacheCheck {
    let backend = state.cache.backend().to_string();
    let stats = state.cache.stats();

    if state.cache.health_check().await {
        CacheCheck {
            status: "ok".to_string(),
            backend,
            message: None,
            stats,
        }
    } else {
        CacheCheck {
            status: "error".to_string(),
            message: Some(format!("{} cache unreachable", backend)),
            backend,
            stats,
        }
    }
}
