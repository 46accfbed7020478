use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::provider::ProviderError;
use crate::domain::validation::ErrorCode;

/// JSON body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub status: u16,
    pub code: &'static str,
    pub error: ErrorCode,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Request failed validation. No I/O was performed.
    #[error("{message}")]
    Validation { code: ErrorCode, message: String },

    /// Upstream rejected the request as invalid. Not retried, cache untouched.
    #[error("{message}")]
    UpstreamRejected { code: ErrorCode, message: String },

    /// Upstream unreachable after retries and no cached fallback.
    #[error("{message}")]
    Unavailable { code: ErrorCode, message: String },

    /// The caller cancelled the request while it was in flight.
    #[error("Request was cancelled before completion")]
    Cancelled,

    #[error("{message}")]
    Internal { message: String },
}

impl AppError {
    pub fn validation(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::Validation {
            code,
            message: message.into(),
        }
    }

    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        Self::validation(ErrorCode::InvalidParameters, message)
    }

    pub fn upstream_rejected(message: impl Into<String>) -> Self {
        Self::UpstreamRejected {
            code: ErrorCode::UpstreamRejected,
            message: message.into(),
        }
    }

    /// Service-unavailable failure carrying the last upstream cause.
    pub fn unavailable(message: impl Into<String>, cause: &ProviderError) -> Self {
        let code = match cause {
            ProviderError::Server { .. } => ErrorCode::WeatherApiServerError,
            _ => ErrorCode::WeatherApiUnavailable,
        };
        Self::Unavailable {
            code,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Validation { code, .. }
            | Self::UpstreamRejected { code, .. }
            | Self::Unavailable { code, .. } => *code,
            Self::Cancelled => ErrorCode::RequestCancelled,
            Self::Internal { .. } => ErrorCode::UnexpectedError,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation { .. } | Self::UpstreamRejected { .. } => StatusCode::BAD_REQUEST,
            Self::Unavailable { .. } | Self::Cancelled => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();

        if status.is_server_error() {
            tracing::error!(code = code.code(), "{}", self);
        } else {
            tracing::debug!(code = code.code(), "{}", self);
        }

        let body = ErrorBody {
            status: status.as_u16(),
            code: code.code(),
            error: code,
            message: self.to_string(),
            timestamp: Utc::now(),
        };

        (status, Json(body)).into_response()
    }
}
