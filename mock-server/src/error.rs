//! HTTP-facing error type.
//!
//! # Design
//! Every handler returns `Result<_, AppError>`. The variants are the four
//! failure classes a client can observe, and each maps to one status code.
//! The body is always `{"error": "<message>"}`. Upstream and unhandled
//! failures keep their detailed cause for the log and show the client a
//! fixed message.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use records_core::{StoreError, WeatherError};
use serde_json::json;
use thiserror::Error;

pub const INVALID_API_KEY_MESSAGE: &str =
    "Invalid API key. Please set OPENWEATHER_API_KEY in your environment variables.";

#[derive(Debug, Error)]
pub enum AppError {
    /// Missing or malformed request input (400).
    #[error("{0}")]
    InvalidArgument(String),

    /// The addressed record does not exist (404).
    #[error("{0}")]
    NotFound(String),

    /// The weather provider failed or no credential is configured (500).
    #[error("{message}")]
    Upstream {
        message: String,
        #[source]
        cause: WeatherError,
    },

    /// Anything else (500).
    #[error("{message}")]
    Unhandled { message: String },
}

impl AppError {
    pub fn invalid(message: impl Into<String>) -> Self {
        AppError::InvalidArgument(message.into())
    }

    /// Wrap a provider failure. A missing or rejected key gets the credential
    /// message; everything else gets `fallback`.
    pub fn upstream(cause: WeatherError, fallback: &str) -> Self {
        let message = match cause {
            WeatherError::MissingApiKey | WeatherError::Unauthorized => INVALID_API_KEY_MESSAGE,
            _ => fallback,
        };
        AppError::Upstream {
            message: message.to_string(),
            cause,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Upstream { .. } | AppError::Unhandled { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::InvalidArgument(msg) => AppError::InvalidArgument(msg),
            err @ StoreError::NotFound(_) => AppError::NotFound(err.to_string()),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection.body_text(), "rejected request body");
        AppError::InvalidArgument("Invalid JSON body".to_string())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        tracing::debug!(error = %rejection.body_text(), "rejected query string");
        AppError::InvalidArgument("Invalid query string".to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            AppError::Upstream { message, cause } => {
                tracing::error!(error = %cause, "{message}");
            }
            AppError::Unhandled { message } => tracing::error!("{message}"),
            AppError::InvalidArgument(message) | AppError::NotFound(message) => {
                tracing::warn!(status = status.as_u16(), "{message}");
            }
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use records_core::RecordKind;

    use super::*;

    #[test]
    fn store_errors_map_to_client_statuses() {
        let err = AppError::from(StoreError::NotFound(RecordKind::User));
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "User not found");

        let err = AppError::from(StoreError::InvalidArgument("bad".to_string()));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn credential_failures_use_key_message() {
        let err = AppError::upstream(WeatherError::Unauthorized, "Failed to fetch weather data");
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), INVALID_API_KEY_MESSAGE);

        let err = AppError::upstream(WeatherError::MissingApiKey, "Failed to fetch weather data");
        assert_eq!(err.to_string(), INVALID_API_KEY_MESSAGE);
    }

    #[test]
    fn other_upstream_failures_use_fallback() {
        let err = AppError::upstream(
            WeatherError::Transport("timed out".to_string()),
            "Failed to fetch weather data",
        );
        assert_eq!(err.to_string(), "Failed to fetch weather data");
    }
}
