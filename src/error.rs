//! HTTP error mapping for the API server.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::clients::ProviderError;
use ombros_spi::SpiError;

/// Application error type for the request handlers.
///
/// The mapping mirrors the error taxonomy of the computation core:
/// upstream provider problems are 502s, everything the client can correct
/// (bad parameters, too little history, degenerate rainfall) is a 400,
/// and anything unexpected is an opaque 500.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Upstream weather provider failed.
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// The SPI core rejected the request's data.
    #[error(transparent)]
    Core(#[from] SpiError),

    /// A query parameter failed validation before any work was done.
    #[error("{0}")]
    Validation(String),

    /// A registry record does not exist.
    #[error("{0} not found")]
    NotFound(String),

    /// Anything unexpected. The detail is logged, never returned.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

/// Wire shape of every error body.
#[derive(Serialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    code: &'static str,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            ApiError::Provider(e) => {
                tracing::warn!(error = %e, "provider failure");
                (StatusCode::BAD_GATEWAY, "PROVIDER_ERROR", e.to_string())
            }
            ApiError::Core(e) => (StatusCode::BAD_REQUEST, "COMPUTATION_REJECTED", e.to_string()),
            ApiError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND", self.to_string()),
            ApiError::Internal(e) => {
                tracing::error!(error = ?e, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "internal server error".to_string(),
                )
            }
        };

        let body = ErrorResponse {
            error: ErrorDetail { code, message },
        };
        (status, Json(body)).into_response()
    }
}
