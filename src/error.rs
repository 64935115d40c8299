//! HTTP error mapping for handler failures.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use compute::ForecastError;
use thiserror::Error;
use tracing::error;

use crate::schemas::ErrorResponse;

/// Application error type for HTTP handlers.
#[derive(Debug, Error)]
pub enum AppError {
    /// Invalid request parameters
    #[error("{0}")]
    BadRequest(String),
    /// Anything the client cannot fix
    #[error("{0}")]
    Internal(String),
}

impl From<ForecastError> for AppError {
    fn from(err: ForecastError) -> Self {
        match err {
            ForecastError::InvalidCapacity(_) => AppError::BadRequest(err.to_string()),
            other => {
                error!(error = %other, "Forecast computation failed");
                AppError::Internal(other.to_string())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        let body = ErrorResponse {
            error: self.to_string(),
            code: code.to_string(),
            success: false,
        };
        (status, Json(body)).into_response()
    }
}
