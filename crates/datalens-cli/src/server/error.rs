//! API error types and handling.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use datalens::{DatalensError, ErrorKind};
use serde::Serialize;
use tracing::error;

/// Message returned for every internal failure.
const ANALYSIS_FAILED: &str = "Analysis failed";

/// API error type.
#[derive(Debug)]
pub enum ApiError {
    /// Bad request from client.
    BadRequest(String),
    /// Upload exceeded the configured body limit.
    PayloadTooLarge(String),
    /// Error from the datalens library.
    Datalens(DatalensError),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl ErrorResponse {
    fn client(message: String) -> Self {
        Self {
            error: message,
            details: None,
        }
    }

    fn internal(details: String) -> Self {
        Self {
            error: ANALYSIS_FAILED.to_string(),
            details: Some(details),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ErrorResponse::client(msg)),
            ApiError::PayloadTooLarge(msg) => {
                (StatusCode::PAYLOAD_TOO_LARGE, ErrorResponse::client(msg))
            }
            ApiError::Datalens(e) if e.kind() == ErrorKind::InvalidInput => {
                (StatusCode::BAD_REQUEST, ErrorResponse::client(e.to_string()))
            }
            ApiError::Datalens(e) => {
                error!(error = %e, "analysis failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::internal(e.to_string()),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<DatalensError> for ApiError {
    fn from(err: DatalensError) -> Self {
        ApiError::Datalens(err)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::PayloadTooLarge(msg) => write!(f, "Payload too large: {}", msg),
            ApiError::Datalens(e) => write!(f, "DataLens error: {}", e),
        }
    }
}

impl std::error::Error for ApiError {}
