//! Error types for the registration API.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use registration_store::{FieldError, StoreError, ValidationError};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error};

/// API error types.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    BadRequest(String),

    #[error("{message}")]
    InvalidBody { status: StatusCode, message: String },

    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub detail: String,
    pub code: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldError>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, fields) = match &self {
            ApiError::Validation(e) => {
                debug!(error = %e, "Rejected registration");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "VALIDATION_ERROR",
                    e.errors().to_vec(),
                )
            }
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", Vec::new()),
            ApiError::InvalidBody { status, .. } => (*status, "INVALID_BODY", Vec::new()),
            ApiError::Storage(e) => {
                error!(error = %e, "Storage failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "STORAGE_ERROR",
                    Vec::new(),
                )
            }
        };

        // Storage details stay in the logs.
        let detail = match &self {
            ApiError::Storage(_) => "Internal server error".to_string(),
            other => other.to_string(),
        };

        let body = ErrorResponse {
            detail,
            code: code.to_string(),
            fields,
        };

        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidBody {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}
