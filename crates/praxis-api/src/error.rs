use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use praxis_core::error::{AccessError, ValidationError};

/// Unified API error type for all route handlers.
#[derive(Debug)]
pub enum ApiError {
    Validation {
        field: Option<String>,
        message: String,
    },
    Unauthenticated(String),
    Forbidden(String),
    NotFound(String),
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, field) = match self {
            ApiError::Validation { field, message } => (StatusCode::BAD_REQUEST, message, field),
            ApiError::Unauthenticated(msg) => (StatusCode::UNAUTHORIZED, msg, None),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg, None),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, None),
            ApiError::Internal(msg) => {
                tracing::error!("internal error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                    None,
                )
            }
        };

        (status, Json(ErrorBody { error: message, field })).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        ApiError::Validation {
            field: e.field,
            message: e.message,
        }
    }
}

impl From<AccessError> for ApiError {
    fn from(e: AccessError) -> Self {
        match e {
            AccessError::NotFound => ApiError::NotFound(e.to_string()),
            AccessError::Forbidden => ApiError::Forbidden(e.to_string()),
        }
    }
}

impl From<praxis_storage::error::StorageError> for ApiError {
    fn from(e: praxis_storage::error::StorageError) -> Self {
        match e {
            praxis_storage::error::StorageError::NotFound { .. } => {
                ApiError::NotFound("resource not found".to_string())
            }
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<praxis_bedrock::error::BedrockError> for ApiError {
    fn from(e: praxis_bedrock::error::BedrockError) -> Self {
        ApiError::Internal(e.to_string())
    }
}

impl From<praxis_auth::error::AuthError> for ApiError {
    fn from(e: praxis_auth::error::AuthError) -> Self {
        ApiError::Internal(e.to_string())
    }
}

impl From<praxis_instruments::error::InstrumentError> for ApiError {
    fn from(e: praxis_instruments::error::InstrumentError) -> Self {
        ApiError::NotFound(e.to_string())
    }
}
