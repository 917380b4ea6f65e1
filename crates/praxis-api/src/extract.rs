//! Request extractors shared by the route handlers.

use axum::body::Bytes;
use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use serde_json::Value;
use uuid::Uuid;

use praxis_core::error::ValidationError;

use crate::error::ApiError;

/// The `{id}` path segment of a member route.
///
/// Ids that are not UUIDs cannot name a stored record and are reported as
/// not found.
#[derive(Debug, Clone, Copy)]
pub struct RecordId(pub Uuid);

impl<S: Send + Sync> FromRequestParts<S> for RecordId {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::NotFound(e.to_string()))?;
        let id = Uuid::parse_str(&raw)
            .map_err(|_| ApiError::NotFound(format!("resource not found: {raw}")))?;
        Ok(RecordId(id))
    }
}

/// Parse a request body as JSON, whatever its declared content type.
pub fn json_body(body: &Bytes) -> Result<Value, ApiError> {
    if body.is_empty() {
        return Err(ValidationError::body("request body is empty").into());
    }
    serde_json::from_slice(body)
        .map_err(|e| ValidationError::body(format!("request body is not valid JSON: {e}")).into())
}
