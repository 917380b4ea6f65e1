use axum::body::{Body, Bytes};
use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use jiff::Timestamp;

use praxis_audit::events::AuditEvent;
use praxis_core::keys;
use praxis_core::models::audit::AuditAction;
use praxis_core::models::document::Document;
use praxis_core::record::Record;

use crate::error::ApiError;
use crate::extract::RecordId;
use crate::guard;
use crate::middleware::auth::ProviderUser;
use crate::state::AppState;

/// Delete a document record and its file.
pub async fn delete_document(
    State(state): State<AppState>,
    RecordId(id): RecordId,
    user: ProviderUser,
) -> Result<StatusCode, ApiError> {
    let document: Document = guard::owned(&state, id, &user).await?;
    if document.has_file() {
        state.records.delete_blob(&keys::document_file(id)).await?;
    }
    state.records.remove(&document).await?;

    AuditEvent::new(AuditAction::Delete, Document::KIND, id, &user.identity())
        .record(&state.records)
        .await;

    Ok(StatusCode::NO_CONTENT)
}

/// Store the request body as the document's file, replacing any previous one.
pub async fn upload_file(
    State(state): State<AppState>,
    RecordId(id): RecordId,
    user: ProviderUser,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Document>, ApiError> {
    let mut document: Document = guard::owned(&state, id, &user).await?;

    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string());
    let size_bytes = body.len() as u64;

    state
        .records
        .put_blob(&keys::document_file(id), body.to_vec(), content_type.as_deref())
        .await?;
    document.record_upload(content_type, size_bytes, Timestamp::now());
    state.records.save(&document).await?;

    AuditEvent::new(AuditAction::Upload, Document::KIND, id, &user.identity())
        .with_details(serde_json::json!({ "sizeBytes": size_bytes }))
        .record(&state.records)
        .await;

    Ok(Json(document))
}

pub async fn download_file(
    State(state): State<AppState>,
    RecordId(id): RecordId,
    user: ProviderUser,
) -> Result<Response, ApiError> {
    let document: Document = guard::owned(&state, id, &user).await?;
    file_response(&state, &document).await
}

/// Stream a document's stored bytes. 404 when nothing was uploaded.
pub async fn file_response(state: &AppState, document: &Document) -> Result<Response, ApiError> {
    let blob = state
        .records
        .get_blob(&keys::document_file(document.id))
        .await?
        .ok_or_else(|| ApiError::NotFound("no file uploaded for this document".to_string()))?;

    let content_type = blob
        .content_type
        .or_else(|| document.content_type.clone())
        .unwrap_or_else(|| "application/octet-stream".to_string());

    Ok(([(CONTENT_TYPE, content_type)], Body::from(blob.body)).into_response())
}
