//! Client portal: sign-in plus read access to shared records, intake form
//! submission, and messaging, all scoped to the signed-in client.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;
use axum::Json;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use praxis_audit::events::AuditEvent;
use praxis_core::access::{self, Identity, PortalSession};
use praxis_core::draft::{self, Draft};
use praxis_core::models::audit::AuditAction;
use praxis_core::models::document::Document;
use praxis_core::models::intake_form::{IntakeForm, IntakeSubmission};
use praxis_core::models::message::{Message, MessageThread, SenderType};
use praxis_core::models::portal_account::PortalAccount;
use praxis_core::record::Record;

use crate::error::ApiError;
use crate::extract::{RecordId, json_body};
use crate::guard;
use crate::middleware::auth::PortalUser;
use crate::routes::{documents, portal_accounts, threads};
use crate::state::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl Draft for LoginRequest {}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub client_id: Uuid,
    pub expires_at: Timestamp,
}

fn login_failed() -> ApiError {
    ApiError::Unauthenticated("invalid email or password".to_string())
}

pub async fn login(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<LoginResponse>, ApiError> {
    let request: LoginRequest = draft::parse(json_body(&body)?)?;

    let Some(mut account) = portal_accounts::find_by_email(&state, &request.email).await? else {
        warn!(reason = "unknown_email", "portal login failed");
        return Err(login_failed());
    };

    if !portal_accounts::verify_secret(request.password, account.secret_hash.clone()).await? {
        warn!(account_id = %account.id, reason = "wrong_secret", "portal login failed");
        return Err(login_failed());
    }
    if !account.is_active() {
        warn!(account_id = %account.id, reason = "inactive", "portal login failed");
        return Err(login_failed());
    }

    let now = Timestamp::now();
    account.last_login_at = Some(now);
    state.records.save(&account).await?;

    let session = PortalSession {
        account_id: account.id,
        client_id: account.client_id,
        provider_id: account.user_id.clone(),
    };
    let issued = state.portal_tokens.issue(&session, now)?;

    AuditEvent::new(
        AuditAction::Login,
        PortalAccount::KIND,
        account.id,
        &Identity::Portal(session),
    )
    .record(&state.records)
    .await;
    info!(account_id = %account.id, "portal login");

    Ok(Json(LoginResponse {
        token: issued.token,
        client_id: account.client_id,
        expires_at: issued.expires_at,
    }))
}

pub async fn list_documents(
    State(state): State<AppState>,
    portal: PortalUser,
) -> Result<Json<Vec<Document>>, ApiError> {
    let documents = state
        .records
        .list_owned::<Document>(&portal.0.provider_id)
        .await?;
    Ok(Json(access::visible_to(documents, &portal.0)))
}

pub async fn get_document(
    State(state): State<AppState>,
    RecordId(id): RecordId,
    portal: PortalUser,
) -> Result<Json<Document>, ApiError> {
    let document: Document = guard::visible(&state, id, &portal).await?;
    Ok(Json(document))
}

pub async fn download_document(
    State(state): State<AppState>,
    RecordId(id): RecordId,
    portal: PortalUser,
) -> Result<Response, ApiError> {
    let document: Document = guard::visible(&state, id, &portal).await?;
    documents::file_response(&state, &document).await
}

pub async fn list_intake_forms(
    State(state): State<AppState>,
    portal: PortalUser,
) -> Result<Json<Vec<IntakeForm>>, ApiError> {
    let forms = state
        .records
        .list_owned::<IntakeForm>(&portal.0.provider_id)
        .await?;
    Ok(Json(access::visible_to(forms, &portal.0)))
}

pub async fn get_intake_form(
    State(state): State<AppState>,
    RecordId(id): RecordId,
    portal: PortalUser,
) -> Result<Json<IntakeForm>, ApiError> {
    let form: IntakeForm = guard::visible(&state, id, &portal).await?;
    Ok(Json(form))
}

/// Answer an intake form. Allowed until the provider marks it reviewed.
pub async fn submit_intake_form(
    State(state): State<AppState>,
    RecordId(id): RecordId,
    portal: PortalUser,
    body: Bytes,
) -> Result<Json<IntakeForm>, ApiError> {
    let mut form: IntakeForm = guard::visible(&state, id, &portal).await?;
    let submission: IntakeSubmission = draft::parse(json_body(&body)?)?;
    let answered = submission.responses.len();

    form.submit(submission, Timestamp::now())?;
    state.records.save(&form).await?;

    AuditEvent::new(AuditAction::Submit, IntakeForm::KIND, id, &portal.identity())
        .with_details(serde_json::json!({ "answered": answered }))
        .record(&state.records)
        .await;

    Ok(Json(form))
}

pub async fn list_threads(
    State(state): State<AppState>,
    portal: PortalUser,
) -> Result<Json<Vec<MessageThread>>, ApiError> {
    let threads = state
        .records
        .list_owned::<MessageThread>(&portal.0.provider_id)
        .await?;
    Ok(Json(access::visible_to(threads, &portal.0)))
}

pub async fn get_thread(
    State(state): State<AppState>,
    RecordId(id): RecordId,
    portal: PortalUser,
) -> Result<Json<MessageThread>, ApiError> {
    let thread: MessageThread = guard::visible(&state, id, &portal).await?;
    Ok(Json(thread))
}

pub async fn list_messages(
    State(state): State<AppState>,
    RecordId(id): RecordId,
    portal: PortalUser,
) -> Result<Json<Vec<Message>>, ApiError> {
    let thread: MessageThread = guard::visible(&state, id, &portal).await?;
    let messages = threads::read_messages(&state, &thread, SenderType::Client).await?;
    Ok(Json(messages))
}

pub async fn post_message(
    State(state): State<AppState>,
    RecordId(id): RecordId,
    portal: PortalUser,
    body: Bytes,
) -> Result<(StatusCode, Json<Message>), ApiError> {
    let thread: MessageThread = guard::visible(&state, id, &portal).await?;
    let message =
        threads::send(&state, thread, SenderType::Client, &body, &portal.identity()).await?;
    Ok((StatusCode::CREATED, Json(message)))
}
