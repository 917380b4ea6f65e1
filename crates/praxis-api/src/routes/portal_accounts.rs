//! Provider management of client portal logins.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use jiff::Timestamp;
use tracing::warn;
use uuid::Uuid;

use praxis_audit::events::AuditEvent;
use praxis_auth::password;
use praxis_core::draft::{self, Draft};
use praxis_core::error::ValidationError;
use praxis_core::keys;
use praxis_core::models::audit::AuditAction;
use praxis_core::models::portal_account::{
    NewPortalAccount, PortalAccount, PortalAccountUpdate, PortalAccountView,
};
use praxis_core::record::Record;

use crate::error::ApiError;
use crate::extract::{RecordId, json_body};
use crate::guard;
use crate::middleware::auth::ProviderUser;
use crate::state::AppState;

pub async fn list_accounts(
    State(state): State<AppState>,
    user: ProviderUser,
) -> Result<Json<Vec<PortalAccountView>>, ApiError> {
    let accounts = state.records.list_owned::<PortalAccount>(&user.user_id).await?;
    let views = accounts
        .iter()
        .map(PortalAccount::view)
        .collect();
    Ok(Json(views))
}

pub async fn create_account(
    State(state): State<AppState>,
    user: ProviderUser,
    body: Bytes,
) -> Result<(StatusCode, Json<PortalAccountView>), ApiError> {
    let new: NewPortalAccount = draft::parse(json_body(&body)?)?;
    guard::ensure_client_owned(&state, new.client_ref(), &user.user_id).await?;

    let email = new.email.trim().to_string();
    if find_by_email(&state, &email).await?.is_some() {
        return Err(ValidationError::new("email", "email is already in use").into());
    }

    let now = Timestamp::now();
    let account = PortalAccount {
        id: Uuid::new_v4(),
        user_id: user.user_id.clone(),
        client_id: new.client_id,
        email,
        secret_hash: hash_secret(new.password, state.hash_iterations).await?,
        status: Default::default(),
        last_login_at: None,
        created_at: now,
        updated_at: now,
    };
    state.records.save(&account).await?;
    state
        .records
        .put_blob(
            &keys::portal_login(&account.email),
            account.id.to_string().into_bytes(),
            Some("text/plain"),
        )
        .await?;

    AuditEvent::new(
        AuditAction::Create,
        PortalAccount::KIND,
        account.id,
        &user.identity(),
    )
    .record(&state.records)
    .await;

    Ok((StatusCode::CREATED, Json(account.view())))
}

/// Change an account's status and/or reset its secret.
pub async fn update_account(
    State(state): State<AppState>,
    RecordId(id): RecordId,
    user: ProviderUser,
    body: Bytes,
) -> Result<Json<PortalAccountView>, ApiError> {
    let mut account: PortalAccount = guard::owned(&state, id, &user).await?;
    let update: PortalAccountUpdate = draft::parse(json_body(&body)?)?;

    let secret_reset = update.password.is_some();
    if let Some(status) = update.status {
        account.status = status;
    }
    if let Some(secret) = update.password {
        account.secret_hash = hash_secret(secret, state.hash_iterations).await?;
    }
    account.updated_at = Timestamp::now();
    state.records.save(&account).await?;

    AuditEvent::new(AuditAction::Update, PortalAccount::KIND, id, &user.identity())
        .with_details(serde_json::json!({
            "status": account.status,
            "secretReset": secret_reset,
        }))
        .record(&state.records)
        .await;

    Ok(Json(account.view()))
}

pub async fn delete_account(
    State(state): State<AppState>,
    RecordId(id): RecordId,
    user: ProviderUser,
) -> Result<StatusCode, ApiError> {
    let account: PortalAccount = guard::owned(&state, id, &user).await?;
    state.records.remove(&account).await?;
    state
        .records
        .delete_blob(&keys::portal_login(&account.email))
        .await?;

    AuditEvent::new(AuditAction::Delete, PortalAccount::KIND, id, &user.identity())
        .record(&state.records)
        .await;

    Ok(StatusCode::NO_CONTENT)
}

/// The account signing in with `email`, through the login lookup entry.
pub(crate) async fn find_by_email(
    state: &AppState,
    email: &str,
) -> Result<Option<PortalAccount>, ApiError> {
    let Some(entry) = state.records.get_blob(&keys::portal_login(email)).await? else {
        return Ok(None);
    };
    let Some(id) = std::str::from_utf8(&entry.body)
        .ok()
        .and_then(|raw| Uuid::parse_str(raw.trim()).ok())
    else {
        warn!("unreadable portal login entry");
        return Ok(None);
    };
    let account = state.records.load::<PortalAccount>(id).await?;
    Ok(account.filter(|a| a.matches_email(email)))
}

/// PBKDF2 runs off the async workers.
pub(crate) async fn hash_secret(secret: String, iterations: u32) -> Result<String, ApiError> {
    tokio::task::spawn_blocking(move || password::hash_secret(&secret, iterations))
        .await
        .map_err(|e| ApiError::Internal(format!("secret hashing task failed: {e}")))
}

pub(crate) async fn verify_secret(secret: String, stored: String) -> Result<bool, ApiError> {
    tokio::task::spawn_blocking(move || password::verify_secret(&secret, &stored))
        .await
        .map_err(|e| ApiError::Internal(format!("secret verification task failed: {e}")))?
        .map_err(ApiError::from)
}
