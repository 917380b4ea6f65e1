use axum::extract::State;
use axum::Json;

use praxis_core::models::audit::AuditLogEntry;

use crate::error::ApiError;
use crate::middleware::auth::ProviderUser;
use crate::state::AppState;

/// The provider's audit trail, newest first.
pub async fn list_entries(
    State(state): State<AppState>,
    user: ProviderUser,
) -> Result<Json<Vec<AuditLogEntry>>, ApiError> {
    let entries = state.records.list_owned::<AuditLogEntry>(&user.user_id).await?;
    Ok(Json(entries))
}
