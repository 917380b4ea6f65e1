//! Load-then-authorize helpers wrapping the pure ownership guard.

use tracing::warn;
use uuid::Uuid;

use praxis_core::access::{self, Identity};
use praxis_core::error::{AccessError, ValidationError};
use praxis_core::models::client::Client;
use praxis_core::record::{Owned, PortalVisible};

use crate::error::ApiError;
use crate::middleware::auth::{PortalUser, ProviderUser};
use crate::state::AppState;

/// Load a record the provider owns.
pub async fn owned<T: Owned>(
    state: &AppState,
    id: Uuid,
    user: &ProviderUser,
) -> Result<T, ApiError> {
    let record = state.records.load::<T>(id).await?;
    access::authorize_owner(record, &user.user_id)
        .map_err(|e| denied(T::KIND, id, &user.identity(), e))
}

/// Load a record the portal client may see.
pub async fn visible<T: PortalVisible>(
    state: &AppState,
    id: Uuid,
    portal: &PortalUser,
) -> Result<T, ApiError> {
    let record = state.records.load::<T>(id).await?;
    access::authorize_portal(record, &portal.0)
        .map_err(|e| denied(T::KIND, id, &portal.identity(), e))
}

fn denied(kind: &str, id: Uuid, identity: &Identity, err: AccessError) -> ApiError {
    if err == AccessError::Forbidden {
        warn!(
            resource_type = kind,
            resource_id = %id,
            actor = %identity.actor(),
            "access denied"
        );
    }
    err.into()
}

/// A referenced client must exist and belong to the same provider.
pub async fn ensure_client_owned(
    state: &AppState,
    client_id: Option<Uuid>,
    user_id: &str,
) -> Result<(), ApiError> {
    let Some(client_id) = client_id else {
        return Ok(());
    };
    match state.records.load::<Client>(client_id).await? {
        Some(client) if client.user_id == user_id => Ok(()),
        _ => Err(ValidationError::new("clientId", format!("unknown client: {client_id}")).into()),
    }
}
