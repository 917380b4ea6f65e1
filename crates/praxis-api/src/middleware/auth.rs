//! Bearer token middleware and the identity extractors that read its result.
//!
//! Provider routes and portal routes each get their own layer. A token of
//! the wrong kind fails verification and is answered with 401, as is a
//! portal token whose account was deactivated or removed.

use axum::extract::{FromRequestParts, Request, State};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;
use tracing::debug;

use praxis_core::access::{Identity, PortalSession};
use praxis_core::models::portal_account::PortalAccount;

use crate::error::ApiError;
use crate::state::AppState;

/// Require a valid provider token. Inserts `Identity::Provider`.
pub async fn require_provider(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(&req)?;
    let claims = state.provider_tokens.verify(&token).map_err(|e| {
        debug!(error = %e, "provider token rejected");
        unauthenticated()
    })?;

    let identity = Identity::Provider {
        user_id: claims.sub,
    };
    req.extensions_mut().insert(identity.clone());

    let mut response = next.run(req).await;
    response.extensions_mut().insert(identity);
    Ok(response)
}

/// Require a valid portal session token. Inserts `Identity::Portal`.
pub async fn require_portal(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(&req)?;
    let session = state.portal_tokens.verify(&token).map_err(|e| {
        debug!(error = %e, "portal token rejected");
        unauthenticated()
    })?;

    // The account behind the session must still exist, be active, and link
    // the same client and provider.
    let account = state
        .records
        .load::<PortalAccount>(session.account_id)
        .await?;
    let current = account.is_some_and(|a| {
        a.is_active() && a.client_id == session.client_id && a.user_id == session.provider_id
    });
    if !current {
        debug!(account_id = %session.account_id, "portal session no longer valid");
        return Err(unauthenticated());
    }

    let identity = Identity::Portal(session);
    req.extensions_mut().insert(identity.clone());

    let mut response = next.run(req).await;
    response.extensions_mut().insert(identity);
    Ok(response)
}

fn bearer_token(req: &Request) -> Result<String, ApiError> {
    let token = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(unauthenticated)?;
    Ok(token.to_string())
}

fn unauthenticated() -> ApiError {
    ApiError::Unauthenticated("authentication required".to_string())
}

/// Authenticated provider, from `require_provider`.
#[derive(Clone, Debug)]
pub struct ProviderUser {
    pub user_id: String,
}

impl ProviderUser {
    pub fn identity(&self) -> Identity {
        Identity::Provider {
            user_id: self.user_id.clone(),
        }
    }
}

impl<S: Send + Sync> FromRequestParts<S> for ProviderUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match parts.extensions.get::<Identity>() {
            Some(Identity::Provider { user_id }) => Ok(ProviderUser {
                user_id: user_id.clone(),
            }),
            _ => Err(unauthenticated()),
        }
    }
}

/// Authenticated portal client, from `require_portal`.
#[derive(Clone, Debug)]
pub struct PortalUser(pub PortalSession);

impl PortalUser {
    pub fn identity(&self) -> Identity {
        Identity::Portal(self.0.clone())
    }
}

impl<S: Send + Sync> FromRequestParts<S> for PortalUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match parts.extensions.get::<Identity>() {
            Some(Identity::Portal(session)) => Ok(PortalUser(session.clone())),
            _ => Err(unauthenticated()),
        }
    }
}
