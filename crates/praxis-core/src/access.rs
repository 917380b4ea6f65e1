//! Ownership guard.
//!
//! Pure functions over an already-loaded record and the acting identity.
//! A missing record is `NotFound`; a record that exists under another
//! tenant is `Forbidden`.

use uuid::Uuid;

use crate::error::AccessError;
use crate::record::{Owned, PortalVisible};

/// Who is making a request. Resolved from the bearer token before any
/// guarded operation runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
    Provider { user_id: String },
    Portal(PortalSession),
}

/// A client signed in through the portal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortalSession {
    pub account_id: Uuid,
    pub client_id: Uuid,
    pub provider_id: String,
}

impl Identity {
    /// Stable actor label for logs and the audit trail.
    pub fn actor(&self) -> String {
        match self {
            Identity::Provider { user_id } => format!("provider:{user_id}"),
            Identity::Portal(session) => format!("portal:{}", session.account_id),
        }
    }

    /// The provider whose records this identity acts on.
    pub fn tenant(&self) -> &str {
        match self {
            Identity::Provider { user_id } => user_id,
            Identity::Portal(session) => &session.provider_id,
        }
    }
}

/// Admit `record` only if it is owned by `user_id`.
pub fn authorize_owner<T: Owned>(record: Option<T>, user_id: &str) -> Result<T, AccessError> {
    let record = record.ok_or(AccessError::NotFound)?;
    if record.owner_id() != user_id {
        return Err(AccessError::Forbidden);
    }
    Ok(record)
}

/// Admit `record` only if it is linked to the session's client and exposed
/// to the portal.
pub fn authorize_portal<T: PortalVisible>(
    record: Option<T>,
    session: &PortalSession,
) -> Result<T, AccessError> {
    let record = record.ok_or(AccessError::NotFound)?;
    if record.linked_client() != Some(session.client_id) || !record.visible_to_client() {
        return Err(AccessError::Forbidden);
    }
    Ok(record)
}

/// Keep only records owned by `user_id`.
pub fn owned_by<T: Owned>(records: Vec<T>, user_id: &str) -> Vec<T> {
    records
        .into_iter()
        .filter(|r| r.owner_id() == user_id)
        .collect()
}

/// Keep only records the portal session may see.
pub fn visible_to<T: PortalVisible>(records: Vec<T>, session: &PortalSession) -> Vec<T> {
    records
        .into_iter()
        .filter(|r| r.linked_client() == Some(session.client_id) && r.visible_to_client())
        .collect()
}
