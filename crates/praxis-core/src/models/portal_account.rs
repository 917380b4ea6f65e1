use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::draft::{self, Draft};
use crate::error::ValidationError;
use crate::record::{Owned, Record};

/// Minimum length for a portal secret.
pub const MIN_SECRET_LEN: usize = 8;

/// A client-facing login, scoped to one client of one provider.
///
/// Never serialized to API responses directly; see [`PortalAccountView`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortalAccount {
    pub id: Uuid,
    pub user_id: String,
    pub client_id: Uuid,
    pub email: String,
    pub secret_hash: String,
    pub status: PortalStatus,
    pub last_login_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum PortalStatus {
    #[default]
    Active,
    Inactive,
    Suspended,
}

/// A portal account without its credential.
#[derive(Debug, Clone, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PortalAccountView {
    pub id: Uuid,
    pub client_id: Uuid,
    pub email: String,
    pub status: PortalStatus,
    pub last_login_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewPortalAccount {
    pub client_id: Uuid,
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PortalAccountUpdate {
    pub status: Option<PortalStatus>,
    pub password: Option<String>,
}

impl PortalAccount {
    pub fn is_active(&self) -> bool {
        self.status == PortalStatus::Active
    }

    /// Emails compare case-insensitively.
    pub fn matches_email(&self, email: &str) -> bool {
        self.email.eq_ignore_ascii_case(email.trim())
    }

    pub fn view(&self) -> PortalAccountView {
        PortalAccountView {
            id: self.id,
            client_id: self.client_id,
            email: self.email.clone(),
            status: self.status,
            last_login_at: self.last_login_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

fn require_secret(secret: &str) -> Result<(), ValidationError> {
    if secret.chars().count() < MIN_SECRET_LEN {
        return Err(ValidationError::new(
            "password",
            format!("password must be at least {MIN_SECRET_LEN} characters"),
        ));
    }
    Ok(())
}

impl Draft for NewPortalAccount {
    fn validate(&self) -> Result<(), ValidationError> {
        draft::require_email("email", &self.email)?;
        require_secret(&self.password)
    }

    fn client_ref(&self) -> Option<Uuid> {
        Some(self.client_id)
    }
}

impl Draft for PortalAccountUpdate {
    fn validate(&self) -> Result<(), ValidationError> {
        match &self.password {
            Some(secret) => require_secret(secret),
            None => Ok(()),
        }
    }
}

impl Record for PortalAccount {
    const COLLECTION: &'static str = "portal-accounts";
    const KIND: &'static str = "portal_account";

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> Timestamp {
        self.created_at
    }
}

impl Owned for PortalAccount {
    fn owner_id(&self) -> &str {
        &self.user_id
    }
}
