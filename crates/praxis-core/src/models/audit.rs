use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::record::{Owned, Record};

/// One append-only audit trail entry. `user_id` is the owning provider
/// (the tenant); `actor` is who performed the action.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct AuditLogEntry {
    pub id: Uuid,
    pub user_id: String,
    pub actor: String,
    pub action: AuditAction,
    pub resource_type: String,
    pub resource_id: String,
    pub timestamp: Timestamp,
    pub details: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum AuditAction {
    Create,
    Update,
    Delete,
    Upload,
    Submit,
    Suggest,
    Login,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::Create => "create",
            AuditAction::Update => "update",
            AuditAction::Delete => "delete",
            AuditAction::Upload => "upload",
            AuditAction::Submit => "submit",
            AuditAction::Suggest => "suggest",
            AuditAction::Login => "login",
        }
    }
}

impl Record for AuditLogEntry {
    const COLLECTION: &'static str = "audit-log";
    const KIND: &'static str = "audit_log_entry";

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> Timestamp {
        self.timestamp
    }
}

impl Owned for AuditLogEntry {
    fn owner_id(&self) -> &str {
        &self.user_id
    }
}
