use jiff::Timestamp;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use praxis_core::access::Identity;
use praxis_core::models::audit::{AuditAction, AuditLogEntry};
use praxis_storage::records::Records;

use crate::error::AuditError;

/// A structured audit event for an API write.
///
/// Emitted via `tracing` so it lands in CloudWatch Logs, and appended to
/// the tenant's audit log.
#[derive(Debug, Clone, Serialize)]
pub struct AuditEvent {
    pub action: AuditAction,
    pub resource_type: String,
    pub resource_id: String,
    pub tenant: String,
    pub actor: String,
    pub details: Option<serde_json::Value>,
}

impl AuditEvent {
    pub fn new(
        action: AuditAction,
        resource_type: impl Into<String>,
        resource_id: impl ToString,
        identity: &Identity,
    ) -> Self {
        Self {
            action,
            resource_type: resource_type.into(),
            resource_id: resource_id.to_string(),
            tenant: identity.tenant().to_string(),
            actor: identity.actor(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Emit this audit event via tracing.
    pub fn emit(&self) {
        info!(
            audit.action = self.action.as_str(),
            audit.resource_type = %self.resource_type,
            audit.resource_id = %self.resource_id,
            audit.tenant = %self.tenant,
            audit.actor = %self.actor,
            "audit event"
        );
    }

    pub fn to_entry(&self, now: Timestamp) -> AuditLogEntry {
        AuditLogEntry {
            id: Uuid::new_v4(),
            user_id: self.tenant.clone(),
            actor: self.actor.clone(),
            action: self.action,
            resource_type: self.resource_type.clone(),
            resource_id: self.resource_id.clone(),
            timestamp: now,
            details: self.details.clone(),
        }
    }

    /// Store this event in the audit log.
    pub async fn persist(&self, records: &Records) -> Result<AuditLogEntry, AuditError> {
        let entry = self.to_entry(Timestamp::now());
        records.save(&entry).await?;
        Ok(entry)
    }

    /// Emit and store. A failed append is logged and swallowed so the write
    /// it describes still succeeds.
    pub async fn record(self, records: &Records) {
        self.emit();
        if let Err(e) = self.persist(records).await {
            warn!(
                error = %e,
                audit.action = self.action.as_str(),
                audit.resource_id = %self.resource_id,
                "failed to append audit log entry"
            );
        }
    }
}
