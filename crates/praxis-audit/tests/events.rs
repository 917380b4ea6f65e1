use std::sync::Arc;

use praxis_audit::events::AuditEvent;
use praxis_core::access::{Identity, PortalSession};
use praxis_core::models::audit::{AuditAction, AuditLogEntry};
use praxis_storage::error::StorageError;
use praxis_storage::memory::MemoryStore;
use praxis_storage::records::Records;
use praxis_storage::store::{BoxFuture, ObjectStore, StoredObject};
use uuid::Uuid;

fn provider() -> Identity {
    Identity::Provider {
        user_id: "provider-a".to_string(),
    }
}

#[tokio::test]
async fn provider_write_is_appended_to_tenant_log() {
    let records = Records::new(Arc::new(MemoryStore::new()));
    let id = Uuid::new_v4();

    AuditEvent::new(AuditAction::Create, "client", id, &provider())
        .record(&records)
        .await;

    let entries: Vec<AuditLogEntry> = records.list_owned("provider-a").await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].user_id, "provider-a");
    assert_eq!(entries[0].actor, "provider:provider-a");
    assert_eq!(entries[0].action, AuditAction::Create);
    assert_eq!(entries[0].resource_type, "client");
    assert_eq!(entries[0].resource_id, id.to_string());
}

#[tokio::test]
async fn portal_write_is_logged_under_the_provider() {
    let records = Records::new(Arc::new(MemoryStore::new()));
    let session = PortalSession {
        account_id: Uuid::new_v4(),
        client_id: Uuid::new_v4(),
        provider_id: "provider-a".to_string(),
    };

    let entry = AuditEvent::new(
        AuditAction::Submit,
        "intake_form",
        Uuid::new_v4(),
        &Identity::Portal(session.clone()),
    )
    .with_details(serde_json::json!({ "answered": 4 }))
    .persist(&records)
    .await
    .unwrap();

    assert_eq!(entry.user_id, "provider-a");
    assert_eq!(entry.actor, format!("portal:{}", session.account_id));
    assert_eq!(entry.details, Some(serde_json::json!({ "answered": 4 })));
}

struct BrokenStore;

impl ObjectStore for BrokenStore {
    fn get<'a>(&'a self, _key: &'a str) -> BoxFuture<'a, Result<StoredObject, StorageError>> {
        Box::pin(async { Err(StorageError::GetObject("down".to_string())) })
    }

    fn put<'a>(
        &'a self,
        _key: &'a str,
        _body: Vec<u8>,
        _content_type: Option<&'a str>,
    ) -> BoxFuture<'a, Result<(), StorageError>> {
        Box::pin(async { Err(StorageError::PutObject("down".to_string())) })
    }

    fn delete<'a>(&'a self, _key: &'a str) -> BoxFuture<'a, Result<(), StorageError>> {
        Box::pin(async { Err(StorageError::DeleteObject("down".to_string())) })
    }

    fn list<'a>(&'a self, _prefix: &'a str) -> BoxFuture<'a, Result<Vec<String>, StorageError>> {
        Box::pin(async { Err(StorageError::ListObjects("down".to_string())) })
    }
}

#[tokio::test]
async fn failed_append_is_swallowed_by_record() {
    let records = Records::new(Arc::new(BrokenStore));
    let event = AuditEvent::new(AuditAction::Delete, "task", Uuid::new_v4(), &provider());

    assert!(event.persist(&records).await.is_err());
    event.record(&records).await;
}
