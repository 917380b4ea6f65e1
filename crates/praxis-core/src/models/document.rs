use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::draft::{self, Draft};
use crate::error::ValidationError;
use crate::record::{Editable, Owned, PortalVisible, Record};

/// Metadata for an uploaded file. The bytes live at `keys::document_file(id)`.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Document {
    pub id: Uuid,
    pub user_id: String,
    #[serde(flatten)]
    pub details: DocumentFields,
    pub content_type: Option<String>,
    #[serde(default)]
    pub size_bytes: u64,
    pub uploaded_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
#[ts(export)]
pub struct DocumentFields {
    pub client_id: Option<Uuid>,
    pub title: String,
    pub category: Option<String>,
    pub file_name: Option<String>,
    /// Only shared documents are visible through the client portal.
    #[serde(default)]
    pub shared_with_client: bool,
}

impl Document {
    pub fn has_file(&self) -> bool {
        self.uploaded_at.is_some()
    }

    pub fn record_upload(&mut self, content_type: Option<String>, size_bytes: u64, now: Timestamp) {
        self.content_type = content_type;
        self.size_bytes = size_bytes;
        self.uploaded_at = Some(now);
        self.updated_at = now;
    }
}

impl Draft for DocumentFields {
    fn validate(&self) -> Result<(), ValidationError> {
        draft::require_text("title", &self.title)?;
        if self.shared_with_client && self.client_id.is_none() {
            return Err(ValidationError::new(
                "sharedWithClient",
                "a document must be linked to a client to be shared",
            ));
        }
        Ok(())
    }

    fn client_ref(&self) -> Option<Uuid> {
        self.client_id
    }
}

impl Record for Document {
    const COLLECTION: &'static str = "documents";
    const KIND: &'static str = "document";

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> Timestamp {
        self.created_at
    }
}

impl Owned for Document {
    fn owner_id(&self) -> &str {
        &self.user_id
    }
}

impl PortalVisible for Document {
    fn linked_client(&self) -> Option<Uuid> {
        self.details.client_id
    }

    fn visible_to_client(&self) -> bool {
        self.details.shared_with_client
    }
}

impl Editable for Document {
    type Fields = DocumentFields;

    fn create(id: Uuid, user_id: String, details: DocumentFields, now: Timestamp) -> Self {
        Self {
            id,
            user_id,
            details,
            content_type: None,
            size_bytes: 0,
            uploaded_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn fields(&self) -> &DocumentFields {
        &self.details
    }

    fn apply(&mut self, details: DocumentFields, now: Timestamp) {
        self.details = details;
        self.updated_at = now;
    }
}
