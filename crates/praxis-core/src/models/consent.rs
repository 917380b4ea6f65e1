use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::draft::{self, Draft};
use crate::error::ValidationError;
use crate::record::{Editable, Owned, Record};

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ConsentDocument {
    pub id: Uuid,
    pub user_id: String,
    #[serde(flatten)]
    pub details: ConsentFields,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
#[ts(export)]
pub struct ConsentFields {
    pub client_id: Uuid,
    pub title: String,
    /// e.g. "informed_consent", "release_of_information", "telehealth".
    pub consent_type: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub signed: bool,
    pub signed_at: Option<Timestamp>,
    pub expires_on: Option<jiff::civil::Date>,
}

impl Draft for ConsentFields {
    fn validate(&self) -> Result<(), ValidationError> {
        draft::require_text("title", &self.title)?;
        draft::require_text("consentType", &self.consent_type)?;
        if self.signed_at.is_some() && !self.signed {
            return Err(ValidationError::new(
                "signedAt",
                "signedAt requires signed to be true",
            ));
        }
        Ok(())
    }

    fn client_ref(&self) -> Option<Uuid> {
        Some(self.client_id)
    }
}

impl Record for ConsentDocument {
    const COLLECTION: &'static str = "consent-documents";
    const KIND: &'static str = "consent_document";

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> Timestamp {
        self.created_at
    }
}

impl Owned for ConsentDocument {
    fn owner_id(&self) -> &str {
        &self.user_id
    }
}

impl Editable for ConsentDocument {
    type Fields = ConsentFields;

    fn create(id: Uuid, user_id: String, details: ConsentFields, now: Timestamp) -> Self {
        Self {
            id,
            user_id,
            details,
            created_at: now,
            updated_at: now,
        }
    }

    fn fields(&self) -> &ConsentFields {
        &self.details
    }

    fn apply(&mut self, details: ConsentFields, now: Timestamp) {
        self.details = details;
        self.updated_at = now;
    }
}
