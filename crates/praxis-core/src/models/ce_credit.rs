use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::draft::{self, Draft};
use crate::error::ValidationError;
use crate::record::{Editable, Owned, Record};

/// Continuing-education credit earned by the provider for licensure.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CeCredit {
    pub id: Uuid,
    pub user_id: String,
    #[serde(flatten)]
    pub details: CeCreditFields,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
#[ts(export)]
pub struct CeCreditFields {
    pub title: String,
    pub organization: Option<String>,
    pub hours: f64,
    pub category: Option<String>,
    pub completed_on: jiff::civil::Date,
}

impl Draft for CeCreditFields {
    fn validate(&self) -> Result<(), ValidationError> {
        draft::require_text("title", &self.title)?;
        if !self.hours.is_finite() || self.hours <= 0.0 {
            return Err(ValidationError::new("hours", "hours must be a positive number"));
        }
        Ok(())
    }
}

impl Record for CeCredit {
    const COLLECTION: &'static str = "ce-credits";
    const KIND: &'static str = "ce_credit";

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> Timestamp {
        self.created_at
    }
}

impl Owned for CeCredit {
    fn owner_id(&self) -> &str {
        &self.user_id
    }
}

impl Editable for CeCredit {
    type Fields = CeCreditFields;

    fn create(id: Uuid, user_id: String, details: CeCreditFields, now: Timestamp) -> Self {
        Self {
            id,
            user_id,
            details,
            created_at: now,
            updated_at: now,
        }
    }

    fn fields(&self) -> &CeCreditFields {
        &self.details
    }

    fn apply(&mut self, details: CeCreditFields, now: Timestamp) {
        self.details = details;
        self.updated_at = now;
    }
}
