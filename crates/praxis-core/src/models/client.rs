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
pub struct Client {
    pub id: Uuid,
    pub user_id: String,
    #[serde(flatten)]
    pub details: ClientFields,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
#[ts(export)]
pub struct ClientFields {
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub date_of_birth: Option<jiff::civil::Date>,
    #[serde(default)]
    pub status: ClientStatus,
    #[serde(default)]
    pub diagnosis_codes: Vec<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ClientStatus {
    #[default]
    Active,
    Inactive,
    Waitlist,
    Discharged,
}

impl Client {
    /// Display name, also the string clinical notes link by.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.details.first_name.trim(), self.details.last_name.trim())
    }

    pub fn is_active(&self) -> bool {
        self.details.status == ClientStatus::Active
    }
}

impl Draft for ClientFields {
    fn validate(&self) -> Result<(), ValidationError> {
        draft::require_text("firstName", &self.first_name)?;
        draft::require_text("lastName", &self.last_name)?;
        if let Some(email) = &self.email {
            draft::require_email("email", email)?;
        }
        draft::require_entries("diagnosisCodes", &self.diagnosis_codes)
    }
}

impl Record for Client {
    const COLLECTION: &'static str = "clients";
    const KIND: &'static str = "client";

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> Timestamp {
        self.created_at
    }
}

impl Owned for Client {
    fn owner_id(&self) -> &str {
        &self.user_id
    }
}

impl Editable for Client {
    type Fields = ClientFields;

    fn create(id: Uuid, user_id: String, details: ClientFields, now: Timestamp) -> Self {
        Self {
            id,
            user_id,
            details,
            created_at: now,
            updated_at: now,
        }
    }

    fn fields(&self) -> &ClientFields {
        &self.details
    }

    fn apply(&mut self, details: ClientFields, now: Timestamp) {
        self.details = details;
        self.updated_at = now;
    }
}
