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
pub struct BillingRecord {
    pub id: Uuid,
    pub user_id: String,
    #[serde(flatten)]
    pub details: BillingFields,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
#[ts(export)]
pub struct BillingFields {
    pub client_id: Uuid,
    pub service_date: jiff::civil::Date,
    pub cpt_code: String,
    /// Charge in cents.
    pub amount_cents: i64,
    #[serde(default)]
    pub status: BillingStatus,
    pub payer: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum BillingStatus {
    #[default]
    Pending,
    Submitted,
    Paid,
    Denied,
}

impl Draft for BillingFields {
    fn validate(&self) -> Result<(), ValidationError> {
        draft::require_text("cptCode", &self.cpt_code)?;
        if self.amount_cents < 0 {
            return Err(ValidationError::new(
                "amountCents",
                "amountCents must not be negative",
            ));
        }
        Ok(())
    }

    fn client_ref(&self) -> Option<Uuid> {
        Some(self.client_id)
    }
}

impl Record for BillingRecord {
    const COLLECTION: &'static str = "billing";
    const KIND: &'static str = "billing_record";

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> Timestamp {
        self.created_at
    }
}

impl Owned for BillingRecord {
    fn owner_id(&self) -> &str {
        &self.user_id
    }
}

impl Editable for BillingRecord {
    type Fields = BillingFields;

    fn create(id: Uuid, user_id: String, details: BillingFields, now: Timestamp) -> Self {
        Self {
            id,
            user_id,
            details,
            created_at: now,
            updated_at: now,
        }
    }

    fn fields(&self) -> &BillingFields {
        &self.details
    }

    fn apply(&mut self, details: BillingFields, now: Timestamp) {
        self.details = details;
        self.updated_at = now;
    }
}
