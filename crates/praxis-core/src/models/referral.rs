use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::draft::{self, Draft};
use crate::error::ValidationError;
use crate::record::{Editable, Owned, Record};

/// An outbound referral of a client to another practitioner or service.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Referral {
    pub id: Uuid,
    pub user_id: String,
    #[serde(flatten)]
    pub details: ReferralFields,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
#[ts(export)]
pub struct ReferralFields {
    pub client_id: Uuid,
    pub referred_to: String,
    pub specialty: Option<String>,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub status: ReferralStatus,
    pub referral_date: Option<jiff::civil::Date>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ReferralStatus {
    #[default]
    Pending,
    Sent,
    Accepted,
    Completed,
    Declined,
}

impl Draft for ReferralFields {
    fn validate(&self) -> Result<(), ValidationError> {
        draft::require_text("referredTo", &self.referred_to)
    }

    fn client_ref(&self) -> Option<Uuid> {
        Some(self.client_id)
    }
}

impl Record for Referral {
    const COLLECTION: &'static str = "referrals";
    const KIND: &'static str = "referral";

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> Timestamp {
        self.created_at
    }
}

impl Owned for Referral {
    fn owner_id(&self) -> &str {
        &self.user_id
    }
}

impl Editable for Referral {
    type Fields = ReferralFields;

    fn create(id: Uuid, user_id: String, details: ReferralFields, now: Timestamp) -> Self {
        Self {
            id,
            user_id,
            details,
            created_at: now,
            updated_at: now,
        }
    }

    fn fields(&self) -> &ReferralFields {
        &self.details
    }

    fn apply(&mut self, details: ReferralFields, now: Timestamp) {
        self.details = details;
        self.updated_at = now;
    }
}
