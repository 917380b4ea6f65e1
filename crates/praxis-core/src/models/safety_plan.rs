use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::draft::{self, Draft};
use crate::error::ValidationError;
use crate::record::{Editable, Owned, Record};

/// A crisis safety plan (Stanley-Brown structure).
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SafetyPlan {
    pub id: Uuid,
    pub user_id: String,
    #[serde(flatten)]
    pub details: SafetyPlanFields,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
#[ts(export)]
pub struct SafetyPlanFields {
    pub client_id: Uuid,
    #[serde(default)]
    pub warning_signs: Vec<String>,
    #[serde(default)]
    pub coping_strategies: Vec<String>,
    #[serde(default)]
    pub reasons_for_living: Vec<String>,
    #[serde(default)]
    pub support_contacts: Vec<SafetyContact>,
    #[serde(default)]
    pub professional_contacts: Vec<SafetyContact>,
    pub environment_safety: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
#[ts(export)]
pub struct SafetyContact {
    pub name: String,
    pub phone: Option<String>,
    pub relationship: Option<String>,
}

impl Draft for SafetyPlanFields {
    fn validate(&self) -> Result<(), ValidationError> {
        draft::require_entries("warningSigns", &self.warning_signs)?;
        draft::require_entries("copingStrategies", &self.coping_strategies)?;
        draft::require_entries("reasonsForLiving", &self.reasons_for_living)?;
        for (field, contacts) in [
            ("supportContacts", &self.support_contacts),
            ("professionalContacts", &self.professional_contacts),
        ] {
            for (i, contact) in contacts.iter().enumerate() {
                draft::require_text(&format!("{field}[{i}].name"), &contact.name)?;
            }
        }
        Ok(())
    }

    fn client_ref(&self) -> Option<Uuid> {
        Some(self.client_id)
    }
}

impl Record for SafetyPlan {
    const COLLECTION: &'static str = "safety-plans";
    const KIND: &'static str = "safety_plan";

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> Timestamp {
        self.created_at
    }
}

impl Owned for SafetyPlan {
    fn owner_id(&self) -> &str {
        &self.user_id
    }
}

impl Editable for SafetyPlan {
    type Fields = SafetyPlanFields;

    fn create(id: Uuid, user_id: String, details: SafetyPlanFields, now: Timestamp) -> Self {
        Self {
            id,
            user_id,
            details,
            created_at: now,
            updated_at: now,
        }
    }

    fn fields(&self) -> &SafetyPlanFields {
        &self.details
    }

    fn apply(&mut self, details: SafetyPlanFields, now: Timestamp) {
        self.details = details;
        self.updated_at = now;
    }
}
