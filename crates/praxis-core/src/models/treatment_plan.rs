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
pub struct TreatmentPlan {
    pub id: Uuid,
    pub user_id: String,
    #[serde(flatten)]
    pub details: TreatmentPlanFields,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
#[ts(export)]
pub struct TreatmentPlanFields {
    pub client_id: Uuid,
    pub title: String,
    #[serde(default)]
    pub diagnosis_codes: Vec<String>,
    #[serde(default)]
    pub goals: Vec<TreatmentGoal>,
    pub start_date: Option<jiff::civil::Date>,
    pub review_date: Option<jiff::civil::Date>,
    #[serde(default)]
    pub status: PlanStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
#[ts(export)]
pub struct TreatmentGoal {
    pub description: String,
    pub target_date: Option<jiff::civil::Date>,
    #[serde(default)]
    pub objectives: Vec<Objective>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
#[ts(export)]
pub struct Objective {
    pub description: String,
    #[serde(default)]
    pub status: ObjectiveStatus,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ObjectiveStatus {
    #[default]
    NotStarted,
    InProgress,
    Met,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum PlanStatus {
    #[default]
    Active,
    Completed,
    Discontinued,
}

impl Draft for TreatmentPlanFields {
    fn validate(&self) -> Result<(), ValidationError> {
        draft::require_text("title", &self.title)?;
        draft::require_entries("diagnosisCodes", &self.diagnosis_codes)?;
        for (g, goal) in self.goals.iter().enumerate() {
            draft::require_text(&format!("goals[{g}].description"), &goal.description)?;
            for (o, objective) in goal.objectives.iter().enumerate() {
                draft::require_text(
                    &format!("goals[{g}].objectives[{o}].description"),
                    &objective.description,
                )?;
            }
        }
        if let (Some(start), Some(review)) = (self.start_date, self.review_date)
            && review < start
        {
            return Err(ValidationError::new(
                "reviewDate",
                "reviewDate must not precede startDate",
            ));
        }
        Ok(())
    }

    fn client_ref(&self) -> Option<Uuid> {
        Some(self.client_id)
    }
}

impl Record for TreatmentPlan {
    const COLLECTION: &'static str = "treatment-plans";
    const KIND: &'static str = "treatment_plan";

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> Timestamp {
        self.created_at
    }
}

impl Owned for TreatmentPlan {
    fn owner_id(&self) -> &str {
        &self.user_id
    }
}

impl Editable for TreatmentPlan {
    type Fields = TreatmentPlanFields;

    fn create(id: Uuid, user_id: String, details: TreatmentPlanFields, now: Timestamp) -> Self {
        Self {
            id,
            user_id,
            details,
            created_at: now,
            updated_at: now,
        }
    }

    fn fields(&self) -> &TreatmentPlanFields {
        &self.details
    }

    fn apply(&mut self, details: TreatmentPlanFields, now: Timestamp) {
        self.details = details;
        self.updated_at = now;
    }
}
