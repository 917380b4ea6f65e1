use std::collections::BTreeMap;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::draft::{self, Draft};
use crate::error::ValidationError;
use crate::record::{Editable, Owned, PortalVisible, Record};

/// A questionnaire the provider sends to a client, answered through the portal.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct IntakeForm {
    pub id: Uuid,
    pub user_id: String,
    #[serde(flatten)]
    pub details: IntakeFormFields,
    /// Answers keyed by question id. Written only by the portal.
    #[serde(default)]
    pub responses: BTreeMap<String, String>,
    pub submitted_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
#[ts(export)]
pub struct IntakeFormFields {
    pub client_id: Uuid,
    pub title: String,
    #[serde(default)]
    pub questions: Vec<IntakeQuestion>,
    #[serde(default)]
    pub status: IntakeStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
#[ts(export)]
pub struct IntakeQuestion {
    pub id: String,
    pub prompt: String,
    #[serde(default)]
    pub required: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum IntakeStatus {
    #[default]
    Pending,
    Submitted,
    Reviewed,
}

/// Portal payload answering an intake form.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct IntakeSubmission {
    pub responses: BTreeMap<String, String>,
}

impl Draft for IntakeSubmission {}

impl IntakeForm {
    /// Record the client's answers and mark the form submitted.
    pub fn submit(
        &mut self,
        submission: IntakeSubmission,
        now: Timestamp,
    ) -> Result<(), ValidationError> {
        if self.details.status == IntakeStatus::Reviewed {
            return Err(ValidationError::new(
                "status",
                "form has already been reviewed",
            ));
        }

        for key in submission.responses.keys() {
            if !self.details.questions.iter().any(|q| &q.id == key) {
                return Err(ValidationError::new(
                    format!("responses.{key}"),
                    format!("unknown question: {key}"),
                ));
            }
        }
        for question in self.details.questions.iter().filter(|q| q.required) {
            let answered = submission
                .responses
                .get(&question.id)
                .is_some_and(|a| !a.trim().is_empty());
            if !answered {
                return Err(ValidationError::new(
                    format!("responses.{}", question.id),
                    format!("question {} requires an answer", question.id),
                ));
            }
        }

        self.responses = submission.responses;
        self.details.status = IntakeStatus::Submitted;
        self.submitted_at = Some(now);
        self.updated_at = now;
        Ok(())
    }
}

impl Draft for IntakeFormFields {
    fn validate(&self) -> Result<(), ValidationError> {
        draft::require_text("title", &self.title)?;
        for (i, question) in self.questions.iter().enumerate() {
            draft::require_text(&format!("questions[{i}].id"), &question.id)?;
            draft::require_text(&format!("questions[{i}].prompt"), &question.prompt)?;
            if self.questions[..i].iter().any(|q| q.id == question.id) {
                return Err(ValidationError::new(
                    format!("questions[{i}].id"),
                    format!("duplicate question id: {}", question.id),
                ));
            }
        }
        Ok(())
    }

    fn client_ref(&self) -> Option<Uuid> {
        Some(self.client_id)
    }
}

impl Record for IntakeForm {
    const COLLECTION: &'static str = "intake-forms";
    const KIND: &'static str = "intake_form";

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> Timestamp {
        self.created_at
    }
}

impl Owned for IntakeForm {
    fn owner_id(&self) -> &str {
        &self.user_id
    }
}

impl PortalVisible for IntakeForm {
    fn linked_client(&self) -> Option<Uuid> {
        Some(self.details.client_id)
    }
}

impl Editable for IntakeForm {
    type Fields = IntakeFormFields;

    fn create(id: Uuid, user_id: String, details: IntakeFormFields, now: Timestamp) -> Self {
        Self {
            id,
            user_id,
            details,
            responses: BTreeMap::new(),
            submitted_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn fields(&self) -> &IntakeFormFields {
        &self.details
    }

    fn apply(&mut self, details: IntakeFormFields, now: Timestamp) {
        self.details = details;
        self.updated_at = now;
    }
}
