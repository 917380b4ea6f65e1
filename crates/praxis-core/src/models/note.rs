use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use praxis_instruments::Instrument;
use praxis_instruments::instruments::gad7::Gad7;
use praxis_instruments::instruments::phq9::Phq9;
use praxis_instruments::risk::{self, RiskLevel};
use praxis_instruments::scoring::{ItemResponses, Severity};

use super::suggestion::StoredSuggestion;
use crate::draft::{self, Draft};
use crate::error::ValidationError;
use crate::record::{Editable, Owned, Record};

/// A SOAP session note.
///
/// `phq9_score` and `gad7_score` are derived from the item lists on every
/// write and are not part of the client-writable fields.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Note {
    pub id: Uuid,
    pub user_id: String,
    #[serde(flatten)]
    pub details: NoteFields,
    pub phq9_score: u32,
    pub gad7_score: u32,
    pub ai_suggestion: Option<StoredSuggestion>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
#[ts(export)]
pub struct NoteFields {
    /// The client this note is about, linked by display name.
    pub client_name: String,
    pub session_date: jiff::civil::Date,
    pub duration_minutes: Option<u32>,
    pub location: Option<String>,
    pub cpt_code: Option<String>,
    #[serde(default)]
    pub telehealth: bool,

    #[serde(default)]
    pub subjective: String,
    #[serde(default)]
    pub objective: String,
    #[serde(default)]
    pub assessment: String,
    #[serde(default)]
    pub plan: String,
    #[serde(default)]
    pub diagnosis_codes: Vec<String>,

    #[serde(default)]
    pub phq9_items: ItemResponses,
    #[serde(default)]
    pub gad7_items: ItemResponses,

    #[serde(default)]
    pub risk_suicidal: RiskLevel,
    #[serde(default)]
    pub risk_homicidal: RiskLevel,
    #[serde(default)]
    pub safety_plan_reviewed: bool,
    #[serde(default)]
    pub crisis_resources_provided: bool,
}

impl Note {
    /// Normalize the item lists and recompute both scores from them.
    fn rescore(&mut self) {
        let phq9 = Phq9.assess(std::mem::take(&mut self.details.phq9_items));
        let gad7 = Gad7.assess(std::mem::take(&mut self.details.gad7_items));
        self.details.phq9_items = phq9.responses;
        self.phq9_score = phq9.score;
        self.details.gad7_items = gad7.responses;
        self.gad7_score = gad7.score;
    }

    pub fn phq9_severity(&self) -> Severity {
        Phq9.severity(self.phq9_score)
    }

    pub fn gad7_severity(&self) -> Severity {
        Gad7.severity(self.gad7_score)
    }

    pub fn risk_flagged(&self) -> bool {
        risk::risk_flagged(self.details.risk_suicidal, self.details.risk_homicidal)
    }
}

impl Draft for NoteFields {
    fn validate(&self) -> Result<(), ValidationError> {
        draft::require_text("clientName", &self.client_name)?;
        if let Some(code) = &self.cpt_code {
            draft::require_text("cptCode", code)?;
        }
        if self.duration_minutes == Some(0) {
            return Err(ValidationError::new(
                "durationMinutes",
                "durationMinutes must be positive",
            ));
        }
        draft::require_entries("diagnosisCodes", &self.diagnosis_codes)
    }
}

impl Record for Note {
    const COLLECTION: &'static str = "notes";
    const KIND: &'static str = "note";

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> Timestamp {
        self.created_at
    }
}

impl Owned for Note {
    fn owner_id(&self) -> &str {
        &self.user_id
    }
}

impl Editable for Note {
    type Fields = NoteFields;

    fn create(id: Uuid, user_id: String, details: NoteFields, now: Timestamp) -> Self {
        let mut note = Self {
            id,
            user_id,
            details,
            phq9_score: 0,
            gad7_score: 0,
            ai_suggestion: None,
            created_at: now,
            updated_at: now,
        };
        note.rescore();
        note
    }

    fn fields(&self) -> &NoteFields {
        &self.details
    }

    fn apply(&mut self, details: NoteFields, now: Timestamp) {
        self.details = details;
        self.rescore();
        self.updated_at = now;
    }
}

/// A note as returned to the provider, with read-only derived labels.
#[derive(Debug, Clone, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct NoteView {
    #[serde(flatten)]
    pub note: Note,
    pub phq9_severity: Severity,
    pub gad7_severity: Severity,
    pub risk_flagged: bool,
}

impl From<Note> for NoteView {
    fn from(note: Note) -> Self {
        Self {
            phq9_severity: note.phq9_severity(),
            gad7_severity: note.gad7_severity(),
            risk_flagged: note.risk_flagged(),
            note,
        }
    }
}
