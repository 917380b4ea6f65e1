use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Diagnosis and billing codes proposed by the language model for a note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CodingSuggestion {
    /// At most three, highest confidence first.
    pub suggested_diagnoses: Vec<SuggestedDiagnosis>,
    pub suggested_cpt: String,
    pub reasoning: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SuggestedDiagnosis {
    pub code: String,
    pub name: String,
    /// Within `[0, 1]`.
    pub confidence: f64,
}

/// A suggestion as persisted on the note it was generated for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct StoredSuggestion {
    #[serde(flatten)]
    pub suggestion: CodingSuggestion,
    pub model_id: String,
    pub generated_at: Timestamp,
}
