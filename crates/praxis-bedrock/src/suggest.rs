//! Diagnosis and CPT code suggestions for a session note.
//!
//! The model is asked for a bare JSON object. Replies are parsed strictly:
//! anything that does not match the expected shape is an error and nothing
//! is persisted.

use std::fmt::Write as _;

use serde::Deserialize;
use tracing::{info, warn};

use praxis_core::models::note::Note;
use praxis_core::models::suggestion::{CodingSuggestion, SuggestedDiagnosis};

use crate::error::BedrockError;
use crate::model::CompletionModel;

pub const MAX_DIAGNOSES: usize = 3;

pub const SYSTEM_PROMPT: &str = "\
You are a clinical coding assistant for a licensed mental health provider. \
Given a SOAP session note, propose ICD-10-CM diagnosis codes and one CPT \
psychotherapy code. Respond with a single JSON object and nothing else:\n\
{\"suggestedDiagnoses\": [{\"code\": \"F41.1\", \"name\": \"Generalized anxiety disorder\", \
\"confidence\": 0.82}], \"suggestedCpt\": \"90834\", \"reasoning\": \"...\"}\n\
List at most three diagnoses, highest confidence first. Confidence is a \
number between 0 and 1. The provider makes the final coding decision.";

/// Render the user prompt for a note.
pub fn build_prompt(note: &Note) -> String {
    let d = &note.details;
    let mut prompt = String::new();

    let _ = writeln!(prompt, "Session date: {}", d.session_date);
    if let Some(minutes) = d.duration_minutes {
        let _ = writeln!(prompt, "Duration: {minutes} minutes");
    }
    if d.telehealth {
        let _ = writeln!(prompt, "Modality: telehealth");
    }
    if let Some(cpt) = &d.cpt_code {
        let _ = writeln!(prompt, "CPT code entered by provider: {cpt}");
    }
    if !d.diagnosis_codes.is_empty() {
        let _ = writeln!(
            prompt,
            "Diagnosis codes entered by provider: {}",
            d.diagnosis_codes.join(", ")
        );
    }

    let _ = writeln!(
        prompt,
        "PHQ-9: {} ({})",
        note.phq9_score,
        note.phq9_severity().label()
    );
    let _ = writeln!(
        prompt,
        "GAD-7: {} ({})",
        note.gad7_score,
        note.gad7_severity().label()
    );
    let _ = writeln!(
        prompt,
        "Suicidal ideation: {:?}; homicidal ideation: {:?}",
        d.risk_suicidal, d.risk_homicidal
    );

    for (heading, body) in [
        ("Subjective", &d.subjective),
        ("Objective", &d.objective),
        ("Assessment", &d.assessment),
        ("Plan", &d.plan),
    ] {
        let body = body.trim();
        let _ = write!(prompt, "\n{heading}:\n");
        let _ = writeln!(prompt, "{}", if body.is_empty() { "(none)" } else { body });
    }

    prompt
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSuggestion {
    suggested_diagnoses: Vec<RawDiagnosis>,
    suggested_cpt: String,
    reasoning: String,
}

#[derive(Deserialize)]
struct RawDiagnosis {
    code: String,
    name: String,
    confidence: f64,
}

/// Parse a model reply into a suggestion.
///
/// Accepts a bare JSON object or one wrapped in a Markdown code fence.
/// Diagnoses are sorted by descending confidence and cut to
/// [`MAX_DIAGNOSES`].
pub fn parse_suggestion(reply: &str) -> Result<CodingSuggestion, BedrockError> {
    let reply = reply.trim();
    if reply.is_empty() {
        return Err(BedrockError::EmptyResponse);
    }

    let json = extract_object(reply)
        .ok_or_else(|| BedrockError::ResponseParse("no JSON object in reply".to_string()))?;
    let raw: RawSuggestion = serde_json::from_str(json)?;

    if raw.suggested_cpt.trim().is_empty() {
        return Err(BedrockError::SchemaViolation(
            "suggestedCpt is empty".to_string(),
        ));
    }

    let mut diagnoses = Vec::with_capacity(raw.suggested_diagnoses.len());
    for dx in raw.suggested_diagnoses {
        if dx.code.trim().is_empty() {
            return Err(BedrockError::SchemaViolation(
                "diagnosis code is empty".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&dx.confidence) {
            return Err(BedrockError::SchemaViolation(format!(
                "confidence {} for {} is outside [0, 1]",
                dx.confidence, dx.code
            )));
        }
        diagnoses.push(SuggestedDiagnosis {
            code: dx.code.trim().to_string(),
            name: dx.name.trim().to_string(),
            confidence: dx.confidence,
        });
    }

    diagnoses.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
    if diagnoses.len() > MAX_DIAGNOSES {
        warn!(
            returned = diagnoses.len(),
            kept = MAX_DIAGNOSES,
            "model returned extra diagnoses"
        );
        diagnoses.truncate(MAX_DIAGNOSES);
    }

    Ok(CodingSuggestion {
        suggested_diagnoses: diagnoses,
        suggested_cpt: raw.suggested_cpt.trim().to_string(),
        reasoning: raw.reasoning.trim().to_string(),
    })
}

/// The outermost `{...}` span, ignoring any fence or prose around it.
fn extract_object(reply: &str) -> Option<&str> {
    let start = reply.find('{')?;
    let end = reply.rfind('}')?;
    (end > start).then(|| &reply[start..=end])
}

/// Ask the model for codes for a note.
pub async fn suggest_codes(
    model: &dyn CompletionModel,
    note: &Note,
) -> Result<CodingSuggestion, BedrockError> {
    let prompt = build_prompt(note);
    let reply = model.complete(SYSTEM_PROMPT, &prompt).await?;
    let suggestion = parse_suggestion(&reply)?;

    info!(
        note_id = %note.id,
        model_id = model.model_id(),
        diagnoses = suggestion.suggested_diagnoses.len(),
        "coding suggestion generated"
    );

    Ok(suggestion)
}
