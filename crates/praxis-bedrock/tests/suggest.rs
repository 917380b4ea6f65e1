use std::sync::Mutex;

use jiff::Timestamp;
use praxis_bedrock::error::BedrockError;
use praxis_bedrock::model::{BoxFuture, CompletionModel};
use praxis_bedrock::suggest::{build_prompt, parse_suggestion, suggest_codes};
use praxis_core::draft;
use praxis_core::models::note::{Note, NoteFields};
use praxis_core::record::Editable;
use serde_json::json;
use uuid::Uuid;

struct CannedModel {
    reply: Result<String, String>,
    prompts: Mutex<Vec<String>>,
}

impl CannedModel {
    fn replying(reply: &str) -> Self {
        Self {
            reply: Ok(reply.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    fn failing(message: &str) -> Self {
        Self {
            reply: Err(message.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }
}

impl CompletionModel for CannedModel {
    fn model_id(&self) -> &str {
        "canned"
    }

    fn complete<'a>(
        &'a self,
        _system_prompt: &'a str,
        user_prompt: &'a str,
    ) -> BoxFuture<'a, Result<String, BedrockError>> {
        self.prompts.lock().unwrap().push(user_prompt.to_string());
        let reply = self.reply.clone().map_err(BedrockError::Invocation);
        Box::pin(async move { reply })
    }
}

fn note() -> Note {
    let fields: NoteFields = draft::parse(json!({
        "clientName": "Ada Byron",
        "sessionDate": "2026-03-02",
        "durationMinutes": 53,
        "subjective": "Reports worry most days and poor sleep.",
        "assessment": "Symptoms consistent with generalized anxiety.",
        "phq9Items": [1, 1, 1, 1, 1, 1, 0, 0, 0],
        "gad7Items": [3, 3, 2, 2, 2, 2, 2],
        "riskSuicidal": "Passive",
    }))
    .unwrap();
    Note::create(Uuid::new_v4(), "provider-a".to_string(), fields, Timestamp::now())
}

#[test]
fn prompt_carries_scores_risk_and_soap_text() {
    let prompt = build_prompt(&note());
    assert!(prompt.contains("PHQ-9: 6 (Mild)"));
    assert!(prompt.contains("GAD-7: 16 (Severe)"));
    assert!(prompt.contains("Suicidal ideation: Passive"));
    assert!(prompt.contains("Reports worry most days"));
    assert!(prompt.contains("Duration: 53 minutes"));
    assert!(prompt.contains("Objective:\n(none)"));
    assert!(!prompt.contains("Ada Byron"));
}

#[test]
fn parses_bare_object() {
    let suggestion = parse_suggestion(
        r#"{"suggestedDiagnoses":[{"code":"F41.1","name":"Generalized anxiety disorder","confidence":0.9}],
            "suggestedCpt":"90834","reasoning":"Worry most days."}"#,
    )
    .unwrap();
    assert_eq!(suggestion.suggested_cpt, "90834");
    assert_eq!(suggestion.suggested_diagnoses[0].code, "F41.1");
}

#[test]
fn parses_fenced_object_and_ranks_top_three() {
    let reply = "Here you go:\n```json\n{\"suggestedDiagnoses\": [\
        {\"code\": \"F32.0\", \"name\": \"MDD, single, mild\", \"confidence\": 0.4},\
        {\"code\": \"F41.1\", \"name\": \"GAD\", \"confidence\": 0.92},\
        {\"code\": \"F43.23\", \"name\": \"Adjustment disorder\", \"confidence\": 0.1},\
        {\"code\": \"G47.00\", \"name\": \"Insomnia\", \"confidence\": 0.55}],\
        \"suggestedCpt\": \"90837\", \"reasoning\": \"...\"}\n```";
    let suggestion = parse_suggestion(reply).unwrap();

    let codes: Vec<_> = suggestion
        .suggested_diagnoses
        .iter()
        .map(|d| d.code.as_str())
        .collect();
    assert_eq!(codes, ["F41.1", "G47.00", "F32.0"]);
}

#[test]
fn rejects_malformed_replies() {
    assert!(matches!(parse_suggestion("   "), Err(BedrockError::EmptyResponse)));
    assert!(matches!(
        parse_suggestion("I cannot help with that."),
        Err(BedrockError::ResponseParse(_))
    ));
    assert!(matches!(
        parse_suggestion(r#"{"suggestedCpt":"90834"}"#),
        Err(BedrockError::Serialization(_))
    ));
    assert!(matches!(
        parse_suggestion(
            r#"{"suggestedDiagnoses":[{"code":"F41.1","name":"GAD","confidence":1.5}],"suggestedCpt":"90834","reasoning":""}"#
        ),
        Err(BedrockError::SchemaViolation(_))
    ));
    assert!(matches!(
        parse_suggestion(r#"{"suggestedDiagnoses":[],"suggestedCpt":" ","reasoning":""}"#),
        Err(BedrockError::SchemaViolation(_))
    ));
}

#[tokio::test]
async fn suggest_codes_sends_note_prompt() {
    let model = CannedModel::replying(
        r#"{"suggestedDiagnoses":[{"code":"F41.1","name":"GAD","confidence":0.8}],"suggestedCpt":"90834","reasoning":"ok"}"#,
    );
    let note = note();
    let suggestion = suggest_codes(&model, &note).await.unwrap();
    assert_eq!(suggestion.reasoning, "ok");

    let prompts = model.prompts.lock().unwrap();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("GAD-7: 16"));
}

#[tokio::test]
async fn suggest_codes_surfaces_model_failure() {
    let model = CannedModel::failing("throttled");
    let err = suggest_codes(&model, &note()).await.unwrap_err();
    assert!(matches!(err, BedrockError::Invocation(_)));
}
