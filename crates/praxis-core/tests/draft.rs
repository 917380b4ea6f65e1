use praxis_core::draft::{self, Draft};
use praxis_core::models::client::{ClientFields, ClientStatus};
use praxis_core::models::note::NoteFields;
use praxis_core::models::treatment_plan::TreatmentPlanFields;
use serde_json::json;

fn client_body() -> serde_json::Value {
    json!({
        "firstName": "Ada",
        "lastName": "Byron",
        "email": "ada@example.com",
    })
}

#[test]
fn parses_a_minimal_client() {
    let fields: ClientFields = draft::parse(client_body()).unwrap();
    assert_eq!(fields.first_name, "Ada");
    assert_eq!(fields.status, ClientStatus::Active);
    assert!(fields.diagnosis_codes.is_empty());
}

#[test]
fn missing_required_field_names_the_field() {
    let err = draft::parse::<ClientFields>(json!({ "firstName": "Ada" })).unwrap_err();
    assert_eq!(err.field.as_deref(), Some("lastName"));
}

#[test]
fn unknown_field_is_rejected_and_named() {
    let mut body = client_body();
    body["userId"] = json!("someone-else");
    let err = draft::parse::<ClientFields>(body).unwrap_err();
    assert_eq!(err.field.as_deref(), Some("userId"));
}

#[test]
fn type_mismatch_names_the_field() {
    let mut body = client_body();
    body["status"] = json!("retired");
    let err = draft::parse::<ClientFields>(body).unwrap_err();
    assert_eq!(err.field.as_deref(), Some("status"));
}

#[test]
fn blank_text_fails_validation() {
    let mut body = client_body();
    body["lastName"] = json!("   ");
    let err = draft::parse::<ClientFields>(body).unwrap_err();
    assert_eq!(err.field.as_deref(), Some("lastName"));
}

#[test]
fn non_object_body_is_rejected() {
    let err = draft::parse::<ClientFields>(json!([1, 2])).unwrap_err();
    assert!(err.field.is_none());
}

#[test]
fn merge_changes_only_patched_fields() {
    let current: ClientFields = draft::parse(client_body()).unwrap();
    let merged = draft::merge(&current, json!({ "status": "inactive", "phone": "555-0100" })).unwrap();
    assert_eq!(merged.first_name, "Ada");
    assert_eq!(merged.email.as_deref(), Some("ada@example.com"));
    assert_eq!(merged.status, ClientStatus::Inactive);
    assert_eq!(merged.phone.as_deref(), Some("555-0100"));
}

#[test]
fn merge_rejects_unknown_fields() {
    let current: ClientFields = draft::parse(client_body()).unwrap();
    let err = draft::merge(&current, json!({ "id": "abc" })).unwrap_err();
    assert_eq!(err.field.as_deref(), Some("id"));
}

#[test]
fn merge_validates_like_creation() {
    let current: ClientFields = draft::parse(client_body()).unwrap();
    let err = draft::merge(&current, json!({ "email": "not-an-email" })).unwrap_err();
    assert_eq!(err.field.as_deref(), Some("email"));

    let err = draft::merge(&current, json!({ "firstName": null })).unwrap_err();
    assert_eq!(err.field.as_deref(), Some("firstName"));
}

#[test]
fn note_scores_are_not_writable() {
    let body = json!({
        "clientName": "Ada Byron",
        "sessionDate": "2026-03-02",
        "phq9Score": 27,
    });
    let err = draft::parse::<NoteFields>(body).unwrap_err();
    assert_eq!(err.field.as_deref(), Some("phq9Score"));
}

#[test]
fn nested_validation_reports_a_path() {
    let body = json!({
        "clientId": "6f1c1d1e-2a0b-4c55-9a4a-3a1f0f0d6b11",
        "title": "Anxiety plan",
        "goals": [
            { "description": "Reduce panic attacks", "objectives": [{ "description": " " }] }
        ],
    });
    let err = draft::parse::<TreatmentPlanFields>(body).unwrap_err();
    assert_eq!(err.field.as_deref(), Some("goals[0].objectives[0].description"));
}

#[test]
fn client_ref_is_reported_for_linked_drafts() {
    let body = json!({
        "clientId": "6f1c1d1e-2a0b-4c55-9a4a-3a1f0f0d6b11",
        "title": "Plan",
    });
    let fields: TreatmentPlanFields = draft::parse(body).unwrap();
    assert!(fields.client_ref().is_some());
}
