mod common;

use axum::http::StatusCode;
use serde_json::{Value, json};

use common::{TestApp, provider_token};

fn session(phq9: Value, gad7: Value) -> Value {
    json!({
        "clientName": "Ada Byron",
        "sessionDate": "2026-03-02",
        "cptCode": "90834",
        "subjective": "Low mood for three weeks.",
        "diagnosisCodes": ["F32.1"],
        "phq9Items": phq9,
        "gad7Items": gad7,
    })
}

#[tokio::test]
async fn scores_and_bands_are_derived_on_create() {
    let app = TestApp::new();
    let a = provider_token("provider-a");

    let (status, note) = app
        .post(
            "/notes",
            &a,
            session(json!([3, 2, 1, 0, 2, 1, 0, 1, 2]), json!([0, 0, 0, 0, 0, 0, 0])),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{note}");
    assert_eq!(note["phq9Score"], 12);
    assert_eq!(note["phq9Severity"], "Moderate");
    assert_eq!(note["gad7Score"], 0);
    assert_eq!(note["gad7Severity"], "Minimal");
    assert_eq!(note["riskFlagged"], false);
}

#[tokio::test]
async fn scores_cannot_be_written_directly() {
    let app = TestApp::new();
    let a = provider_token("provider-a");

    let mut body = session(json!([1, 1, 1, 1, 1, 1, 1, 1, 1]), json!([]));
    body["phq9Score"] = json!(27);
    let (status, err) = app.post("/notes", &a, body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["field"], "phq9Score");

    let (_, note) = app
        .post("/notes", &a, session(json!([1, 1, 1, 1, 1, 1, 1, 1, 1]), json!([])))
        .await;
    let uri = format!("/notes/{}", note["id"].as_str().unwrap());
    let (status, err) = app.put(&uri, &a, json!({ "phq9Score": 0 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["field"], "phq9Score");
}

#[tokio::test]
async fn update_recomputes_scores_from_items() {
    let app = TestApp::new();
    let a = provider_token("provider-a");
    let (_, note) = app
        .post("/notes", &a, session(json!([0, 0, 0, 0, 0, 0, 0, 0, 0]), json!([])))
        .await;
    let uri = format!("/notes/{}", note["id"].as_str().unwrap());

    let (status, updated) = app
        .put(&uri, &a, json!({ "phq9Items": [3, 3, 3, 3, 3, 3, 3, 2, 0] }))
        .await;
    assert_eq!(status, StatusCode::OK, "{updated}");
    assert_eq!(updated["phq9Score"], 23);
    assert_eq!(updated["phq9Severity"], "Severe");
    assert_eq!(updated["subjective"], "Low mood for three weeks.");

    let (_, fetched) = app.get(&uri, &a).await;
    assert_eq!(fetched["phq9Score"], 23);
}

#[tokio::test]
async fn malformed_items_degrade_to_best_effort_sum() {
    let app = TestApp::new();
    let a = provider_token("provider-a");

    let (status, note) = app
        .post(
            "/notes",
            &a,
            session(json!([3, "x", 2, null, 7, 1]), json!("not a list")),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{note}");
    assert_eq!(note["phq9Items"], json!([3, 2, 1]));
    assert_eq!(note["phq9Score"], 6);
    assert_eq!(note["gad7Items"], json!([]));
    assert_eq!(note["gad7Score"], 0);
}

#[tokio::test]
async fn ideation_other_than_denied_flags_risk() {
    let app = TestApp::new();
    let a = provider_token("provider-a");

    let mut body = session(json!([]), json!([]));
    body["riskSuicidal"] = json!("Passive");
    body["riskHomicidal"] = json!("Denied");
    let (status, note) = app.post("/notes", &a, body).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(note["riskFlagged"], true);

    let mut body = session(json!([]), json!([]));
    body["riskSuicidal"] = json!("Sometimes");
    let (status, err) = app.post("/notes", &a, body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["field"], "riskSuicidal");
}

#[tokio::test]
async fn suggest_codes_persists_ranked_suggestion() {
    let app = TestApp::new();
    let a = provider_token("provider-a");
    let (_, note) = app
        .post("/notes", &a, session(json!([2, 2, 1, 1, 2, 1, 1, 1, 0]), json!([])))
        .await;
    let id = note["id"].as_str().unwrap();

    let (status, suggestion) = app
        .send("POST", &format!("/notes/{id}/suggest-codes"), Some(&a), None)
        .await;
    assert_eq!(status, StatusCode::OK, "{suggestion}");
    assert_eq!(suggestion["suggestedCpt"], "90834");
    assert_eq!(suggestion["suggestedDiagnoses"][0]["code"], "F41.1");
    assert_eq!(suggestion["suggestedDiagnoses"][1]["code"], "F32.1");
    assert_eq!(suggestion["modelId"], "canned-model");

    let (_, fetched) = app.get(&format!("/notes/{id}"), &a).await;
    assert_eq!(fetched["aiSuggestion"]["suggestedCpt"], "90834");
    assert!(fetched["aiSuggestion"]["generatedAt"].is_string());
}

#[tokio::test]
async fn failed_suggestion_is_generic_error_and_leaves_note_alone() {
    let app = TestApp::with_model_reply(Ok("Sorry, I can't help with that.".to_string()));
    let a = provider_token("provider-a");
    let (_, note) = app
        .post("/notes", &a, session(json!([1, 1, 1, 1, 1, 1, 1, 1, 1]), json!([])))
        .await;
    let id = note["id"].as_str().unwrap();

    let (status, err) = app
        .send("POST", &format!("/notes/{id}/suggest-codes"), Some(&a), None)
        .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(err["error"], "internal server error");

    let (_, fetched) = app.get(&format!("/notes/{id}"), &a).await;
    assert!(fetched["aiSuggestion"].is_null());
    assert_eq!(fetched["updatedAt"], note["updatedAt"]);
}

#[tokio::test]
async fn model_outage_is_internal_error() {
    let app = TestApp::with_model_reply(Err("connection reset".to_string()));
    let a = provider_token("provider-a");
    let (_, note) = app.post("/notes", &a, session(json!([]), json!([]))).await;
    let id = note["id"].as_str().unwrap();

    let (status, err) = app
        .send("POST", &format!("/notes/{id}/suggest-codes"), Some(&a), None)
        .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!err.to_string().contains("connection reset"));
}

#[tokio::test]
async fn suggest_codes_is_guarded() {
    let app = TestApp::new();
    let a = provider_token("provider-a");
    let b = provider_token("provider-b");
    let (_, note) = app.post("/notes", &a, session(json!([]), json!([]))).await;
    let id = note["id"].as_str().unwrap();

    let (status, _) = app
        .send("POST", &format!("/notes/{id}/suggest-codes"), Some(&b), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (_, fetched) = app.get(&format!("/notes/{id}"), &a).await;
    assert!(fetched["aiSuggestion"].is_null());
}

#[tokio::test]
async fn analytics_aggregate_own_notes() {
    let app = TestApp::new();
    let a = provider_token("provider-a");
    let b = provider_token("provider-b");

    let (_, body) = app.get("/analytics/notes", &a).await;
    assert_eq!(body["noteCount"], 0);
    assert_eq!(body["averagePhq9"], 0);
    assert_eq!(body["averageGad7"], 0);

    app.post(
        "/notes",
        &a,
        session(json!([3, 2, 1, 0, 2, 1, 0, 1, 2]), json!([1, 1, 1, 1, 1, 0, 0])),
    )
    .await;
    let mut second = session(json!([1, 1, 1, 1, 1, 0, 0, 0, 0]), json!([3, 3, 3, 3, 3, 3, 3]));
    second["diagnosisCodes"] = json!(["F41.1", "F32.1"]);
    second["riskHomicidal"] = json!("Active");
    app.post("/notes", &a, second).await;
    app.post(
        "/notes",
        &b,
        session(json!([3, 3, 3, 3, 3, 3, 3, 3, 3]), json!([])),
    )
    .await;

    let (status, body) = app.get("/analytics/notes", &a).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["noteCount"], 2);
    // (12 + 5) / 2 = 8.5 rounds to 9; (5 + 21) / 2 = 13.
    assert_eq!(body["averagePhq9"], 9);
    assert_eq!(body["averageGad7"], 13);
    assert_eq!(body["riskFlaggedCount"], 1);
    assert_eq!(body["cptUsage"], json!([{ "value": "90834", "count": 2 }]));
    assert_eq!(body["diagnosisFrequency"][0], json!({ "value": "F32.1", "count": 2 }));
    assert_eq!(body["diagnosisFrequency"][1], json!({ "value": "F41.1", "count": 1 }));
    assert_eq!(body["phq9Distribution"].as_array().unwrap().len(), 5);
    assert_eq!(body["gad7Distribution"].as_array().unwrap().len(), 4);
}
