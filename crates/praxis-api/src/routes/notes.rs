use axum::extract::State;
use axum::Json;
use jiff::Timestamp;

use praxis_audit::events::AuditEvent;
use praxis_bedrock::suggest;
use praxis_core::models::audit::AuditAction;
use praxis_core::models::note::Note;
use praxis_core::models::suggestion::StoredSuggestion;
use praxis_core::record::Record;

use crate::error::ApiError;
use crate::extract::RecordId;
use crate::guard;
use crate::middleware::auth::ProviderUser;
use crate::state::AppState;

/// Ask the model for diagnosis and CPT codes and keep the answer on the note.
///
/// The note is only written once a well-formed suggestion is in hand.
pub async fn suggest_codes(
    State(state): State<AppState>,
    RecordId(id): RecordId,
    user: ProviderUser,
) -> Result<Json<StoredSuggestion>, ApiError> {
    let mut note: Note = guard::owned(&state, id, &user).await?;

    let suggestion = suggest::suggest_codes(state.model.as_ref(), &note).await?;
    let stored = StoredSuggestion {
        suggestion,
        model_id: state.model.model_id().to_string(),
        generated_at: Timestamp::now(),
    };
    note.ai_suggestion = Some(stored.clone());
    state.records.save(&note).await?;

    AuditEvent::new(AuditAction::Suggest, Note::KIND, id, &user.identity())
        .record(&state.records)
        .await;

    Ok(Json(stored))
}
