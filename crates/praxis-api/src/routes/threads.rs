//! Secure messaging, provider side, plus the thread helpers the portal
//! routes share.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use jiff::Timestamp;

use praxis_audit::events::AuditEvent;
use praxis_core::access::Identity;
use praxis_core::draft;
use praxis_core::models::audit::AuditAction;
use praxis_core::models::message::{Message, MessageDraft, MessageThread, SenderType};
use praxis_core::record::Record;

use crate::error::ApiError;
use crate::extract::{RecordId, json_body};
use crate::guard;
use crate::middleware::auth::ProviderUser;
use crate::state::AppState;

/// Delete a thread and every message in it.
pub async fn delete_thread(
    State(state): State<AppState>,
    RecordId(id): RecordId,
    user: ProviderUser,
) -> Result<StatusCode, ApiError> {
    let thread: MessageThread = guard::owned(&state, id, &user).await?;

    let messages = messages_in(&state, &thread).await?;
    for message in &messages {
        state.records.remove(message).await?;
    }
    state.records.remove(&thread).await?;

    AuditEvent::new(AuditAction::Delete, MessageThread::KIND, id, &user.identity())
        .with_details(serde_json::json!({ "messagesDeleted": messages.len() }))
        .record(&state.records)
        .await;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_messages(
    State(state): State<AppState>,
    RecordId(id): RecordId,
    user: ProviderUser,
) -> Result<Json<Vec<Message>>, ApiError> {
    let thread: MessageThread = guard::owned(&state, id, &user).await?;
    let messages = read_messages(&state, &thread, SenderType::Provider).await?;
    Ok(Json(messages))
}

pub async fn post_message(
    State(state): State<AppState>,
    RecordId(id): RecordId,
    user: ProviderUser,
    body: Bytes,
) -> Result<(StatusCode, Json<Message>), ApiError> {
    let thread: MessageThread = guard::owned(&state, id, &user).await?;
    let message = send(&state, thread, SenderType::Provider, &body, &user.identity()).await?;
    Ok((StatusCode::CREATED, Json(message)))
}

/// Messages of one thread, oldest first.
pub async fn messages_in(
    state: &AppState,
    thread: &MessageThread,
) -> Result<Vec<Message>, ApiError> {
    let mut messages = state
        .records
        .list_owned_where(&thread.user_id, |m: &Message| m.thread_id == thread.id)
        .await?;
    messages.sort_by_key(|m| m.created_at);
    Ok(messages)
}

/// List a thread's messages and mark those the reader has not seen as read.
pub async fn read_messages(
    state: &AppState,
    thread: &MessageThread,
    reader: SenderType,
) -> Result<Vec<Message>, ApiError> {
    let mut messages = messages_in(state, thread).await?;
    for message in messages.iter_mut().filter(|m| m.unread_by(reader)) {
        message.mark_read_by(reader);
        state.records.save(&*message).await?;
    }
    Ok(messages)
}

/// Append a message to a thread and bump the thread's activity time.
pub async fn send(
    state: &AppState,
    mut thread: MessageThread,
    sender: SenderType,
    body: &Bytes,
    identity: &Identity,
) -> Result<Message, ApiError> {
    let draft: MessageDraft = draft::parse(json_body(body)?)?;
    let now = Timestamp::now();

    let message = Message::new(&thread, sender, draft.body.trim().to_string(), now);
    state.records.save(&message).await?;
    thread.touch(now);
    state.records.save(&thread).await?;

    AuditEvent::new(AuditAction::Create, Message::KIND, message.id, identity)
        .with_details(serde_json::json!({ "threadId": thread.id }))
        .record(&state.records)
        .await;

    Ok(message)
}
