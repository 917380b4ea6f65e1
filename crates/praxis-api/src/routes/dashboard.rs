//! Practice overview and note analytics.

use std::cmp::Reverse;

use axum::extract::State;
use axum::Json;
use jiff::civil::Date;
use serde::Serialize;
use uuid::Uuid;

use praxis_core::models::client::Client;
use praxis_core::models::message::{Message, SenderType};
use praxis_core::models::note::Note;
use praxis_core::models::task::Task;
use praxis_instruments::instruments::gad7::Gad7;
use praxis_instruments::instruments::phq9::Phq9;
use praxis_instruments::risk::RiskLevel;
use praxis_instruments::stats::{self, BandCount, Frequency};

use crate::error::ApiError;
use crate::middleware::auth::ProviderUser;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub active_clients: usize,
    pub total_clients: usize,
    pub note_count: usize,
    pub risk_alerts: Vec<RiskAlert>,
    pub unread_messages: usize,
    pub open_tasks: Vec<Task>,
}

/// A risk-flagged note surfaced on the dashboard.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAlert {
    pub note_id: Uuid,
    pub client_name: String,
    pub session_date: Date,
    pub risk_suicidal: RiskLevel,
    pub risk_homicidal: RiskLevel,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteAnalytics {
    pub note_count: usize,
    pub average_phq9: u32,
    pub average_gad7: u32,
    pub risk_flagged_count: usize,
    pub cpt_usage: Vec<Frequency>,
    pub diagnosis_frequency: Vec<Frequency>,
    pub phq9_distribution: Vec<BandCount>,
    pub gad7_distribution: Vec<BandCount>,
}

pub async fn dashboard(
    State(state): State<AppState>,
    user: ProviderUser,
) -> Result<Json<Dashboard>, ApiError> {
    let clients = state.records.list_owned::<Client>(&user.user_id).await?;
    let notes = state.records.list_owned::<Note>(&user.user_id).await?;
    let messages = state.records.list_owned::<Message>(&user.user_id).await?;
    let tasks = state.records.list_owned::<Task>(&user.user_id).await?;

    let mut risk_alerts: Vec<RiskAlert> = notes
        .iter()
        .filter(|n| n.risk_flagged())
        .map(|n| RiskAlert {
            note_id: n.id,
            client_name: n.details.client_name.clone(),
            session_date: n.details.session_date,
            risk_suicidal: n.details.risk_suicidal,
            risk_homicidal: n.details.risk_homicidal,
        })
        .collect();
    // Notes arrive newest-created first; the stable sort keeps that on ties.
    risk_alerts.sort_by_key(|a| Reverse(a.session_date));

    let unread_messages = messages
        .iter()
        .filter(|m| m.sender_type == SenderType::Client && m.unread_by(SenderType::Provider))
        .count();

    let mut open_tasks: Vec<Task> = tasks.into_iter().filter(|t| !t.details.completed).collect();
    open_tasks.sort_by_key(|t| (t.details.due_date.is_none(), t.details.due_date));

    Ok(Json(Dashboard {
        active_clients: clients.iter().filter(|c| c.is_active()).count(),
        total_clients: clients.len(),
        note_count: notes.len(),
        risk_alerts,
        unread_messages,
        open_tasks,
    }))
}

pub async fn note_analytics(
    State(state): State<AppState>,
    user: ProviderUser,
) -> Result<Json<NoteAnalytics>, ApiError> {
    let notes = state.records.list_owned::<Note>(&user.user_id).await?;
    Ok(Json(analyze(&notes)))
}

/// Aggregate statistics over a set of notes.
pub fn analyze(notes: &[Note]) -> NoteAnalytics {
    NoteAnalytics {
        note_count: notes.len(),
        average_phq9: stats::average_score(notes.iter().map(|n| n.phq9_score)),
        average_gad7: stats::average_score(notes.iter().map(|n| n.gad7_score)),
        risk_flagged_count: notes.iter().filter(|n| n.risk_flagged()).count(),
        cpt_usage: stats::frequency(notes.iter().filter_map(|n| n.details.cpt_code.as_deref())),
        diagnosis_frequency: stats::frequency(
            notes
                .iter()
                .flat_map(|n| n.details.diagnosis_codes.iter().map(String::as_str)),
        ),
        phq9_distribution: stats::severity_distribution(&Phq9, notes.iter().map(|n| n.phq9_score)),
        gad7_distribution: stats::severity_distribution(&Gad7, notes.iter().map(|n| n.gad7_score)),
    }
}
