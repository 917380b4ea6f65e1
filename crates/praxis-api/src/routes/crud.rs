//! Generic list/get/create/update/delete over any provider-owned record.
//!
//! Each collection is mounted at `/{COLLECTION}` and `/{COLLECTION}/{id}`.
//! Bodies are read as raw bytes so malformed JSON is a 400 with the
//! standard error body.

use axum::Json;
use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::handler::Handler;
use axum::http::StatusCode;
use axum::routing::get;
use jiff::Timestamp;
use serde::Serialize;
use uuid::Uuid;

use praxis_audit::events::AuditEvent;
use praxis_core::draft::{self, Draft};
use praxis_core::error::ValidationError;
use praxis_core::models::audit::AuditAction;
use praxis_core::models::billing::BillingRecord;
use praxis_core::models::ce_credit::CeCredit;
use praxis_core::models::client::Client;
use praxis_core::models::consent::ConsentDocument;
use praxis_core::models::document::Document;
use praxis_core::models::intake_form::IntakeForm;
use praxis_core::models::message::MessageThread;
use praxis_core::models::note::{Note, NoteView};
use praxis_core::models::referral::Referral;
use praxis_core::models::safety_plan::SafetyPlan;
use praxis_core::models::task::Task;
use praxis_core::models::treatment_plan::TreatmentPlan;
use praxis_core::record::Editable;

use crate::error::ApiError;
use crate::extract::{RecordId, json_body};
use crate::guard;
use crate::middleware::auth::ProviderUser;
use crate::state::AppState;

/// A record served through the generic CRUD routes.
pub trait Resource: Editable {
    /// Response shape; usually the record itself.
    type View: Serialize + From<Self> + Send + 'static;

    /// Whether the linked client is fixed at creation. Set for records whose
    /// portal-side content belongs to that client.
    const FIXED_CLIENT: bool = false;
}

impl Resource for Client {
    type View = Client;
}

impl Resource for Note {
    type View = NoteView;
}

impl Resource for BillingRecord {
    type View = BillingRecord;
}

impl Resource for Referral {
    type View = Referral;
}

impl Resource for SafetyPlan {
    type View = SafetyPlan;
}

impl Resource for ConsentDocument {
    type View = ConsentDocument;
}

impl Resource for TreatmentPlan {
    type View = TreatmentPlan;
}

impl Resource for MessageThread {
    type View = MessageThread;
    const FIXED_CLIENT: bool = true;
}

impl Resource for IntakeForm {
    type View = IntakeForm;
    const FIXED_CLIENT: bool = true;
}

impl Resource for Document {
    type View = Document;
}

impl Resource for Task {
    type View = Task;
}

impl Resource for CeCredit {
    type View = CeCredit;
}

/// Mount the five standard routes for `T`.
pub fn mount<T: Resource>(router: Router<AppState>) -> Router<AppState> {
    mount_with_delete::<T, _, _>(router, remove::<T>)
}

/// Mount the standard routes for `T` with a custom delete handler.
pub fn mount_with_delete<T, H, X>(router: Router<AppState>, delete: H) -> Router<AppState>
where
    T: Resource,
    H: Handler<X, AppState>,
    X: 'static,
{
    router
        .route(
            &format!("/{}", T::COLLECTION),
            get(list::<T>).post(create::<T>),
        )
        .route(
            &format!("/{}/{{id}}", T::COLLECTION),
            get(fetch::<T>).put(update::<T>).delete(delete),
        )
}

pub async fn list<T: Resource>(
    State(state): State<AppState>,
    user: ProviderUser,
) -> Result<Json<Vec<T::View>>, ApiError> {
    let records = state.records.list_owned::<T>(&user.user_id).await?;
    let views = records
        .into_iter()
        .map(T::View::from)
        .collect();
    Ok(Json(views))
}

pub async fn fetch<T: Resource>(
    State(state): State<AppState>,
    RecordId(id): RecordId,
    user: ProviderUser,
) -> Result<Json<T::View>, ApiError> {
    let record: T = guard::owned(&state, id, &user).await?;
    Ok(Json(T::View::from(record)))
}

pub async fn create<T: Resource>(
    State(state): State<AppState>,
    user: ProviderUser,
    body: Bytes,
) -> Result<(StatusCode, Json<T::View>), ApiError> {
    let fields: T::Fields = draft::parse(json_body(&body)?)?;
    guard::ensure_client_owned(&state, fields.client_ref(), &user.user_id).await?;

    let record = T::create(Uuid::new_v4(), user.user_id.clone(), fields, Timestamp::now());
    state.records.save(&record).await?;

    AuditEvent::new(AuditAction::Create, T::KIND, record.id(), &user.identity())
        .record(&state.records)
        .await;

    Ok((StatusCode::CREATED, Json(T::View::from(record))))
}

pub async fn update<T: Resource>(
    State(state): State<AppState>,
    RecordId(id): RecordId,
    user: ProviderUser,
    body: Bytes,
) -> Result<Json<T::View>, ApiError> {
    let mut record: T = guard::owned(&state, id, &user).await?;
    let fields = draft::merge(record.fields(), json_body(&body)?)?;
    if T::FIXED_CLIENT && fields.client_ref() != record.fields().client_ref() {
        return Err(ValidationError::new("clientId", "clientId cannot be changed").into());
    }
    guard::ensure_client_owned(&state, fields.client_ref(), &user.user_id).await?;

    record.apply(fields, Timestamp::now());
    state.records.save(&record).await?;

    AuditEvent::new(AuditAction::Update, T::KIND, id, &user.identity())
        .record(&state.records)
        .await;

    Ok(Json(T::View::from(record)))
}

pub async fn remove<T: Resource>(
    State(state): State<AppState>,
    RecordId(id): RecordId,
    user: ProviderUser,
) -> Result<StatusCode, ApiError> {
    let record: T = guard::owned(&state, id, &user).await?;
    state.records.remove(&record).await?;

    AuditEvent::new(AuditAction::Delete, T::KIND, id, &user.identity())
        .record(&state.records)
        .await;

    Ok(StatusCode::NO_CONTENT)
}
