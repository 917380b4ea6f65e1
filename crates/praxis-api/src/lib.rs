//! praxis-api
//!
//! HTTP surface for the practice: provider CRUD over every clinical record,
//! messaging, document files, the client portal, instrument scoring,
//! dashboard analytics, and AI coding suggestions.

pub mod config;
pub mod error;
pub mod extract;
pub mod guard;
pub mod middleware;
pub mod routes;
pub mod state;

use axum::Router;
use axum::middleware as axum_mw;
use axum::routing::{get, post, put};
use tower_http::cors::{Any, CorsLayer};

use praxis_core::models::billing::BillingRecord;
use praxis_core::models::ce_credit::CeCredit;
use praxis_core::models::client::Client;
use praxis_core::models::consent::ConsentDocument;
use praxis_core::models::document::Document;
use praxis_core::models::intake_form::IntakeForm;
use praxis_core::models::message::MessageThread;
use praxis_core::models::note::Note;
use praxis_core::models::referral::Referral;
use praxis_core::models::safety_plan::SafetyPlan;
use praxis_core::models::task::Task;
use praxis_core::models::treatment_plan::TreatmentPlan;

use routes::crud;
use state::AppState;

/// Build the full application router.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let public = Router::new()
        // Health (no auth)
        .route("/health", get(routes::health::health_check))
        // Instruments (no auth, public schema data)
        .route("/instruments", get(routes::instruments::list_instruments))
        .route(
            "/instruments/{id}",
            get(routes::instruments::get_instrument_detail),
        )
        .route(
            "/instruments/{id}/score",
            post(routes::instruments::score_items),
        )
        .route("/portal/login", post(routes::portal::login));

    let mut provider = Router::new();
    provider = crud::mount::<Client>(provider);
    provider = crud::mount::<Note>(provider);
    provider = crud::mount::<BillingRecord>(provider);
    provider = crud::mount::<Referral>(provider);
    provider = crud::mount::<SafetyPlan>(provider);
    provider = crud::mount::<ConsentDocument>(provider);
    provider = crud::mount::<TreatmentPlan>(provider);
    provider = crud::mount::<IntakeForm>(provider);
    provider = crud::mount::<Task>(provider);
    provider = crud::mount::<CeCredit>(provider);
    provider = crud::mount_with_delete::<MessageThread, _, _>(
        provider,
        routes::threads::delete_thread,
    );
    provider = crud::mount_with_delete::<Document, _, _>(
        provider,
        routes::documents::delete_document,
    );

    let provider = provider
        .route(
            "/notes/{id}/suggest-codes",
            post(routes::notes::suggest_codes),
        )
        .route(
            "/threads/{id}/messages",
            get(routes::threads::list_messages).post(routes::threads::post_message),
        )
        .route(
            "/documents/{id}/file",
            get(routes::documents::download_file).put(routes::documents::upload_file),
        )
        .route(
            "/portal-accounts",
            get(routes::portal_accounts::list_accounts)
                .post(routes::portal_accounts::create_account),
        )
        .route(
            "/portal-accounts/{id}",
            put(routes::portal_accounts::update_account)
                .delete(routes::portal_accounts::delete_account),
        )
        .route("/dashboard", get(routes::dashboard::dashboard))
        .route("/analytics/notes", get(routes::dashboard::note_analytics))
        .route("/audit-log", get(routes::audit_log::list_entries))
        .route_layer(axum_mw::from_fn_with_state(
            state.clone(),
            middleware::auth::require_provider,
        ));

    let portal = Router::new()
        .route("/portal/documents", get(routes::portal::list_documents))
        .route("/portal/documents/{id}", get(routes::portal::get_document))
        .route(
            "/portal/documents/{id}/file",
            get(routes::portal::download_document),
        )
        .route(
            "/portal/intake-forms",
            get(routes::portal::list_intake_forms),
        )
        .route(
            "/portal/intake-forms/{id}",
            get(routes::portal::get_intake_form).put(routes::portal::submit_intake_form),
        )
        .route("/portal/threads", get(routes::portal::list_threads))
        .route("/portal/threads/{id}", get(routes::portal::get_thread))
        .route(
            "/portal/threads/{id}/messages",
            get(routes::portal::list_messages).post(routes::portal::post_message),
        )
        .route_layer(axum_mw::from_fn_with_state(
            state.clone(),
            middleware::auth::require_portal,
        ));

    Router::new()
        .merge(public)
        .merge(provider)
        .merge(portal)
        .layer(axum_mw::from_fn(middleware::audit::audit_log))
        .layer(cors)
        .with_state(state)
}
