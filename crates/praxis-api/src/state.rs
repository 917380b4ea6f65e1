use std::sync::Arc;

use praxis_auth::jwt::ProviderVerifier;
use praxis_auth::portal::PortalTokens;
use praxis_bedrock::model::CompletionModel;
use praxis_storage::records::Records;

/// Shared application state, injected into all route handlers via Axum state.
#[derive(Clone)]
pub struct AppState {
    pub records: Records,
    pub provider_tokens: Arc<ProviderVerifier>,
    pub portal_tokens: Arc<PortalTokens>,
    pub model: Arc<dyn CompletionModel>,
    /// PBKDF2 iterations for newly set portal secrets.
    pub hash_iterations: u32,
}
