use std::sync::Arc;

use aws_config::{BehaviorVersion, Region};
use tracing_subscriber::EnvFilter;

use praxis_api::config::{ApiConfig, ProviderAuth, StoreBackend};
use praxis_api::state::AppState;
use praxis_auth::jwt::ProviderVerifier;
use praxis_auth::portal::PortalTokens;
use praxis_bedrock::model::BedrockModel;
use praxis_storage::memory::MemoryStore;
use praxis_storage::records::Records;
use praxis_storage::s3::S3Store;
use praxis_storage::store::ObjectStore;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Structured JSON logging for CloudWatch
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    let config = ApiConfig::from_env()?;

    let sdk_config = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(config.region.clone()))
        .load()
        .await;

    let store: Arc<dyn ObjectStore> = match &config.store {
        StoreBackend::S3 { bucket } => {
            tracing::info!(bucket = %bucket, "using S3 store");
            Arc::new(S3Store::new(aws_sdk_s3::Client::new(&sdk_config), bucket))
        }
        StoreBackend::Memory => {
            tracing::warn!("using in-memory store; records are lost on exit");
            Arc::new(MemoryStore::new())
        }
    };

    let provider_tokens = match &config.provider_auth {
        ProviderAuth::Cognito {
            user_pool_id,
            jwk_n,
            jwk_e,
        } => ProviderVerifier::cognito(user_pool_id, &config.region, jwk_n, jwk_e)?,
        ProviderAuth::SharedSecret(secret) => {
            tracing::warn!("provider tokens verified with a shared secret");
            ProviderVerifier::shared_secret(secret.as_bytes())
        }
    };

    let state = AppState {
        records: Records::new(store),
        provider_tokens: Arc::new(provider_tokens),
        portal_tokens: Arc::new(PortalTokens::new(
            config.portal_token_secret.as_bytes(),
            config.portal_session,
        )),
        model: Arc::new(BedrockModel::new(&sdk_config, config.suggestion_model.clone())),
        hash_iterations: config.hash_iterations,
    };

    let app = praxis_api::router(state);

    match &config.listen_addr {
        Some(addr) => {
            let listener = tokio::net::TcpListener::bind(addr.as_str()).await?;
            tracing::info!(addr = %addr, "listening");
            axum::serve(listener, app).await?;
            Ok(())
        }
        None => lambda_http::run(app).await.map_err(|e| eyre::eyre!(e)),
    }
}
