//! Runtime configuration read from environment variables.

use std::env;

use eyre::{WrapErr, bail, eyre};
use jiff::SignedDuration;

pub const DEFAULT_SUGGESTION_MODEL: &str = "us.anthropic.claude-sonnet-4-20250514-v1:0";

/// Where records and files are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    S3 { bucket: String },
    Memory,
}

/// How provider bearer tokens are verified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderAuth {
    Cognito {
        user_pool_id: String,
        jwk_n: String,
        jwk_e: String,
    },
    SharedSecret(String),
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub store: StoreBackend,
    pub region: String,
    pub provider_auth: ProviderAuth,
    pub portal_token_secret: String,
    pub portal_session: SignedDuration,
    pub hash_iterations: u32,
    pub suggestion_model: String,
    /// Serve plain HTTP on this address instead of running under Lambda.
    pub listen_addr: Option<String>,
}

impl ApiConfig {
    pub fn from_env() -> eyre::Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from an arbitrary variable source. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> eyre::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let store = match var("PRAXIS_STORE").as_deref().unwrap_or("s3") {
            "s3" => StoreBackend::S3 {
                bucket: var("PRAXIS_BUCKET").unwrap_or_else(|| "praxis".to_string()),
            },
            "memory" => StoreBackend::Memory,
            other => bail!("PRAXIS_STORE must be `s3` or `memory`, got `{other}`"),
        };

        let region = var("AWS_REGION").unwrap_or_else(|| "us-east-1".to_string());

        let provider_auth = match (
            var("COGNITO_USER_POOL_ID"),
            var("COGNITO_JWK_N"),
            var("COGNITO_JWK_E"),
            var("PRAXIS_PROVIDER_TOKEN_SECRET"),
        ) {
            (Some(user_pool_id), Some(jwk_n), Some(jwk_e), _) => ProviderAuth::Cognito {
                user_pool_id,
                jwk_n,
                jwk_e,
            },
            (_, _, _, Some(secret)) => ProviderAuth::SharedSecret(secret),
            _ => bail!(
                "provider token verification is not configured: set COGNITO_USER_POOL_ID, \
                 COGNITO_JWK_N and COGNITO_JWK_E, or PRAXIS_PROVIDER_TOKEN_SECRET"
            ),
        };

        let portal_token_secret = var("PRAXIS_PORTAL_TOKEN_SECRET")
            .ok_or_else(|| eyre!("PRAXIS_PORTAL_TOKEN_SECRET is required"))?;

        let portal_session_secs: i64 = match var("PRAXIS_PORTAL_SESSION_SECS") {
            Some(v) => v
                .parse()
                .wrap_err("PRAXIS_PORTAL_SESSION_SECS must be a whole number of seconds")?,
            None => 8 * 60 * 60,
        };
        if portal_session_secs <= 0 {
            bail!("PRAXIS_PORTAL_SESSION_SECS must be positive");
        }

        let hash_iterations: u32 = match var("PRAXIS_PORTAL_HASH_ITERATIONS") {
            Some(v) => v
                .parse()
                .wrap_err("PRAXIS_PORTAL_HASH_ITERATIONS must be a whole number")?,
            None => praxis_auth::password::DEFAULT_ITERATIONS,
        };
        if hash_iterations == 0 {
            bail!("PRAXIS_PORTAL_HASH_ITERATIONS must be positive");
        }

        Ok(Self {
            store,
            region,
            provider_auth,
            portal_token_secret,
            portal_session: SignedDuration::from_secs(portal_session_secs),
            hash_iterations,
            suggestion_model: var("PRAXIS_SUGGESTION_MODEL")
                .unwrap_or_else(|| DEFAULT_SUGGESTION_MODEL.to_string()),
            listen_addr: var("PRAXIS_LISTEN_ADDR"),
        })
    }
}
