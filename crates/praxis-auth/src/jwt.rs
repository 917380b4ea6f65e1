use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::Deserialize;

use crate::error::AuthError;

/// Claims extracted from a provider access or id token.
#[derive(Debug, Deserialize)]
pub struct ProviderClaims {
    pub sub: String,
    pub token_use: String,
    pub exp: u64,
    #[serde(default)]
    pub iat: Option<u64>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

/// Verifies provider bearer tokens.
///
/// Providers authenticate against Cognito; only the token check happens
/// here. A shared-secret mode exists for local runs without a user pool.
pub struct ProviderVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl ProviderVerifier {
    /// RS256 tokens from a Cognito user pool, checked against one JWK given
    /// as base64url modulus and exponent.
    pub fn cognito(user_pool_id: &str, region: &str, n: &str, e: &str) -> Result<Self, AuthError> {
        let key = DecodingKey::from_rsa_components(n, e)
            .map_err(|err| AuthError::InvalidKey(err.to_string()))?;
        let issuer = format!("https://cognito-idp.{region}.amazonaws.com/{user_pool_id}");

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_issuer(&[&issuer]);
        validation.validate_exp = true;
        validation.validate_aud = false;

        Ok(Self { key, validation })
    }

    /// HS256 tokens signed with a shared secret.
    pub fn shared_secret(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.validate_aud = false;

        Self {
            key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Validate a token and return its claims. The `sub` claim is the
    /// provider's user id.
    pub fn verify(&self, token: &str) -> Result<ProviderClaims, AuthError> {
        let token_data = decode::<ProviderClaims>(token, &self.key, &self.validation)?;

        let token_use = &token_data.claims.token_use;
        if token_use != "access" && token_use != "id" {
            tracing::debug!(token_use = %token_use, "rejected provider token");
            return Err(AuthError::InvalidToken(format!(
                "unexpected token_use: {token_use}"
            )));
        }
        if token_data.claims.sub.trim().is_empty() {
            return Err(AuthError::InvalidToken("empty subject".to_string()));
        }

        Ok(token_data.claims)
    }
}
