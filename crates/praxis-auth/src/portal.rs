//! Session tokens for the client portal.
//!
//! Issued by the portal login route, signed HS256 with a secret distinct
//! from anything providers hold.

use jiff::{SignedDuration, Timestamp};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use praxis_core::access::PortalSession;

use crate::error::AuthError;

const TOKEN_USE: &str = "portal";

#[derive(Debug, Serialize, Deserialize)]
struct PortalClaims {
    sub: Uuid,
    client_id: Uuid,
    provider_id: String,
    token_use: String,
    iat: i64,
    exp: i64,
}

/// A freshly issued portal token.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: Timestamp,
}

pub struct PortalTokens {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: SignedDuration,
}

impl PortalTokens {
    pub fn new(secret: &[u8], ttl: SignedDuration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl,
        }
    }

    pub fn issue(&self, session: &PortalSession, now: Timestamp) -> Result<IssuedToken, AuthError> {
        let expires_at = now
            .checked_add(self.ttl)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))?;
        let claims = PortalClaims {
            sub: session.account_id,
            client_id: session.client_id,
            provider_id: session.provider_id.clone(),
            token_use: TOKEN_USE.to_string(),
            iat: now.as_second(),
            exp: expires_at.as_second(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?;
        Ok(IssuedToken { token, expires_at })
    }

    pub fn verify(&self, token: &str) -> Result<PortalSession, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.validate_aud = false;

        let token_data = decode::<PortalClaims>(token, &self.decoding, &validation)?;
        let claims = token_data.claims;
        if claims.token_use != TOKEN_USE {
            return Err(AuthError::InvalidToken(format!(
                "unexpected token_use: {}",
                claims.token_use
            )));
        }

        Ok(PortalSession {
            account_id: claims.sub,
            client_id: claims.client_id,
            provider_id: claims.provider_id,
        })
    }
}
