//! Portal secret hashing.
//!
//! Stored form: `pbkdf2-sha256$<iterations>$<salt>$<hash>`, salt and hash
//! base64 without padding. The iteration count travels with the hash so it
//! can be raised without invalidating existing accounts.

use base64::Engine;
use base64::engine::general_purpose::STANDARD_NO_PAD;
use pbkdf2::pbkdf2_hmac;
use rand::RngCore;
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::error::AuthError;

pub const DEFAULT_ITERATIONS: u32 = 600_000;

const SCHEME: &str = "pbkdf2-sha256";
const SALT_LENGTH: usize = 16;
const HASH_LENGTH: usize = 32;

/// Hash a secret with a fresh random salt.
pub fn hash_secret(secret: &str, iterations: u32) -> String {
    let mut salt = [0u8; SALT_LENGTH];
    rand::thread_rng().fill_bytes(&mut salt);

    let hash = derive(secret, &salt, iterations);
    format!(
        "{SCHEME}${iterations}${}${}",
        STANDARD_NO_PAD.encode(salt),
        STANDARD_NO_PAD.encode(hash)
    )
}

/// Check a secret against a stored hash in constant time.
pub fn verify_secret(secret: &str, stored: &str) -> Result<bool, AuthError> {
    let mut parts = stored.split('$');
    let (Some(scheme), Some(iterations), Some(salt), Some(hash), None) = (
        parts.next(),
        parts.next(),
        parts.next(),
        parts.next(),
        parts.next(),
    ) else {
        return Err(AuthError::MalformedHash);
    };
    if scheme != SCHEME {
        return Err(AuthError::MalformedHash);
    }

    let iterations: u32 = iterations.parse().map_err(|_| AuthError::MalformedHash)?;
    if iterations == 0 {
        return Err(AuthError::MalformedHash);
    }
    let salt = STANDARD_NO_PAD
        .decode(salt)
        .map_err(|_| AuthError::MalformedHash)?;
    let expected = STANDARD_NO_PAD
        .decode(hash)
        .map_err(|_| AuthError::MalformedHash)?;
    if expected.len() != HASH_LENGTH {
        return Err(AuthError::MalformedHash);
    }

    let actual = derive(secret, &salt, iterations);
    Ok(actual[..].ct_eq(&expected[..]).into())
}

fn derive(secret: &str, salt: &[u8], iterations: u32) -> [u8; HASH_LENGTH] {
    let mut out = [0u8; HASH_LENGTH];
    pbkdf2_hmac::<Sha256>(secret.as_bytes(), salt, iterations, &mut out);
    out
}
