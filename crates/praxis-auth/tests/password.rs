use praxis_auth::error::AuthError;
use praxis_auth::password::{hash_secret, verify_secret};

const ITERATIONS: u32 = 1_000;

#[test]
fn correct_secret_verifies() {
    let stored = hash_secret("correct horse", ITERATIONS);
    assert!(verify_secret("correct horse", &stored).unwrap());
}

#[test]
fn wrong_secret_does_not_verify() {
    let stored = hash_secret("correct horse", ITERATIONS);
    assert!(!verify_secret("battery staple", &stored).unwrap());
}

#[test]
fn hashes_are_salted() {
    let a = hash_secret("same secret", ITERATIONS);
    let b = hash_secret("same secret", ITERATIONS);
    assert_ne!(a, b);
    assert!(verify_secret("same secret", &a).unwrap());
    assert!(verify_secret("same secret", &b).unwrap());
}

#[test]
fn stored_form_carries_iterations() {
    let stored = hash_secret("secret", ITERATIONS);
    let parts: Vec<_> = stored.split('$').collect();
    assert_eq!(parts.len(), 4);
    assert_eq!(parts[0], "pbkdf2-sha256");
    assert_eq!(parts[1], "1000");
}

#[test]
fn malformed_hashes_are_errors() {
    for stored in [
        "",
        "plaintext",
        "md5$1000$c2FsdA$aGFzaA",
        "pbkdf2-sha256$zero$c2FsdA$aGFzaA",
        "pbkdf2-sha256$0$c2FsdA$aGFzaA",
        "pbkdf2-sha256$1000$!!!$aGFzaA",
        "pbkdf2-sha256$1000$c2FsdA$aGFzaA",
        "pbkdf2-sha256$1000$c2FsdA$aGFzaA$extra",
    ] {
        let err = verify_secret("secret", stored).unwrap_err();
        assert!(matches!(err, AuthError::MalformedHash), "{stored}");
    }
}
