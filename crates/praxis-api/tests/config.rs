use std::collections::HashMap;

use praxis_api::config::{ApiConfig, ProviderAuth, StoreBackend};

fn config(vars: &[(&str, &str)]) -> eyre::Result<ApiConfig> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    ApiConfig::from_lookup(|name| vars.get(name).cloned())
}

#[test]
fn defaults_apply() {
    let config = config(&[
        ("PRAXIS_PROVIDER_TOKEN_SECRET", "dev"),
        ("PRAXIS_PORTAL_TOKEN_SECRET", "portal"),
    ])
    .unwrap();

    assert_eq!(
        config.store,
        StoreBackend::S3 {
            bucket: "praxis".to_string()
        }
    );
    assert_eq!(config.region, "us-east-1");
    assert_eq!(config.provider_auth, ProviderAuth::SharedSecret("dev".to_string()));
    assert_eq!(config.portal_session.as_secs(), 8 * 60 * 60);
    assert_eq!(config.hash_iterations, praxis_auth::password::DEFAULT_ITERATIONS);
    assert!(config.listen_addr.is_none());
}

#[test]
fn cognito_takes_precedence() {
    let config = config(&[
        ("COGNITO_USER_POOL_ID", "us-east-1_abc"),
        ("COGNITO_JWK_N", "modulus"),
        ("COGNITO_JWK_E", "AQAB"),
        ("PRAXIS_PROVIDER_TOKEN_SECRET", "dev"),
        ("PRAXIS_PORTAL_TOKEN_SECRET", "portal"),
        ("PRAXIS_STORE", "memory"),
    ])
    .unwrap();

    assert!(matches!(config.provider_auth, ProviderAuth::Cognito { .. }));
    assert_eq!(config.store, StoreBackend::Memory);
}

#[test]
fn missing_or_bad_values_are_rejected() {
    assert!(config(&[("PRAXIS_PORTAL_TOKEN_SECRET", "portal")]).is_err());
    assert!(config(&[("PRAXIS_PROVIDER_TOKEN_SECRET", "dev")]).is_err());

    let base = [
        ("PRAXIS_PROVIDER_TOKEN_SECRET", "dev"),
        ("PRAXIS_PORTAL_TOKEN_SECRET", "portal"),
    ];
    for bad in [
        ("PRAXIS_STORE", "dynamo"),
        ("PRAXIS_PORTAL_SESSION_SECS", "soon"),
        ("PRAXIS_PORTAL_SESSION_SECS", "0"),
        ("PRAXIS_PORTAL_HASH_ITERATIONS", "0"),
    ] {
        let mut vars = base.to_vec();
        vars.push(bad);
        assert!(config(&vars).is_err(), "{bad:?} should be rejected");
    }
}

#[test]
fn blank_values_count_as_unset() {
    let config = config(&[
        ("PRAXIS_PROVIDER_TOKEN_SECRET", "dev"),
        ("PRAXIS_PORTAL_TOKEN_SECRET", "portal"),
        ("PRAXIS_BUCKET", "  "),
        ("PRAXIS_LISTEN_ADDR", ""),
    ])
    .unwrap();
    assert_eq!(
        config.store,
        StoreBackend::S3 {
            bucket: "praxis".to_string()
        }
    );
    assert!(config.listen_addr.is_none());
}
