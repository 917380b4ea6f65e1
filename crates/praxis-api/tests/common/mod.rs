#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use jiff::{SignedDuration, Timestamp};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde_json::{Value, json};
use tower::ServiceExt;

use praxis_api::state::AppState;
use praxis_auth::jwt::ProviderVerifier;
use praxis_auth::portal::PortalTokens;
use praxis_bedrock::error::BedrockError;
use praxis_bedrock::model::{BoxFuture, CompletionModel};
use praxis_storage::memory::MemoryStore;
use praxis_storage::records::Records;

pub const PROVIDER_SECRET: &[u8] = b"test-provider-secret";
pub const PORTAL_SECRET: &[u8] = b"test-portal-secret";

pub const CANNED_SUGGESTION: &str = r#"```json
{"suggestedDiagnoses": [
  {"code": "F32.1", "name": "Major depressive disorder, single episode, moderate", "confidence": 0.61},
  {"code": "F41.1", "name": "Generalized anxiety disorder", "confidence": 0.88}
], "suggestedCpt": "90834", "reasoning": "Moderate PHQ-9 with prominent worry."}
```"#;

pub struct CannedModel {
    reply: Result<String, String>,
}

impl CompletionModel for CannedModel {
    fn model_id(&self) -> &str {
        "canned-model"
    }

    fn complete<'a>(
        &'a self,
        _system_prompt: &'a str,
        _user_prompt: &'a str,
    ) -> BoxFuture<'a, Result<String, BedrockError>> {
        let reply = self.reply.clone().map_err(BedrockError::Invocation);
        Box::pin(async move { reply })
    }
}

pub struct TestApp {
    pub router: Router,
    pub store: MemoryStore,
    pub records: Records,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_model_reply(Ok(CANNED_SUGGESTION.to_string()))
    }

    pub fn with_model_reply(reply: Result<String, String>) -> Self {
        let store = MemoryStore::new();
        let records = Records::new(Arc::new(store.clone()));
        let state = AppState {
            records: records.clone(),
            provider_tokens: Arc::new(ProviderVerifier::shared_secret(PROVIDER_SECRET)),
            portal_tokens: Arc::new(PortalTokens::new(
                PORTAL_SECRET,
                SignedDuration::from_hours(8),
            )),
            model: Arc::new(CannedModel { reply }),
            hash_iterations: 1_000,
        };
        Self {
            router: praxis_api::router(state),
            store,
            records,
        }
    }

    pub async fn send(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let body = match body {
            Some(value) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(serde_json::to_vec(&value).unwrap())
            }
            None => Body::empty(),
        };
        self.send_request(builder.body(body).unwrap()).await
    }

    pub async fn send_raw(
        &self,
        method: &str,
        uri: &str,
        token: &str,
        content_type: &str,
        body: &'static [u8],
    ) -> (StatusCode, Value) {
        let req = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .header(header::CONTENT_TYPE, content_type)
            .body(Body::from(body))
            .unwrap();
        self.send_request(req).await
    }

    pub async fn send_request(&self, req: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(req).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), 1 << 20)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };
        (status, value)
    }

    pub async fn get(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.send("GET", uri, Some(token), None).await
    }

    pub async fn post(&self, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.send("POST", uri, Some(token), Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.send("PUT", uri, Some(token), Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.send("DELETE", uri, Some(token), None).await
    }

    /// Create a client for `token`'s provider and return its id.
    pub async fn create_client(&self, token: &str, first_name: &str) -> String {
        let (status, body) = self
            .post(
                "/clients",
                token,
                json!({ "firstName": first_name, "lastName": "Byron" }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["id"].as_str().unwrap().to_string()
    }

    /// Create a portal account for a client and sign in with it.
    pub async fn portal_login(&self, provider: &str, client_id: &str, email: &str) -> String {
        let (status, body) = self
            .post(
                "/portal-accounts",
                provider,
                json!({ "clientId": client_id, "email": email, "password": "open sesame" }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");

        let (status, body) = self
            .send(
                "POST",
                "/portal/login",
                None,
                Some(json!({ "email": email, "password": "open sesame" })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        body["token"].as_str().unwrap().to_string()
    }
}

/// A shared-secret provider access token for `sub`.
pub fn provider_token(sub: &str) -> String {
    let exp = Timestamp::now().as_second() + 3600;
    encode(
        &Header::default(),
        &json!({ "sub": sub, "token_use": "access", "exp": exp }),
        &EncodingKey::from_secret(PROVIDER_SECRET),
    )
    .unwrap()
}
