use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;

use praxis_core::access::Identity;

/// Request logging middleware.
///
/// Logs every API request as a structured event using `tracing`, with the
/// acting identity when one was resolved.
pub async fn audit_log(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().path().to_string();

    let response = next.run(req).await;

    let status = response.status().as_u16();
    let actor = response
        .extensions()
        .get::<Identity>()
        .map(|identity| identity.actor());
    tracing::info!(
        method = %method,
        path = %uri,
        status = status,
        actor = actor.as_deref().unwrap_or("anonymous"),
        "api_request"
    );

    response
}
