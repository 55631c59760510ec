//! API key authentication middleware.
//!
//! Compares the `authorization` header verbatim against the configured
//! secret. No token scheme, no per-key identity.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use opentask_core::ServiceError;

/// Shared secret for the middleware.
pub struct AuthState {
    pub secret: String,
}

/// Middleware that checks the API key on every request.
///
/// If the request path is in the public list, the middleware passes
/// through. Otherwise the `authorization` header must equal the
/// configured secret exactly.
pub async fn auth_middleware(
    State(auth): State<Arc<AuthState>>,
    request: Request,
    next: Next,
) -> Response {
    if is_public_path(request.uri().path()) {
        return next.run(request).await;
    }

    let presented = request
        .headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok());
    if presented != Some(auth.secret.as_str()) {
        return ServiceError::Unauthorized.into_response();
    }

    next.run(request).await
}

/// Check if a request path is public (no auth required).
fn is_public_path(path: &str) -> bool {
    matches!(path, "/healthz" | "/version")
}
