//! Route registration — collects all module routes + system endpoints.

use std::sync::Arc;

use axum::Router;
use axum::middleware;
use axum::response::IntoResponse;
use axum::routing::get;
use tracing::info;

use crate::auth_middleware::{self, AuthState};

/// Build the complete router with all routes.
pub fn build_router(auth: Arc<AuthState>, module_routes: Vec<(&str, Router)>) -> Router {
    // System endpoints (public, no auth).
    let mut app = Router::new()
        .route("/healthz", get(healthz))
        .route("/version", get(version));

    // Merge module routes at the root.
    // Module routes are already Router<()> (they called .with_state() internally).
    for (name, router) in module_routes {
        info!("{name} module routes mounted");
        app = app.merge(router);
    }

    // Apply API key middleware to all routes.
    app.layer(middleware::from_fn_with_state(
        auth,
        auth_middleware::auth_middleware,
    ))
}

async fn healthz() -> impl IntoResponse {
    axum::Json(serde_json::json!({
        "status": "success",
    }))
}

async fn version() -> impl IntoResponse {
    axum::Json(serde_json::json!({
        "name": "opentaskd",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
