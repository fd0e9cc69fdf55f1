//! Axum router configuration with middleware.

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::auth::index))
        .route("/login", get(handlers::auth::login))
        .route("/oauth/callback", get(handlers::auth::callback))
        .route("/logout", get(handlers::auth::logout))
        .route("/dashboard", get(handlers::dashboard::dashboard))
        .route(
            "/repo/{owner}/{name}/activity",
            get(handlers::activity::activity),
        )
        .route(
            "/repo/{owner}/{name}/branch-diffs",
            get(handlers::branch::branch_diffs),
        )
        .route(
            "/repo/{owner}/{name}/branch-summary",
            get(handlers::branch::branch_summary),
        )
        .route(
            "/repo/{owner}/{name}/commit/{sha}",
            get(handlers::commit::commit),
        )
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health - Simple liveness check (no auth required).
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
