//! Repository picker.

use axum::extract::State;
use axum::response::Html;
use minijinja::context;

use repolens_core::provider::ProviderApi;

use crate::http::error::AppError;
use crate::http::extractors::session::SessionToken;
use crate::http::format::OutputFormat;
use crate::state::AppState;

/// GET /dashboard - The user's repositories, most recently updated
/// first, to pick from. Single page of 20.
pub async fn dashboard(
    State(state): State<AppState>,
    session: SessionToken,
) -> Result<Html<String>, AppError> {
    let api = state.client_for(session.token);
    let repos = api
        .get("/user/repos", &[("sort", "updated"), ("per_page", "20")])
        .await
        .map_err(|e| AppError::upstream(e, OutputFormat::Html))?;

    let html = state
        .templates
        .render("dashboard.html", context! { repos => repos })?;
    Ok(Html(html))
}
