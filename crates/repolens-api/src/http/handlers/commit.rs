//! Single-commit view.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::response::{Html, IntoResponse, Response};
use minijinja::context;

use repolens_core::commit::fetch_commit;

use crate::http::error::AppError;
use crate::http::extractors::session::SessionToken;
use crate::http::format::{FormatQuery, OutputFormat};
use crate::state::AppState;

/// GET /repo/{owner}/{name}/commit/{sha} - One commit, shaped with
/// its 7-character display hash.
pub async fn commit(
    State(state): State<AppState>,
    session: SessionToken,
    Path((owner, name, sha)): Path<(String, String, String)>,
    Query(query): Query<FormatQuery>,
) -> Result<Response, AppError> {
    let api = state.client_for(session.token);
    let detail = fetch_commit(&api, &owner, &name, &sha)
        .await
        .map_err(|e| AppError::upstream(e, query.format))?;

    if query.format == OutputFormat::Json {
        return Ok(Json(detail).into_response());
    }

    let html = state.templates.render(
        "commit.html",
        context! {
            repo_name => format!("{owner}/{name}"),
            commit => detail,
        },
    )?;
    Ok(Html(html).into_response())
}
