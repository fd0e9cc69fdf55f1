//! Branch diff and branch summary views.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::response::{Html, IntoResponse, Response};
use minijinja::context;

use repolens_core::branch::BranchService;

use crate::http::error::AppError;
use crate::http::extractors::session::SessionToken;
use crate::http::format::{FormatQuery, OutputFormat};
use crate::state::AppState;

/// GET /repo/{owner}/{name}/branch-diffs - Ahead/behind commits for
/// every branch against the default branch.
///
/// `format=json` is raw mode: every unprocessed REST body, no shaping.
pub async fn branch_diffs(
    State(state): State<AppState>,
    session: SessionToken,
    Path((owner, name)): Path<(String, String)>,
    Query(query): Query<FormatQuery>,
) -> Result<Response, AppError> {
    let service = BranchService::new(state.client_for(session.token));

    if query.format == OutputFormat::Json {
        let raw = service
            .branch_diffs_raw(&owner, &name)
            .await
            .map_err(|e| AppError::upstream(e, query.format))?;
        return Ok(Json(raw).into_response());
    }

    let report = service
        .branch_diffs(&owner, &name)
        .await
        .map_err(|e| AppError::upstream(e, query.format))?;

    let html = state.templates.render(
        "branch_diffs.html",
        context! {
            repo_name => format!("{owner}/{name}"),
            report => report,
        },
    )?;
    Ok(Html(html).into_response())
}

/// GET /repo/{owner}/{name}/branch-summary - Latest change and first
/// divergence from default for every branch.
pub async fn branch_summary(
    State(state): State<AppState>,
    session: SessionToken,
    Path((owner, name)): Path<(String, String)>,
    Query(query): Query<FormatQuery>,
) -> Result<Response, AppError> {
    let service = BranchService::new(state.client_for(session.token));
    let summary = service
        .branch_summary(&owner, &name)
        .await
        .map_err(|e| AppError::upstream(e, query.format))?;

    if query.format == OutputFormat::Json {
        return Ok(Json(summary).into_response());
    }

    let html = state.templates.render(
        "branch_summary.html",
        context! {
            repo_name => format!("{owner}/{name}"),
            summary => summary,
        },
    )?;
    Ok(Html(html).into_response())
}
