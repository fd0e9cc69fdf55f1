//! Pull-request activity view.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::response::{Html, IntoResponse, Response};
use minijinja::context;

use repolens_core::activity::ActivityService;
use repolens_types::activity::ActivityOutcome;

use crate::http::error::AppError;
use crate::http::extractors::session::SessionToken;
use crate::http::format::{FormatQuery, OutputFormat};
use crate::state::AppState;

/// GET /repo/{owner}/{name}/activity - Time-filtered pull request
/// activity for the last 30 days.
///
/// Provider-side GraphQL errors are served verbatim at 200 in both
/// formats; only transport-level failures become error responses.
pub async fn activity(
    State(state): State<AppState>,
    session: SessionToken,
    Path((owner, name)): Path<(String, String)>,
    Query(query): Query<FormatQuery>,
) -> Result<Response, AppError> {
    let service = ActivityService::new(state.client_for(session.token));
    let outcome = service
        .run(&owner, &name)
        .await
        .map_err(|e| AppError::upstream(e, query.format))?;

    if query.format == OutputFormat::Json {
        return Ok(Json(outcome).into_response());
    }

    let html = match outcome {
        ActivityOutcome::Report(report) => state.templates.render(
            "activity.html",
            context! {
                repo_name => format!("{owner}/{name}"),
                report => report,
            },
        )?,
        ActivityOutcome::ProviderErrors { errors } => {
            let pretty = serde_json::to_string_pretty(&errors)
                .map_err(|e| AppError::Render(e.to_string()))?;
            state.templates.render(
                "json.html",
                context! {
                    title => format!("Provider errors for {owner}/{name}"),
                    json_data => pretty,
                },
            )?
        }
    };

    Ok(Html(html).into_response())
}
