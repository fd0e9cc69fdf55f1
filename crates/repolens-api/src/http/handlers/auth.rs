//! Login flow handlers: index, OAuth redirect, callback, logout.

use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::http::header::SET_COOKIE;
use axum::response::{AppendHeaders, Html, IntoResponse, Redirect, Response};
use minijinja::context;
use serde::Deserialize;

use repolens_infra::github::oauth;

use crate::http::error::AppError;
use crate::http::extractors::session::{
    clear_session_cookie, resolve_session, session_cookie,
};
use crate::http::format::OutputFormat;
use crate::state::AppState;

/// GET / - Login link, or straight to the dashboard when a session
/// already exists.
pub async fn index(State(state): State<AppState>, headers: HeaderMap) -> Result<Response, AppError> {
    if resolve_session(&headers, &state).is_some() {
        return Ok(Redirect::to("/dashboard").into_response());
    }
    let html = state.templates.render("index.html", context! {})?;
    Ok(Html(html).into_response())
}

/// GET /login - Redirect to the provider's authorize page.
pub async fn login(State(state): State<AppState>) -> Redirect {
    Redirect::to(&oauth::authorize_url(&state.config))
}

#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    pub code: Option<String>,
}

/// GET /oauth/callback - Exchange the temporary code, create the
/// session, and hand out the signed cookie.
pub async fn callback(
    State(state): State<AppState>,
    Query(query): Query<CallbackQuery>,
) -> Result<Response, AppError> {
    let code = query
        .code
        .ok_or_else(|| AppError::BadRequest("no code provided".to_string()))?;

    let token = oauth::exchange_code(&state.http, &state.config, &code)
        .await
        .map_err(|e| AppError::upstream(e, OutputFormat::Html))?;

    let sid = uuid::Uuid::now_v7().to_string();
    state.tokens.set(&sid, token);
    tracing::info!(%sid, "session created");

    let cookie = session_cookie(&state.config.session_secret, &sid);
    Ok((
        AppendHeaders([(SET_COOKIE, cookie)]),
        Redirect::to("/dashboard"),
    )
        .into_response())
}

/// GET /logout - Drop the session and expire the cookie.
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Some(session) = resolve_session(&headers, &state) {
        state.tokens.clear(&session.sid);
        tracing::info!(sid = %session.sid, "session cleared");
    }
    (
        AppendHeaders([(SET_COOKIE, clear_session_cookie())]),
        Redirect::to("/"),
    )
        .into_response()
}
