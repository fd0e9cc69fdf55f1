//! Application error type mapping to HTTP responses.
//!
//! An absent session is not an error surface: it redirects to the
//! login flow. Upstream failures always answer 500, regardless of the
//! original upstream status, as an HTML message or a JSON
//! `{"error": ...}` envelope depending on the requested format.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use serde_json::json;

use repolens_types::error::ProviderError;

use crate::http::format::OutputFormat;
use crate::render::html_escape;

#[derive(Debug)]
pub enum AppError {
    /// No valid session token; handled by redirecting to the login
    /// flow, never surfaced as an error page.
    AuthRequired,
    /// Malformed inbound request.
    BadRequest(String),
    /// Any non-2xx (or transport/decode failure) from the provider.
    Upstream {
        message: String,
        format: OutputFormat,
    },
    /// Template rendering failure.
    Render(String),
}

impl AppError {
    pub fn upstream(err: ProviderError, format: OutputFormat) -> Self {
        AppError::Upstream {
            message: err.to_string(),
            format,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::AuthRequired => Redirect::to("/login").into_response(),
            AppError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, message).into_response()
            }
            AppError::Upstream { message, format } => {
                tracing::error!(%message, "upstream call failed");
                match format {
                    OutputFormat::Json => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        axum::Json(json!({"error": message})),
                    )
                        .into_response(),
                    OutputFormat::Html => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        Html(format!(
                            "<!doctype html><html><body><h1>Upstream error</h1>\
                             <p>{}</p><p><a href=\"/dashboard\">Back to dashboard</a></p>\
                             </body></html>",
                            html_escape(&message)
                        )),
                    )
                        .into_response(),
                }
            }
            AppError::Render(message) => {
                tracing::error!(%message, "template rendering failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal rendering error".to_string(),
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_required_redirects_to_login() {
        let response = AppError::AuthRequired.into_response();
        assert!(response.status().is_redirection());
        assert_eq!(
            response.headers().get("location").unwrap(),
            "/login"
        );
    }

    #[test]
    fn upstream_is_500_even_for_upstream_404() {
        let err = AppError::upstream(
            ProviderError::Upstream {
                status: 404,
                body: "missing".to_string(),
            },
            OutputFormat::Json,
        );
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn bad_request_is_400() {
        let response = AppError::BadRequest("no code provided".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
