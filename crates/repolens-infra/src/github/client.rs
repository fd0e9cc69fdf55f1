//! Concrete [`ProviderApi`] implementation over reqwest.
//!
//! A single shared `reqwest::Client` is built once at startup;
//! [`GithubClient`] is a cheap per-request binding of that client to
//! the calling session's bearer token and the configured API base.
//!
//! The token is wrapped in [`secrecy::SecretString`] and only exposed
//! when the Authorization header is built. No retries, no per-call
//! timeout override.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde_json::{Value, json};

use repolens_core::provider::ProviderApi;
use repolens_types::error::ProviderError;

const USER_AGENT: &str = concat!("repolens/", env!("CARGO_PKG_VERSION"));

/// Overall request timeout for upstream calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Build the process-wide HTTP client shared by all requests.
pub fn shared_http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .user_agent(USER_AGENT)
        .build()
        .expect("failed to create reqwest client")
}

/// Bearer-authenticated GitHub API access for one session.
pub struct GithubClient {
    http: reqwest::Client,
    api_url: String,
    token: SecretString,
}

impl GithubClient {
    pub fn new(http: reqwest::Client, api_url: impl Into<String>, token: SecretString) -> Self {
        Self {
            http,
            api_url: api_url.into(),
            token,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }

    async fn into_json(response: reqwest::Response) -> Result<Value, ProviderError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "upstream call failed");
            return Err(ProviderError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json()
            .await
            .map_err(|e| ProviderError::Decode(e.to_string()))
    }
}

impl ProviderApi for GithubClient {
    async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<Value, ProviderError> {
        let response = self
            .http
            .get(self.url(path))
            .query(query)
            .bearer_auth(self.token.expose_secret())
            .header("accept", "application/vnd.github+json")
            .send()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        Self::into_json(response).await
    }

    async fn graphql(&self, query: &str, variables: Value) -> Result<Value, ProviderError> {
        let response = self
            .http
            .post(self.url("/graphql"))
            .bearer_auth(self.token.expose_secret())
            .json(&json!({"query": query, "variables": variables}))
            .send()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        Self::into_json(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> GithubClient {
        GithubClient::new(
            shared_http_client(),
            server.uri(),
            SecretString::from("gho_testtoken"),
        )
    }

    #[tokio::test]
    async fn get_attaches_bearer_token_and_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/user/repos"))
            .and(header("authorization", "Bearer gho_testtoken"))
            .and(query_param("sort", "updated"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let body = client_for(&server)
            .get("/user/repos", &[("sort", "updated")])
            .await
            .unwrap();
        assert!(body.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn non_2xx_maps_to_upstream_error_with_status_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/octo/missing"))
            .respond_with(
                ResponseTemplate::new(404).set_body_string("{\"message\":\"Not Found\"}"),
            )
            .mount(&server)
            .await;

        let err = client_for(&server)
            .get("/repos/octo/missing", &[])
            .await
            .unwrap_err();

        match err {
            ProviderError::Upstream { status, body } => {
                assert_eq!(status, 404);
                assert!(body.contains("Not Found"));
            }
            other => panic!("expected Upstream, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn graphql_posts_query_and_variables() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/graphql"))
            .and(header("authorization", "Bearer gho_testtoken"))
            .and(body_partial_json(
                serde_json::json!({"variables": {"owner": "octo"}}),
            ))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"data": {}})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let body = client_for(&server)
            .graphql("query { viewer { login } }", serde_json::json!({"owner": "octo"}))
            .await
            .unwrap();
        assert!(body.get("data").is_some());
    }

    #[tokio::test]
    async fn graphql_body_with_errors_field_is_returned_as_is() {
        // The transport layer does not interpret provider-side errors.
        let server = MockServer::start().await;
        let payload = serde_json::json!({"data": null, "errors": [{"message": "nope"}]});
        Mock::given(method("POST"))
            .and(path("/graphql"))
            .respond_with(ResponseTemplate::new(200).set_body_json(payload.clone()))
            .mount(&server)
            .await;

        let body = client_for(&server)
            .graphql("query {}", serde_json::json!({}))
            .await
            .unwrap();
        assert_eq!(body, payload);
    }
}
