//! OAuth authorize redirect and code-for-token exchange.

use secrecy::{ExposeSecret, SecretString};
use serde_json::{Value, json};

use repolens_types::config::AppConfig;
use repolens_types::error::ProviderError;

/// Scope requested from the provider. `repo` covers the REST and
/// GraphQL reads this application issues.
pub const OAUTH_SCOPE: &str = "repo";

/// The provider authorize URL the login handler redirects to.
pub fn authorize_url(config: &AppConfig) -> String {
    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("client_id", &config.client_id)
        .append_pair("scope", OAUTH_SCOPE)
        .finish();
    format!("{}?{}", config.endpoints.auth_url, query)
}

/// Exchange the temporary OAuth `code` for an access token.
pub async fn exchange_code(
    http: &reqwest::Client,
    config: &AppConfig,
    code: &str,
) -> Result<SecretString, ProviderError> {
    let response = http
        .post(&config.endpoints.token_url)
        .header("accept", "application/json")
        .json(&json!({
            "client_id": config.client_id,
            "client_secret": config.client_secret.expose_secret(),
            "code": code,
        }))
        .send()
        .await
        .map_err(|e| ProviderError::Transport(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ProviderError::Upstream {
            status: status.as_u16(),
            body,
        });
    }

    let body: Value = response
        .json()
        .await
        .map_err(|e| ProviderError::Decode(e.to_string()))?;

    body.get("access_token")
        .and_then(Value::as_str)
        .map(|token| SecretString::from(token.to_string()))
        .ok_or_else(|| {
            ProviderError::Decode("token response has no access_token".to_string())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use repolens_types::config::ProviderEndpoints;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_for(server: &MockServer) -> AppConfig {
        AppConfig {
            session_secret: SecretString::from("s3cret"),
            client_id: "iv1.abc".to_string(),
            client_secret: SecretString::from("shhh"),
            endpoints: ProviderEndpoints {
                api_url: server.uri(),
                auth_url: format!("{}/login/oauth/authorize", server.uri()),
                token_url: format!("{}/login/oauth/access_token", server.uri()),
            },
        }
    }

    #[test]
    fn authorize_url_carries_client_id_and_scope() {
        let config = AppConfig {
            session_secret: SecretString::from("s3cret"),
            client_id: "iv1.a b".to_string(),
            client_secret: SecretString::from("shhh"),
            endpoints: ProviderEndpoints::github(),
        };

        let url = authorize_url(&config);
        assert!(url.starts_with("https://github.com/login/oauth/authorize?"));
        assert!(url.contains("client_id=iv1.a+b"));
        assert!(url.contains("scope=repo"));
    }

    #[tokio::test]
    async fn exchange_posts_credentials_and_returns_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/login/oauth/access_token"))
            .and(header("accept", "application/json"))
            .and(body_partial_json(serde_json::json!({
                "client_id": "iv1.abc",
                "code": "tmp-code",
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "gho_fresh",
                "token_type": "bearer",
                "scope": "repo",
            })))
            .expect(1)
            .mount(&server)
            .await;

        let http = reqwest::Client::new();
        let token = exchange_code(&http, &config_for(&server), "tmp-code")
            .await
            .unwrap();
        assert_eq!(token.expose_secret(), "gho_fresh");
    }

    #[tokio::test]
    async fn missing_access_token_is_a_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/login/oauth/access_token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                serde_json::json!({"error": "bad_verification_code"}),
            ))
            .mount(&server)
            .await;

        let http = reqwest::Client::new();
        let err = exchange_code(&http, &config_for(&server), "stale")
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::Decode(_)));
    }

    #[tokio::test]
    async fn non_2xx_exchange_is_an_upstream_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/login/oauth/access_token"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .mount(&server)
            .await;

        let http = reqwest::Client::new();
        let err = exchange_code(&http, &config_for(&server), "tmp")
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::Upstream { status: 502, .. }));
    }
}
