//! Application configuration.
//!
//! All credentials are read once at startup into [`AppConfig`] and the
//! struct is passed by reference (behind an `Arc`) to every component
//! that needs it. There is no ambient global configuration state.

use secrecy::SecretString;

/// Upstream provider endpoints.
///
/// Defaults point at github.com; tests and proxies override them.
#[derive(Debug, Clone)]
pub struct ProviderEndpoints {
    /// REST and GraphQL API base, e.g. `https://api.github.com`.
    pub api_url: String,
    /// OAuth authorize page.
    pub auth_url: String,
    /// OAuth code-for-token exchange endpoint.
    pub token_url: String,
}

impl ProviderEndpoints {
    /// The production github.com endpoints.
    pub fn github() -> Self {
        Self {
            api_url: "https://api.github.com".to_string(),
            auth_url: "https://github.com/login/oauth/authorize".to_string(),
            token_url: "https://github.com/login/oauth/access_token".to_string(),
        }
    }
}

/// Startup configuration, constructed once in `main`.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Secret used to sign the session-id cookie.
    pub session_secret: SecretString,
    /// OAuth application client id. Not secret; it appears in the
    /// authorize redirect URL.
    pub client_id: String,
    /// OAuth application client secret.
    pub client_secret: SecretString,
    pub endpoints: ProviderEndpoints,
}
