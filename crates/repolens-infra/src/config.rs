//! Environment-based configuration loading.
//!
//! All three credentials are required; a missing one is a fatal
//! [`ConfigError`] and the process does not start. The endpoint
//! overrides exist for tests and proxies and default to github.com.
//!
//! [`from_lookup`] takes the variable lookup as a closure so tests
//! never mutate the process environment.

use secrecy::SecretString;

use repolens_types::config::{AppConfig, ProviderEndpoints};
use repolens_types::error::ConfigError;

pub const ENV_SESSION_SECRET: &str = "REPOLENS_SESSION_SECRET";
pub const ENV_CLIENT_ID: &str = "GITHUB_CLIENT_ID";
pub const ENV_CLIENT_SECRET: &str = "GITHUB_CLIENT_SECRET";
pub const ENV_API_URL: &str = "GITHUB_API_URL";
pub const ENV_AUTH_URL: &str = "GITHUB_AUTH_URL";
pub const ENV_TOKEN_URL: &str = "GITHUB_TOKEN_URL";

/// Load [`AppConfig`] from the process environment.
pub fn load() -> Result<AppConfig, ConfigError> {
    from_lookup(|key| std::env::var(key).ok())
}

/// Build an [`AppConfig`] from an arbitrary variable lookup.
///
/// Empty values count as missing.
pub fn from_lookup(
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<AppConfig, ConfigError> {
    let required = |key: &'static str| {
        lookup(key)
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::MissingVar(key))
    };

    let mut endpoints = ProviderEndpoints::github();
    if let Some(api_url) = lookup(ENV_API_URL).filter(|v| !v.is_empty()) {
        endpoints.api_url = api_url;
    }
    if let Some(auth_url) = lookup(ENV_AUTH_URL).filter(|v| !v.is_empty()) {
        endpoints.auth_url = auth_url;
    }
    if let Some(token_url) = lookup(ENV_TOKEN_URL).filter(|v| !v.is_empty()) {
        endpoints.token_url = token_url;
    }

    Ok(AppConfig {
        session_secret: SecretString::from(required(ENV_SESSION_SECRET)?),
        client_id: required(ENV_CLIENT_ID)?,
        client_secret: SecretString::from(required(ENV_CLIENT_SECRET)?),
        endpoints,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn all_required_vars_present_loads() {
        let config = from_lookup(lookup_from(&[
            (ENV_SESSION_SECRET, "s3cret"),
            (ENV_CLIENT_ID, "iv1.abc"),
            (ENV_CLIENT_SECRET, "shhh"),
        ]))
        .unwrap();

        assert_eq!(config.client_id, "iv1.abc");
        assert_eq!(config.endpoints.api_url, "https://api.github.com");
    }

    #[test]
    fn missing_client_id_is_fatal() {
        let err = from_lookup(lookup_from(&[
            (ENV_SESSION_SECRET, "s3cret"),
            (ENV_CLIENT_SECRET, "shhh"),
        ]))
        .unwrap_err();

        assert!(matches!(err, ConfigError::MissingVar(ENV_CLIENT_ID)));
    }

    #[test]
    fn empty_value_counts_as_missing() {
        let err = from_lookup(lookup_from(&[
            (ENV_SESSION_SECRET, ""),
            (ENV_CLIENT_ID, "iv1.abc"),
            (ENV_CLIENT_SECRET, "shhh"),
        ]))
        .unwrap_err();

        assert!(matches!(err, ConfigError::MissingVar(ENV_SESSION_SECRET)));
    }

    #[test]
    fn endpoint_overrides_are_applied() {
        let config = from_lookup(lookup_from(&[
            (ENV_SESSION_SECRET, "s3cret"),
            (ENV_CLIENT_ID, "iv1.abc"),
            (ENV_CLIENT_SECRET, "shhh"),
            (ENV_API_URL, "http://127.0.0.1:9999"),
            (ENV_TOKEN_URL, "http://127.0.0.1:9999/token"),
        ]))
        .unwrap();

        assert_eq!(config.endpoints.api_url, "http://127.0.0.1:9999");
        assert_eq!(config.endpoints.token_url, "http://127.0.0.1:9999/token");
        // Untouched override keeps the default.
        assert_eq!(
            config.endpoints.auth_url,
            "https://github.com/login/oauth/authorize"
        );
    }
}
