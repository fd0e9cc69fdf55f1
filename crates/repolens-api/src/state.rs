//! Application state wiring the configuration, the shared HTTP client,
//! the session store, and the template environment together.
//!
//! Everything here is read-only after startup except the token store,
//! whose interior mutability is the `DashMap` inside
//! [`MemoryTokenStore`]. Per-request working data never lands in state.

use std::sync::Arc;

use secrecy::SecretString;

use repolens_core::session::TokenStore;
use repolens_infra::github::GithubClient;
use repolens_infra::github::client::shared_http_client;
use repolens_infra::session::MemoryTokenStore;
use repolens_types::config::AppConfig;

use crate::render::Templates;

/// Shared application state for all request handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub http: reqwest::Client,
    pub tokens: Arc<dyn TokenStore>,
    pub templates: Arc<Templates>,
}

impl AppState {
    /// Initialize from the process environment. A missing credential
    /// is fatal; the process does not start.
    pub fn init() -> anyhow::Result<Self> {
        let config = repolens_infra::config::load()?;
        Self::with_config(config)
    }

    /// Build state around an explicit configuration (used by tests).
    pub fn with_config(config: AppConfig) -> anyhow::Result<Self> {
        Ok(Self {
            config: Arc::new(config),
            http: shared_http_client(),
            tokens: Arc::new(MemoryTokenStore::new()),
            templates: Arc::new(Templates::new()?),
        })
    }

    /// Bind the shared HTTP client to one session's bearer token.
    pub fn client_for(&self, token: SecretString) -> GithubClient {
        GithubClient::new(
            self.http.clone(),
            self.config.endpoints.api_url.clone(),
            token,
        )
    }
}
