use thiserror::Error;

/// Errors from talking to the upstream provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The provider answered with a non-2xx status. The original
    /// status and body are preserved for the error surface.
    #[error("upstream returned HTTP {status}: {body}")]
    Upstream { status: u16, body: String },

    /// The request never produced an HTTP response.
    #[error("transport error: {0}")]
    Transport(String),

    /// The response body could not be decoded.
    #[error("failed to decode upstream response: {0}")]
    Decode(String),

    /// The GraphQL transport succeeded but the body carried errors,
    /// on a path where no partial payload is worth showing.
    #[error("graphql error: {0}")]
    Graphql(String),
}

/// Fatal startup configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("required environment variable '{0}' is missing")]
    MissingVar(&'static str),
}
