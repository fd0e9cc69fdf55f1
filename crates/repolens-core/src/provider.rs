//! Capability trait for the upstream source-control provider.
//!
//! Only the implementation of this trait talks to the network. Both
//! methods return the raw JSON body; the services in this crate do all
//! shaping and filtering on top of it.

use serde_json::Value;

use repolens_types::error::ProviderError;

/// Authenticated REST and GraphQL access to the hosting provider.
///
/// Implementations attach the caller's bearer token to every request
/// and map any non-2xx response to [`ProviderError::Upstream`] with the
/// original status and body. No retries.
pub trait ProviderApi: Send + Sync {
    /// Issue a GET against the REST API. `path` is relative to the API
    /// base, e.g. `/repos/{owner}/{name}/branches`.
    fn get(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> impl Future<Output = Result<Value, ProviderError>> + Send;

    /// POST a named GraphQL query with variables.
    ///
    /// A 200 response is returned as-is even when the body carries a
    /// provider-side `errors` field; callers decide whether that is
    /// recoverable.
    fn graphql(
        &self,
        query: &str,
        variables: Value,
    ) -> impl Future<Output = Result<Value, ProviderError>> + Send;
}
