//! Infrastructure implementations for repolens.
//!
//! Everything that touches the outside world lives here: the reqwest
//! GitHub client behind `repolens-core`'s `ProviderApi` trait, the
//! OAuth code-for-token exchange, the in-memory session store, and the
//! environment-based configuration loader.

pub mod config;
pub mod github;
pub mod session;
