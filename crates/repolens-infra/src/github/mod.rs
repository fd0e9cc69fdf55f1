//! GitHub REST/GraphQL access and the OAuth token exchange.

pub mod client;
pub mod oauth;

pub use client::GithubClient;
