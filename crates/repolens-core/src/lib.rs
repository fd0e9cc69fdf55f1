//! Business logic for repolens.
//!
//! The services here are generic over the [`provider::ProviderApi`]
//! trait and never touch the network themselves; the concrete reqwest
//! client lives in `repolens-infra`. Likewise the session capability is
//! the [`session::TokenStore`] trait, pinned to an implementation by
//! the application layer.

pub mod activity;
pub mod branch;
pub mod commit;
pub mod provider;
pub mod session;
