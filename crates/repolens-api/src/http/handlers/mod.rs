//! Request handlers.

pub mod activity;
pub mod auth;
pub mod branch;
pub mod commit;
pub mod dashboard;
