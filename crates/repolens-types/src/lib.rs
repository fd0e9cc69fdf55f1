//! Shared domain types for repolens.
//!
//! This crate holds the data model (pull requests, branches, commits),
//! the application configuration struct, and the error enums. It has no
//! I/O; everything here is plain data shared by the core logic, the
//! infrastructure implementations, and the HTTP layer.

pub mod activity;
pub mod branch;
pub mod commit;
pub mod config;
pub mod error;
