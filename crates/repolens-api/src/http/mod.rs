//! HTTP surface: router, handlers, extractors, and error mapping.

pub mod error;
pub mod extractors;
pub mod format;
pub mod handlers;
pub mod router;
