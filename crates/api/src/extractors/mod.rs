//! Custom Axum extractors.

pub mod principal;

pub use principal::{ensure_allowed, missing_resource, Authenticated, MaybeAuthenticated, Session};
