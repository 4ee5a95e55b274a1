//! Application services and external integrations.

pub mod admin_bootstrap;
pub mod auth;
pub mod media;

pub use admin_bootstrap::{bootstrap_admin, BootstrapError, BootstrapOutcome};
pub use auth::{AuthError, AuthService, LoginResult};
pub use media::{build_media_storage, is_in_folder, wedding_folder};
