//! Repository implementations for database operations.

pub mod admin;
pub mod event;
pub mod gallery;
pub mod guest;
pub mod menu_config;
pub mod revoked_token;
pub mod user;
pub mod wedding;
pub mod wish;

pub use admin::AdminRepository;
pub use event::EventRepository;
pub use gallery::GalleryRepository;
pub use guest::GuestRepository;
pub use menu_config::{MenuConfigChanges, MenuConfigRepository};
pub use revoked_token::RevokedTokenRepository;
pub use user::UserRepository;
pub use wedding::WeddingRepository;
pub use wish::WishRepository;

/// `ILIKE` pattern matching `term` anywhere, with wildcards in `term` escaped.
pub(crate) fn contains_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}
