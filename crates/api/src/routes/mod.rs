//! HTTP route handlers.

pub mod auth;
pub mod dashboard;
pub mod events;
pub mod gallery;
pub mod guests;
pub mod health;
pub mod rsvp;
pub mod users;
pub mod weddings;
pub mod wishes;

mod tenant;

pub use tenant::{ensure_accepting_submissions, ensure_publicly_visible, managed_wedding};
