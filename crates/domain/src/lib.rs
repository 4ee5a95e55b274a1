//! Domain layer for the wedding invitation backend.
//!
//! This crate contains:
//! - Domain models (User, Wedding, Event, GalleryPhoto, Guest, Wish, MenuConfig)
//! - Authorization rules and the media storage seam
//! - Request DTOs with their validation rules

pub mod models;
pub mod services;
