//! Shared utilities for the wedding invitation backend.
//!
//! This crate holds the primitives every other crate leans on:
//! - Password hashing with Argon2id
//! - Signed session tokens
//! - Field validators used by request DTOs
//! - Hashing helpers for signed upstream requests

pub mod crypto;
pub mod jwt;
pub mod password;
pub mod validation;
