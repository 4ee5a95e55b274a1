//! Persistence layer for the wedding invitation backend.
//!
//! This crate contains:
//! - Connection pool setup and embedded migrations
//! - Entity definitions (database row mappings)
//! - Repositories, one per aggregate
//! - Query metrics

pub mod db;
pub mod entities;
pub mod metrics;
pub mod repositories;
