//! Domain services for the wedding backend.
//!
//! Services hold rules that operate on domain models without touching storage.

pub mod access;
pub mod media_storage;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock_media_storage;

pub use access::{authorize, authorize_wedding_creation, Action, ActionClass, Decision, Principal};
pub use media_storage::{MediaStorage, MediaStorageError};
#[cfg(any(test, feature = "test-utils"))]
pub use mock_media_storage::MockMediaStorage;
