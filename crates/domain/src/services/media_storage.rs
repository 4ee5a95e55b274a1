//! Object storage for gallery images.

use thiserror::Error;

use crate::models::gallery::UploadSignature;

#[derive(Debug, Error)]
pub enum MediaStorageError {
    #[error("Media storage is not configured")]
    NotConfigured,

    #[error("Media storage request failed: {0}")]
    Upstream(String),
}

/// External image host. Records in the database are authoritative; this
/// service only holds the bytes.
#[async_trait::async_trait]
pub trait MediaStorage: Send + Sync {
    /// Deletes the stored object behind `storage_ref`.
    async fn delete(&self, storage_ref: &str) -> Result<(), MediaStorageError>;

    /// Signs a direct browser upload into the folder of one wedding.
    fn sign_upload(&self, folder: &str, timestamp: i64)
        -> Result<UploadSignature, MediaStorageError>;
}
