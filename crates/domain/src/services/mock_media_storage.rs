//! In-memory media storage for tests.

use std::sync::{Arc, Mutex};

use super::media_storage::{MediaStorage, MediaStorageError};
use crate::models::gallery::UploadSignature;

/// Mock storage for tests.
///
/// Logs deletions and remembers their references.
#[derive(Debug, Clone, Default)]
pub struct MockMediaStorage {
    pub simulate_failure: bool,
    deleted: Arc<Mutex<Vec<String>>>,
}

impl MockMediaStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            simulate_failure: true,
            ..Self::default()
        }
    }

    /// References passed to successful `delete` calls, oldest first.
    pub fn deleted(&self) -> Vec<String> {
        self.deleted.lock().map(|d| d.clone()).unwrap_or_default()
    }
}

#[async_trait::async_trait]
impl MediaStorage for MockMediaStorage {
    async fn delete(&self, storage_ref: &str) -> Result<(), MediaStorageError> {
        if self.simulate_failure {
            tracing::warn!(storage_ref = %storage_ref, "Mock media storage simulating failure");
            return Err(MediaStorageError::Upstream("Simulated failure".to_string()));
        }

        tracing::info!(storage_ref = %storage_ref, "Mock: Would delete stored image");
        if let Ok(mut deleted) = self.deleted.lock() {
            deleted.push(storage_ref.to_string());
        }
        Ok(())
    }

    fn sign_upload(
        &self,
        folder: &str,
        timestamp: i64,
    ) -> Result<UploadSignature, MediaStorageError> {
        if self.simulate_failure {
            return Err(MediaStorageError::NotConfigured);
        }
        Ok(UploadSignature {
            cloud_name: "mock".to_string(),
            api_key: "mock".to_string(),
            timestamp,
            folder: folder.to_string(),
            signature: shared::crypto::sha256_hex(&format!("{}{}", folder, timestamp)),
            signature_algorithm: "sha256".to_string(),
        })
    }
}
