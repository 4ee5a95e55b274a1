//! Cloudinary-backed media storage.
//!
//! Uploads go straight from the browser to Cloudinary with a signature this
//! service issues; the service itself only deletes.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use domain::models::gallery::UploadSignature;
use domain::services::{MediaStorage, MediaStorageError};
use reqwest::Client;
use serde::Deserialize;
use shared::crypto::sign_params;
use tracing::{debug, info, warn};

use crate::config::MediaConfig;

const SIGNATURE_ALGORITHM: &str = "sha256";

#[derive(Debug, Deserialize)]
struct DestroyResponse {
    result: String,
}

pub struct CloudinaryStorage {
    client: Client,
    config: MediaConfig,
}

impl CloudinaryStorage {
    pub fn new(config: MediaConfig) -> Result<Self, MediaStorageError> {
        if config.cloud_name.is_empty() || config.api_key.is_empty() || config.api_secret.is_empty()
        {
            return Err(MediaStorageError::NotConfigured);
        }

        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| MediaStorageError::Upstream(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn destroy_url(&self) -> String {
        format!(
            "{}/{}/image/destroy",
            self.config.api_base_url.trim_end_matches('/'),
            self.config.cloud_name
        )
    }

    fn sign(&self, params: &[(&str, String)]) -> String {
        sign_params(params, &self.config.api_secret)
    }
}

impl std::fmt::Debug for CloudinaryStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudinaryStorage")
            .field("cloud_name", &self.config.cloud_name)
            .field("api_secret", &"[REDACTED]")
            .finish()
    }
}

#[async_trait]
impl MediaStorage for CloudinaryStorage {
    async fn delete(&self, storage_ref: &str) -> Result<(), MediaStorageError> {
        let timestamp = chrono::Utc::now().timestamp().to_string();
        let signature = self.sign(&[
            ("public_id", storage_ref.to_string()),
            ("timestamp", timestamp.clone()),
        ]);

        let form = [
            ("public_id", storage_ref.to_string()),
            ("timestamp", timestamp),
            ("api_key", self.config.api_key.clone()),
            ("signature", signature),
            ("signature_algorithm", SIGNATURE_ALGORITHM.to_string()),
        ];

        let response = self
            .client
            .post(self.destroy_url())
            .form(&form)
            .send()
            .await
            .map_err(|e| MediaStorageError::Upstream(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(MediaStorageError::Upstream(format!(
                "destroy returned HTTP {}",
                status
            )));
        }

        let body: DestroyResponse = response
            .json()
            .await
            .map_err(|e| MediaStorageError::Upstream(format!("invalid destroy response: {}", e)))?;

        match body.result.as_str() {
            "ok" => {
                info!(storage_ref = %storage_ref, "Deleted stored image");
                Ok(())
            }
            "not found" => {
                debug!(storage_ref = %storage_ref, "Stored image already gone");
                Ok(())
            }
            other => Err(MediaStorageError::Upstream(format!(
                "destroy result: {}",
                other
            ))),
        }
    }

    fn sign_upload(
        &self,
        folder: &str,
        timestamp: i64,
    ) -> Result<UploadSignature, MediaStorageError> {
        let signature = self.sign(&[
            ("folder", folder.to_string()),
            ("timestamp", timestamp.to_string()),
        ]);

        Ok(UploadSignature {
            cloud_name: self.config.cloud_name.clone(),
            api_key: self.config.api_key.clone(),
            timestamp,
            folder: folder.to_string(),
            signature,
            signature_algorithm: SIGNATURE_ALGORITHM.to_string(),
        })
    }
}

/// Storage that refuses every operation. Used when media is disabled so
/// gallery records still work with externally hosted URLs.
#[derive(Debug, Default)]
pub struct DisabledStorage;

#[async_trait]
impl MediaStorage for DisabledStorage {
    async fn delete(&self, _storage_ref: &str) -> Result<(), MediaStorageError> {
        Err(MediaStorageError::NotConfigured)
    }

    fn sign_upload(
        &self,
        _folder: &str,
        _timestamp: i64,
    ) -> Result<UploadSignature, MediaStorageError> {
        Err(MediaStorageError::NotConfigured)
    }
}

/// Picks the storage backend for the configured media settings.
pub fn build_media_storage(config: &MediaConfig) -> Arc<dyn MediaStorage> {
    if !config.enabled {
        info!("Media storage disabled; gallery uploads cannot be signed");
        return Arc::new(DisabledStorage);
    }

    match CloudinaryStorage::new(config.clone()) {
        Ok(storage) => {
            info!(cloud_name = %config.cloud_name, "Cloudinary media storage configured");
            Arc::new(storage)
        }
        Err(e) => {
            warn!(error = %e, "Cloudinary client could not be built; media storage disabled");
            Arc::new(DisabledStorage)
        }
    }
}

/// Folder a wedding's uploads go into.
pub fn wedding_folder(config: &MediaConfig, slug: &str) -> String {
    format!("{}/{}", config.upload_folder.trim_matches('/'), slug)
}

/// Whether a stored object id lies inside `folder`. Relative or empty path
/// segments never match.
pub fn is_in_folder(storage_ref: &str, folder: &str) -> bool {
    match storage_ref
        .strip_prefix(folder)
        .and_then(|rest| rest.strip_prefix('/'))
    {
        Some(rest) => rest
            .split('/')
            .all(|segment| !segment.is_empty() && segment != "." && segment != ".."),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn media_config() -> MediaConfig {
        MediaConfig {
            enabled: true,
            cloud_name: "demo".to_string(),
            api_key: "1234".to_string(),
            api_secret: "abcd".to_string(),
            ..MediaConfig::default()
        }
    }

    #[test]
    fn test_new_requires_credentials() {
        let config = MediaConfig {
            api_secret: String::new(),
            ..media_config()
        };
        assert!(matches!(
            CloudinaryStorage::new(config),
            Err(MediaStorageError::NotConfigured)
        ));
    }

    #[test]
    fn test_sign_upload_matches_canonical_signature() {
        let storage = CloudinaryStorage::new(media_config()).unwrap();
        let signature = storage
            .sign_upload("weddings/ana-budi", 1_700_000_000)
            .unwrap();

        let expected = shared::crypto::sha256_hex(
            "folder=weddings/ana-budi&timestamp=1700000000abcd",
        );
        assert_eq!(signature.signature, expected);
        assert_eq!(signature.cloud_name, "demo");
        assert_eq!(signature.api_key, "1234");
        assert_eq!(signature.signature_algorithm, "sha256");
    }

    #[test]
    fn test_destroy_url() {
        let storage = CloudinaryStorage::new(MediaConfig {
            api_base_url: "https://api.example.com/v1_1/".to_string(),
            ..media_config()
        })
        .unwrap();
        assert_eq!(
            storage.destroy_url(),
            "https://api.example.com/v1_1/demo/image/destroy"
        );
    }

    #[test]
    fn test_debug_redacts_secret() {
        let storage = CloudinaryStorage::new(media_config()).unwrap();
        let debug = format!("{:?}", storage);
        assert!(!debug.contains("abcd"));
    }

    #[tokio::test]
    async fn test_disabled_storage_refuses() {
        let storage = DisabledStorage;
        assert!(matches!(
            storage.delete("x").await,
            Err(MediaStorageError::NotConfigured)
        ));
        assert!(storage.sign_upload("f", 1).is_err());
    }

    #[test]
    fn test_wedding_folder() {
        let config = MediaConfig {
            upload_folder: "/weddings/".to_string(),
            ..MediaConfig::default()
        };
        assert_eq!(wedding_folder(&config, "ana-budi"), "weddings/ana-budi");
    }

    #[test]
    fn test_is_in_folder() {
        let folder = "weddings/ana-budi";
        assert!(is_in_folder("weddings/ana-budi/portrait", folder));
        assert!(is_in_folder("weddings/ana-budi/2025/portrait", folder));

        assert!(!is_in_folder("weddings/ana-budi", folder));
        assert!(!is_in_folder("weddings/ana-budi/", folder));
        assert!(!is_in_folder("weddings/ana-budi-2/portrait", folder));
        assert!(!is_in_folder("weddings/other/portrait", folder));
        assert!(!is_in_folder("weddings/ana-budi/../other/portrait", folder));
        assert!(!is_in_folder("weddings/ana-budi//portrait", folder));
    }
}
