//! Gallery photo models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A photo reference. The image bytes live in external object storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryPhoto {
    pub id: Uuid,
    pub wedding_id: Uuid,
    pub image_url: String,
    pub caption: Option<String>,
    /// Object storage reference used to free the image on delete.
    pub storage_ref: Option<String>,
    pub order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateGalleryPhotoRequest {
    #[validate(url(message = "Invalid image URL"))]
    pub image_url: String,
    #[validate(length(max = 500, message = "Caption must be at most 500 characters"))]
    pub caption: Option<String>,
    #[validate(length(min = 1, max = 255, message = "Storage reference must be 1-255 characters"))]
    pub storage_ref: Option<String>,
    pub order: Option<i32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGalleryPhotoRequest {
    #[validate(length(max = 500, message = "Caption must be at most 500 characters"))]
    pub caption: Option<String>,
    pub order: Option<i32>,
    pub is_active: Option<bool>,
}

/// Parameters a browser needs to upload straight to object storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadSignature {
    pub cloud_name: String,
    pub api_key: String,
    pub timestamp: i64,
    pub folder: String,
    pub signature: String,
    pub signature_algorithm: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_validation() {
        let ok = CreateGalleryPhotoRequest {
            image_url: "https://res.cloudinary.com/demo/image/upload/v1/a.jpg".to_string(),
            caption: Some("Prewedding".to_string()),
            storage_ref: Some("weddings/a".to_string()),
            order: None,
        };
        assert!(ok.validate().is_ok());

        let bad = CreateGalleryPhotoRequest {
            image_url: "a.jpg".to_string(),
            ..ok
        };
        assert!(bad.validate().is_err());
    }
}
