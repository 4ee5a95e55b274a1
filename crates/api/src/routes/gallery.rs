//! Gallery photos. Image bytes live in external media storage; the rows here
//! are authoritative.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use domain::models::gallery::{
    CreateGalleryPhotoRequest, UpdateGalleryPhotoRequest, UploadSignature,
};
use domain::models::GalleryPhoto;
use domain::services::{authorize, Action, Principal};
use persistence::repositories::{GalleryRepository, WeddingRepository};
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::{ApiError, ValidationDetail};
use crate::extractors::{ensure_allowed, missing_resource, Authenticated, MaybeAuthenticated};
use crate::routes::{ensure_publicly_visible, managed_wedding};
use crate::services::{is_in_folder, wedding_folder};

/// GET /api/v1/weddings/:id/gallery
pub async fn list_gallery(
    State(state): State<AppState>,
    MaybeAuthenticated(principal): MaybeAuthenticated,
    Path(wedding_id): Path<Uuid>,
) -> Result<Json<Vec<GalleryPhoto>>, ApiError> {
    ensure_allowed(&principal, Action::ListGallery, Some(wedding_id))?;
    ensure_publicly_visible(&state, &principal, wedding_id).await?;

    // Hidden photos stay listed for the people who can unhide them.
    let include_inactive =
        authorize(&principal, Action::ManageGallery, Some(wedding_id)).is_allowed();

    let photos = GalleryRepository::new(state.pool.clone())
        .list_by_wedding(wedding_id, include_inactive)
        .await?;
    Ok(Json(photos))
}

/// POST /api/v1/weddings/:id/gallery
///
/// A `storageRef` must point into the folder `upload_signature` signs for
/// this wedding, since deleting the photo later deletes that object.
pub async fn create_photo(
    State(state): State<AppState>,
    Authenticated(session): Authenticated,
    Path(wedding_id): Path<Uuid>,
    Json(request): Json<CreateGalleryPhotoRequest>,
) -> Result<(StatusCode, Json<GalleryPhoto>), ApiError> {
    let wedding =
        managed_wedding(&state, &session.principal, Action::ManageGallery, wedding_id).await?;
    request.validate()?;

    if let Some(storage_ref) = request.storage_ref.as_deref() {
        let folder = wedding_folder(&state.config.media, &wedding.slug);
        if !is_in_folder(storage_ref, &folder) {
            return Err(ApiError::InvalidFields(vec![ValidationDetail {
                field: "storageRef".into(),
                message: format!("Storage reference must be inside {}/", folder),
            }]));
        }
    }

    let photo = GalleryRepository::new(state.pool.clone())
        .create(wedding_id, &request)
        .await?;

    info!(photo_id = %photo.id, wedding_id = %wedding_id, "Gallery photo added");
    Ok((StatusCode::CREATED, Json(photo)))
}

/// POST /api/v1/weddings/:id/gallery/upload-signature
///
/// Signs a direct browser upload into the wedding's own folder.
pub async fn upload_signature(
    State(state): State<AppState>,
    Authenticated(session): Authenticated,
    Path(wedding_id): Path<Uuid>,
) -> Result<Json<UploadSignature>, ApiError> {
    let wedding =
        managed_wedding(&state, &session.principal, Action::ManageGallery, wedding_id).await?;

    let folder = wedding_folder(&state.config.media, &wedding.slug);
    let signature = state.media.sign_upload(&folder, Utc::now().timestamp())?;
    Ok(Json(signature))
}

async fn owned_photo(
    state: &AppState,
    principal: &Principal,
    photo_id: Uuid,
) -> Result<GalleryPhoto, ApiError> {
    let photo = GalleryRepository::new(state.pool.clone())
        .find_by_id(photo_id)
        .await?
        .ok_or_else(|| missing_resource(principal, "Photo"))?;
    ensure_allowed(principal, Action::ManageGallery, Some(photo.wedding_id))?;
    Ok(photo)
}

/// PATCH /api/v1/gallery/:id
pub async fn update_photo(
    State(state): State<AppState>,
    Authenticated(session): Authenticated,
    Path(photo_id): Path<Uuid>,
    Json(request): Json<UpdateGalleryPhotoRequest>,
) -> Result<Json<GalleryPhoto>, ApiError> {
    owned_photo(&state, &session.principal, photo_id).await?;
    request.validate()?;

    let photo = GalleryRepository::new(state.pool.clone())
        .update(photo_id, &request)
        .await?
        .ok_or_else(|| ApiError::NotFound("Photo not found".into()))?;
    Ok(Json(photo))
}

/// DELETE /api/v1/gallery/:id
///
/// The row goes first. A failure to remove the stored image is logged and
/// does not fail the request. Objects outside the wedding's folder are
/// never deleted.
pub async fn delete_photo(
    State(state): State<AppState>,
    Authenticated(session): Authenticated,
    Path(photo_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    owned_photo(&state, &session.principal, photo_id).await?;

    let Some(photo) = GalleryRepository::new(state.pool.clone())
        .delete(photo_id)
        .await?
    else {
        return Err(ApiError::NotFound("Photo not found".into()));
    };

    if let Some(storage_ref) = photo.storage_ref.as_deref() {
        let folder = WeddingRepository::new(state.pool.clone())
            .find_by_id(photo.wedding_id)
            .await?
            .map(|wedding| wedding_folder(&state.config.media, &wedding.slug));

        if !folder.is_some_and(|folder| is_in_folder(storage_ref, &folder)) {
            warn!(
                photo_id = %photo.id,
                storage_ref = %storage_ref,
                "Stored image is outside the wedding folder; not deleting it"
            );
        } else if let Err(e) = state.media.delete(storage_ref).await {
            warn!(
                photo_id = %photo.id,
                storage_ref = %storage_ref,
                error = %e,
                "Failed to delete stored image; leaving orphan"
            );
        }
    }

    info!(photo_id = %photo.id, wedding_id = %photo.wedding_id, "Gallery photo deleted");
    Ok(StatusCode::NO_CONTENT)
}
