//! Gallery repository for database operations.

use domain::models::gallery::{CreateGalleryPhotoRequest, UpdateGalleryPhotoRequest};
use domain::models::GalleryPhoto;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::GalleryPhotoEntity;
use crate::metrics::QueryTimer;

/// Repository for gallery photo references.
#[derive(Clone)]
pub struct GalleryRepository {
    pool: PgPool,
}

impl GalleryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        wedding_id: Uuid,
        request: &CreateGalleryPhotoRequest,
    ) -> Result<GalleryPhoto, sqlx::Error> {
        let timer = QueryTimer::new("create_gallery_photo");
        let result = sqlx::query_as::<_, GalleryPhotoEntity>(
            r#"
            INSERT INTO gallery_photos (wedding_id, image_url, caption, storage_ref, sort_order)
            VALUES ($1, $2, $3, $4,
                    COALESCE($5, (SELECT COALESCE(MAX(sort_order) + 1, 0) FROM gallery_photos WHERE wedding_id = $1)))
            RETURNING id, wedding_id, image_url, caption, storage_ref, sort_order, is_active, created_at
            "#,
        )
        .bind(wedding_id)
        .bind(&request.image_url)
        .bind(request.caption.as_deref())
        .bind(request.storage_ref.as_deref())
        .bind(request.order)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        Ok(result?.into())
    }

    pub async fn list_by_wedding(
        &self,
        wedding_id: Uuid,
        include_inactive: bool,
    ) -> Result<Vec<GalleryPhoto>, sqlx::Error> {
        let timer = QueryTimer::new("list_gallery_photos");
        let result = sqlx::query_as::<_, GalleryPhotoEntity>(
            r#"
            SELECT id, wedding_id, image_url, caption, storage_ref, sort_order, is_active, created_at
            FROM gallery_photos
            WHERE wedding_id = $1 AND ($2 OR is_active = TRUE)
            ORDER BY sort_order ASC, created_at ASC
            "#,
        )
        .bind(wedding_id)
        .bind(include_inactive)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        Ok(result?.into_iter().map(Into::into).collect())
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<GalleryPhoto>, sqlx::Error> {
        let result = sqlx::query_as::<_, GalleryPhotoEntity>(
            r#"
            SELECT id, wedding_id, image_url, caption, storage_ref, sort_order, is_active, created_at
            FROM gallery_photos
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(result.map(Into::into))
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: &UpdateGalleryPhotoRequest,
    ) -> Result<Option<GalleryPhoto>, sqlx::Error> {
        let timer = QueryTimer::new("update_gallery_photo");
        let result = sqlx::query_as::<_, GalleryPhotoEntity>(
            r#"
            UPDATE gallery_photos
            SET
                caption = COALESCE($2, caption),
                sort_order = COALESCE($3, sort_order),
                is_active = COALESCE($4, is_active)
            WHERE id = $1
            RETURNING id, wedding_id, image_url, caption, storage_ref, sort_order, is_active, created_at
            "#,
        )
        .bind(id)
        .bind(request.caption.as_deref())
        .bind(request.order)
        .bind(request.is_active)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        Ok(result?.map(Into::into))
    }

    /// Removes the record and returns it, so the caller can free the stored image.
    pub async fn delete(&self, id: Uuid) -> Result<Option<GalleryPhoto>, sqlx::Error> {
        let timer = QueryTimer::new("delete_gallery_photo");
        let result = sqlx::query_as::<_, GalleryPhotoEntity>(
            r#"
            DELETE FROM gallery_photos
            WHERE id = $1
            RETURNING id, wedding_id, image_url, caption, storage_ref, sort_order, is_active, created_at
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        Ok(result?.map(Into::into))
    }
}
