//! Wedding (tenant) repository for database operations.

use domain::models::wedding::{
    default_events, NewWedding, UpdateThemeRequest, DEFAULT_EVENT_ADDRESS,
    DEFAULT_EVENT_LOCATION,
};
use domain::models::{Wedding, WeddingSummary};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::entities::{WeddingEntity, WeddingSummaryEntity};
use crate::metrics::QueryTimer;

/// Inserts a wedding, its default menu config and, when requested, the
/// default events inside the caller's transaction.
pub(crate) async fn insert_wedding_tx(
    tx: &mut Transaction<'_, Postgres>,
    new: &NewWedding,
) -> Result<WeddingEntity, sqlx::Error> {
    let wedding = sqlx::query_as::<_, WeddingEntity>(
        r#"
        INSERT INTO weddings (user_id, slug, couple_name, wedding_date, theme, primary_color,
                              secondary_color, font_family)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING id, user_id, slug, couple_name, wedding_date, theme, primary_color,
                  secondary_color, font_family, is_active, created_at, updated_at
        "#,
    )
    .bind(new.user_id)
    .bind(&new.slug)
    .bind(&new.couple_name)
    .bind(new.wedding_date)
    .bind(&new.theme)
    .bind(&new.primary_color)
    .bind(&new.secondary_color)
    .bind(&new.font_family)
    .fetch_one(&mut **tx)
    .await?;

    sqlx::query(
        r#"
        INSERT INTO menu_configs (wedding_id)
        VALUES ($1)
        ON CONFLICT (wedding_id) DO NOTHING
        "#,
    )
    .bind(wedding.id)
    .execute(&mut **tx)
    .await?;

    if new.seed_default_events {
        for event in default_events() {
            sqlx::query(
                r#"
                INSERT INTO events (wedding_id, event_type, event_date, event_time, location, address, sort_order)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                "#,
            )
            .bind(wedding.id)
            .bind(event.event_type.as_str())
            .bind(wedding.wedding_date)
            .bind(event.time)
            .bind(DEFAULT_EVENT_LOCATION)
            .bind(DEFAULT_EVENT_ADDRESS)
            .bind(event.order)
            .execute(&mut **tx)
            .await?;
        }
    }

    Ok(wedding)
}

/// Repository for wedding database operations.
#[derive(Clone)]
pub struct WeddingRepository {
    pool: PgPool,
}

impl WeddingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates a wedding together with its default menu config.
    ///
    /// Fails on `weddings_slug_key` when the slug is taken and on
    /// `weddings_user_id_key` when the user already owns a wedding.
    pub async fn create(&self, new: &NewWedding) -> Result<Wedding, sqlx::Error> {
        let timer = QueryTimer::new("create_wedding");
        let mut tx = self.pool.begin().await?;
        let wedding = insert_wedding_tx(&mut tx, new).await?;
        tx.commit().await?;
        timer.record();
        Ok(wedding.into())
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Wedding>, sqlx::Error> {
        let timer = QueryTimer::new("find_wedding_by_id");
        let result = sqlx::query_as::<_, WeddingEntity>(
            r#"
            SELECT id, user_id, slug, couple_name, wedding_date, theme, primary_color,
                   secondary_color, font_family, is_active, created_at, updated_at
            FROM weddings
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        Ok(result?.map(Into::into))
    }

    /// Public tenant resolution. Inactive weddings are not returned.
    pub async fn find_active_by_slug(&self, slug: &str) -> Result<Option<Wedding>, sqlx::Error> {
        let timer = QueryTimer::new("find_active_wedding_by_slug");
        let result = sqlx::query_as::<_, WeddingEntity>(
            r#"
            SELECT id, user_id, slug, couple_name, wedding_date, theme, primary_color,
                   secondary_color, font_family, is_active, created_at, updated_at
            FROM weddings
            WHERE slug = $1 AND is_active = TRUE
            "#,
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        Ok(result?.map(Into::into))
    }

    pub async fn find_by_user(&self, user_id: Uuid) -> Result<Option<Wedding>, sqlx::Error> {
        let timer = QueryTimer::new("find_wedding_by_user");
        let result = sqlx::query_as::<_, WeddingEntity>(
            r#"
            SELECT id, user_id, slug, couple_name, wedding_date, theme, primary_color,
                   secondary_color, font_family, is_active, created_at, updated_at
            FROM weddings
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        Ok(result?.map(Into::into))
    }

    /// Id of the wedding owned by `user_id`, if any.
    pub async fn find_id_by_user(&self, user_id: Uuid) -> Result<Option<Uuid>, sqlx::Error> {
        sqlx::query_scalar::<_, Uuid>("SELECT id FROM weddings WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn is_active(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM weddings WHERE id = $1 AND is_active = TRUE)",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await
    }

    /// Active weddings, newest first.
    pub async fn list_active(&self) -> Result<Vec<WeddingSummary>, sqlx::Error> {
        let timer = QueryTimer::new("list_active_weddings");
        let result = sqlx::query_as::<_, WeddingSummaryEntity>(
            r#"
            SELECT id, slug, couple_name, wedding_date, is_active, created_at
            FROM weddings
            WHERE is_active = TRUE
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await;
        timer.record();
        Ok(result?.into_iter().map(Into::into).collect())
    }

    /// Oldest active wedding, used as the default landing tenant.
    pub async fn find_first_active(&self) -> Result<Option<WeddingSummary>, sqlx::Error> {
        let result = sqlx::query_as::<_, WeddingSummaryEntity>(
            r#"
            SELECT id, slug, couple_name, wedding_date, is_active, created_at
            FROM weddings
            WHERE is_active = TRUE
            ORDER BY created_at ASC
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await?;
        Ok(result.map(Into::into))
    }

    pub async fn update_theme(
        &self,
        id: Uuid,
        theme: &UpdateThemeRequest,
    ) -> Result<Option<Wedding>, sqlx::Error> {
        let timer = QueryTimer::new("update_wedding_theme");
        let result = sqlx::query_as::<_, WeddingEntity>(
            r#"
            UPDATE weddings
            SET
                theme = $2,
                primary_color = $3,
                secondary_color = $4,
                font_family = COALESCE($5, font_family),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, user_id, slug, couple_name, wedding_date, theme, primary_color,
                      secondary_color, font_family, is_active, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&theme.theme)
        .bind(&theme.primary_color)
        .bind(&theme.secondary_color)
        .bind(theme.font_family.as_deref())
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        Ok(result?.map(Into::into))
    }

    pub async fn set_active(&self, id: Uuid, is_active: bool) -> Result<Option<Wedding>, sqlx::Error> {
        let timer = QueryTimer::new("set_wedding_active");
        let result = sqlx::query_as::<_, WeddingEntity>(
            r#"
            UPDATE weddings
            SET is_active = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, user_id, slug, couple_name, wedding_date, theme, primary_color,
                      secondary_color, font_family, is_active, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(is_active)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        Ok(result?.map(Into::into))
    }

    /// Deletes a wedding; menu, events, photos, guests and wishes cascade.
    pub async fn delete(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("delete_wedding");
        let result = sqlx::query("DELETE FROM weddings WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        timer.record();
        Ok(result.rows_affected() > 0)
    }
}
