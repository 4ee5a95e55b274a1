//! Menu config repository for database operations.

use domain::models::MenuConfig;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::MenuConfigEntity;
use crate::metrics::QueryTimer;

/// Partial menu update with the order already validated and normalized.
#[derive(Debug, Clone, Default)]
pub struct MenuConfigChanges {
    pub show_home: Option<bool>,
    pub show_details: Option<bool>,
    pub show_rsvp: Option<bool>,
    pub show_gallery: Option<bool>,
    pub show_wishes: Option<bool>,
    pub custom_order: Option<String>,
}

/// Repository for per-wedding navigation settings.
#[derive(Clone)]
pub struct MenuConfigRepository {
    pool: PgPool,
}

impl MenuConfigRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_wedding(&self, wedding_id: Uuid) -> Result<Option<MenuConfig>, sqlx::Error> {
        let timer = QueryTimer::new("find_menu_config");
        let result = sqlx::query_as::<_, MenuConfigEntity>(
            r#"
            SELECT id, wedding_id, show_home, show_details, show_rsvp, show_gallery, show_wishes,
                   custom_order, created_at, updated_at
            FROM menu_configs
            WHERE wedding_id = $1
            "#,
        )
        .bind(wedding_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        Ok(result?.map(Into::into))
    }

    /// Returns the config, creating the default one first if it is missing.
    ///
    /// Safe to call concurrently: the insert is a no-op on conflict.
    pub async fn ensure_default(&self, wedding_id: Uuid) -> Result<MenuConfig, sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO menu_configs (wedding_id)
            VALUES ($1)
            ON CONFLICT (wedding_id) DO NOTHING
            "#,
        )
        .bind(wedding_id)
        .execute(&self.pool)
        .await?;

        self.find_by_wedding(wedding_id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    /// Applies a partial update. Absent fields keep their stored value.
    pub async fn update(
        &self,
        wedding_id: Uuid,
        changes: &MenuConfigChanges,
    ) -> Result<MenuConfig, sqlx::Error> {
        self.ensure_default(wedding_id).await?;

        let timer = QueryTimer::new("update_menu_config");
        let result = sqlx::query_as::<_, MenuConfigEntity>(
            r#"
            UPDATE menu_configs
            SET
                show_home = COALESCE($2, show_home),
                show_details = COALESCE($3, show_details),
                show_rsvp = COALESCE($4, show_rsvp),
                show_gallery = COALESCE($5, show_gallery),
                show_wishes = COALESCE($6, show_wishes),
                custom_order = COALESCE($7, custom_order),
                updated_at = NOW()
            WHERE wedding_id = $1
            RETURNING id, wedding_id, show_home, show_details, show_rsvp, show_gallery, show_wishes,
                      custom_order, created_at, updated_at
            "#,
        )
        .bind(wedding_id)
        .bind(changes.show_home)
        .bind(changes.show_details)
        .bind(changes.show_rsvp)
        .bind(changes.show_gallery)
        .bind(changes.show_wishes)
        .bind(changes.custom_order.as_deref())
        .fetch_one(&self.pool)
        .await;
        timer.record();
        Ok(result?.into())
    }
}
