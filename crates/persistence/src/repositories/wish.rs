//! Wish repository for database operations.

use domain::models::wish::NewWish;
use domain::models::{GuestScope, Wish};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::WishEntity;
use crate::metrics::QueryTimer;
use crate::repositories::contains_pattern;

/// Repository for guest wishes.
#[derive(Clone)]
pub struct WishRepository {
    pool: PgPool,
}

impl WishRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, wish: &NewWish) -> Result<Wish, sqlx::Error> {
        let timer = QueryTimer::new("create_wish");
        let result = sqlx::query_as::<_, WishEntity>(
            r#"
            INSERT INTO wishes (wedding_id, name, message)
            VALUES ($1, $2, $3)
            RETURNING id, wedding_id, name, message, created_at
            "#,
        )
        .bind(wish.scope.wedding_id())
        .bind(&wish.name)
        .bind(&wish.message)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        Ok(result?.into())
    }

    /// Wishes in `scope`, newest first. `search` matches name or message.
    pub async fn list(&self, scope: GuestScope, search: Option<&str>) -> Result<Vec<Wish>, sqlx::Error> {
        let timer = QueryTimer::new("list_wishes");
        let result = sqlx::query_as::<_, WishEntity>(
            r#"
            SELECT id, wedding_id, name, message, created_at
            FROM wishes
            WHERE wedding_id IS NOT DISTINCT FROM $1::uuid
              AND ($2::text IS NULL OR name ILIKE $2 OR message ILIKE $2)
            ORDER BY created_at DESC
            "#,
        )
        .bind(scope.wedding_id())
        .bind(search.map(contains_pattern))
        .fetch_all(&self.pool)
        .await;
        timer.record();
        Ok(result?.into_iter().map(Into::into).collect())
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Wish>, sqlx::Error> {
        let result = sqlx::query_as::<_, WishEntity>(
            "SELECT id, wedding_id, name, message, created_at FROM wishes WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(result.map(Into::into))
    }

    pub async fn count(&self, scope: GuestScope) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM wishes WHERE wedding_id IS NOT DISTINCT FROM $1::uuid",
        )
        .bind(scope.wedding_id())
        .fetch_one(&self.pool)
        .await
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("delete_wish");
        let result = sqlx::query("DELETE FROM wishes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        timer.record();
        Ok(result.rows_affected() > 0)
    }
}
