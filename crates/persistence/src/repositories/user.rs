//! User repository for database operations.

use domain::models::user::{UserWithWedding, WeddingSetup};
use domain::models::wedding::NewWedding;
use domain::models::{User, Wedding};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{UserEntity, UserWithWeddingEntity};
use crate::metrics::QueryTimer;
use crate::repositories::wedding::insert_wedding_tx;

/// Repository for user database operations.
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates a user and, when `wedding` is given, their wedding with its
    /// default menu and events, all in one transaction.
    ///
    /// A duplicate email fails on `users_email_key`.
    pub async fn create(
        &self,
        email: &str,
        password_hash: &str,
        name: &str,
        wedding: Option<&WeddingSetup>,
    ) -> Result<(User, Option<Wedding>), sqlx::Error> {
        let timer = QueryTimer::new("create_user");
        let mut tx = self.pool.begin().await?;

        let user = sqlx::query_as::<_, UserEntity>(
            r#"
            INSERT INTO users (email, password_hash, name)
            VALUES ($1, $2, $3)
            RETURNING id, email, password_hash, name, is_active, created_at, updated_at
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .bind(name)
        .fetch_one(&mut *tx)
        .await?;

        let wedding = match wedding {
            Some(setup) => {
                let new_wedding = NewWedding::with_default_theme(
                    user.id,
                    &setup.slug,
                    setup
                        .couple_name
                        .clone()
                        .unwrap_or_else(|| name.to_string()),
                    setup.wedding_date,
                );
                Some(insert_wedding_tx(&mut tx, &new_wedding).await?.into())
            }
            None => None,
        };

        tx.commit().await?;
        timer.record();
        Ok((user.into(), wedding))
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, sqlx::Error> {
        let timer = QueryTimer::new("find_user_by_id");
        let result = sqlx::query_as::<_, UserEntity>(
            r#"
            SELECT id, email, password_hash, name, is_active, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        Ok(result?.map(Into::into))
    }

    /// Case-insensitive lookup by email.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, sqlx::Error> {
        let timer = QueryTimer::new("find_user_by_email");
        let result = sqlx::query_as::<_, UserEntity>(
            r#"
            SELECT id, email, password_hash, name, is_active, created_at, updated_at
            FROM users
            WHERE LOWER(email) = LOWER($1)
            "#,
        )
        .bind(email.trim())
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        Ok(result?.map(Into::into))
    }

    /// All users, newest first, each with the wedding they own.
    pub async fn list_with_weddings(&self) -> Result<Vec<UserWithWedding>, sqlx::Error> {
        let timer = QueryTimer::new("list_users_with_weddings");
        let result = sqlx::query_as::<_, UserWithWeddingEntity>(
            r#"
            SELECT u.id, u.email, u.password_hash, u.name, u.is_active, u.created_at, u.updated_at,
                   w.id AS wedding_id, w.slug AS wedding_slug, w.couple_name AS wedding_couple_name,
                   w.wedding_date, w.is_active AS wedding_is_active, w.created_at AS wedding_created_at
            FROM users u
            LEFT JOIN weddings w ON w.user_id = u.id
            ORDER BY u.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await;
        timer.record();
        Ok(result?.into_iter().map(Into::into).collect())
    }

    /// Partial update. Returns `None` when the user does not exist.
    pub async fn update(
        &self,
        id: Uuid,
        name: Option<&str>,
        email: Option<&str>,
        is_active: Option<bool>,
    ) -> Result<Option<User>, sqlx::Error> {
        let timer = QueryTimer::new("update_user");
        let result = sqlx::query_as::<_, UserEntity>(
            r#"
            UPDATE users
            SET
                name = COALESCE($2, name),
                email = COALESCE($3, email),
                is_active = COALESCE($4, is_active),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, email, password_hash, name, is_active, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(email)
        .bind(is_active)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        Ok(result?.map(Into::into))
    }

    pub async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("update_user_password");
        let result = sqlx::query(
            r#"
            UPDATE users
            SET password_hash = $2, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(password_hash)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected() > 0)
    }

    pub async fn set_active(&self, id: Uuid, is_active: bool) -> Result<Option<User>, sqlx::Error> {
        self.update(id, None, None, Some(is_active)).await
    }

    /// Hard delete. The wedding and everything under it go with the user.
    pub async fn delete(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("delete_user");
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        timer.record();
        Ok(result.rows_affected() > 0)
    }
}
