//! Admin repository for database operations.

use domain::models::{Admin, AdminRole};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{AdminEntity, AdminRoleDb};
use crate::metrics::QueryTimer;

/// Advisory lock key guarding the first-admin bootstrap.
const BOOTSTRAP_LOCK_KEY: i64 = 0x5745_4444_494e_4731;

/// Repository for platform administrators.
#[derive(Clone)]
pub struct AdminRepository {
    pool: PgPool,
}

impl AdminRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        username: &str,
        password_hash: &str,
        role: AdminRole,
        user_id: Option<Uuid>,
    ) -> Result<Admin, sqlx::Error> {
        let timer = QueryTimer::new("create_admin");
        let result = sqlx::query_as::<_, AdminEntity>(
            r#"
            INSERT INTO admins (username, password_hash, role, user_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, username, password_hash, role, user_id, created_at
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .bind(AdminRoleDb::from(role))
        .bind(user_id)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        Ok(result?.into())
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Admin>, sqlx::Error> {
        let timer = QueryTimer::new("find_admin_by_id");
        let result = sqlx::query_as::<_, AdminEntity>(
            r#"
            SELECT id, username, password_hash, role, user_id, created_at
            FROM admins
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        Ok(result?.map(Into::into))
    }

    /// Case-insensitive lookup by username.
    pub async fn find_by_username(&self, username: &str) -> Result<Option<Admin>, sqlx::Error> {
        let timer = QueryTimer::new("find_admin_by_username");
        let result = sqlx::query_as::<_, AdminEntity>(
            r#"
            SELECT id, username, password_hash, role, user_id, created_at
            FROM admins
            WHERE LOWER(username) = LOWER($1)
            "#,
        )
        .bind(username.trim())
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        Ok(result?.map(Into::into))
    }

    /// Creates a superadmin only if the admins table is empty. Concurrent
    /// callers serialize on an advisory lock; returns `None` when an admin
    /// already existed.
    pub async fn create_first_superadmin(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<Option<Admin>, sqlx::Error> {
        let timer = QueryTimer::new("create_first_superadmin");
        let mut tx = self.pool.begin().await?;

        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(BOOTSTRAP_LOCK_KEY)
            .execute(&mut *tx)
            .await?;

        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM admins)")
            .fetch_one(&mut *tx)
            .await?;
        if exists {
            tx.rollback().await?;
            timer.record();
            return Ok(None);
        }

        let admin = sqlx::query_as::<_, AdminEntity>(
            r#"
            INSERT INTO admins (username, password_hash, role)
            VALUES ($1, $2, $3)
            RETURNING id, username, password_hash, role, user_id, created_at
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .bind(AdminRoleDb::Superadmin)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        timer.record();
        Ok(Some(admin.into()))
    }

    pub async fn count(&self) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM admins")
            .fetch_one(&self.pool)
            .await
    }
}
