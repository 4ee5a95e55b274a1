//! User and admin entities (database row mappings).

use chrono::{DateTime, NaiveDate, Utc};
use domain::models::{Admin, AdminRole, User, WeddingSummary};
use domain::models::user::UserWithWedding;
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the users table.
#[derive(Debug, Clone, FromRow)]
pub struct UserEntity {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserEntity> for User {
    fn from(entity: UserEntity) -> Self {
        Self {
            id: entity.id,
            email: entity.email,
            password_hash: entity.password_hash,
            name: entity.name,
            is_active: entity.is_active,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

/// User row left-joined with the owned wedding.
#[derive(Debug, Clone, FromRow)]
pub struct UserWithWeddingEntity {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub wedding_id: Option<Uuid>,
    pub wedding_slug: Option<String>,
    pub wedding_couple_name: Option<String>,
    pub wedding_date: Option<NaiveDate>,
    pub wedding_is_active: Option<bool>,
    pub wedding_created_at: Option<DateTime<Utc>>,
}

impl From<UserWithWeddingEntity> for UserWithWedding {
    fn from(e: UserWithWeddingEntity) -> Self {
        let wedding = match (
            e.wedding_id,
            e.wedding_slug,
            e.wedding_couple_name,
            e.wedding_date,
            e.wedding_is_active,
            e.wedding_created_at,
        ) {
            (Some(id), Some(slug), Some(couple_name), Some(wedding_date), Some(is_active), Some(created_at)) => {
                Some(WeddingSummary {
                    id,
                    slug,
                    couple_name,
                    wedding_date,
                    is_active,
                    created_at,
                })
            }
            _ => None,
        };

        Self {
            user: User {
                id: e.id,
                email: e.email,
                password_hash: e.password_hash,
                name: e.name,
                is_active: e.is_active,
                created_at: e.created_at,
                updated_at: e.updated_at,
            },
            wedding,
        }
    }
}

/// Database enum for admin_role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "admin_role", rename_all = "lowercase")]
pub enum AdminRoleDb {
    Admin,
    Superadmin,
}

impl From<AdminRoleDb> for AdminRole {
    fn from(db: AdminRoleDb) -> Self {
        match db {
            AdminRoleDb::Admin => Self::Admin,
            AdminRoleDb::Superadmin => Self::Superadmin,
        }
    }
}

impl From<AdminRole> for AdminRoleDb {
    fn from(role: AdminRole) -> Self {
        match role {
            AdminRole::Admin => Self::Admin,
            AdminRole::Superadmin => Self::Superadmin,
        }
    }
}

/// Database row mapping for the admins table.
#[derive(Debug, Clone, FromRow)]
pub struct AdminEntity {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub role: AdminRoleDb,
    pub user_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl From<AdminEntity> for Admin {
    fn from(entity: AdminEntity) -> Self {
        Self {
            id: entity.id,
            username: entity.username,
            password_hash: entity.password_hash,
            role: entity.role.into(),
            user_id: entity.user_id,
            created_at: entity.created_at,
        }
    }
}
