//! Wedding and menu config entities (database row mappings).

use chrono::{DateTime, NaiveDate, Utc};
use domain::models::{MenuConfig, Wedding, WeddingSummary};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the weddings table.
#[derive(Debug, Clone, FromRow)]
pub struct WeddingEntity {
    pub id: Uuid,
    pub user_id: Uuid,
    pub slug: String,
    pub couple_name: String,
    pub wedding_date: NaiveDate,
    pub theme: String,
    pub primary_color: String,
    pub secondary_color: String,
    pub font_family: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<WeddingEntity> for Wedding {
    fn from(entity: WeddingEntity) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            slug: entity.slug,
            couple_name: entity.couple_name,
            wedding_date: entity.wedding_date,
            theme: entity.theme,
            primary_color: entity.primary_color,
            secondary_color: entity.secondary_color,
            font_family: entity.font_family,
            is_active: entity.is_active,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct WeddingSummaryEntity {
    pub id: Uuid,
    pub slug: String,
    pub couple_name: String,
    pub wedding_date: NaiveDate,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<WeddingSummaryEntity> for WeddingSummary {
    fn from(entity: WeddingSummaryEntity) -> Self {
        Self {
            id: entity.id,
            slug: entity.slug,
            couple_name: entity.couple_name,
            wedding_date: entity.wedding_date,
            is_active: entity.is_active,
            created_at: entity.created_at,
        }
    }
}

/// Database row mapping for the menu_configs table.
#[derive(Debug, Clone, FromRow)]
pub struct MenuConfigEntity {
    pub id: Uuid,
    pub wedding_id: Uuid,
    pub show_home: bool,
    pub show_details: bool,
    pub show_rsvp: bool,
    pub show_gallery: bool,
    pub show_wishes: bool,
    pub custom_order: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<MenuConfigEntity> for MenuConfig {
    fn from(entity: MenuConfigEntity) -> Self {
        Self {
            id: entity.id,
            wedding_id: entity.wedding_id,
            show_home: entity.show_home,
            show_details: entity.show_details,
            show_rsvp: entity.show_rsvp,
            show_gallery: entity.show_gallery,
            show_wishes: entity.show_wishes,
            custom_order: entity.custom_order,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
