//! Event and gallery photo entities (database row mappings).

use chrono::{DateTime, NaiveDate, Utc};
use domain::models::{Event, EventType, GalleryPhoto};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the events table.
#[derive(Debug, Clone, FromRow)]
pub struct EventEntity {
    pub id: Uuid,
    pub wedding_id: Uuid,
    pub event_type: String,
    pub event_date: NaiveDate,
    pub event_time: String,
    pub location: String,
    pub address: String,
    pub map_url: Option<String>,
    pub image_url: Option<String>,
    pub is_active: bool,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<EventEntity> for Event {
    fn from(entity: EventEntity) -> Self {
        // Rows written before label validation keep their raw type.
        let event_type = entity
            .event_type
            .parse()
            .unwrap_or_else(|_| EventType::Other(entity.event_type.clone()));

        Self {
            id: entity.id,
            wedding_id: entity.wedding_id,
            event_type,
            date: entity.event_date,
            time: entity.event_time,
            location: entity.location,
            address: entity.address,
            map_url: entity.map_url,
            image_url: entity.image_url,
            is_active: entity.is_active,
            order: entity.sort_order,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

/// Database row mapping for the gallery_photos table.
#[derive(Debug, Clone, FromRow)]
pub struct GalleryPhotoEntity {
    pub id: Uuid,
    pub wedding_id: Uuid,
    pub image_url: String,
    pub caption: Option<String>,
    pub storage_ref: Option<String>,
    pub sort_order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<GalleryPhotoEntity> for GalleryPhoto {
    fn from(entity: GalleryPhotoEntity) -> Self {
        Self {
            id: entity.id,
            wedding_id: entity.wedding_id,
            image_url: entity.image_url,
            caption: entity.caption,
            storage_ref: entity.storage_ref,
            order: entity.sort_order,
            is_active: entity.is_active,
            created_at: entity.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_type_fallback() {
        let entity = EventEntity {
            id: Uuid::new_v4(),
            wedding_id: Uuid::new_v4(),
            event_type: "Akad Nikah".to_string(),
            event_date: NaiveDate::from_ymd_opt(2025, 5, 5).unwrap(),
            event_time: "08:00".to_string(),
            location: "Masjid".to_string(),
            address: "Jl. Damai".to_string(),
            map_url: None,
            image_url: None,
            is_active: true,
            sort_order: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let event: Event = entity.into();
        assert_eq!(event.event_type, EventType::Other("Akad Nikah".to_string()));
    }
}
