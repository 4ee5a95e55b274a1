//! Wedding (tenant) domain models.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::event::{Event, EventType};
use super::gallery::GalleryPhoto;
use super::menu_config::{MenuConfig, MenuSection};

pub const DEFAULT_THEME: &str = "rose";
pub const DEFAULT_PRIMARY_COLOR: &str = "#e11d48";
pub const DEFAULT_SECONDARY_COLOR: &str = "#ec4899";
pub const DEFAULT_FONT_FAMILY: &str = "serif";

/// The tenant root. Every piece of per-wedding content references its id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wedding {
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

/// Compact view used by admin pickers and user listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeddingSummary {
    pub id: Uuid,
    pub slug: String,
    pub couple_name: String,
    pub wedding_date: NaiveDate,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&Wedding> for WeddingSummary {
    fn from(w: &Wedding) -> Self {
        Self {
            id: w.id,
            slug: w.slug.clone(),
            couple_name: w.couple_name.clone(),
            wedding_date: w.wedding_date,
            is_active: w.is_active,
            created_at: w.created_at,
        }
    }
}

/// Request to create a wedding for `user_id`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateWeddingRequest {
    pub user_id: Uuid,
    #[validate(custom(function = "shared::validation::validate_slug"))]
    pub slug: String,
    #[validate(length(min = 1, max = 200, message = "Couple name must be 1-200 characters"))]
    #[validate(custom(function = "shared::validation::validate_not_blank"))]
    pub couple_name: String,
    pub wedding_date: NaiveDate,
    #[validate(length(min = 1, max = 50, message = "Theme must be 1-50 characters"))]
    pub theme: Option<String>,
    #[validate(length(min = 1, max = 32, message = "Primary color must be 1-32 characters"))]
    pub primary_color: Option<String>,
    #[validate(length(min = 1, max = 32, message = "Secondary color must be 1-32 characters"))]
    pub secondary_color: Option<String>,
    #[validate(length(min = 1, max = 100, message = "Font family must be 1-100 characters"))]
    pub font_family: Option<String>,
    /// Also seed the default ceremony events.
    #[serde(default)]
    pub with_default_events: bool,
}

/// Values written when a wedding row is inserted.
#[derive(Debug, Clone)]
pub struct NewWedding {
    pub user_id: Uuid,
    pub slug: String,
    pub couple_name: String,
    pub wedding_date: NaiveDate,
    pub theme: String,
    pub primary_color: String,
    pub secondary_color: String,
    pub font_family: String,
    pub seed_default_events: bool,
}

impl NewWedding {
    /// A wedding with the default theme, as set up alongside a new user.
    pub fn with_default_theme(
        user_id: Uuid,
        slug: &str,
        couple_name: String,
        wedding_date: NaiveDate,
    ) -> Self {
        Self {
            user_id,
            slug: shared::validation::normalize_slug(slug),
            couple_name,
            wedding_date,
            theme: DEFAULT_THEME.to_string(),
            primary_color: DEFAULT_PRIMARY_COLOR.to_string(),
            secondary_color: DEFAULT_SECONDARY_COLOR.to_string(),
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            seed_default_events: true,
        }
    }
}

impl From<CreateWeddingRequest> for NewWedding {
    fn from(req: CreateWeddingRequest) -> Self {
        Self {
            user_id: req.user_id,
            slug: shared::validation::normalize_slug(&req.slug),
            couple_name: req.couple_name.trim().to_string(),
            wedding_date: req.wedding_date,
            theme: req.theme.unwrap_or_else(|| DEFAULT_THEME.to_string()),
            primary_color: req
                .primary_color
                .unwrap_or_else(|| DEFAULT_PRIMARY_COLOR.to_string()),
            secondary_color: req
                .secondary_color
                .unwrap_or_else(|| DEFAULT_SECONDARY_COLOR.to_string()),
            font_family: req
                .font_family
                .unwrap_or_else(|| DEFAULT_FONT_FAMILY.to_string()),
            seed_default_events: req.with_default_events,
        }
    }
}

/// Theme update. Colors are opaque strings (hex or named).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateThemeRequest {
    #[validate(length(min = 1, max = 50, message = "Theme must be 1-50 characters"))]
    pub theme: String,
    #[validate(length(min = 1, max = 32, message = "Primary color must be 1-32 characters"))]
    pub primary_color: String,
    #[validate(length(min = 1, max = 32, message = "Secondary color must be 1-32 characters"))]
    pub secondary_color: String,
    #[validate(length(min = 1, max = 100, message = "Font family must be 1-100 characters"))]
    pub font_family: Option<String>,
}

/// Event seeded for a freshly set-up wedding.
#[derive(Debug, Clone)]
pub struct DefaultEvent {
    pub event_type: EventType,
    pub time: &'static str,
    pub order: i32,
}

pub const DEFAULT_EVENT_LOCATION: &str = "TBA";
pub const DEFAULT_EVENT_ADDRESS: &str = "Lokasi akan ditentukan";

/// One akad and one resepsi, both on the wedding date.
pub fn default_events() -> Vec<DefaultEvent> {
    vec![
        DefaultEvent {
            event_type: EventType::Akad,
            time: "09:00 - 11:00 WIB",
            order: 0,
        },
        DefaultEvent {
            event_type: EventType::Resepsi,
            time: "14:00 - 17:00 WIB",
            order: 1,
        },
    ]
}

/// Everything the guest-facing invitation needs for one slug.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeddingData {
    pub wedding: Wedding,
    pub events: Vec<Event>,
    pub gallery: Vec<GalleryPhoto>,
    pub menu_config: MenuConfig,
    pub navigation: Vec<MenuSection>,
}

impl WeddingData {
    pub fn new(
        wedding: Wedding,
        mut events: Vec<Event>,
        mut gallery: Vec<GalleryPhoto>,
        menu_config: MenuConfig,
    ) -> Self {
        events.retain(|e| e.is_active);
        gallery.retain(|p| p.is_active);
        // Stable sorts keep insertion order for equal keys.
        events.sort_by_key(|e| e.order);
        gallery.sort_by_key(|p| p.order);
        let navigation = menu_config.visible_sections();

        Self {
            wedding,
            events,
            gallery,
            menu_config,
            navigation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_request() -> CreateWeddingRequest {
        CreateWeddingRequest {
            user_id: Uuid::new_v4(),
            slug: "ana-budi".to_string(),
            couple_name: "Ana & Budi".to_string(),
            wedding_date: NaiveDate::from_ymd_opt(2025, 12, 20).unwrap(),
            theme: None,
            primary_color: None,
            secondary_color: None,
            font_family: None,
            with_default_events: false,
        }
    }

    #[test]
    fn test_create_request_validation() {
        assert!(create_request().validate().is_ok());

        let mut bad = create_request();
        bad.slug = "ana budi".to_string();
        assert!(bad.validate().is_err());

        let mut blank = create_request();
        blank.couple_name = " ".to_string();
        assert!(blank.validate().is_err());
    }

    #[test]
    fn test_new_wedding_defaults_theme() {
        let new: NewWedding = create_request().into();
        assert_eq!(new.theme, DEFAULT_THEME);
        assert_eq!(new.primary_color, DEFAULT_PRIMARY_COLOR);
        assert_eq!(new.secondary_color, DEFAULT_SECONDARY_COLOR);
        assert_eq!(new.font_family, DEFAULT_FONT_FAMILY);
        assert_eq!(new.slug, "ana-budi");
    }

    #[test]
    fn test_new_wedding_keeps_requested_styling() {
        let request = CreateWeddingRequest {
            theme: Some("sage".to_string()),
            primary_color: Some("#2f855a".to_string()),
            secondary_color: Some("ivory".to_string()),
            font_family: Some("Playfair Display".to_string()),
            ..create_request()
        };
        assert!(request.validate().is_ok());

        let new = NewWedding::from(request);
        assert_eq!(new.theme, "sage");
        assert_eq!(new.primary_color, "#2f855a");
        assert_eq!(new.secondary_color, "ivory");
        assert_eq!(new.font_family, "Playfair Display");

        let blank_color = CreateWeddingRequest {
            primary_color: Some(String::new()),
            ..create_request()
        };
        assert!(blank_color.validate().is_err());
    }

    #[test]
    fn test_default_events() {
        let events = default_events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].event_type, EventType::Akad);
        assert_eq!(events[0].order, 0);
        assert_eq!(events[1].event_type, EventType::Resepsi);
        assert_eq!(events[1].time, "14:00 - 17:00 WIB");
    }

    #[test]
    fn test_theme_request_accepts_named_colors() {
        let req = UpdateThemeRequest {
            theme: "sage".to_string(),
            primary_color: "forestgreen".to_string(),
            secondary_color: "#fff".to_string(),
            font_family: None,
        };
        assert!(req.validate().is_ok());
    }
}
