//! Per-wedding navigation settings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Navigable sections of the invitation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MenuSection {
    Home,
    Details,
    Rsvp,
    Gallery,
    Wishes,
}

impl MenuSection {
    /// Canonical navigation order.
    pub const ALL: [MenuSection; 5] = [
        MenuSection::Home,
        MenuSection::Details,
        MenuSection::Rsvp,
        MenuSection::Gallery,
        MenuSection::Wishes,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MenuSection::Home => "home",
            MenuSection::Details => "details",
            MenuSection::Rsvp => "rsvp",
            MenuSection::Gallery => "gallery",
            MenuSection::Wishes => "wishes",
        }
    }
}

impl FromStr for MenuSection {
    type Err = MenuOrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "home" => Ok(MenuSection::Home),
            "details" => Ok(MenuSection::Details),
            "rsvp" => Ok(MenuSection::Rsvp),
            "gallery" => Ok(MenuSection::Gallery),
            "wishes" => Ok(MenuSection::Wishes),
            other => Err(MenuOrderError::UnknownSection(other.to_string())),
        }
    }
}

impl std::fmt::Display for MenuSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MenuOrderError {
    #[error("Unknown menu section: {0}")]
    UnknownSection(String),

    #[error("Menu section listed more than once: {0}")]
    DuplicateSection(MenuSection),

    #[error("Menu section missing from order: {0}")]
    MissingSection(MenuSection),
}

/// A permutation of all five [`MenuSection`]s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuOrder(Vec<MenuSection>);

impl MenuOrder {
    pub fn sections(&self) -> &[MenuSection] {
        &self.0
    }
}

impl Default for MenuOrder {
    fn default() -> Self {
        Self(MenuSection::ALL.to_vec())
    }
}

impl FromStr for MenuOrder {
    type Err = MenuOrderError;

    /// Parses a comma-separated list, e.g. `"home,rsvp,details,gallery,wishes"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut sections = Vec::with_capacity(MenuSection::ALL.len());
        for key in s.split(',').map(str::trim) {
            let section = key.parse::<MenuSection>()?;
            if sections.contains(&section) {
                return Err(MenuOrderError::DuplicateSection(section));
            }
            sections.push(section);
        }
        if let Some(missing) = MenuSection::ALL.iter().find(|s| !sections.contains(s)) {
            return Err(MenuOrderError::MissingSection(*missing));
        }
        Ok(Self(sections))
    }
}

impl std::fmt::Display for MenuOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let keys: Vec<&str> = self.0.iter().map(MenuSection::as_str).collect();
        f.write_str(&keys.join(","))
    }
}

/// Validator hook for raw `customOrder` strings.
pub fn validate_custom_order(order: &str) -> Result<(), ValidationError> {
    order.parse::<MenuOrder>().map(|_| ()).map_err(|e| {
        let mut err = ValidationError::new("menu_order");
        err.message = Some(e.to_string().into());
        err
    })
}

/// Navigation settings. Exactly one per wedding.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuConfig {
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

impl MenuConfig {
    pub fn is_visible(&self, section: MenuSection) -> bool {
        match section {
            MenuSection::Home => self.show_home,
            MenuSection::Details => self.show_details,
            MenuSection::Rsvp => self.show_rsvp,
            MenuSection::Gallery => self.show_gallery,
            MenuSection::Wishes => self.show_wishes,
        }
    }

    /// Visible sections in navigation order.
    ///
    /// A stored order that no longer parses falls back to the canonical one.
    pub fn visible_sections(&self) -> Vec<MenuSection> {
        let order = self.custom_order.parse::<MenuOrder>().unwrap_or_default();
        order
            .sections()
            .iter()
            .copied()
            .filter(|s| self.is_visible(*s))
            .collect()
    }
}

/// Partial update. Absent fields keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMenuConfigRequest {
    pub show_home: Option<bool>,
    pub show_details: Option<bool>,
    pub show_rsvp: Option<bool>,
    pub show_gallery: Option<bool>,
    pub show_wishes: Option<bool>,
    #[validate(custom(function = "validate_custom_order"))]
    pub custom_order: Option<String>,
}

impl UpdateMenuConfigRequest {
    /// Canonical form of the requested order, if any.
    pub fn normalized_order(&self) -> Result<Option<String>, MenuOrderError> {
        self.custom_order
            .as_deref()
            .map(|raw| raw.parse::<MenuOrder>().map(|o| o.to_string()))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(order: &str) -> MenuConfig {
        MenuConfig {
            id: Uuid::new_v4(),
            wedding_id: Uuid::new_v4(),
            show_home: true,
            show_details: true,
            show_rsvp: true,
            show_gallery: true,
            show_wishes: true,
            custom_order: order.to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_default_order_is_canonical() {
        assert_eq!(
            MenuOrder::default().to_string(),
            "home,details,rsvp,gallery,wishes"
        );
    }

    #[test]
    fn test_parse_permutation() {
        let order: MenuOrder = "rsvp, home ,wishes,gallery,details".parse().unwrap();
        assert_eq!(order.to_string(), "rsvp,home,wishes,gallery,details");
    }

    #[test]
    fn test_rejects_duplicates() {
        assert_eq!(
            "home,home,rsvp".parse::<MenuOrder>(),
            Err(MenuOrderError::DuplicateSection(MenuSection::Home))
        );
    }

    #[test]
    fn test_rejects_missing_sections() {
        assert_eq!(
            "home,details,rsvp,gallery".parse::<MenuOrder>(),
            Err(MenuOrderError::MissingSection(MenuSection::Wishes))
        );
    }

    #[test]
    fn test_rejects_unknown_sections() {
        assert!(matches!(
            "home,details,rsvp,gallery,wishes,story".parse::<MenuOrder>(),
            Err(MenuOrderError::UnknownSection(s)) if s == "story"
        ));
        assert!("".parse::<MenuOrder>().is_err());
    }

    #[test]
    fn test_update_request_validation() {
        let ok = UpdateMenuConfigRequest {
            custom_order: Some("wishes,gallery,rsvp,details,home".to_string()),
            ..Default::default()
        };
        assert!(ok.validate().is_ok());

        let bad = UpdateMenuConfigRequest {
            custom_order: Some("home,home,rsvp".to_string()),
            ..Default::default()
        };
        assert!(bad.validate().is_err());

        let flags_only = UpdateMenuConfigRequest {
            show_gallery: Some(false),
            ..Default::default()
        };
        assert!(flags_only.validate().is_ok());
        assert_eq!(flags_only.normalized_order().unwrap(), None);
    }

    #[test]
    fn test_visible_sections_respects_order_and_flags() {
        let mut cfg = config("wishes,home,details,rsvp,gallery");
        cfg.show_details = false;
        assert_eq!(
            cfg.visible_sections(),
            vec![
                MenuSection::Wishes,
                MenuSection::Home,
                MenuSection::Rsvp,
                MenuSection::Gallery
            ]
        );
    }

    #[test]
    fn test_visible_sections_falls_back_on_corrupt_order() {
        let cfg = config("home,home");
        assert_eq!(cfg.visible_sections(), MenuSection::ALL.to_vec());
    }
}
