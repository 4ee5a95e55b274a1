//! Ceremony event models.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

/// Ceremony type. `akad` and `resepsi` are the usual pair; any other
/// lowercase label is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum EventType {
    Akad,
    Resepsi,
    Other(String),
}

impl EventType {
    pub fn as_str(&self) -> &str {
        match self {
            EventType::Akad => "akad",
            EventType::Resepsi => "resepsi",
            EventType::Other(label) => label,
        }
    }
}

impl FromStr for EventType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim().to_lowercase();
        match label.as_str() {
            "akad" => Ok(EventType::Akad),
            "resepsi" => Ok(EventType::Resepsi),
            _ => shared::validation::validate_label(&label)
                .map(|_| EventType::Other(label.clone()))
                .map_err(|_| format!("Invalid event type: {}", s)),
        }
    }
}

impl TryFrom<String> for EventType {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<EventType> for String {
    fn from(value: EventType) -> Self {
        value.as_str().to_string()
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A ceremony belonging to one wedding.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: Uuid,
    pub wedding_id: Uuid,
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub date: NaiveDate,
    /// Free text such as "09:00 - 11:00 WIB".
    pub time: String,
    pub location: String,
    pub address: String,
    pub map_url: Option<String>,
    pub image_url: Option<String>,
    pub is_active: bool,
    pub order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub date: NaiveDate,
    #[validate(length(min = 1, max = 100, message = "Time must be 1-100 characters"))]
    pub time: String,
    #[validate(length(min = 1, max = 200, message = "Location must be 1-200 characters"))]
    pub location: String,
    #[validate(length(min = 1, max = 500, message = "Address must be 1-500 characters"))]
    pub address: String,
    #[validate(url(message = "Invalid map URL"))]
    pub map_url: Option<String>,
    #[validate(url(message = "Invalid image URL"))]
    pub image_url: Option<String>,
    pub order: Option<i32>,
}

/// Partial event update. Absent fields keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventRequest {
    #[serde(rename = "type")]
    pub event_type: Option<EventType>,
    pub date: Option<NaiveDate>,
    #[validate(length(min = 1, max = 100, message = "Time must be 1-100 characters"))]
    pub time: Option<String>,
    #[validate(length(min = 1, max = 200, message = "Location must be 1-200 characters"))]
    pub location: Option<String>,
    #[validate(length(min = 1, max = 500, message = "Address must be 1-500 characters"))]
    pub address: Option<String>,
    #[validate(url(message = "Invalid map URL"))]
    pub map_url: Option<String>,
    #[validate(url(message = "Invalid image URL"))]
    pub image_url: Option<String>,
    pub is_active: Option<bool>,
    pub order: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListEventsQuery {
    #[serde(default)]
    pub include_inactive: bool,
}
