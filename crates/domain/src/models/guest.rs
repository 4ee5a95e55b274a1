//! RSVP (guest) models and the tenant scope used to query guest interactions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

/// Maximum party size accepted on an RSVP.
pub const MAX_GUEST_COUNT: i32 = 20;

/// Attendance answer on an RSVP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Attendance {
    #[serde(rename = "hadir")]
    Attending,
    #[serde(rename = "tidak-hadir")]
    NotAttending,
    #[serde(rename = "belum-pasti")]
    Uncertain,
}

impl Attendance {
    pub fn as_str(&self) -> &'static str {
        match self {
            Attendance::Attending => "hadir",
            Attendance::NotAttending => "tidak-hadir",
            Attendance::Uncertain => "belum-pasti",
        }
    }
}

impl FromStr for Attendance {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hadir" => Ok(Attendance::Attending),
            "tidak-hadir" => Ok(Attendance::NotAttending),
            "belum-pasti" => Ok(Attendance::Uncertain),
            _ => Err(format!("Unknown attendance: {}", s)),
        }
    }
}

impl std::fmt::Display for Attendance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which guest interactions a query may see.
///
/// `Global` is the legacy mode for records that belong to no wedding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuestScope {
    Global,
    Tenant(Uuid),
}

impl GuestScope {
    pub fn wedding_id(&self) -> Option<Uuid> {
        match self {
            GuestScope::Global => None,
            GuestScope::Tenant(id) => Some(*id),
        }
    }
}

impl From<Option<Uuid>> for GuestScope {
    fn from(wedding_id: Option<Uuid>) -> Self {
        wedding_id.map_or(GuestScope::Global, GuestScope::Tenant)
    }
}

/// A stored RSVP.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Guest {
    pub id: Uuid,
    pub wedding_id: Option<Uuid>,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub attendance: Attendance,
    pub guest_count: Option<i32>,
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Guest {
    /// Party size, present only when attending.
    pub fn effective_guest_count(&self) -> Option<i32> {
        match self.attendance {
            Attendance::Attending => self.guest_count,
            _ => None,
        }
    }

    /// Returns the guest with any stored count dropped when not attending.
    pub fn normalized(mut self) -> Self {
        self.guest_count = self.effective_guest_count();
        self
    }
}

/// Public RSVP form.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRsvpRequest {
    pub wedding_id: Option<Uuid>,
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    #[validate(custom(function = "shared::validation::validate_not_blank"))]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    #[validate(length(max = 30, message = "Phone must be at most 30 characters"))]
    pub phone: Option<String>,
    pub attendance: Attendance,
    #[validate(range(min = 1, max = 20, message = "Guest count must be between 1 and 20"))]
    pub guest_count: Option<i32>,
    #[validate(length(max = 1000, message = "Message must be at most 1000 characters"))]
    pub message: Option<String>,
}

/// RSVP ready for insert, with the party size normalized.
#[derive(Debug, Clone, PartialEq)]
pub struct NewGuest {
    pub scope: GuestScope,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub attendance: Attendance,
    pub guest_count: Option<i32>,
    pub message: Option<String>,
}

impl From<SubmitRsvpRequest> for NewGuest {
    fn from(req: SubmitRsvpRequest) -> Self {
        let guest_count = match req.attendance {
            Attendance::Attending => req.guest_count,
            _ => None,
        };
        Self {
            scope: req.wedding_id.into(),
            name: req.name.trim().to_string(),
            email: non_empty(req.email),
            phone: non_empty(req.phone),
            attendance: req.attendance,
            guest_count,
            message: non_empty(req.message),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Attendance filter on guest listings. `all` disables filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AttendanceFilter {
    #[default]
    All,
    Hadir,
    TidakHadir,
    BelumPasti,
}

impl AttendanceFilter {
    pub fn attendance(&self) -> Option<Attendance> {
        match self {
            AttendanceFilter::All => None,
            AttendanceFilter::Hadir => Some(Attendance::Attending),
            AttendanceFilter::TidakHadir => Some(Attendance::NotAttending),
            AttendanceFilter::BelumPasti => Some(Attendance::Uncertain),
        }
    }
}

/// Query parameters for guest listings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListGuestsQuery {
    pub wedding_id: Option<Uuid>,
    pub search: Option<String>,
    #[serde(default)]
    pub attendance: AttendanceFilter,
}

impl ListGuestsQuery {
    pub fn scope(&self) -> GuestScope {
        self.wedding_id.into()
    }

    pub fn search_term(&self) -> Option<&str> {
        self.search.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rsvp(attendance: Attendance, guest_count: Option<i32>) -> SubmitRsvpRequest {
        SubmitRsvpRequest {
            wedding_id: None,
            name: "Ana".to_string(),
            email: None,
            phone: None,
            attendance,
            guest_count,
            message: None,
        }
    }

    #[test]
    fn test_attendance_wire_format() {
        assert_eq!(
            serde_json::to_string(&Attendance::NotAttending).unwrap(),
            "\"tidak-hadir\""
        );
        let parsed: Attendance = serde_json::from_str("\"belum-pasti\"").unwrap();
        assert_eq!(parsed, Attendance::Uncertain);
        assert!(serde_json::from_str::<Attendance>("\"maybe\"").is_err());
    }

    #[test]
    fn test_not_attending_drops_guest_count() {
        let guest: NewGuest = rsvp(Attendance::NotAttending, Some(5)).into();
        assert_eq!(guest.guest_count, None);

        let guest: NewGuest = rsvp(Attendance::Uncertain, Some(2)).into();
        assert_eq!(guest.guest_count, None);
    }

    #[test]
    fn test_attending_keeps_guest_count() {
        let guest: NewGuest = rsvp(Attendance::Attending, Some(3)).into();
        assert_eq!(guest.guest_count, Some(3));
    }

    #[test]
    fn test_stored_count_ignored_when_not_attending() {
        let guest = Guest {
            id: Uuid::new_v4(),
            wedding_id: None,
            name: "Budi".to_string(),
            email: None,
            phone: None,
            attendance: Attendance::NotAttending,
            guest_count: Some(4),
            message: None,
            created_at: Utc::now(),
        };
        assert_eq!(guest.effective_guest_count(), None);
        assert_eq!(guest.normalized().guest_count, None);
    }

    #[test]
    fn test_rsvp_validation() {
        assert!(rsvp(Attendance::Attending, Some(2)).validate().is_ok());
        assert!(rsvp(Attendance::Attending, Some(0)).validate().is_err());
        assert!(rsvp(Attendance::Attending, Some(21)).validate().is_err());

        let mut blank = rsvp(Attendance::Attending, None);
        blank.name = "  ".to_string();
        assert!(blank.validate().is_err());
    }

    #[test]
    fn test_blank_optional_fields_become_none() {
        let mut req = rsvp(Attendance::Attending, Some(1));
        req.email = Some("   ".to_string());
        req.message = Some(" Selamat! ".to_string());
        let guest: NewGuest = req.into();
        assert_eq!(guest.email, None);
        assert_eq!(guest.message.as_deref(), Some("Selamat!"));
    }

    #[test]
    fn test_scope_from_wedding_id() {
        assert_eq!(GuestScope::from(None), GuestScope::Global);
        let id = Uuid::new_v4();
        assert_eq!(GuestScope::from(Some(id)), GuestScope::Tenant(id));
        assert_eq!(GuestScope::Tenant(id).wedding_id(), Some(id));
    }

    #[test]
    fn test_attendance_filter() {
        let filter: AttendanceFilter = serde_json::from_str("\"tidak-hadir\"").unwrap();
        assert_eq!(filter.attendance(), Some(Attendance::NotAttending));
        let all: AttendanceFilter = serde_json::from_str("\"all\"").unwrap();
        assert_eq!(all.attendance(), None);
    }

    #[test]
    fn test_search_term_ignores_blank() {
        let query = ListGuestsQuery {
            search: Some("  ".to_string()),
            ..Default::default()
        };
        assert_eq!(query.search_term(), None);
    }
}
