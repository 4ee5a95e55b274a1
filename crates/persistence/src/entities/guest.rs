//! Guest and wish entities (database row mappings).

use chrono::{DateTime, Utc};
use domain::models::{Attendance, Guest, Wish};
use sqlx::FromRow;
use uuid::Uuid;

/// Database enum for attendance_status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "attendance_status")]
pub enum AttendanceDb {
    #[sqlx(rename = "hadir")]
    Hadir,
    #[sqlx(rename = "tidak-hadir")]
    TidakHadir,
    #[sqlx(rename = "belum-pasti")]
    BelumPasti,
}

impl From<AttendanceDb> for Attendance {
    fn from(db: AttendanceDb) -> Self {
        match db {
            AttendanceDb::Hadir => Self::Attending,
            AttendanceDb::TidakHadir => Self::NotAttending,
            AttendanceDb::BelumPasti => Self::Uncertain,
        }
    }
}

impl From<Attendance> for AttendanceDb {
    fn from(attendance: Attendance) -> Self {
        match attendance {
            Attendance::Attending => Self::Hadir,
            Attendance::NotAttending => Self::TidakHadir,
            Attendance::Uncertain => Self::BelumPasti,
        }
    }
}

/// Database row mapping for the guests table.
#[derive(Debug, Clone, FromRow)]
pub struct GuestEntity {
    pub id: Uuid,
    pub wedding_id: Option<Uuid>,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub attendance: AttendanceDb,
    pub guest_count: Option<i32>,
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<GuestEntity> for Guest {
    fn from(entity: GuestEntity) -> Self {
        Guest {
            id: entity.id,
            wedding_id: entity.wedding_id,
            name: entity.name,
            email: entity.email,
            phone: entity.phone,
            attendance: entity.attendance.into(),
            guest_count: entity.guest_count,
            message: entity.message,
            created_at: entity.created_at,
        }
        .normalized()
    }
}

/// Database row mapping for the wishes table.
#[derive(Debug, Clone, FromRow)]
pub struct WishEntity {
    pub id: Uuid,
    pub wedding_id: Option<Uuid>,
    pub name: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl From<WishEntity> for Wish {
    fn from(entity: WishEntity) -> Self {
        Self {
            id: entity.id,
            wedding_id: entity.wedding_id,
            name: entity.name,
            message: entity.message,
            created_at: entity.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guest_conversion_normalizes_count() {
        let entity = GuestEntity {
            id: Uuid::new_v4(),
            wedding_id: None,
            name: "Ana".to_string(),
            email: None,
            phone: None,
            attendance: AttendanceDb::BelumPasti,
            guest_count: Some(5),
            message: None,
            created_at: Utc::now(),
        };
        let guest: Guest = entity.into();
        assert_eq!(guest.attendance, Attendance::Uncertain);
        assert_eq!(guest.guest_count, None);
    }

    #[test]
    fn test_attendance_roundtrip() {
        for attendance in [
            Attendance::Attending,
            Attendance::NotAttending,
            Attendance::Uncertain,
        ] {
            assert_eq!(Attendance::from(AttendanceDb::from(attendance)), attendance);
        }
    }
}
