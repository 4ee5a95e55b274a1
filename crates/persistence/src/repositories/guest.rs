//! Guest (RSVP) repository for database operations.
//!
//! Every query takes a [`GuestScope`]; `wedding_id IS NOT DISTINCT FROM $1`
//! matches the tenant's rows or, for the global scope, rows without a wedding.

use domain::models::dashboard::GuestCounts;
use domain::models::guest::NewGuest;
use domain::models::{Attendance, Guest, GuestScope};
use sqlx::PgPool;

use crate::entities::{AttendanceDb, GuestEntity};
use crate::metrics::QueryTimer;
use crate::repositories::contains_pattern;

/// Repository for RSVP submissions.
#[derive(Clone)]
pub struct GuestRepository {
    pool: PgPool,
}

impl GuestRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, guest: &NewGuest) -> Result<Guest, sqlx::Error> {
        let timer = QueryTimer::new("create_guest");
        let result = sqlx::query_as::<_, GuestEntity>(
            r#"
            INSERT INTO guests (wedding_id, name, email, phone, attendance, guest_count, message)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, wedding_id, name, email, phone, attendance, guest_count, message, created_at
            "#,
        )
        .bind(guest.scope.wedding_id())
        .bind(&guest.name)
        .bind(guest.email.as_deref())
        .bind(guest.phone.as_deref())
        .bind(AttendanceDb::from(guest.attendance))
        .bind(guest.guest_count)
        .bind(guest.message.as_deref())
        .fetch_one(&self.pool)
        .await;
        timer.record();
        Ok(result?.into())
    }

    /// Guests in `scope`, newest first, optionally filtered by a
    /// case-insensitive name substring and an exact attendance.
    pub async fn list(
        &self,
        scope: GuestScope,
        search: Option<&str>,
        attendance: Option<Attendance>,
    ) -> Result<Vec<Guest>, sqlx::Error> {
        let timer = QueryTimer::new("list_guests");
        let result = sqlx::query_as::<_, GuestEntity>(
            r#"
            SELECT id, wedding_id, name, email, phone, attendance, guest_count, message, created_at
            FROM guests
            WHERE wedding_id IS NOT DISTINCT FROM $1::uuid
              AND ($2::text IS NULL OR name ILIKE $2)
              AND ($3::attendance_status IS NULL OR attendance = $3)
            ORDER BY created_at DESC
            "#,
        )
        .bind(scope.wedding_id())
        .bind(search.map(contains_pattern))
        .bind(attendance.map(AttendanceDb::from))
        .fetch_all(&self.pool)
        .await;
        timer.record();
        Ok(result?.into_iter().map(Into::into).collect())
    }

    /// Attendance counts in `scope` for the dashboard.
    pub async fn counts(&self, scope: GuestScope) -> Result<GuestCounts, sqlx::Error> {
        let timer = QueryTimer::new("count_guests");
        let (attending, not_attending, uncertain, expected_attendees) =
            sqlx::query_as::<_, (i64, i64, i64, i64)>(
                r#"
                SELECT
                    COUNT(*) FILTER (WHERE attendance = 'hadir'),
                    COUNT(*) FILTER (WHERE attendance = 'tidak-hadir'),
                    COUNT(*) FILTER (WHERE attendance = 'belum-pasti'),
                    COALESCE(SUM(COALESCE(guest_count, 1)) FILTER (WHERE attendance = 'hadir'), 0)::BIGINT
                FROM guests
                WHERE wedding_id IS NOT DISTINCT FROM $1::uuid
                "#,
            )
            .bind(scope.wedding_id())
            .fetch_one(&self.pool)
            .await?;
        timer.record();

        Ok(GuestCounts {
            attending,
            not_attending,
            uncertain,
            expected_attendees,
        })
    }
}
