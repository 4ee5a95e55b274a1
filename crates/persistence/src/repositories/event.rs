//! Event repository for database operations.

use domain::models::event::{CreateEventRequest, UpdateEventRequest};
use domain::models::Event;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::EventEntity;
use crate::metrics::QueryTimer;

/// Repository for wedding ceremony events.
#[derive(Clone)]
pub struct EventRepository {
    pool: PgPool,
}

impl EventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Adds an event. Without an explicit order it goes after the last one.
    pub async fn create(
        &self,
        wedding_id: Uuid,
        request: &CreateEventRequest,
    ) -> Result<Event, sqlx::Error> {
        let timer = QueryTimer::new("create_event");
        let result = sqlx::query_as::<_, EventEntity>(
            r#"
            INSERT INTO events (wedding_id, event_type, event_date, event_time, location, address,
                                map_url, image_url, sort_order)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8,
                    COALESCE($9, (SELECT COALESCE(MAX(sort_order) + 1, 0) FROM events WHERE wedding_id = $1)))
            RETURNING id, wedding_id, event_type, event_date, event_time, location, address,
                      map_url, image_url, is_active, sort_order, created_at, updated_at
            "#,
        )
        .bind(wedding_id)
        .bind(request.event_type.as_str())
        .bind(request.date)
        .bind(&request.time)
        .bind(&request.location)
        .bind(&request.address)
        .bind(request.map_url.as_deref())
        .bind(request.image_url.as_deref())
        .bind(request.order)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        Ok(result?.into())
    }

    /// Events of a wedding in ascending order, ties by creation time.
    pub async fn list_by_wedding(
        &self,
        wedding_id: Uuid,
        include_inactive: bool,
    ) -> Result<Vec<Event>, sqlx::Error> {
        let timer = QueryTimer::new("list_events");
        let result = sqlx::query_as::<_, EventEntity>(
            r#"
            SELECT id, wedding_id, event_type, event_date, event_time, location, address,
                   map_url, image_url, is_active, sort_order, created_at, updated_at
            FROM events
            WHERE wedding_id = $1 AND ($2 OR is_active = TRUE)
            ORDER BY sort_order ASC, created_at ASC
            "#,
        )
        .bind(wedding_id)
        .bind(include_inactive)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        Ok(result?.into_iter().map(Into::into).collect())
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Event>, sqlx::Error> {
        let timer = QueryTimer::new("find_event_by_id");
        let result = sqlx::query_as::<_, EventEntity>(
            r#"
            SELECT id, wedding_id, event_type, event_date, event_time, location, address,
                   map_url, image_url, is_active, sort_order, created_at, updated_at
            FROM events
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        Ok(result?.map(Into::into))
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: &UpdateEventRequest,
    ) -> Result<Option<Event>, sqlx::Error> {
        let timer = QueryTimer::new("update_event");
        let result = sqlx::query_as::<_, EventEntity>(
            r#"
            UPDATE events
            SET
                event_type = COALESCE($2, event_type),
                event_date = COALESCE($3, event_date),
                event_time = COALESCE($4, event_time),
                location = COALESCE($5, location),
                address = COALESCE($6, address),
                map_url = COALESCE($7, map_url),
                image_url = COALESCE($8, image_url),
                is_active = COALESCE($9, is_active),
                sort_order = COALESCE($10, sort_order),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, wedding_id, event_type, event_date, event_time, location, address,
                      map_url, image_url, is_active, sort_order, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(request.event_type.as_ref().map(|t| t.as_str().to_string()))
        .bind(request.date)
        .bind(request.time.as_deref())
        .bind(request.location.as_deref())
        .bind(request.address.as_deref())
        .bind(request.map_url.as_deref())
        .bind(request.image_url.as_deref())
        .bind(request.is_active)
        .bind(request.order)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        Ok(result?.map(Into::into))
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("delete_event");
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        timer.record();
        Ok(result.rows_affected() > 0)
    }
}
