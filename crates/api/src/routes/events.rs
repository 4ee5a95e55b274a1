//! Ceremony events of a wedding.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use domain::models::event::{CreateEventRequest, ListEventsQuery, UpdateEventRequest};
use domain::models::Event;
use domain::services::{authorize, Action, Principal};
use persistence::repositories::EventRepository;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::{ensure_allowed, missing_resource, Authenticated, MaybeAuthenticated};
use crate::routes::{ensure_publicly_visible, managed_wedding};

/// GET /api/v1/weddings/:id/events
///
/// Guests see active events only; `include_inactive` is honored for whoever
/// manages the wedding.
pub async fn list_events(
    State(state): State<AppState>,
    MaybeAuthenticated(principal): MaybeAuthenticated,
    Path(wedding_id): Path<Uuid>,
    Query(query): Query<ListEventsQuery>,
) -> Result<Json<Vec<Event>>, ApiError> {
    ensure_allowed(&principal, Action::ListEvents, Some(wedding_id))?;
    ensure_publicly_visible(&state, &principal, wedding_id).await?;

    let include_inactive = query.include_inactive
        && authorize(&principal, Action::ManageEvents, Some(wedding_id)).is_allowed();

    let events = EventRepository::new(state.pool.clone())
        .list_by_wedding(wedding_id, include_inactive)
        .await?;
    Ok(Json(events))
}

/// POST /api/v1/weddings/:id/events
pub async fn create_event(
    State(state): State<AppState>,
    Authenticated(session): Authenticated,
    Path(wedding_id): Path<Uuid>,
    Json(request): Json<CreateEventRequest>,
) -> Result<(StatusCode, Json<Event>), ApiError> {
    managed_wedding(&state, &session.principal, Action::ManageEvents, wedding_id).await?;
    request.validate()?;

    let event = EventRepository::new(state.pool.clone())
        .create(wedding_id, &request)
        .await?;

    info!(
        event_id = %event.id,
        wedding_id = %wedding_id,
        event_type = %event.event_type,
        "Event created"
    );
    Ok((StatusCode::CREATED, Json(event)))
}

/// Loads an event and checks the caller manages its wedding.
async fn owned_event(
    state: &AppState,
    principal: &Principal,
    event_id: Uuid,
) -> Result<Event, ApiError> {
    let event = EventRepository::new(state.pool.clone())
        .find_by_id(event_id)
        .await?
        .ok_or_else(|| missing_resource(principal, "Event"))?;
    ensure_allowed(principal, Action::ManageEvents, Some(event.wedding_id))?;
    Ok(event)
}

/// PATCH /api/v1/events/:id
pub async fn update_event(
    State(state): State<AppState>,
    Authenticated(session): Authenticated,
    Path(event_id): Path<Uuid>,
    Json(request): Json<UpdateEventRequest>,
) -> Result<Json<Event>, ApiError> {
    owned_event(&state, &session.principal, event_id).await?;
    request.validate()?;

    let event = EventRepository::new(state.pool.clone())
        .update(event_id, &request)
        .await?
        .ok_or_else(|| ApiError::NotFound("Event not found".into()))?;

    info!(event_id = %event.id, "Event updated");
    Ok(Json(event))
}

/// DELETE /api/v1/events/:id
pub async fn delete_event(
    State(state): State<AppState>,
    Authenticated(session): Authenticated,
    Path(event_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let event = owned_event(&state, &session.principal, event_id).await?;

    EventRepository::new(state.pool.clone())
        .delete(event_id)
        .await?;

    info!(event_id = %event_id, wedding_id = %event.wedding_id, "Event deleted");
    Ok(StatusCode::NO_CONTENT)
}
