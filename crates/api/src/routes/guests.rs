//! Guest list for owners and admins.

use axum::{
    extract::{Query, State},
    Json,
};
use domain::models::guest::ListGuestsQuery;
use domain::models::Guest;
use domain::services::Action;
use persistence::repositories::GuestRepository;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::{ensure_allowed, Authenticated};

/// GET /api/v1/guests?wedding_id&search&attendance
///
/// Omitting `wedding_id` addresses the global scope, which only admins reach.
pub async fn list_guests(
    State(state): State<AppState>,
    Authenticated(session): Authenticated,
    Query(query): Query<ListGuestsQuery>,
) -> Result<Json<Vec<Guest>>, ApiError> {
    let scope = query.scope();
    ensure_allowed(&session.principal, Action::ListGuests, scope.wedding_id())?;

    let guests = GuestRepository::new(state.pool.clone())
        .list(scope, query.search_term(), query.attendance.attendance())
        .await?;
    Ok(Json(guests))
}
