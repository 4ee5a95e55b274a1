//! RSVP dashboard.

use axum::{
    extract::{Query, State},
    Json,
};
use domain::models::{DashboardStats, GuestScope};
use domain::services::Action;
use persistence::repositories::{GuestRepository, WishRepository};
use serde::Deserialize;
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::{ensure_allowed, Authenticated};

#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    pub wedding_id: Option<Uuid>,
}

/// GET /api/v1/admin/dashboard?wedding_id
///
/// Counts and percentages for one scope. Percentages are 0 when there are
/// no guests.
pub async fn get_dashboard(
    State(state): State<AppState>,
    Authenticated(session): Authenticated,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<DashboardStats>, ApiError> {
    let scope = GuestScope::from(query.wedding_id);
    ensure_allowed(&session.principal, Action::ViewDashboard, scope.wedding_id())?;

    let guests = GuestRepository::new(state.pool.clone());
    let wishes = WishRepository::new(state.pool.clone());
    let (counts, total_wishes) = tokio::try_join!(guests.counts(scope), wishes.count(scope))?;

    Ok(Json(DashboardStats::from_counts(counts, total_wishes)))
}
