//! Guest wishes: public submission and listing, moderated deletion.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use domain::models::wish::{ListWishesQuery, NewWish, SubmitWishRequest};
use domain::models::Wish;
use domain::services::Action;
use persistence::repositories::WishRepository;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::{ensure_allowed, missing_resource, Authenticated, MaybeAuthenticated};
use crate::middleware::metrics::record_wish_submitted;
use crate::routes::{ensure_accepting_submissions, ensure_publicly_visible};

/// POST /api/v1/wishes
pub async fn submit_wish(
    State(state): State<AppState>,
    Json(request): Json<SubmitWishRequest>,
) -> Result<(StatusCode, Json<Wish>), ApiError> {
    request.validate()?;
    ensure_accepting_submissions(&state, request.wedding_id).await?;

    let wish = WishRepository::new(state.pool.clone())
        .create(&NewWish::from(request))
        .await?;

    record_wish_submitted();
    info!(wish_id = %wish.id, wedding_id = ?wish.wedding_id, "Wish submitted");
    Ok((StatusCode::CREATED, Json(wish)))
}

/// GET /api/v1/wishes?wedding_id&search
///
/// Newest first.
pub async fn list_wishes(
    State(state): State<AppState>,
    MaybeAuthenticated(principal): MaybeAuthenticated,
    Query(query): Query<ListWishesQuery>,
) -> Result<Json<Vec<Wish>>, ApiError> {
    let scope = query.scope();
    ensure_allowed(&principal, Action::ListWishes, scope.wedding_id())?;
    if let Some(wedding_id) = scope.wedding_id() {
        ensure_publicly_visible(&state, &principal, wedding_id).await?;
    }

    let wishes = WishRepository::new(state.pool.clone())
        .list(scope, query.search_term())
        .await?;
    Ok(Json(wishes))
}

/// DELETE /api/v1/wishes/:id
///
/// Owners moderate their own wedding's wishes; global wishes are admin-only.
pub async fn delete_wish(
    State(state): State<AppState>,
    Authenticated(session): Authenticated,
    Path(wish_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let repo = WishRepository::new(state.pool.clone());
    let wish = repo
        .find_by_id(wish_id)
        .await?
        .ok_or_else(|| missing_resource(&session.principal, "Wish"))?;
    ensure_allowed(&session.principal, Action::DeleteWish, wish.wedding_id)?;

    repo.delete(wish_id).await?;

    info!(wish_id = %wish_id, wedding_id = ?wish.wedding_id, "Wish deleted");
    Ok(StatusCode::NO_CONTENT)
}
