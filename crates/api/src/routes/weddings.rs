//! Tenant registry: wedding creation, resolution, theme, menu and lifecycle.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use domain::models::menu_config::UpdateMenuConfigRequest;
use domain::models::user::SetActiveRequest;
use domain::models::wedding::{CreateWeddingRequest, NewWedding, UpdateThemeRequest};
use domain::models::{MenuConfig, Wedding, WeddingData, WeddingSummary};
use domain::services::{authorize_wedding_creation, Action, Principal};
use persistence::repositories::{
    EventRepository, GalleryRepository, MenuConfigChanges, MenuConfigRepository,
    WeddingRepository,
};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::{ensure_allowed, Authenticated, MaybeAuthenticated};
use crate::routes::{ensure_publicly_visible, managed_wedding};

/// GET /api/v1/weddings
pub async fn list_active_weddings(
    State(state): State<AppState>,
    Authenticated(session): Authenticated,
) -> Result<Json<Vec<WeddingSummary>>, ApiError> {
    ensure_allowed(&session.principal, Action::ListWeddings, None)?;
    let weddings = WeddingRepository::new(state.pool.clone())
        .list_active()
        .await?;
    Ok(Json(weddings))
}

/// POST /api/v1/weddings
///
/// Creates the wedding and its default menu config atomically.
pub async fn create_wedding(
    State(state): State<AppState>,
    Authenticated(session): Authenticated,
    Json(request): Json<CreateWeddingRequest>,
) -> Result<(StatusCode, Json<Wedding>), ApiError> {
    if !authorize_wedding_creation(&session.principal, request.user_id).is_allowed() {
        return Err(ApiError::forbidden());
    }
    request.validate()?;

    let new_wedding = NewWedding::from(request);
    let wedding = WeddingRepository::new(state.pool.clone())
        .create(&new_wedding)
        .await?;

    info!(
        wedding_id = %wedding.id,
        user_id = %wedding.user_id,
        slug = %wedding.slug,
        "Wedding created"
    );
    Ok((StatusCode::CREATED, Json(wedding)))
}

/// GET /api/v1/weddings/mine
pub async fn my_wedding(
    State(state): State<AppState>,
    Authenticated(session): Authenticated,
) -> Result<Json<Wedding>, ApiError> {
    let user_id = match session.principal {
        Principal::User { user_id, .. } => user_id,
        _ => return Err(ApiError::forbidden()),
    };

    let wedding = WeddingRepository::new(state.pool.clone())
        .find_by_user(user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("No wedding set up yet".into()))?;
    Ok(Json(wedding))
}

/// GET /api/v1/weddings/default
///
/// Landing tenant for visitors who arrive without a slug.
pub async fn default_wedding(
    State(state): State<AppState>,
) -> Result<Json<WeddingSummary>, ApiError> {
    let wedding = WeddingRepository::new(state.pool.clone())
        .find_first_active()
        .await?
        .ok_or_else(|| ApiError::NotFound("No active wedding".into()))?;
    Ok(Json(wedding))
}

/// GET /api/v1/weddings/:slug
///
/// Public invitation bundle. Unknown and inactive slugs are both 404.
pub async fn get_wedding_data(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<WeddingData>, ApiError> {
    let slug = shared::validation::normalize_slug(&slug);
    let wedding = WeddingRepository::new(state.pool.clone())
        .find_active_by_slug(&slug)
        .await?
        .ok_or_else(|| ApiError::NotFound("Wedding not found".into()))?;

    let events = EventRepository::new(state.pool.clone())
        .list_by_wedding(wedding.id, false)
        .await?;
    let gallery = GalleryRepository::new(state.pool.clone())
        .list_by_wedding(wedding.id, false)
        .await?;
    let menu_config = MenuConfigRepository::new(state.pool.clone())
        .ensure_default(wedding.id)
        .await?;

    Ok(Json(WeddingData::new(wedding, events, gallery, menu_config)))
}

/// PATCH /api/v1/weddings/:id/theme
pub async fn update_theme(
    State(state): State<AppState>,
    Authenticated(session): Authenticated,
    Path(wedding_id): Path<Uuid>,
    Json(request): Json<UpdateThemeRequest>,
) -> Result<Json<Wedding>, ApiError> {
    managed_wedding(&state, &session.principal, Action::UpdateTheme, wedding_id).await?;
    request.validate()?;

    let wedding = WeddingRepository::new(state.pool.clone())
        .update_theme(wedding_id, &request)
        .await?
        .ok_or_else(|| ApiError::NotFound("Wedding not found".into()))?;

    info!(wedding_id = %wedding.id, theme = %wedding.theme, "Wedding theme updated");
    Ok(Json(wedding))
}

/// GET /api/v1/weddings/:id/menu
pub async fn get_menu_config(
    State(state): State<AppState>,
    MaybeAuthenticated(principal): MaybeAuthenticated,
    Path(wedding_id): Path<Uuid>,
) -> Result<Json<MenuConfig>, ApiError> {
    ensure_allowed(&principal, Action::GetMenuConfig, Some(wedding_id))?;
    ensure_publicly_visible(&state, &principal, wedding_id).await?;

    let config = MenuConfigRepository::new(state.pool.clone())
        .ensure_default(wedding_id)
        .await?;
    Ok(Json(config))
}

/// PATCH /api/v1/weddings/:id/menu
pub async fn update_menu_config(
    State(state): State<AppState>,
    Authenticated(session): Authenticated,
    Path(wedding_id): Path<Uuid>,
    Json(request): Json<UpdateMenuConfigRequest>,
) -> Result<Json<MenuConfig>, ApiError> {
    managed_wedding(&state, &session.principal, Action::UpdateMenuConfig, wedding_id).await?;

    let changes = MenuConfigChanges {
        show_home: request.show_home,
        show_details: request.show_details,
        show_rsvp: request.show_rsvp,
        show_gallery: request.show_gallery,
        show_wishes: request.show_wishes,
        custom_order: request.normalized_order()?,
    };

    let config = MenuConfigRepository::new(state.pool.clone())
        .update(wedding_id, &changes)
        .await?;

    info!(wedding_id = %wedding_id, order = %config.custom_order, "Menu config updated");
    Ok(Json(config))
}

/// PATCH /api/v1/weddings/:id/active
pub async fn set_wedding_active(
    State(state): State<AppState>,
    Authenticated(session): Authenticated,
    Path(wedding_id): Path<Uuid>,
    Json(request): Json<SetActiveRequest>,
) -> Result<Json<Wedding>, ApiError> {
    ensure_allowed(&session.principal, Action::ManageWeddings, Some(wedding_id))?;

    let wedding = WeddingRepository::new(state.pool.clone())
        .set_active(wedding_id, request.is_active)
        .await?
        .ok_or_else(|| ApiError::NotFound("Wedding not found".into()))?;

    info!(wedding_id = %wedding.id, is_active = wedding.is_active, "Wedding activation changed");
    Ok(Json(wedding))
}

/// DELETE /api/v1/weddings/:id
pub async fn delete_wedding(
    State(state): State<AppState>,
    Authenticated(session): Authenticated,
    Path(wedding_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    ensure_allowed(&session.principal, Action::ManageWeddings, Some(wedding_id))?;

    let deleted = WeddingRepository::new(state.pool.clone())
        .delete(wedding_id)
        .await?;
    if !deleted {
        return Err(ApiError::NotFound("Wedding not found".into()));
    }

    info!(wedding_id = %wedding_id, "Wedding deleted with all content");
    Ok(StatusCode::NO_CONTENT)
}
