//! Platform management of owner accounts and admins.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use domain::models::user::{
    normalize_email, CreateAdminRequest, CreateUserRequest, SetActiveRequest,
    UpdatePasswordRequest, UpdateUserRequest, UserWithWedding,
};
use domain::models::{Admin, AdminRole, User, Wedding, WeddingSummary};
use domain::services::Action;
use persistence::repositories::{AdminRepository, UserRepository, WeddingRepository};
use serde::Serialize;
use shared::password::hash_password;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::{ensure_allowed, Authenticated};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserResponse {
    pub user: User,
    pub wedding: Option<Wedding>,
}

fn user_not_found() -> ApiError {
    ApiError::NotFound("User not found".into())
}

/// GET /api/v1/users
pub async fn list_users(
    State(state): State<AppState>,
    Authenticated(session): Authenticated,
) -> Result<Json<Vec<UserWithWedding>>, ApiError> {
    ensure_allowed(&session.principal, Action::ManageUsers, None)?;
    let users = UserRepository::new(state.pool.clone())
        .list_with_weddings()
        .await?;
    Ok(Json(users))
}

/// POST /api/v1/users
///
/// With a `wedding` block the wedding, its menu config and the default
/// events are created in the same transaction as the user.
pub async fn create_user(
    State(state): State<AppState>,
    Authenticated(session): Authenticated,
    Json(request): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<CreateUserResponse>), ApiError> {
    ensure_allowed(&session.principal, Action::ManageUsers, None)?;
    request.validate()?;

    let password_hash = hash_password(&request.password)?;
    let (user, wedding) = UserRepository::new(state.pool.clone())
        .create(
            &request.normalized_email(),
            &password_hash,
            request.name.trim(),
            request.wedding.as_ref(),
        )
        .await?;

    info!(
        user_id = %user.id,
        wedding_id = ?wedding.as_ref().map(|w| w.id),
        "User created"
    );

    Ok((
        StatusCode::CREATED,
        Json(CreateUserResponse { user, wedding }),
    ))
}

/// GET /api/v1/users/:id
pub async fn get_user(
    State(state): State<AppState>,
    Authenticated(session): Authenticated,
    Path(user_id): Path<Uuid>,
) -> Result<Json<UserWithWedding>, ApiError> {
    ensure_allowed(&session.principal, Action::ManageUsers, None)?;

    let user = UserRepository::new(state.pool.clone())
        .find_by_id(user_id)
        .await?
        .ok_or_else(user_not_found)?;
    let wedding = WeddingRepository::new(state.pool.clone())
        .find_by_user(user_id)
        .await?;

    Ok(Json(UserWithWedding {
        user,
        wedding: wedding.as_ref().map(WeddingSummary::from),
    }))
}

/// PATCH /api/v1/users/:id
pub async fn update_user(
    State(state): State<AppState>,
    Authenticated(session): Authenticated,
    Path(user_id): Path<Uuid>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<Json<User>, ApiError> {
    ensure_allowed(&session.principal, Action::ManageUsers, None)?;
    request.validate()?;

    let email = request.email.as_deref().map(normalize_email);
    let name = request.name.as_deref().map(str::trim);
    let user = UserRepository::new(state.pool.clone())
        .update(user_id, name, email.as_deref(), request.is_active)
        .await?
        .ok_or_else(user_not_found)?;

    info!(user_id = %user.id, "User updated");
    Ok(Json(user))
}

/// PUT /api/v1/users/:id/password
pub async fn update_password(
    State(state): State<AppState>,
    Authenticated(session): Authenticated,
    Path(user_id): Path<Uuid>,
    Json(request): Json<UpdatePasswordRequest>,
) -> Result<StatusCode, ApiError> {
    ensure_allowed(&session.principal, Action::ManageUsers, None)?;
    request.validate()?;

    let password_hash = hash_password(&request.password)?;
    let updated = UserRepository::new(state.pool.clone())
        .update_password(user_id, &password_hash)
        .await?;
    if !updated {
        return Err(user_not_found());
    }

    info!(user_id = %user_id, "User password changed");
    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /api/v1/users/:id/active
pub async fn set_user_active(
    State(state): State<AppState>,
    Authenticated(session): Authenticated,
    Path(user_id): Path<Uuid>,
    Json(request): Json<SetActiveRequest>,
) -> Result<Json<User>, ApiError> {
    ensure_allowed(&session.principal, Action::ManageUsers, None)?;

    let user = UserRepository::new(state.pool.clone())
        .set_active(user_id, request.is_active)
        .await?
        .ok_or_else(user_not_found)?;

    info!(user_id = %user.id, is_active = user.is_active, "User activation changed");
    Ok(Json(user))
}

/// DELETE /api/v1/users/:id
pub async fn delete_user(
    State(state): State<AppState>,
    Authenticated(session): Authenticated,
    Path(user_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    ensure_allowed(&session.principal, Action::ManageUsers, None)?;

    let deleted = UserRepository::new(state.pool.clone())
        .delete(user_id)
        .await?;
    if !deleted {
        return Err(user_not_found());
    }

    info!(user_id = %user_id, "User deleted with wedding content");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/admins
pub async fn create_admin(
    State(state): State<AppState>,
    Authenticated(session): Authenticated,
    Json(request): Json<CreateAdminRequest>,
) -> Result<(StatusCode, Json<Admin>), ApiError> {
    ensure_allowed(&session.principal, Action::ManageAdmins, None)?;
    request.validate()?;

    let password_hash = hash_password(&request.password)?;
    let admin = AdminRepository::new(state.pool.clone())
        .create(
            request.username.trim(),
            &password_hash,
            request.role.unwrap_or(AdminRole::Admin),
            request.user_id,
        )
        .await?;

    info!(admin_id = %admin.id, role = %admin.role, "Admin created");
    Ok((StatusCode::CREATED, Json(admin)))
}
