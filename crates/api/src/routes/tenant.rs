//! Tenant lookups shared by the wedding-scoped handlers.

use domain::models::Wedding;
use domain::services::{authorize, Action, Principal};
use persistence::repositories::WeddingRepository;
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::{ensure_allowed, missing_resource};

/// Authorizes `action` on the wedding and loads it.
pub async fn managed_wedding(
    state: &AppState,
    principal: &Principal,
    action: Action,
    wedding_id: Uuid,
) -> Result<Wedding, ApiError> {
    ensure_allowed(principal, action, Some(wedding_id))?;

    WeddingRepository::new(state.pool.clone())
        .find_by_id(wedding_id)
        .await?
        .ok_or_else(|| missing_resource(principal, "Wedding"))
}

/// Guest-facing reads only see active weddings. Whoever manages the tenant
/// still sees it while it is deactivated.
pub async fn ensure_publicly_visible(
    state: &AppState,
    principal: &Principal,
    wedding_id: Uuid,
) -> Result<(), ApiError> {
    let repo = WeddingRepository::new(state.pool.clone());
    let visible = if authorize(principal, Action::ViewOwnWedding, Some(wedding_id)).is_allowed() {
        repo.find_by_id(wedding_id).await?.is_some()
    } else {
        repo.is_active(wedding_id).await?
    };

    if visible {
        Ok(())
    } else {
        Err(ApiError::NotFound("Wedding not found".into()))
    }
}

/// Write endpoints for guests only accept active tenants; `None` is the
/// global scope and always open.
pub async fn ensure_accepting_submissions(
    state: &AppState,
    wedding_id: Option<Uuid>,
) -> Result<(), ApiError> {
    let Some(wedding_id) = wedding_id else {
        return Ok(());
    };

    if WeddingRepository::new(state.pool.clone())
        .is_active(wedding_id)
        .await?
    {
        Ok(())
    } else {
        Err(ApiError::NotFound("Wedding not found".into()))
    }
}
