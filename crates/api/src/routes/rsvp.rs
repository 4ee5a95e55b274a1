//! Public RSVP submission.

use axum::{extract::State, http::StatusCode, Json};
use domain::models::guest::{NewGuest, SubmitRsvpRequest};
use domain::models::Guest;
use persistence::repositories::GuestRepository;
use tracing::info;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::metrics::record_rsvp_submitted;
use crate::routes::ensure_accepting_submissions;

/// POST /api/v1/rsvp
///
/// Without a `weddingId` the RSVP lands in the global scope.
pub async fn submit_rsvp(
    State(state): State<AppState>,
    Json(request): Json<SubmitRsvpRequest>,
) -> Result<(StatusCode, Json<Guest>), ApiError> {
    request.validate()?;
    ensure_accepting_submissions(&state, request.wedding_id).await?;

    let new_guest = NewGuest::from(request);
    let guest = GuestRepository::new(state.pool.clone())
        .create(&new_guest)
        .await?;

    record_rsvp_submitted(guest.attendance);
    info!(
        guest_id = %guest.id,
        wedding_id = ?guest.wedding_id,
        attendance = %guest.attendance,
        "RSVP submitted"
    );
    Ok((StatusCode::CREATED, Json(guest)))
}
