use axum::{extract::{Path, State}, http::StatusCode, response::IntoResponse, Json};
use crate::api::dtos::requests::{AssignAttendanceRequest, DeclineAttendanceRequest, DidAttendRequest};
use crate::error::AppError;
use crate::state::AppState;
use std::sync::Arc;

/// Puts the person on the occurrence's roster with no response yet. Calling
/// it again for the same pair returns the existing record.
pub async fn assign(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<AssignAttendanceRequest>,
) -> Result<impl IntoResponse, AppError> {
    let attendance = state.response_tracker
        .assign(&payload.occurrence_id, &payload.person_id)
        .await?;
    Ok((StatusCode::CREATED, Json(attendance)))
}

pub async fn confirm(
    State(state): State<Arc<AppState>>,
    Path(attendance_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let attendance = state.response_tracker.confirm(&attendance_id).await?;
    Ok(Json(attendance))
}

pub async fn confirm_cancel(
    State(state): State<Arc<AppState>>,
    Path(attendance_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let attendance = state.response_tracker.cancel_confirmation(&attendance_id).await?;
    Ok(Json(attendance))
}

pub async fn decline(
    State(state): State<Arc<AppState>>,
    Path(attendance_id): Path<String>,
    Json(payload): Json<DeclineAttendanceRequest>,
) -> Result<impl IntoResponse, AppError> {
    let attendance = state.response_tracker
        .decline(&attendance_id, payload.decline_reason_id, payload.note)
        .await?;
    Ok(Json(attendance))
}

/// Check-in outcome from the kiosk, orthogonal to the RSVP answer.
pub async fn set_did_attend(
    State(state): State<Arc<AppState>>,
    Path(attendance_id): Path<String>,
    Json(payload): Json<DidAttendRequest>,
) -> Result<impl IntoResponse, AppError> {
    let attendance = state.response_tracker
        .set_did_attend(&attendance_id, payload.did_attend)
        .await?;
    Ok(Json(attendance))
}
