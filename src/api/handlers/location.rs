use axum::{extract::{Path, State}, http::StatusCode, response::IntoResponse, Json};
use crate::api::dtos::requests::CreateLocationRequest;
use crate::api::dtos::responses::LocationAttendanceCountResponse;
use crate::domain::models::location::Location;
use crate::error::AppError;
use crate::state::AppState;
use chrono::Utc;
use std::sync::Arc;
use tracing::debug;

pub async fn create_location(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateLocationRequest>,
) -> Result<impl IntoResponse, AppError> {
    let location = state.location_repo.create(&Location::new(payload.name)).await?;
    Ok((StatusCode::CREATED, Json(location)))
}

/// Today's checked-in count for a kiosk, served from the injected cache and
/// recomputed on a miss. RSVP changes on located occurrences evict the entry.
pub async fn attendance_count(
    State(state): State<Arc<AppState>>,
    Path(location_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.location_repo.find_by_id(&location_id).await?
        .ok_or(AppError::NotFound("Location not found".into()))?;

    let count = match state.kiosk_cache.get(&location_id) {
        Some(cached) => cached,
        None => {
            debug!("Kiosk count cache miss for location {}", location_id);
            let computed = state.attendance_repo
                .count_attended_at_location_on(&location_id, Utc::now().date_naive())
                .await?;
            state.kiosk_cache.insert(&location_id, computed);
            computed
        }
    };

    Ok(Json(LocationAttendanceCountResponse { location_id, count }))
}
