use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use crate::api::dtos::requests::CreateScheduleRequest;
use crate::domain::models::schedule::{NewScheduleParams, Schedule};
use crate::error::AppError;
use crate::state::AppState;
use std::sync::Arc;

pub async fn create_schedule(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateScheduleRequest>,
) -> Result<impl IntoResponse, AppError> {
    state.group_repo.find_by_id(&payload.group_id).await?
        .ok_or(AppError::NotFound("Group not found".into()))?;
    state.location_repo.find_by_id(&payload.location_id).await?
        .ok_or(AppError::NotFound("Location not found".into()))?;

    if !(0..=6).contains(&payload.weekday) {
        return Err(AppError::Validation("weekday must be 0 (Monday) through 6 (Sunday)".into()));
    }

    let schedule = Schedule::new(NewScheduleParams {
        group_id: payload.group_id,
        location_id: payload.location_id,
        name: payload.name,
        weekday: payload.weekday,
        start_time: payload.start_time,
    });

    if schedule.start_time_of_day().is_none() {
        return Err(AppError::Validation("start_time must be HH:MM".into()));
    }

    let created = state.schedule_repo.create(&schedule).await?;
    Ok((StatusCode::CREATED, Json(created)))
}
