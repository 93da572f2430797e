use axum::{extract::{Path, State}, http::StatusCode, response::IntoResponse, Json};
use crate::api::dtos::requests::CreatePersonRequest;
use crate::domain::models::person::Person;
use crate::error::AppError;
use crate::state::AppState;
use std::sync::Arc;

pub async fn create_person(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreatePersonRequest>,
) -> Result<impl IntoResponse, AppError> {
    let person = state.person_repo
        .create(&Person::new(payload.nick_name, payload.last_name))
        .await?;
    Ok((StatusCode::CREATED, Json(person)))
}

/// Scheduled occurrences the person has not answered yet, soonest first.
pub async fn pending_confirmations(
    State(state): State<Arc<AppState>>,
    Path(person_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.person_repo.find_by_id(&person_id).await?
        .ok_or(AppError::NotFound("Person not found".into()))?;

    let pending = state.response_tracker.pending_confirmations(&person_id).await?;
    Ok(Json(pending))
}

/// Occurrences the person has accepted and that have not happened yet.
pub async fn upcoming_schedules(
    State(state): State<Arc<AppState>>,
    Path(person_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.person_repo.find_by_id(&person_id).await?
        .ok_or(AppError::NotFound("Person not found".into()))?;

    let upcoming = state.response_tracker.confirmed_upcoming(&person_id).await?;
    Ok(Json(upcoming))
}
