use axum::{extract::{Path, State}, http::StatusCode, response::IntoResponse, Json};
use crate::api::dtos::requests::{AddMemberRequest, CreateGroupRequest};
use crate::domain::models::group::Group;
use crate::error::AppError;
use crate::state::AppState;
use std::sync::Arc;

pub async fn create_group(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateGroupRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.name.trim().is_empty() {
        return Err(AppError::Validation("Group name must not be empty".into()));
    }

    let group = state.group_repo.create(&Group::new(payload.name)).await?;
    Ok((StatusCode::CREATED, Json(group)))
}

pub async fn list_groups(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let groups = state.group_repo.list().await?;
    Ok(Json(groups))
}

pub async fn add_member(
    State(state): State<Arc<AppState>>,
    Path(group_id): Path<String>,
    Json(payload): Json<AddMemberRequest>,
) -> Result<impl IntoResponse, AppError> {
    state.group_repo.find_by_id(&group_id).await?
        .ok_or(AppError::NotFound("Group not found".into()))?;
    state.person_repo.find_by_id(&payload.person_id).await?
        .ok_or(AppError::NotFound("Person not found".into()))?;

    state.group_repo.add_member(&group_id, &payload.person_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
