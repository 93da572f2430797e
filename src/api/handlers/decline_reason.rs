use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use crate::api::dtos::requests::CreateDeclineReasonRequest;
use crate::domain::models::decline_reason::DeclineReason;
use crate::error::AppError;
use crate::state::AppState;
use std::sync::Arc;

pub async fn create_decline_reason(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateDeclineReasonRequest>,
) -> Result<impl IntoResponse, AppError> {
    let category = payload.category
        .unwrap_or_else(|| state.config.decline_reason_category.clone());
    let reason = DeclineReason::new(category, payload.value, payload.sort_order.unwrap_or(0));

    let created = state.decline_reason_repo.create(&reason).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn list_decline_reasons(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let reasons = state.decline_reason_repo
        .list_active(&state.config.decline_reason_category)
        .await?;
    Ok(Json(reasons))
}
