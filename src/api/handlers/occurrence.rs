use axum::{extract::{Path, Query, State}, http::StatusCode, response::IntoResponse, Json};
use crate::api::dtos::requests::{CreateOccurrenceRequest, FutureOccurrencesQuery, UpdateOccurrenceRequest};
use crate::domain::services::occurrence_store::OccurrenceSettings;
use crate::error::AppError;
use crate::state::AppState;
use std::sync::Arc;
use tracing::info;

fn split_ids(delimited: Option<String>) -> Option<Vec<String>> {
    delimited.map(|s| {
        s.split(',')
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .collect()
    })
}

/// Persisted and computable occurrences for a group up to the horizon,
/// optionally restricted to location/schedule allow-lists.
pub async fn get_future_occurrences(
    State(state): State<Arc<AppState>>,
    Query(query): Query<FutureOccurrencesQuery>,
) -> Result<impl IntoResponse, AppError> {
    let location_ids = split_ids(query.location_ids);
    let schedule_ids = split_ids(query.schedule_ids);

    let occurrences = state.occurrence_store
        .get_future_occurrences(
            &query.group_id,
            query.to_date,
            location_ids.as_deref(),
            schedule_ids.as_deref(),
        )
        .await?;

    Ok(Json(occurrences))
}

pub async fn create_occurrence(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateOccurrenceRequest>,
) -> Result<impl IntoResponse, AppError> {
    info!("create_occurrence: group {} on {}", payload.group_id, payload.occurrence_date);

    let occurrence = state.occurrence_store
        .get_or_create(
            payload.occurrence_date,
            &payload.group_id,
            payload.location_id.as_deref(),
            payload.schedule_id.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(occurrence)))
}

pub async fn update_occurrence(
    State(state): State<Arc<AppState>>,
    Path(occurrence_id): Path<String>,
    Json(payload): Json<UpdateOccurrenceRequest>,
) -> Result<impl IntoResponse, AppError> {
    let occurrence = state.occurrence_store
        .update_settings(&occurrence_id, OccurrenceSettings {
            accept_message: payload.accept_message,
            decline_message: payload.decline_message,
            show_decline_reasons: payload.show_decline_reasons,
            decline_reason_ids: payload.decline_reason_ids,
        })
        .await?;

    Ok(Json(occurrence))
}

/// The decline reasons an attendee of this occurrence may choose from.
pub async fn available_decline_reasons(
    State(state): State<Arc<AppState>>,
    Path(occurrence_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let occurrence = state.occurrence_store
        .find_by_id(&occurrence_id)
        .await?
        .ok_or(AppError::NotFound("Occurrence not found".into()))?;

    let reasons = state.occurrence_store.available_decline_reasons(&occurrence).await?;
    Ok(Json(reasons))
}
