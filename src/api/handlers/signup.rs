use axum::{extract::{Path, State}, response::IntoResponse, Json};
use crate::api::dtos::requests::BatchSignupRequest;
use crate::api::dtos::responses::BatchSignupResponse;
use crate::error::AppError;
use crate::state::AppState;
use std::sync::Arc;
use tracing::error;

/// Open signup slots for the person over the configured future window.
pub async fn available_signups(
    State(state): State<Arc<AppState>>,
    Path(person_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.person_repo.find_by_id(&person_id).await?
        .ok_or(AppError::NotFound("Person not found".into()))?;

    let slots = state.signup_resolver.available_signups(&person_id).await?;
    Ok(Json(slots))
}

/// Processes each selected slot independently: materialize the occurrence,
/// assign the person, confirm. A failing slot is logged and reported but
/// never aborts the rest of the batch; earlier successes are kept.
pub async fn submit_signups(
    State(state): State<Arc<AppState>>,
    Path(person_id): Path<String>,
    Json(payload): Json<BatchSignupRequest>,
) -> Result<impl IntoResponse, AppError> {
    state.person_repo.find_by_id(&person_id).await?
        .ok_or(AppError::NotFound("Person not found".into()))?;

    let mut signed_up = 0;
    let mut errors = Vec::new();

    for selection in &payload.signups {
        let result = async {
            let occurrence = state.occurrence_store
                .get_or_create(
                    selection.occurrence_date,
                    &selection.group_id,
                    Some(selection.location_id.as_str()),
                    Some(selection.schedule_id.as_str()),
                )
                .await?;

            let attendance = state.response_tracker.assign(&occurrence.id, &person_id).await?;
            state.response_tracker.confirm(&attendance.id).await?;
            Ok::<_, AppError>(())
        }
        .await;

        match result {
            Ok(()) => signed_up += 1,
            Err(e) => {
                // One bad slot must not sink the rest of the batch.
                error!("Signup failed for person {} group {} on {}: {}", person_id, selection.group_id, selection.occurrence_date, e);
                errors.push("There was a problem signing up for one or more schedules.".to_string());
            }
        }
    }

    Ok(Json(BatchSignupResponse { signed_up, errors }))
}
