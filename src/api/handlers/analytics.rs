use axum::{extract::{Query, State}, response::IntoResponse, Json};
use crate::api::dtos::requests::AnalyticsQuery;
use crate::api::dtos::responses::{AnalyticsResponse, DeclineReasonCount};
use crate::domain::services::analytics::{self, Bucketing};
use crate::error::AppError;
use crate::state::AppState;
use chrono::{TimeZone, Utc};
use std::sync::Arc;

fn parse_bucketing(raw: &str) -> Result<Bucketing, AppError> {
    match raw {
        "day" => Ok(Bucketing::Day),
        "week" => Ok(Bucketing::Week),
        "month" => Ok(Bucketing::Month),
        other => Err(AppError::Validation(format!(
            "Unknown bucketing '{}', expected day, week or month",
            other
        ))),
    }
}

/// Scheduling outcome counters bucketed over the requested date span, for
/// either a whole group or a single person.
pub async fn scheduler_analytics(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AnalyticsQuery>,
) -> Result<impl IntoResponse, AppError> {
    if query.end < query.start {
        return Err(AppError::Validation("end must not precede start".into()));
    }

    // Inclusive date span expressed as UTC instants covering both endpoints.
    let span_start = Utc.from_utc_datetime(&query.start.and_hms_opt(0, 0, 0).ok_or(AppError::Internal)?);
    let span_end = Utc.from_utc_datetime(&query.end.and_hms_opt(23, 59, 59).ok_or(AppError::Internal)?);

    let attendances = match (&query.group_id, &query.person_id) {
        (Some(group_id), None) => {
            state.group_repo.find_by_id(group_id).await?
                .ok_or(AppError::NotFound("Group not found".into()))?;
            state.attendance_repo
                .list_for_group_between(group_id, span_start, span_end)
                .await?
        }
        (None, Some(person_id)) => {
            state.person_repo.find_by_id(person_id).await?
                .ok_or(AppError::NotFound("Person not found".into()))?;
            state.attendance_repo
                .list_for_person_between(person_id, span_start, span_end)
                .await?
        }
        _ => {
            return Err(AppError::Validation(
                "Exactly one of group_id or person_id is required".into(),
            ));
        }
    };

    let bucketing = match &query.bucketing {
        Some(raw) => parse_bucketing(raw)?,
        None => analytics::choose_bucketing(query.start, query.end),
    };

    let buckets = analytics::aggregate(&attendances, query.start, query.end, bucketing);

    let mut decline_reasons = Vec::new();
    for (reason_id, count) in analytics::aggregate_by_decline_reason(&attendances) {
        let reason = state.decline_reason_repo
            .find_by_id(&reason_id)
            .await?
            .map(|r| r.value)
            .unwrap_or_else(|| reason_id.clone());
        decline_reasons.push(DeclineReasonCount { reason_id, reason, count });
    }

    Ok(Json(AnalyticsResponse { bucketing, buckets, decline_reasons }))
}
