use axum::{
    body::Body,
    extract::Request,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::state::AppState;
use crate::api::handlers::{analytics, attendance, decline_reason, group, health, location, occurrence, person, schedule, signup};
use tower_http::{
    trace::TraceLayer,
    classify::ServerErrorsFailureClass,
};
use tracing::{info_span, Span, error, info};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))

        // Reference data
        .route("/api/v1/groups", post(group::create_group).get(group::list_groups))
        .route("/api/v1/groups/{group_id}/members", post(group::add_member))
        .route("/api/v1/people", post(person::create_person))
        .route("/api/v1/locations", post(location::create_location))
        .route("/api/v1/schedules", post(schedule::create_schedule))
        .route("/api/v1/decline-reasons", post(decline_reason::create_decline_reason).get(decline_reason::list_decline_reasons))

        // Occurrences
        .route("/api/v1/attendance-occurrences/future", get(occurrence::get_future_occurrences))
        .route("/api/v1/attendance-occurrences", post(occurrence::create_occurrence))
        .route("/api/v1/attendance-occurrences/{occurrence_id}", put(occurrence::update_occurrence))
        .route("/api/v1/attendance-occurrences/{occurrence_id}/decline-reasons", get(occurrence::available_decline_reasons))

        // Attendance responses
        .route("/api/v1/attendances/assign", post(attendance::assign))
        .route("/api/v1/attendances/{attendance_id}/confirm", post(attendance::confirm))
        .route("/api/v1/attendances/{attendance_id}/confirm-cancel", post(attendance::confirm_cancel))
        .route("/api/v1/attendances/{attendance_id}/decline", post(attendance::decline))
        .route("/api/v1/attendances/{attendance_id}/did-attend", put(attendance::set_did_attend))

        // Per-person schedule views
        .route("/api/v1/people/{person_id}/pending-confirmations", get(person::pending_confirmations))
        .route("/api/v1/people/{person_id}/upcoming-schedules", get(person::upcoming_schedules))
        .route("/api/v1/people/{person_id}/schedule-signups", get(signup::available_signups).post(signup::submit_signups))

        // Analytics & kiosk
        .route("/api/v1/analytics/scheduler", get(analytics::scheduler_analytics))
        .route("/api/v1/locations/{location_id}/attendance-count", get(location::attendance_count))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .with_state(state)
}
