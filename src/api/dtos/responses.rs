use crate::domain::services::analytics::{Bucket, Bucketing};
use serde::Serialize;

#[derive(Serialize)]
pub struct BatchSignupResponse {
    pub signed_up: usize,
    pub errors: Vec<String>,
}

#[derive(Serialize)]
pub struct DeclineReasonCount {
    pub reason_id: String,
    pub reason: String,
    pub count: i64,
}

#[derive(Serialize)]
pub struct AnalyticsResponse {
    pub bucketing: Bucketing,
    pub buckets: Vec<Bucket>,
    pub decline_reasons: Vec<DeclineReasonCount>,
}

#[derive(Serialize)]
pub struct LocationAttendanceCountResponse {
    pub location_id: String,
    pub count: i64,
}
