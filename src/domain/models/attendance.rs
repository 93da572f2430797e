use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// A person's RSVP disposition for one occurrence.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum Rsvp {
    Unknown,
    Yes,
    No,
}

/// One RSVP record per (occurrence, person). `did_attend` is the check-in
/// outcome and is tracked independently of the RSVP state; only analytics
/// reads it.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Attendance {
    pub id: String,
    pub occurrence_id: String,
    pub person_id: String,
    pub rsvp: Rsvp,
    pub rsvp_datetime: Option<DateTime<Utc>>,
    pub decline_reason_id: Option<String>,
    pub note: Option<String>,
    pub did_attend: Option<bool>,
    pub start_date_time: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Attendance {
    pub fn new(occurrence_id: String, person_id: String, start_date_time: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            occurrence_id,
            person_id,
            rsvp: Rsvp::Unknown,
            rsvp_datetime: None,
            decline_reason_id: None,
            note: None,
            did_attend: None,
            start_date_time,
            created_at: Utc::now(),
        }
    }
}
