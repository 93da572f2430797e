use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;

/// One dated instance of a recurring group meeting. Identified by its natural
/// key (group, location, schedule, date); location and schedule are optional
/// and null must match null on lookup.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Occurrence {
    pub id: String,
    pub group_id: String,
    pub location_id: Option<String>,
    pub schedule_id: Option<String>,
    pub occurrence_date: NaiveDate,
    pub accept_message: String,
    pub decline_message: String,
    pub show_decline_reasons: bool,
    /// Comma-delimited decline reason ids. Empty means "all active reasons"
    /// when show_decline_reasons is set. Stale ids may linger if the catalog
    /// changes; they are filtered out on read.
    pub decline_reason_ids: String,
    pub created_at: DateTime<Utc>,
}

impl Occurrence {
    pub fn new(
        group_id: String,
        location_id: Option<String>,
        schedule_id: Option<String>,
        occurrence_date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            group_id,
            location_id,
            schedule_id,
            occurrence_date,
            accept_message: String::new(),
            decline_message: String::new(),
            show_decline_reasons: false,
            decline_reason_ids: String::new(),
            created_at: Utc::now(),
        }
    }

    pub fn decline_reason_id_list(&self) -> Vec<String> {
        self.decline_reason_ids
            .split(',')
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }
}
