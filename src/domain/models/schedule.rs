use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, NaiveTime, Utc, Weekday};
use sqlx::FromRow;

/// One weekly recurring meeting slot for a group at a location. The weekday
/// and start time together form the recurrence definition consumed by the
/// occurrence expander.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Schedule {
    pub id: String,
    pub group_id: String,
    pub location_id: String,
    pub name: String,
    pub weekday: i32, // 0 = Monday .. 6 = Sunday
    pub start_time: String, // HH:MM
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

pub struct NewScheduleParams {
    pub group_id: String,
    pub location_id: String,
    pub name: String,
    pub weekday: i32,
    pub start_time: String,
}

impl Schedule {
    pub fn new(params: NewScheduleParams) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            group_id: params.group_id,
            location_id: params.location_id,
            name: params.name,
            weekday: params.weekday,
            start_time: params.start_time,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    pub fn start_time_of_day(&self) -> Option<NaiveTime> {
        NaiveTime::parse_from_str(&self.start_time, "%H:%M").ok()
    }

    pub fn weekday_of_week(&self) -> Option<Weekday> {
        match self.weekday {
            0 => Some(Weekday::Mon),
            1 => Some(Weekday::Tue),
            2 => Some(Weekday::Wed),
            3 => Some(Weekday::Thu),
            4 => Some(Weekday::Fri),
            5 => Some(Weekday::Sat),
            6 => Some(Weekday::Sun),
            _ => None,
        }
    }
}

/// Projection of a schedule a person is eligible to sign up for, carrying the
/// group and location names the signup list is grouped by.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct SignupScheduleRow {
    pub group_id: String,
    pub group_name: String,
    pub location_id: String,
    pub location_name: String,
    pub schedule_id: String,
    pub schedule_name: String,
    pub weekday: i32,
    pub start_time: String,
}

impl SignupScheduleRow {
    /// The recurrence fields the expander needs, viewed as a Schedule.
    pub fn as_schedule(&self) -> Schedule {
        Schedule {
            id: self.schedule_id.clone(),
            group_id: self.group_id.clone(),
            location_id: self.location_id.clone(),
            name: self.schedule_name.clone(),
            weekday: self.weekday,
            start_time: self.start_time.clone(),
            is_active: true,
            created_at: Utc::now(),
        }
    }
}
