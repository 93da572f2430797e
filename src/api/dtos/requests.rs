use chrono::NaiveDate;
use serde::Deserialize;

#[derive(Deserialize)]
pub struct CreateGroupRequest {
    pub name: String,
}

#[derive(Deserialize)]
pub struct AddMemberRequest {
    pub person_id: String,
}

#[derive(Deserialize)]
pub struct CreatePersonRequest {
    pub nick_name: String,
    pub last_name: String,
}

#[derive(Deserialize)]
pub struct CreateLocationRequest {
    pub name: String,
}

#[derive(Deserialize)]
pub struct CreateScheduleRequest {
    pub group_id: String,
    pub location_id: String,
    pub name: String,
    pub weekday: i32,
    pub start_time: String,
}

#[derive(Deserialize)]
pub struct CreateDeclineReasonRequest {
    pub value: String,
    pub category: Option<String>,
    pub sort_order: Option<i32>,
}

#[derive(Deserialize)]
pub struct CreateOccurrenceRequest {
    pub group_id: String,
    pub occurrence_date: NaiveDate,
    pub location_id: Option<String>,
    pub schedule_id: Option<String>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct UpdateOccurrenceRequest {
    pub accept_message: String,
    pub decline_message: String,
    pub show_decline_reasons: bool,
    pub decline_reason_ids: Vec<String>,
}

#[derive(Deserialize)]
pub struct FutureOccurrencesQuery {
    pub group_id: String,
    pub to_date: Option<NaiveDate>,
    /// Comma-delimited allow-list of location ids.
    pub location_ids: Option<String>,
    /// Comma-delimited allow-list of schedule ids.
    pub schedule_ids: Option<String>,
}

#[derive(Deserialize)]
pub struct AssignAttendanceRequest {
    pub occurrence_id: String,
    pub person_id: String,
}

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct DeclineAttendanceRequest {
    pub decline_reason_id: Option<String>,
    pub note: Option<String>,
}

#[derive(Deserialize)]
pub struct DidAttendRequest {
    pub did_attend: bool,
}

/// One selected signup slot, mirroring the slot tuples the signup list hands
/// out.
#[derive(Deserialize)]
pub struct SignupSelection {
    pub group_id: String,
    pub location_id: String,
    pub schedule_id: String,
    pub occurrence_date: NaiveDate,
}

#[derive(Deserialize)]
pub struct BatchSignupRequest {
    pub signups: Vec<SignupSelection>,
}

#[derive(Deserialize)]
pub struct AnalyticsQuery {
    pub group_id: Option<String>,
    pub person_id: Option<String>,
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// day | week | month; chosen from the span length when absent.
    pub bucketing: Option<String>,
}
