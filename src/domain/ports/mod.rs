use crate::domain::models::{
    attendance::Attendance, decline_reason::DeclineReason, group::Group, location::Location,
    occurrence::Occurrence, person::Person, schedule::{Schedule, SignupScheduleRow},
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

#[async_trait]
pub trait GroupRepository: Send + Sync {
    async fn create(&self, group: &Group) -> Result<Group, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Group>, AppError>;
    async fn list(&self) -> Result<Vec<Group>, AppError>;
    async fn add_member(&self, group_id: &str, person_id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait PersonRepository: Send + Sync {
    async fn create(&self, person: &Person) -> Result<Person, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Person>, AppError>;
}

#[async_trait]
pub trait LocationRepository: Send + Sync {
    async fn create(&self, location: &Location) -> Result<Location, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Location>, AppError>;
}

#[async_trait]
pub trait ScheduleRepository: Send + Sync {
    async fn create(&self, schedule: &Schedule) -> Result<Schedule, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Schedule>, AppError>;
    async fn list_active_by_group(&self, group_id: &str) -> Result<Vec<Schedule>, AppError>;
    /// Schedules a person can sign up for: active schedules at active
    /// locations for every group the person is a member of, with the group
    /// and location names the presentation layer groups by.
    async fn list_signup_schedules_for_person(&self, person_id: &str) -> Result<Vec<SignupScheduleRow>, AppError>;
}

#[async_trait]
pub trait OccurrenceRepository: Send + Sync {
    async fn create(&self, occurrence: &Occurrence) -> Result<Occurrence, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Occurrence>, AppError>;
    /// Exact natural-key lookup; a None location/schedule only matches rows
    /// where that column is null.
    async fn find_by_natural_key(
        &self,
        group_id: &str,
        occurrence_date: NaiveDate,
        location_id: Option<&str>,
        schedule_id: Option<&str>,
    ) -> Result<Option<Occurrence>, AppError>;
    async fn list_for_group_between(
        &self,
        group_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Occurrence>, AppError>;
    async fn update_settings(&self, occurrence: &Occurrence) -> Result<Occurrence, AppError>;
}

#[async_trait]
pub trait AttendanceRepository: Send + Sync {
    async fn create(&self, attendance: &Attendance) -> Result<Attendance, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Attendance>, AppError>;
    async fn find_by_occurrence_and_person(
        &self,
        occurrence_id: &str,
        person_id: &str,
    ) -> Result<Option<Attendance>, AppError>;
    async fn update(&self, attendance: &Attendance) -> Result<Attendance, AppError>;
    async fn list_pending_for_person(&self, person_id: &str, from: DateTime<Utc>) -> Result<Vec<Attendance>, AppError>;
    async fn list_confirmed_for_person(&self, person_id: &str, from: DateTime<Utc>) -> Result<Vec<Attendance>, AppError>;
    /// True when the person already has a non-Unknown response for any
    /// occurrence of the given schedule on the given date.
    async fn exists_responded(
        &self,
        occurrence_date: NaiveDate,
        schedule_id: &str,
        person_id: &str,
    ) -> Result<bool, AppError>;
    async fn list_for_group_between(
        &self,
        group_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Attendance>, AppError>;
    async fn list_for_person_between(
        &self,
        person_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Attendance>, AppError>;
    async fn count_attended_at_location_on(
        &self,
        location_id: &str,
        occurrence_date: NaiveDate,
    ) -> Result<i64, AppError>;
}

#[async_trait]
pub trait DeclineReasonRepository: Send + Sync {
    async fn create(&self, reason: &DeclineReason) -> Result<DeclineReason, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<DeclineReason>, AppError>;
    async fn list_active(&self, category: &str) -> Result<Vec<DeclineReason>, AppError>;
}

/// Expands a schedule's recurrence definition into concrete start times
/// inside a window. Finite and restartable; implementations live in infra.
pub trait OccurrenceExpander: Send + Sync {
    fn expand(
        &self,
        schedule: &Schedule,
        window_start: DateTime<Utc>,
        window_end: DateTime<Utc>,
    ) -> Vec<DateTime<Utc>>;
}

/// Kiosk-facing cache of per-location attendance counts. Any RSVP state
/// change on a located occurrence must evict that location's entry.
pub trait KioskAttendanceCache: Send + Sync {
    fn get(&self, location_id: &str) -> Option<i64>;
    fn insert(&self, location_id: &str, count: i64);
    fn evict(&self, location_id: &str);
}
