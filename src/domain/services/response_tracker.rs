use crate::domain::models::attendance::{Attendance, Rsvp};
use crate::domain::models::occurrence::Occurrence;
use crate::domain::ports::{
    AttendanceRepository, KioskAttendanceCache, OccurrenceRepository, PersonRepository,
    ScheduleRepository,
};
use crate::error::AppError;
use chrono::{DateTime, TimeZone, Utc};
use std::sync::Arc;
use tracing::debug;

/// The per-person RSVP state machine against an occurrence. All transitions
/// are valid from every state; the record itself is never deleted.
pub struct ResponseTracker {
    attendance_repo: Arc<dyn AttendanceRepository>,
    occurrence_repo: Arc<dyn OccurrenceRepository>,
    schedule_repo: Arc<dyn ScheduleRepository>,
    person_repo: Arc<dyn PersonRepository>,
    kiosk_cache: Arc<dyn KioskAttendanceCache>,
}

impl ResponseTracker {
    pub fn new(
        attendance_repo: Arc<dyn AttendanceRepository>,
        occurrence_repo: Arc<dyn OccurrenceRepository>,
        schedule_repo: Arc<dyn ScheduleRepository>,
        person_repo: Arc<dyn PersonRepository>,
        kiosk_cache: Arc<dyn KioskAttendanceCache>,
    ) -> Self {
        Self {
            attendance_repo,
            occurrence_repo,
            schedule_repo,
            person_repo,
            kiosk_cache,
        }
    }

    /// Find-or-create the attendance record in the Unknown state. Repeated
    /// calls return the existing record untouched; a concurrent create for
    /// the same (occurrence, person) resolves to the winning row.
    pub async fn assign(&self, occurrence_id: &str, person_id: &str) -> Result<Attendance, AppError> {
        let occurrence = self
            .occurrence_repo
            .find_by_id(occurrence_id)
            .await?
            .ok_or(AppError::NotFound("Occurrence not found".into()))?;

        self.person_repo
            .find_by_id(person_id)
            .await?
            .ok_or(AppError::NotFound("Person not found".into()))?;

        if let Some(existing) = self
            .attendance_repo
            .find_by_occurrence_and_person(occurrence_id, person_id)
            .await?
        {
            return Ok(existing);
        }

        let start_date_time = self.occurrence_start_date_time(&occurrence).await?;
        let attendance = Attendance::new(occurrence_id.to_string(), person_id.to_string(), start_date_time);

        match self.attendance_repo.create(&attendance).await {
            Ok(created) => Ok(created),
            Err(e) if e.is_unique_violation() => {
                debug!("Lost attendance insert race for occurrence {} person {}, re-reading", occurrence_id, person_id);
                self.attendance_repo
                    .find_by_occurrence_and_person(occurrence_id, person_id)
                    .await?
                    .ok_or(AppError::Internal)
            }
            Err(e) => Err(e),
        }
    }

    /// Accept: stamps the response time and wipes any earlier decline data.
    pub async fn confirm(&self, attendance_id: &str) -> Result<Attendance, AppError> {
        let mut attendance = self.get(attendance_id).await?;

        attendance.rsvp = Rsvp::Yes;
        attendance.rsvp_datetime = Some(Utc::now());
        attendance.decline_reason_id = None;
        attendance.note = None;

        let updated = self.attendance_repo.update(&attendance).await?;
        self.evict_kiosk_count(&updated).await?;
        Ok(updated)
    }

    /// Decline. The reason is only written when one was actually supplied;
    /// an absent or empty reason leaves whatever was there before. The note
    /// always reflects the caller's text.
    pub async fn decline(
        &self,
        attendance_id: &str,
        decline_reason_id: Option<String>,
        note: Option<String>,
    ) -> Result<Attendance, AppError> {
        let mut attendance = self.get(attendance_id).await?;

        attendance.rsvp = Rsvp::No;
        attendance.rsvp_datetime = Some(Utc::now());
        if let Some(reason_id) = decline_reason_id
            && !reason_id.is_empty()
        {
            attendance.decline_reason_id = Some(reason_id);
        }
        attendance.note = note;

        let updated = self.attendance_repo.update(&attendance).await?;
        self.evict_kiosk_count(&updated).await?;
        Ok(updated)
    }

    /// Retract an acceptance (or decline): back to Unknown with no timestamp.
    pub async fn cancel_confirmation(&self, attendance_id: &str) -> Result<Attendance, AppError> {
        let mut attendance = self.get(attendance_id).await?;

        attendance.rsvp = Rsvp::Unknown;
        attendance.rsvp_datetime = None;

        let updated = self.attendance_repo.update(&attendance).await?;
        self.evict_kiosk_count(&updated).await?;
        Ok(updated)
    }

    /// Check-in outcome, orthogonal to the RSVP state.
    pub async fn set_did_attend(&self, attendance_id: &str, did_attend: bool) -> Result<Attendance, AppError> {
        let mut attendance = self.get(attendance_id).await?;

        attendance.did_attend = Some(did_attend);

        let updated = self.attendance_repo.update(&attendance).await?;
        self.evict_kiosk_count(&updated).await?;
        Ok(updated)
    }

    pub async fn pending_confirmations(&self, person_id: &str) -> Result<Vec<Attendance>, AppError> {
        self.attendance_repo.list_pending_for_person(person_id, Utc::now()).await
    }

    pub async fn confirmed_upcoming(&self, person_id: &str) -> Result<Vec<Attendance>, AppError> {
        self.attendance_repo.list_confirmed_for_person(person_id, Utc::now()).await
    }

    async fn get(&self, attendance_id: &str) -> Result<Attendance, AppError> {
        self.attendance_repo
            .find_by_id(attendance_id)
            .await?
            .ok_or(AppError::NotFound("Attendance not found".into()))
    }

    /// The occurrence date at the schedule's start time when the occurrence
    /// carries a schedule, else the date at midnight.
    async fn occurrence_start_date_time(&self, occurrence: &Occurrence) -> Result<DateTime<Utc>, AppError> {
        let mut start = occurrence
            .occurrence_date
            .and_hms_opt(0, 0, 0)
            .ok_or(AppError::Internal)?;

        if let Some(schedule_id) = &occurrence.schedule_id
            && let Some(schedule) = self.schedule_repo.find_by_id(schedule_id).await?
            && let Some(time_of_day) = schedule.start_time_of_day()
        {
            start = occurrence.occurrence_date.and_time(time_of_day);
        }

        Ok(Utc.from_utc_datetime(&start))
    }

    async fn evict_kiosk_count(&self, attendance: &Attendance) -> Result<(), AppError> {
        if let Some(occurrence) = self.occurrence_repo.find_by_id(&attendance.occurrence_id).await?
            && let Some(location_id) = &occurrence.location_id
        {
            self.kiosk_cache.evict(location_id);
        }

        Ok(())
    }
}
