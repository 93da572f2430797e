use crate::domain::ports::{AttendanceRepository, OccurrenceExpander, ScheduleRepository};
use crate::error::AppError;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::Serialize;
use std::sync::Arc;

/// A transient signup opportunity: one (group, location, schedule, date)
/// combination a person could still volunteer for. Nothing is persisted until
/// the person actually signs up. The `new_*` flags mark where the group /
/// date / schedule grouping changes in the sorted list so a presentation
/// layer can render headers without re-deriving the grouping.
#[derive(Debug, Clone, Serialize)]
pub struct SignupSlot {
    pub group_id: String,
    pub group_name: String,
    pub location_id: String,
    pub location_name: String,
    pub schedule_id: String,
    pub schedule_name: String,
    pub occurrence_start: DateTime<Utc>,
    pub new_group: bool,
    pub new_date: bool,
    pub new_schedule: bool,
}

/// Computes the open signup slots for a person over a future window across
/// all their eligible groups.
pub struct SignupResolver {
    schedule_repo: Arc<dyn ScheduleRepository>,
    attendance_repo: Arc<dyn AttendanceRepository>,
    expander: Arc<dyn OccurrenceExpander>,
    future_weeks_to_show: i64,
}

impl SignupResolver {
    pub fn new(
        schedule_repo: Arc<dyn ScheduleRepository>,
        attendance_repo: Arc<dyn AttendanceRepository>,
        expander: Arc<dyn OccurrenceExpander>,
        future_weeks_to_show: i64,
    ) -> Self {
        Self {
            schedule_repo,
            attendance_repo,
            expander,
            future_weeks_to_show,
        }
    }

    /// Open slots between tomorrow and the configured horizon, sorted by
    /// group, then date, then schedule start time. A date/schedule the person
    /// has already answered for is excluded for every location, since one
    /// person serves at most one location per schedule slot.
    pub async fn available_signups(&self, person_id: &str) -> Result<Vec<SignupSlot>, AppError> {
        let window_start = Utc::now() + Duration::days(1);
        let window_end = Utc::now() + Duration::days(self.future_weeks_to_show * 7);

        let signup_schedules = self
            .schedule_repo
            .list_signup_schedules_for_person(person_id)
            .await?;

        let mut candidates = Vec::new();
        for row in &signup_schedules {
            let schedule = row.as_schedule();
            for occurrence_start in self.expander.expand(&schedule, window_start, window_end) {
                let already_responded = self
                    .attendance_repo
                    .exists_responded(occurrence_start.date_naive(), &row.schedule_id, person_id)
                    .await?;

                if !already_responded {
                    candidates.push((row.clone(), occurrence_start));
                }
            }
        }

        // TODO: exclude blackout dates for the person and their family.

        candidates.sort_by(|(a, a_start), (b, b_start)| {
            a.group_id
                .cmp(&b.group_id)
                .then_with(|| a_start.date_naive().cmp(&b_start.date_naive()))
                .then_with(|| a.start_time.cmp(&b.start_time))
                .then_with(|| a.schedule_id.cmp(&b.schedule_id))
                .then_with(|| a.location_name.cmp(&b.location_name))
        });

        let mut current_group: Option<String> = None;
        let mut current_date: Option<NaiveDate> = None;
        let mut current_schedule: Option<String> = None;

        let slots = candidates
            .into_iter()
            .map(|(row, occurrence_start)| {
                let new_group = current_group.as_deref() != Some(row.group_id.as_str());
                if new_group {
                    current_group = Some(row.group_id.clone());
                    current_date = None;
                    current_schedule = None;
                }

                let date = occurrence_start.date_naive();
                let new_date = current_date != Some(date);
                if new_date {
                    current_date = Some(date);
                    current_schedule = None;
                }

                let new_schedule = current_schedule.as_deref() != Some(row.schedule_id.as_str());
                if new_schedule {
                    current_schedule = Some(row.schedule_id.clone());
                }

                SignupSlot {
                    group_id: row.group_id,
                    group_name: row.group_name,
                    location_id: row.location_id,
                    location_name: row.location_name,
                    schedule_id: row.schedule_id,
                    schedule_name: row.schedule_name,
                    occurrence_start,
                    new_group,
                    new_date,
                    new_schedule,
                }
            })
            .collect();

        Ok(slots)
    }
}
