use crate::domain::models::decline_reason::DeclineReason;
use crate::domain::models::occurrence::Occurrence;
use crate::domain::ports::{
    DeclineReasonRepository, GroupRepository, OccurrenceExpander, OccurrenceRepository,
    ScheduleRepository,
};
use crate::error::AppError;
use chrono::{Duration, NaiveDate, Utc};
use std::sync::Arc;
use tracing::debug;

/// Owns creation, lookup and deduplication of occurrence records keyed by
/// (group, location, schedule, date). Creation is lazy: rows appear the first
/// time somebody needs to respond to an occurrence, or when an administrator
/// edits its settings.
pub struct OccurrenceStore {
    group_repo: Arc<dyn GroupRepository>,
    occurrence_repo: Arc<dyn OccurrenceRepository>,
    schedule_repo: Arc<dyn ScheduleRepository>,
    decline_reason_repo: Arc<dyn DeclineReasonRepository>,
    expander: Arc<dyn OccurrenceExpander>,
    future_weeks_to_show: i64,
    decline_reason_category: String,
}

pub struct OccurrenceSettings {
    pub accept_message: String,
    pub decline_message: String,
    pub show_decline_reasons: bool,
    pub decline_reason_ids: Vec<String>,
}

impl OccurrenceStore {
    pub fn new(
        group_repo: Arc<dyn GroupRepository>,
        occurrence_repo: Arc<dyn OccurrenceRepository>,
        schedule_repo: Arc<dyn ScheduleRepository>,
        decline_reason_repo: Arc<dyn DeclineReasonRepository>,
        expander: Arc<dyn OccurrenceExpander>,
        future_weeks_to_show: i64,
        decline_reason_category: String,
    ) -> Self {
        Self {
            group_repo,
            occurrence_repo,
            schedule_repo,
            decline_reason_repo,
            expander,
            future_weeks_to_show,
            decline_reason_category,
        }
    }

    pub async fn find_by_id(&self, occurrence_id: &str) -> Result<Option<Occurrence>, AppError> {
        self.occurrence_repo.find_by_id(occurrence_id).await
    }

    /// Returns the occurrence for the natural key, inserting it with default
    /// settings when missing. A concurrent insert for the same key loses the
    /// race on the unique index and resolves to the winning row, so two live
    /// rows can never exist.
    pub async fn get_or_create(
        &self,
        occurrence_date: NaiveDate,
        group_id: &str,
        location_id: Option<&str>,
        schedule_id: Option<&str>,
    ) -> Result<Occurrence, AppError> {
        self.group_repo
            .find_by_id(group_id)
            .await?
            .ok_or(AppError::NotFound("Group not found".into()))?;

        if let Some(existing) = self
            .occurrence_repo
            .find_by_natural_key(group_id, occurrence_date, location_id, schedule_id)
            .await?
        {
            return Ok(existing);
        }

        let occurrence = Occurrence::new(
            group_id.to_string(),
            location_id.map(str::to_string),
            schedule_id.map(str::to_string),
            occurrence_date,
        );

        match self.occurrence_repo.create(&occurrence).await {
            Ok(created) => Ok(created),
            Err(e) if e.is_unique_violation() => {
                debug!("Lost occurrence insert race for group {} on {}, re-reading", group_id, occurrence_date);
                self.occurrence_repo
                    .find_by_natural_key(group_id, occurrence_date, location_id, schedule_id)
                    .await?
                    .ok_or(AppError::Internal)
            }
            Err(e) => Err(e),
        }
    }

    /// Persisted occurrences between today and the horizon, merged with the
    /// not-yet-persisted dates the group's schedules produce over the same
    /// window. Computed entries carry an empty id. Never yields two entries
    /// for one natural key.
    pub async fn get_future_occurrences(
        &self,
        group_id: &str,
        to_date: Option<NaiveDate>,
        location_ids: Option<&[String]>,
        schedule_ids: Option<&[String]>,
    ) -> Result<Vec<Occurrence>, AppError> {
        self.group_repo
            .find_by_id(group_id)
            .await?
            .ok_or(AppError::NotFound("Group not found".into()))?;

        let today = Utc::now().date_naive();
        let horizon = to_date.unwrap_or(today + Duration::days(self.future_weeks_to_show * 7));

        let allows = |allow_list: Option<&[String]>, id: Option<&String>| match allow_list {
            None => true,
            Some(list) => id.is_some_and(|id| list.contains(id)),
        };

        let mut occurrences: Vec<Occurrence> = self
            .occurrence_repo
            .list_for_group_between(group_id, today, horizon)
            .await?
            .into_iter()
            .filter(|o| allows(location_ids, o.location_id.as_ref()))
            .filter(|o| allows(schedule_ids, o.schedule_id.as_ref()))
            .collect();

        let window_start = Utc::now();
        let window_end = window_start + Duration::days((horizon - today).num_days());

        for schedule in self.schedule_repo.list_active_by_group(group_id).await? {
            if let Some(list) = schedule_ids
                && !list.contains(&schedule.id)
            {
                continue;
            }
            if let Some(list) = location_ids
                && !list.contains(&schedule.location_id)
            {
                continue;
            }

            for start in self.expander.expand(&schedule, window_start, window_end) {
                let date = start.date_naive();
                let already_known = occurrences.iter().any(|o| {
                    o.occurrence_date == date
                        && o.location_id.as_deref() == Some(schedule.location_id.as_str())
                        && o.schedule_id.as_deref() == Some(schedule.id.as_str())
                });

                if !already_known {
                    let mut computed = Occurrence::new(
                        group_id.to_string(),
                        Some(schedule.location_id.clone()),
                        Some(schedule.id.clone()),
                        date,
                    );
                    // Empty id marks the occurrence as computed but not persisted.
                    computed.id = String::new();
                    occurrences.push(computed);
                }
            }
        }

        occurrences.sort_by(|a, b| {
            a.occurrence_date
                .cmp(&b.occurrence_date)
                .then_with(|| a.schedule_id.cmp(&b.schedule_id))
                .then_with(|| a.location_id.cmp(&b.location_id))
        });

        Ok(occurrences)
    }

    /// Admin edit of the confirmation messages and decline-reason
    /// configuration. Every supplied reason id must reference an active
    /// reason of the configured category at write time; ids that go stale
    /// later are tolerated and filtered on read.
    pub async fn update_settings(
        &self,
        occurrence_id: &str,
        settings: OccurrenceSettings,
    ) -> Result<Occurrence, AppError> {
        let mut occurrence = self
            .occurrence_repo
            .find_by_id(occurrence_id)
            .await?
            .ok_or(AppError::NotFound("Occurrence not found".into()))?;

        let active = self
            .decline_reason_repo
            .list_active(&self.decline_reason_category)
            .await?;

        for reason_id in &settings.decline_reason_ids {
            if !active.iter().any(|r| &r.id == reason_id) {
                return Err(AppError::Validation(format!(
                    "Decline reason {} is not an active reason of category {}",
                    reason_id, self.decline_reason_category
                )));
            }
        }

        occurrence.accept_message = settings.accept_message;
        occurrence.decline_message = settings.decline_message;
        occurrence.show_decline_reasons = settings.show_decline_reasons;
        occurrence.decline_reason_ids = settings.decline_reason_ids.join(",");

        self.occurrence_repo.update_settings(&occurrence).await
    }

    /// The decline reasons an attendee may pick for this occurrence: none
    /// unless the occurrence shows reasons, all active reasons of the
    /// category when no explicit list was configured, otherwise the active
    /// subset of the configured list.
    pub async fn available_decline_reasons(
        &self,
        occurrence: &Occurrence,
    ) -> Result<Vec<DeclineReason>, AppError> {
        if !occurrence.show_decline_reasons {
            return Ok(Vec::new());
        }

        let all_active = self
            .decline_reason_repo
            .list_active(&self.decline_reason_category)
            .await?;

        let selected = occurrence.decline_reason_id_list();
        if selected.is_empty() {
            return Ok(all_active);
        }

        Ok(all_active
            .into_iter()
            .filter(|r| selected.contains(&r.id))
            .collect())
    }
}
