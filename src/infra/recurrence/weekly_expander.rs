use crate::domain::models::schedule::Schedule;
use crate::domain::ports::OccurrenceExpander;
use chrono::{DateTime, Datelike, Duration, TimeZone, Utc};

/// Expands the weekly recurrence definition carried on a schedule row
/// (weekday + start time) into concrete start times. Schedules with an
/// unparsable time or weekday expand to nothing.
pub struct WeeklyScheduleExpander;

impl OccurrenceExpander for WeeklyScheduleExpander {
    fn expand(
        &self,
        schedule: &Schedule,
        window_start: DateTime<Utc>,
        window_end: DateTime<Utc>,
    ) -> Vec<DateTime<Utc>> {
        let (Some(weekday), Some(time_of_day)) = (schedule.weekday_of_week(), schedule.start_time_of_day()) else {
            return Vec::new();
        };

        let mut occurrences = Vec::new();
        let mut date = window_start.date_naive();
        let last = window_end.date_naive();

        while date <= last {
            if date.weekday() == weekday {
                let start = Utc.from_utc_datetime(&date.and_time(time_of_day));
                if start >= window_start && start <= window_end {
                    occurrences.push(start);
                }
            }
            date += Duration::days(1);
        }

        occurrences
    }
}
