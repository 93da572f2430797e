use crate::domain::models::attendance::{Attendance, Rsvp};
use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Bucketing {
    Day,
    Week,
    Month,
}

/// Display-density heuristic: more than 26 weeks summarizes by month, more
/// than a month by week, otherwise by day.
pub fn choose_bucketing(first: NaiveDate, last: NaiveDate) -> Bucketing {
    let days_count = (last - first).num_days();

    if days_count / 7 > 26 {
        Bucketing::Month
    } else if days_count > 31 {
        Bucketing::Week
    } else {
        Bucketing::Day
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Bucket {
    pub label: String,
    pub start: NaiveDate,
    pub scheduled: i64,
    pub no_response: i64,
    pub declines: i64,
    pub attended: i64,
    pub committed_no_show: i64,
    pub tentative_no_show: i64,
}

impl Bucket {
    fn empty(label: String, start: NaiveDate) -> Self {
        Self {
            label,
            start,
            scheduled: 0,
            no_response: 0,
            declines: 0,
            attended: 0,
            committed_no_show: 0,
            tentative_no_show: 0,
        }
    }

    fn tally(&mut self, attendance: &Attendance) {
        self.scheduled += 1;
        if attendance.rsvp == Rsvp::Unknown {
            self.no_response += 1;
        }
        if attendance.rsvp == Rsvp::No {
            self.declines += 1;
        }
        if attendance.did_attend == Some(true) {
            self.attended += 1;
        }
        if attendance.rsvp == Rsvp::Yes && attendance.did_attend == Some(false) {
            self.committed_no_show += 1;
        }
        // A tentative ("maybe") commitment is not representable in the
        // three-state RSVP, so this reduces to unanswered-and-did-not-attend.
        if attendance.rsvp != Rsvp::Yes && attendance.rsvp != Rsvp::No && attendance.did_attend == Some(false) {
            self.tentative_no_show += 1;
        }
    }
}

pub fn start_of_week(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

fn start_of_month(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date)
}

fn next_month(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(date)
}

/// Buckets attendances over [first, last] into one bucket per calendar unit.
/// Every unit in range appears exactly once, in ascending order, zero-filled
/// when no attendance falls in it.
pub fn aggregate(
    attendances: &[Attendance],
    first: NaiveDate,
    last: NaiveDate,
    bucketing: Bucketing,
) -> Vec<Bucket> {
    let mut buckets: Vec<Bucket> = Vec::new();
    let mut index: HashMap<NaiveDate, usize> = HashMap::new();

    let mut cursor = match bucketing {
        Bucketing::Day => first,
        Bucketing::Week => start_of_week(first),
        Bucketing::Month => start_of_month(first),
    };

    while cursor <= last {
        let label = match bucketing {
            Bucketing::Day => cursor.format("%Y-%m-%d").to_string(),
            Bucketing::Week => cursor.format("%Y-%m-%d").to_string(),
            Bucketing::Month => cursor.format("%b %Y").to_string(),
        };
        index.insert(cursor, buckets.len());
        buckets.push(Bucket::empty(label, cursor));

        cursor = match bucketing {
            Bucketing::Day => cursor + Duration::days(1),
            Bucketing::Week => cursor + Duration::days(7),
            Bucketing::Month => next_month(cursor),
        };
    }

    for attendance in attendances {
        let date = attendance.start_date_time.date_naive();
        let key = match bucketing {
            Bucketing::Day => date,
            Bucketing::Week => start_of_week(date),
            Bucketing::Month => start_of_month(date),
        };

        if let Some(&i) = index.get(&key) {
            buckets[i].tally(attendance);
        }
    }

    buckets
}

/// Decline counts per reason, most common first. Ties keep first-seen order.
pub fn aggregate_by_decline_reason(attendances: &[Attendance]) -> Vec<(String, i64)> {
    let mut counts: Vec<(String, i64)> = Vec::new();

    for attendance in attendances {
        if let Some(reason_id) = &attendance.decline_reason_id {
            match counts.iter_mut().find(|(id, _)| id == reason_id) {
                Some((_, count)) => *count += 1,
                None => counts.push((reason_id.clone(), 1)),
            }
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn attendance_on(date: NaiveDate, rsvp: Rsvp, did_attend: Option<bool>) -> Attendance {
        let mut a = Attendance::new(
            "occ".to_string(),
            "person".to_string(),
            Utc.from_utc_datetime(&date.and_hms_opt(9, 0, 0).unwrap()),
        );
        a.rsvp = rsvp;
        a.did_attend = did_attend;
        a
    }

    fn declined_with_reason(reason: &str) -> Attendance {
        let mut a = attendance_on(
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            Rsvp::No,
            None,
        );
        a.decline_reason_id = Some(reason.to_string());
        a
    }

    #[test]
    fn bucketing_policy_follows_span_length() {
        let first = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

        assert_eq!(choose_bucketing(first, first + Duration::days(10)), Bucketing::Day);
        assert_eq!(choose_bucketing(first, first + Duration::days(31)), Bucketing::Day);
        assert_eq!(choose_bucketing(first, first + Duration::days(32)), Bucketing::Week);
        assert_eq!(choose_bucketing(first, first + Duration::days(26 * 7)), Bucketing::Week);
        assert_eq!(choose_bucketing(first, first + Duration::days(27 * 7)), Bucketing::Month);
    }

    #[test]
    fn day_buckets_are_gapless_and_zero_filled() {
        let first = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let last = first + Duration::days(9);

        let attendances = vec![
            attendance_on(first + Duration::days(2), Rsvp::Yes, Some(true)),
            attendance_on(first + Duration::days(6), Rsvp::No, None),
        ];

        let buckets = aggregate(&attendances, first, last, Bucketing::Day);

        assert_eq!(buckets.len(), 10);
        assert!(buckets.windows(2).all(|w| w[0].start < w[1].start));
        assert_eq!(buckets[2].scheduled, 1);
        assert_eq!(buckets[2].attended, 1);
        assert_eq!(buckets[6].declines, 1);

        let zero_buckets = buckets.iter().filter(|b| b.scheduled == 0).count();
        assert_eq!(zero_buckets, 8);
    }

    #[test]
    fn week_buckets_start_on_monday() {
        // 2024-06-05 is a Wednesday; its week starts 2024-06-03.
        let first = NaiveDate::from_ymd_opt(2024, 6, 5).unwrap();
        let last = first + Duration::days(20);

        let attendances = vec![attendance_on(first, Rsvp::Unknown, None)];
        let buckets = aggregate(&attendances, first, last, Bucketing::Week);

        assert_eq!(buckets[0].start, NaiveDate::from_ymd_opt(2024, 6, 3).unwrap());
        assert_eq!(buckets[0].scheduled, 1);
        assert_eq!(buckets[0].no_response, 1);
        assert_eq!(buckets.len(), 4);
    }

    #[test]
    fn month_buckets_cover_year_boundary() {
        let first = NaiveDate::from_ymd_opt(2023, 11, 15).unwrap();
        let last = NaiveDate::from_ymd_opt(2024, 2, 10).unwrap();

        let attendances = vec![attendance_on(
            NaiveDate::from_ymd_opt(2024, 1, 20).unwrap(),
            Rsvp::Yes,
            Some(false),
        )];
        let buckets = aggregate(&attendances, first, last, Bucketing::Month);

        assert_eq!(buckets.len(), 4);
        assert_eq!(buckets[0].label, "Nov 2023");
        assert_eq!(buckets[3].label, "Feb 2024");
        assert_eq!(buckets[2].committed_no_show, 1);
    }

    #[test]
    fn tentative_no_show_counts_unanswered_absentees() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let attendances = vec![
            attendance_on(date, Rsvp::Unknown, Some(false)),
            attendance_on(date, Rsvp::Yes, Some(false)),
            attendance_on(date, Rsvp::No, Some(false)),
        ];

        let buckets = aggregate(&attendances, date, date, Bucketing::Day);

        assert_eq!(buckets[0].tentative_no_show, 1);
        assert_eq!(buckets[0].committed_no_show, 1);
    }

    #[test]
    fn decline_reasons_sort_by_count_with_stable_ties() {
        let mut attendances = Vec::new();
        for _ in 0..5 {
            attendances.push(declined_with_reason("A"));
        }
        for _ in 0..2 {
            attendances.push(declined_with_reason("B"));
        }
        for _ in 0..5 {
            attendances.push(declined_with_reason("C"));
        }
        // No reason recorded: excluded entirely.
        attendances.push(attendance_on(
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            Rsvp::No,
            None,
        ));

        let counts = aggregate_by_decline_reason(&attendances);

        assert_eq!(counts.len(), 3);
        assert_eq!(counts[0], ("A".to_string(), 5));
        assert_eq!(counts[1], ("C".to_string(), 5));
        assert_eq!(counts[2], ("B".to_string(), 2));
    }
}
