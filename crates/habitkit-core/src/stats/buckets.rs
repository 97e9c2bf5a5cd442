//! Calendar-aligned completion series for trend charts and reports.
//!
//! A window is cut at calendar boundaries (ISO weeks start on Monday,
//! months on the 1st). The first and last buckets are clipped to the
//! window, so every day of the window lands in exactly one bucket.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::checkin_log::CheckInLog;
use super::engine::completion_rate;
use crate::calendar;
use crate::habit::{CheckIn, Habit};

/// Bucket size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Day,
    Week,
    Month,
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Granularity::Day => "day",
            Granularity::Week => "week",
            Granularity::Month => "month",
        };
        f.write_str(name)
    }
}

impl FromStr for Granularity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" | "daily" => Ok(Granularity::Day),
            "week" | "weekly" => Ok(Granularity::Week),
            "month" | "monthly" => Ok(Granularity::Month),
            other => Err(format!("unknown granularity '{other}' (expected day, week or month)")),
        }
    }
}

/// Due and completed counts for one calendar bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarBucket {
    /// `2023-01-05`, `2023-W01` or `2023-01`
    pub label: String,
    /// First day of the bucket inside the window
    pub start: NaiveDate,
    /// Last day of the bucket inside the window
    pub end: NaiveDate,
    pub due_count: u32,
    pub completed_count: u32,
    /// Rounded percentage; `0` when nothing was due
    pub rate: u32,
}

/// Split `[window_start, window_end]` into calendar buckets and count due
/// and completed days in each, oldest first.
///
/// An inverted window yields an empty series.
pub fn bucketize(
    habit: &Habit,
    checkins: &[CheckIn],
    granularity: Granularity,
    window_start: NaiveDate,
    window_end: NaiveDate,
) -> Vec<CalendarBucket> {
    if window_end < window_start {
        debug!(%window_start, %window_end, "empty bucket window");
        return Vec::new();
    }

    let log = CheckInLog::from_checkins(habit.id(), checkins);
    let mut buckets = Vec::new();
    let mut cursor = window_start;

    loop {
        let natural_end = match granularity {
            Granularity::Day => cursor,
            Granularity::Week => calendar::week_end(cursor),
            Granularity::Month => calendar::month_end(cursor),
        };
        let end = natural_end.min(window_end);

        let mut due_count = 0u32;
        let mut completed_count = 0u32;
        for date in calendar::days(cursor, end) {
            if habit.is_due(date) {
                due_count += 1;
                if log.is_completed(date) {
                    completed_count += 1;
                }
            }
        }

        buckets.push(CalendarBucket {
            label: label(granularity, cursor),
            start: cursor,
            end,
            due_count,
            completed_count,
            rate: completion_rate(completed_count, due_count),
        });

        match end.succ_opt() {
            Some(next) if next <= window_end => cursor = next,
            _ => break,
        }
    }

    buckets
}

fn label(granularity: Granularity, date: NaiveDate) -> String {
    match granularity {
        Granularity::Day => date.format("%Y-%m-%d").to_string(),
        Granularity::Week => calendar::week_label(date),
        Granularity::Month => calendar::month_label(date),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::habit::{FrequencyRule, HabitId};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn daily(start: NaiveDate) -> Habit {
        Habit::new("walk", FrequencyRule::Daily, start)
            .unwrap()
            .with_id(HabitId::new("h"))
    }

    #[test]
    fn weeks_are_iso_aligned_and_clipped() {
        let habit = daily(d(2023, 1, 1));
        // Wed 2023-01-04 .. Tue 2023-01-17
        let buckets = bucketize(&habit, &[], Granularity::Week, d(2023, 1, 4), d(2023, 1, 17));
        let labels: Vec<_> = buckets.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["2023-W01", "2023-W02", "2023-W03"]);
        assert_eq!(buckets[0].start, d(2023, 1, 4));
        assert_eq!(buckets[0].end, d(2023, 1, 8));
        assert_eq!(buckets[0].due_count, 5);
        assert_eq!(buckets[1].due_count, 7);
        assert_eq!(buckets[2].end, d(2023, 1, 17));
        assert_eq!(buckets[2].due_count, 2);
    }

    #[test]
    fn months_count_completions() {
        let habit = daily(d(2023, 1, 1));
        let id = HabitId::new("h");
        let checkins = vec![
            CheckIn::completed(id.clone(), d(2023, 1, 31)),
            CheckIn::completed(id.clone(), d(2023, 2, 1)),
            CheckIn::completed(id, d(2023, 2, 2)),
        ];
        let buckets = bucketize(&habit, &checkins, Granularity::Month, d(2023, 1, 1), d(2023, 2, 28));
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].label, "2023-01");
        assert_eq!((buckets[0].due_count, buckets[0].completed_count), (31, 1));
        assert_eq!(buckets[0].rate, 3);
        assert_eq!((buckets[1].due_count, buckets[1].completed_count), (28, 2));
        assert_eq!(buckets[1].rate, 7);
    }

    #[test]
    fn day_buckets_cover_every_day() {
        let habit = daily(d(2023, 1, 1));
        let buckets = bucketize(&habit, &[], Granularity::Day, d(2022, 12, 30), d(2023, 1, 2));
        assert_eq!(buckets.len(), 4);
        assert_eq!(buckets[0].label, "2022-12-30");
        assert_eq!(buckets[0].due_count, 0);
        assert_eq!(buckets[0].rate, 0);
        assert_eq!(buckets[2].due_count, 1);
    }

    #[test]
    fn inverted_window_is_empty() {
        let habit = daily(d(2023, 1, 1));
        assert!(bucketize(&habit, &[], Granularity::Week, d(2023, 2, 1), d(2023, 1, 1)).is_empty());
    }

    #[test]
    fn granularity_parses_common_spellings() {
        assert_eq!("week".parse::<Granularity>().unwrap(), Granularity::Week);
        assert_eq!("Monthly".parse::<Granularity>().unwrap(), Granularity::Month);
        assert!("year".parse::<Granularity>().is_err());
    }
}
