//! Per-habit streak and completion statistics.
//!
//! Streaks are always computed by walking calendar days, never inferred
//! from completion totals:
//! - **Current streak**: walk backward from the last counted day. Days the
//!   habit isn't due are skipped; a due, completed day extends the streak; a
//!   due, missed day ends the walk.
//! - **Longest streak**: one forward scan with a running counter that only
//!   resets on a due, missed day.
//!
//! A due day equal to `as_of` that has no completion yet is *open*. With
//! [`StatsEngine::open_day_pending`] set (the default), an open day neither
//! extends nor breaks a streak; it is still counted in `total_due_days`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::checkin_log::{CheckInLog, DataAnomaly};
use crate::calendar;
use crate::habit::{CheckIn, Habit};

/// Statistics for one habit as of a reference date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitStats {
    /// Due days that were completed
    pub total_completions: u32,
    /// Due days in `[start_date, as_of]`, clipped to the end date
    pub total_due_days: u32,
    /// Rounded percentage in `0..=100`
    pub completion_rate: u32,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub last_completed_date: Option<NaiveDate>,
}

/// Where `as_of` falls relative to the habit's validity window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RangeStatus {
    /// `as_of` is before the start date; all counters are zero
    NotStarted,
    /// `as_of` is inside the window
    Active,
    /// The habit ended before `as_of`; statistics stop at `end_date`
    Ended { end_date: NaiveDate },
}

/// Statistics plus the diagnostics gathered while computing them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsReport {
    pub stats: HabitStats,
    pub status: RangeStatus,
    pub anomalies: Vec<DataAnomaly>,
}

/// Streak and completion-rate calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsEngine {
    /// Treat a due, not-yet-completed `as_of` as pending rather than missed
    pub open_day_pending: bool,
}

impl Default for StatsEngine {
    fn default() -> Self {
        Self {
            open_day_pending: true,
        }
    }
}

impl StatsEngine {
    /// Create an engine with the default (pending) open-day policy
    pub fn new() -> Self {
        Self::default()
    }

    /// An engine where an incomplete due `as_of` breaks the current streak
    pub fn strict() -> Self {
        Self {
            open_day_pending: false,
        }
    }

    /// Compute statistics for `habit` as of `as_of`.
    pub fn compute(&self, habit: &Habit, checkins: &[CheckIn], as_of: NaiveDate) -> HabitStats {
        self.compute_report(habit, checkins, as_of).stats
    }

    /// Compute statistics and return them with range status and anomalies.
    pub fn compute_report(
        &self,
        habit: &Habit,
        checkins: &[CheckIn],
        as_of: NaiveDate,
    ) -> StatsReport {
        let log = CheckInLog::from_checkins(habit.id(), checkins);

        if as_of < habit.start_date() {
            debug!(habit_id = %habit.id(), %as_of, "habit has not started yet");
            return StatsReport {
                stats: HabitStats::default(),
                status: RangeStatus::NotStarted,
                anomalies: log.into_anomalies(),
            };
        }

        let last = habit.last_counted_day(as_of);
        let status = if last < as_of {
            RangeStatus::Ended { end_date: last }
        } else {
            RangeStatus::Active
        };

        let stats = self.walk(habit, &log, last, as_of);
        debug!(
            habit_id = %habit.id(),
            rule = habit.frequency().kind(),
            %as_of,
            due = stats.total_due_days,
            completed = stats.total_completions,
            current_streak = stats.current_streak,
            longest_streak = stats.longest_streak,
            "computed habit stats"
        );

        StatsReport {
            stats,
            status,
            anomalies: log.into_anomalies(),
        }
    }

    fn walk(&self, habit: &Habit, log: &CheckInLog, last: NaiveDate, as_of: NaiveDate) -> HabitStats {
        let start = habit.start_date();
        let is_open = |date: NaiveDate| self.open_day_pending && date == as_of;

        let mut total_due_days = 0u32;
        let mut total_completions = 0u32;
        let mut running = 0u32;
        let mut longest_streak = 0u32;

        for date in calendar::days(start, last) {
            if !habit.is_due(date) {
                continue;
            }
            total_due_days += 1;
            if log.is_completed(date) {
                total_completions += 1;
                running += 1;
                longest_streak = longest_streak.max(running);
            } else if !is_open(date) {
                running = 0;
            }
        }

        let mut current_streak = 0u32;
        for date in calendar::days(start, last).rev() {
            if !habit.is_due(date) {
                continue;
            }
            if log.is_completed(date) {
                current_streak += 1;
            } else if is_open(date) {
                continue;
            } else {
                break;
            }
        }

        HabitStats {
            total_completions,
            total_due_days,
            completion_rate: completion_rate(total_completions, total_due_days),
            current_streak,
            longest_streak,
            last_completed_date: log.last_completed_on_or_before(as_of),
        }
    }
}

/// Rounded percentage of `completed` over `due`, `0` when nothing was due.
pub fn completion_rate(completed: u32, due: u32) -> u32 {
    if due == 0 {
        return 0;
    }
    let completed = u64::from(completed.min(due));
    let due = u64::from(due);
    // round half up
    ((200 * completed + due) / (2 * due)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::habit::{FrequencyRule, HabitId};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn habit(rule: FrequencyRule, start: NaiveDate) -> Habit {
        Habit::new("test", rule, start)
            .unwrap()
            .with_id(HabitId::new("h"))
    }

    fn done(dates: &[NaiveDate]) -> Vec<CheckIn> {
        dates
            .iter()
            .map(|date| CheckIn::completed(HabitId::new("h"), *date))
            .collect()
    }

    #[test]
    fn completion_rate_rounds_and_is_bounded() {
        assert_eq!(completion_rate(0, 0), 0);
        assert_eq!(completion_rate(1, 3), 33);
        assert_eq!(completion_rate(2, 3), 67);
        assert_eq!(completion_rate(1, 8), 13);
        assert_eq!(completion_rate(5, 5), 100);
        assert_eq!(completion_rate(9, 5), 100);
    }

    #[test]
    fn not_started_yields_zeroed_stats() {
        let h = habit(FrequencyRule::Daily, d(2023, 2, 1));
        let report = StatsEngine::new().compute_report(&h, &done(&[d(2023, 2, 1)]), d(2023, 1, 31));
        assert_eq!(report.status, RangeStatus::NotStarted);
        assert_eq!(report.stats, HabitStats::default());
    }

    #[test]
    fn open_day_is_pending_by_default() {
        let h = habit(FrequencyRule::Daily, d(2023, 1, 1));
        let history = done(&[d(2023, 1, 1), d(2023, 1, 2)]);
        let stats = StatsEngine::new().compute(&h, &history, d(2023, 1, 3));
        assert_eq!(stats.current_streak, 2);
        assert_eq!(stats.total_due_days, 3);
        assert_eq!(stats.completion_rate, 67);
    }

    #[test]
    fn strict_engine_breaks_on_open_day() {
        let h = habit(FrequencyRule::Daily, d(2023, 1, 1));
        let history = done(&[d(2023, 1, 1), d(2023, 1, 2)]);
        let stats = StatsEngine::strict().compute(&h, &history, d(2023, 1, 3));
        assert_eq!(stats.current_streak, 0);
        assert_eq!(stats.longest_streak, 2);
    }

    #[test]
    fn ended_habit_stops_at_end_date() {
        let h = habit(FrequencyRule::Daily, d(2023, 1, 1))
            .with_end_date(d(2023, 1, 3))
            .unwrap();
        let history = done(&[d(2023, 1, 1), d(2023, 1, 2), d(2023, 1, 3)]);
        let report = StatsEngine::new().compute_report(&h, &history, d(2023, 2, 1));
        assert_eq!(report.status, RangeStatus::Ended { end_date: d(2023, 1, 3) });
        assert_eq!(report.stats.total_due_days, 3);
        assert_eq!(report.stats.current_streak, 3);
        assert_eq!(report.stats.completion_rate, 100);
    }

    #[test]
    fn ended_habit_last_day_is_not_pending() {
        let h = habit(FrequencyRule::Daily, d(2023, 1, 1))
            .with_end_date(d(2023, 1, 3))
            .unwrap();
        let history = done(&[d(2023, 1, 1), d(2023, 1, 2)]);
        let stats = StatsEngine::new().compute(&h, &history, d(2023, 1, 10));
        assert_eq!(stats.current_streak, 0);
        assert_eq!(stats.longest_streak, 2);
    }

    #[test]
    fn completion_on_non_due_day_sets_last_completed_only() {
        // Mondays only; 2023-01-03 is a Tuesday
        let h = habit(FrequencyRule::weekly([1]), d(2023, 1, 1));
        let stats = StatsEngine::new().compute(&h, &done(&[d(2023, 1, 3)]), d(2023, 1, 4));
        assert_eq!(stats.total_completions, 0);
        assert_eq!(stats.total_due_days, 1);
        assert_eq!(stats.last_completed_date, Some(d(2023, 1, 3)));
    }

    #[test]
    fn future_completions_are_ignored() {
        let h = habit(FrequencyRule::Daily, d(2023, 1, 1));
        let stats = StatsEngine::new().compute(&h, &done(&[d(2023, 1, 1), d(2023, 1, 9)]), d(2023, 1, 2));
        assert_eq!(stats.total_completions, 1);
        assert_eq!(stats.last_completed_date, Some(d(2023, 1, 1)));
    }

    #[test]
    fn anomalies_surface_in_report() {
        let h = habit(FrequencyRule::Daily, d(2023, 1, 1));
        let mut history = done(&[d(2023, 1, 1)]);
        history.push(CheckIn::missed(HabitId::new("h"), d(2023, 1, 1)));
        let report = StatsEngine::new().compute_report(&h, &history, d(2023, 1, 1));
        assert_eq!(report.stats.total_completions, 1);
        assert_eq!(report.anomalies.len(), 1);
    }
}
