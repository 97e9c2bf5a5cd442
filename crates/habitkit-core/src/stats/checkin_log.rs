//! Normalized per-habit check-in history.
//!
//! Storage is expected to hold at most one check-in per `(habit, date)`.
//! When it doesn't, the history is collapsed into a date map where a day
//! counts as completed if any of its check-ins is completed, and the
//! duplicate is reported as a [`DataAnomaly`] instead of being double
//! counted.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::habit::{CheckIn, HabitId};

/// Non-fatal data problem found while normalizing check-ins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DataAnomaly {
    /// More than one check-in for the same day
    DuplicateCheckIn {
        habit_id: HabitId,
        date: NaiveDate,
        count: u32,
        /// The duplicates disagree on completion
        conflicting: bool,
    },
    /// A check-in belonging to another habit was passed in
    ForeignCheckIn {
        expected: HabitId,
        found: HabitId,
        date: NaiveDate,
    },
}

#[derive(Debug, Clone, Copy, Default)]
struct DayEntry {
    count: u32,
    any_completed: bool,
    any_missed: bool,
}

/// Date-keyed completion map for one habit.
#[derive(Debug, Clone, Default)]
pub struct CheckInLog {
    completed: BTreeMap<NaiveDate, bool>,
    anomalies: Vec<DataAnomaly>,
}

impl CheckInLog {
    /// Normalize `checkins` for `habit_id`.
    pub fn from_checkins(habit_id: &HabitId, checkins: &[CheckIn]) -> Self {
        let mut days: BTreeMap<NaiveDate, DayEntry> = BTreeMap::new();
        let mut anomalies = Vec::new();

        for checkin in checkins {
            if &checkin.habit_id != habit_id {
                warn!(
                    expected = %habit_id,
                    found = %checkin.habit_id,
                    date = %checkin.date,
                    "ignoring check-in for another habit"
                );
                anomalies.push(DataAnomaly::ForeignCheckIn {
                    expected: habit_id.clone(),
                    found: checkin.habit_id.clone(),
                    date: checkin.date,
                });
                continue;
            }

            let entry = days.entry(checkin.date).or_default();
            entry.count += 1;
            if checkin.is_completed {
                entry.any_completed = true;
            } else {
                entry.any_missed = true;
            }
        }

        for (date, entry) in &days {
            if entry.count > 1 {
                let conflicting = entry.any_completed && entry.any_missed;
                warn!(
                    habit_id = %habit_id,
                    date = %date,
                    count = entry.count,
                    conflicting,
                    "duplicate check-ins collapsed"
                );
                anomalies.push(DataAnomaly::DuplicateCheckIn {
                    habit_id: habit_id.clone(),
                    date: *date,
                    count: entry.count,
                    conflicting,
                });
            }
        }

        Self {
            completed: days
                .into_iter()
                .map(|(date, entry)| (date, entry.any_completed))
                .collect(),
            anomalies,
        }
    }

    pub fn is_completed(&self, date: NaiveDate) -> bool {
        self.completed.get(&date).copied().unwrap_or(false)
    }

    /// Latest completed date on or before `date`.
    pub fn last_completed_on_or_before(&self, date: NaiveDate) -> Option<NaiveDate> {
        self.completed
            .range(..=date)
            .rev()
            .find(|(_, completed)| **completed)
            .map(|(day, _)| *day)
    }

    pub fn anomalies(&self) -> &[DataAnomaly] {
        &self.anomalies
    }

    pub fn into_anomalies(self) -> Vec<DataAnomaly> {
        self.anomalies
    }
}
