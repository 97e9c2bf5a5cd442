//! The "today" view: which habits are due on a date and where each stands.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::habit::{CheckIn, Habit, HabitId};
use crate::stats::{CheckInLog, StatsEngine};

/// One row of the today view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgendaItem {
    pub habit_id: HabitId,
    pub name: String,
    pub completed: bool,
    pub current_streak: u32,
}

/// Non-archived habits due on `date`, in input order.
pub fn agenda(
    engine: &StatsEngine,
    habits: &[Habit],
    checkins_by_habit: &HashMap<HabitId, Vec<CheckIn>>,
    date: NaiveDate,
) -> Vec<AgendaItem> {
    habits
        .iter()
        .filter(|habit| !habit.is_archived() && habit.is_due(date))
        .map(|habit| {
            let history = checkins_by_habit
                .get(habit.id())
                .map(Vec::as_slice)
                .unwrap_or(&[]);
            let completed = CheckInLog::from_checkins(habit.id(), history).is_completed(date);
            AgendaItem {
                habit_id: habit.id().clone(),
                name: habit.name().to_string(),
                completed,
                current_streak: engine.compute(habit, history, date).current_streak,
            }
        })
        .collect()
}
