//! Dashboard batch computation.
//!
//! Each habit's statistics depend only on its own check-ins, so a batch is
//! a plain map over habits. [`compute_all_parallel`] splits the habits into
//! contiguous chunks, computes each chunk on a scoped thread and joins the
//! chunks back in order, so output order always matches input order.

use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::thread;

use chrono::NaiveDate;
use tracing::debug;

use super::engine::{HabitStats, StatsEngine};
use crate::habit::{CheckIn, Habit, HabitId};

/// Group a flat check-in list by habit id.
pub fn group_by_habit(checkins: &[CheckIn]) -> HashMap<HabitId, Vec<CheckIn>> {
    let mut grouped: HashMap<HabitId, Vec<CheckIn>> = HashMap::new();
    for checkin in checkins {
        grouped
            .entry(checkin.habit_id.clone())
            .or_default()
            .push(checkin.clone());
    }
    grouped
}

fn history<'a>(checkins_by_habit: &'a HashMap<HabitId, Vec<CheckIn>>, habit: &Habit) -> &'a [CheckIn] {
    checkins_by_habit
        .get(habit.id())
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// Compute statistics for every habit, in input order.
pub fn compute_all(
    engine: &StatsEngine,
    habits: &[Habit],
    checkins_by_habit: &HashMap<HabitId, Vec<CheckIn>>,
    as_of: NaiveDate,
) -> Vec<HabitStats> {
    habits
        .iter()
        .map(|habit| engine.compute(habit, history(checkins_by_habit, habit), as_of))
        .collect()
}

/// Like [`compute_all`], fanned out over up to `workers` threads.
///
/// `None` uses the machine's available parallelism.
pub fn compute_all_parallel(
    engine: &StatsEngine,
    habits: &[Habit],
    checkins_by_habit: &HashMap<HabitId, Vec<CheckIn>>,
    as_of: NaiveDate,
    workers: Option<NonZeroUsize>,
) -> Vec<HabitStats> {
    let workers = workers
        .or_else(|| thread::available_parallelism().ok())
        .map_or(1, NonZeroUsize::get);

    if workers <= 1 || habits.len() <= 1 {
        return compute_all(engine, habits, checkins_by_habit, as_of);
    }

    let chunk_size = habits.len().div_ceil(workers);
    debug!(habits = habits.len(), workers, chunk_size, "computing stats in parallel");

    thread::scope(|scope| {
        let handles: Vec<_> = habits
            .chunks(chunk_size)
            .map(|chunk| scope.spawn(move || compute_all(engine, chunk, checkins_by_habit, as_of)))
            .collect();

        let mut results = Vec::with_capacity(habits.len());
        for handle in handles {
            match handle.join() {
                Ok(chunk) => results.extend(chunk),
                Err(panic) => std::panic::resume_unwind(panic),
            }
        }
        results
    })
}
