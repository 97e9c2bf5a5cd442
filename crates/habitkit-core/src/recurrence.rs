//! Recurrence evaluation: is a habit due on a given calendar date?
//!
//! Every function here is total over validated rules and any date. Rules
//! are validated when a [`Habit`] is built, so nothing in this module can
//! fail.

use chrono::{Days, NaiveDate};

use crate::calendar::{self, days_between, weekday_number};
use crate::habit::{FrequencyRule, Habit};

/// Whether `rule` requires an action on `date`, given the validity window
/// `[start_date, end_date]` (both inclusive).
pub fn is_due(
    rule: &FrequencyRule,
    start_date: NaiveDate,
    end_date: Option<NaiveDate>,
    date: NaiveDate,
) -> bool {
    if date < start_date {
        return false;
    }
    if matches!(end_date, Some(end) if date > end) {
        return false;
    }

    match rule {
        FrequencyRule::Daily => true,
        FrequencyRule::Weekly { days_of_week } => days_of_week.contains(&weekday_number(date)),
        FrequencyRule::Custom { dates } => dates.contains(&date),
        FrequencyRule::Interval { every_n_days } => {
            // every_n_days > 0 is guaranteed by validation
            let step = i64::from((*every_n_days).max(1));
            days_between(start_date, date) % step == 0
        }
    }
}

/// Due dates of `habit` within `[from, to]`, oldest first.
pub fn due_dates(habit: &Habit, from: NaiveDate, to: NaiveDate) -> impl Iterator<Item = NaiveDate> + '_ {
    let first = from.max(habit.start_date());
    let last = match habit.end_date() {
        Some(end) => to.min(end),
        None => to,
    };
    calendar::days(first, last).filter(move |date| habit.is_due(*date))
}

/// Number of due dates of `habit` within `[from, to]`.
pub fn count_due(habit: &Habit, from: NaiveDate, to: NaiveDate) -> usize {
    due_dates(habit, from, to).count()
}

/// The first due date on or after `date`, or `None` if the habit will never
/// be due again.
pub fn next_due_on_or_after(habit: &Habit, date: NaiveDate) -> Option<NaiveDate> {
    let from = date.max(habit.start_date());
    let within_window = |candidate: NaiveDate| match habit.end_date() {
        Some(end) if candidate > end => None,
        _ => Some(candidate),
    };

    let candidate = match habit.frequency() {
        FrequencyRule::Daily => Some(from),
        FrequencyRule::Weekly { days_of_week } => (0..7u64)
            .filter_map(|offset| from.checked_add_days(Days::new(offset)))
            .find(|day| days_of_week.contains(&weekday_number(*day))),
        FrequencyRule::Custom { dates } => dates.range(from..).next().copied(),
        FrequencyRule::Interval { every_n_days } => {
            let step = i64::from((*every_n_days).max(1));
            let rem = days_between(habit.start_date(), from) % step;
            let offset = if rem == 0 { 0 } else { step - rem };
            from.checked_add_days(Days::new(offset as u64))
        }
    }?;

    within_window(candidate)
}
