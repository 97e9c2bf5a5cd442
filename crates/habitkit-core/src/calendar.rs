//! Calendar-day helpers.
//!
//! Everything here works on [`NaiveDate`] only. Due dates and streaks are
//! never derived from instants, so there is no timezone to get wrong.

use chrono::{Datelike, Days, NaiveDate};

/// Iterator over every day in an inclusive range, oldest first.
#[derive(Debug, Clone)]
pub struct DayRange {
    next: Option<NaiveDate>,
    last: NaiveDate,
}

impl Iterator for DayRange {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        let current = self.next?;
        if current > self.last {
            self.next = None;
            return None;
        }
        self.next = current.succ_opt();
        Some(current)
    }
}

impl DoubleEndedIterator for DayRange {
    fn next_back(&mut self) -> Option<NaiveDate> {
        let first = self.next?;
        if self.last < first {
            self.next = None;
            return None;
        }
        let current = self.last;
        match current.pred_opt() {
            Some(prev) => self.last = prev,
            None => self.next = None,
        }
        Some(current)
    }
}

/// Days in `[first, last]`. Empty when `last < first`.
pub fn days(first: NaiveDate, last: NaiveDate) -> DayRange {
    DayRange {
        next: Some(first),
        last,
    }
}

/// Whole days from `from` to `to` (negative when `to` is earlier).
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

/// Monday of the ISO week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let offset = u64::from(date.weekday().num_days_from_monday());
    date.checked_sub_days(Days::new(offset)).unwrap_or(NaiveDate::MIN)
}

/// Sunday closing the ISO week containing `date`.
pub fn week_end(date: NaiveDate) -> NaiveDate {
    let offset = 6 - u64::from(date.weekday().num_days_from_monday());
    date.checked_add_days(Days::new(offset)).unwrap_or(NaiveDate::MAX)
}

/// First day of the month containing `date`.
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Last day of the month containing `date`.
pub fn month_end(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|first_of_next| first_of_next.pred_opt())
        .unwrap_or(NaiveDate::MAX)
}

/// ISO week label, e.g. `2023-W01`.
pub fn week_label(date: NaiveDate) -> String {
    let iso = date.iso_week();
    format!("{}-W{:02}", iso.year(), iso.week())
}

/// Month label, e.g. `2023-01`.
pub fn month_label(date: NaiveDate) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}

/// Weekday number with `0 = Sunday .. 6 = Saturday`.
pub fn weekday_number(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_sunday() as u8
}
