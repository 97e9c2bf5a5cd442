//! Statistics module for Habitkit
//!
//! This module derives streaks, completion rates and calendar-bucketed
//! series from a habit and its check-in history. Every function is pure:
//! inputs are explicit parameters and nothing is cached between calls.

mod batch;
mod buckets;
mod checkin_log;
mod engine;
pub mod time_of_day;

pub use batch::{compute_all, compute_all_parallel, group_by_habit};
pub use buckets::{bucketize, CalendarBucket, Granularity};
pub use checkin_log::{CheckInLog, DataAnomaly};
pub use engine::{completion_rate, HabitStats, RangeStatus, StatsEngine, StatsReport};
pub use time_of_day::{HourlyCompletions, TimeOfDayProfile};
