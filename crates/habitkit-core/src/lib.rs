//! # Habitkit Core Library
//!
//! This library provides the habit recurrence and progress analytics engine
//! behind Habitkit. It is a pure function of its inputs: callers fetch
//! habits and check-ins from storage, pass them in together with a
//! reference date, and get statistics back. Nothing is cached or mutated
//! between calls, and no I/O happens outside the `storage` module.
//!
//! ## Architecture
//!
//! - **Recurrence**: decides whether a habit is due on a calendar date
//!   (daily, selected weekdays, explicit dates, every N days)
//! - **Stats**: current/longest streaks, completion rates, calendar-bucketed
//!   series, batch computation for dashboards
//! - **Today / Achievements**: the home-screen agenda and achievement
//!   progress signals derived from stats
//! - **Storage**: read-only `HabitSource` collaborator, JSON snapshot and
//!   TOML configuration
//!
//! ## Key Components
//!
//! - [`Habit`] / [`FrequencyRule`]: validated habit definitions
//! - [`StatsEngine`]: streak and completion statistics
//! - [`bucketize`]: weekly/monthly completion series
//! - [`Config`]: Application configuration management

pub mod achievements;
pub mod calendar;
pub mod error;
pub mod habit;
pub mod recurrence;
pub mod stats;
pub mod storage;
pub mod today;

pub use achievements::{AchievementSignal, AchievementSink};
pub use error::{ConfigError, CoreError, RuleError, StorageError};
pub use habit::{CheckIn, FrequencyRule, Habit, HabitId, HabitRecord};
pub use recurrence::{is_due, next_due_on_or_after};
pub use stats::{
    bucketize, compute_all, compute_all_parallel, CalendarBucket, DataAnomaly, Granularity,
    HabitStats, RangeStatus, StatsEngine, StatsReport,
};
pub use storage::{Config, HabitSource, Snapshot};
pub use today::{agenda, AgendaItem};
