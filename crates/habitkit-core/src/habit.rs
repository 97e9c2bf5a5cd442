//! Habit and check-in domain types.
//!
//! A [`Habit`] can only be obtained through validation ([`Habit::new`] or
//! `TryFrom<HabitRecord>`), so every habit the engine sees carries a valid
//! [`FrequencyRule`] and a well-ordered validity window.

use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::RuleError;
use crate::recurrence;

/// Opaque habit identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HabitId(String);

impl HabitId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Mint a fresh random identifier.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HabitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for HabitId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Which calendar dates a habit applies to.
///
/// Weekdays are numbered `0 = Sunday .. 6 = Saturday`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FrequencyRule {
    /// Every day inside the validity window
    Daily,
    /// Selected weekdays
    Weekly { days_of_week: BTreeSet<u8> },
    /// An explicit list of dates
    Custom { dates: BTreeSet<NaiveDate> },
    /// Every N days counted from the habit's start date
    Interval { every_n_days: u32 },
}

impl FrequencyRule {
    pub fn weekly(days: impl IntoIterator<Item = u8>) -> Self {
        FrequencyRule::Weekly {
            days_of_week: days.into_iter().collect(),
        }
    }

    pub fn custom(dates: impl IntoIterator<Item = NaiveDate>) -> Self {
        FrequencyRule::Custom {
            dates: dates.into_iter().collect(),
        }
    }

    pub fn interval(every_n_days: u32) -> Self {
        FrequencyRule::Interval { every_n_days }
    }

    /// Check the rule's own payload.
    pub fn validate(&self) -> Result<(), RuleError> {
        match self {
            FrequencyRule::Daily | FrequencyRule::Custom { .. } => Ok(()),
            FrequencyRule::Weekly { days_of_week } => {
                if days_of_week.is_empty() {
                    return Err(RuleError::EmptyWeekdays);
                }
                match days_of_week.iter().find(|day| **day > 6) {
                    Some(day) => Err(RuleError::WeekdayOutOfRange(i64::from(*day))),
                    None => Ok(()),
                }
            }
            FrequencyRule::Interval { every_n_days } => {
                if *every_n_days == 0 {
                    Err(RuleError::NonPositiveInterval(0))
                } else {
                    Ok(())
                }
            }
        }
    }

    /// Short name used in logs and CLI output.
    pub fn kind(&self) -> &'static str {
        match self {
            FrequencyRule::Daily => "daily",
            FrequencyRule::Weekly { .. } => "weekly",
            FrequencyRule::Custom { .. } => "custom",
            FrequencyRule::Interval { .. } => "interval",
        }
    }
}

/// A validated habit definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "HabitRecord")]
pub struct Habit {
    id: HabitId,
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<String>,
    frequency: FrequencyRule,
    start_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    end_date: Option<NaiveDate>,
    is_archived: bool,
}

impl Habit {
    /// Create an open-ended, active habit with a fresh id.
    ///
    /// # Errors
    ///
    /// Returns a [`RuleError`] if the rule payload is invalid.
    pub fn new(
        name: impl Into<String>,
        frequency: FrequencyRule,
        start_date: NaiveDate,
    ) -> Result<Self, RuleError> {
        frequency.validate()?;
        Ok(Self {
            id: HabitId::generate(),
            name: name.into(),
            category: None,
            frequency,
            start_date,
            end_date: None,
            is_archived: false,
        })
    }

    /// Close the validity window.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::EndBeforeStart`] if `end_date < start_date`.
    pub fn with_end_date(mut self, end_date: NaiveDate) -> Result<Self, RuleError> {
        if end_date < self.start_date {
            return Err(RuleError::EndBeforeStart {
                start: self.start_date,
                end: end_date,
            });
        }
        self.end_date = Some(end_date);
        Ok(self)
    }

    pub fn with_id(mut self, id: HabitId) -> Self {
        self.id = id;
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_archived(mut self, is_archived: bool) -> Self {
        self.is_archived = is_archived;
        self
    }

    pub fn id(&self) -> &HabitId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn frequency(&self) -> &FrequencyRule {
        &self.frequency
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        self.end_date
    }

    pub fn is_archived(&self) -> bool {
        self.is_archived
    }

    /// Whether the habit is due on `date`.
    pub fn is_due(&self, date: NaiveDate) -> bool {
        recurrence::is_due(&self.frequency, self.start_date, self.end_date, date)
    }

    /// Last day that counts for statistics as of `as_of`: `as_of` itself,
    /// or the end date if the habit has already ended.
    pub fn last_counted_day(&self, as_of: NaiveDate) -> NaiveDate {
        match self.end_date {
            Some(end) if end < as_of => end,
            _ => as_of,
        }
    }
}

/// Loosely-typed habit record as found in storage.
///
/// This is the only way habits enter the crate from serialized data; the
/// conversion into [`Habit`] performs all rule validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HabitRecord {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    pub frequency: FrequencyRecord,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub is_archived: bool,
}

/// Raw recurrence description: a type tag plus whichever optional fields
/// that type needs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FrequencyRecord {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub days_of_week: Option<Vec<i64>>,
    #[serde(default)]
    pub dates: Option<Vec<NaiveDate>>,
    #[serde(default)]
    pub every_n_days: Option<i64>,
}

impl TryFrom<FrequencyRecord> for FrequencyRule {
    type Error = RuleError;

    fn try_from(record: FrequencyRecord) -> Result<Self, Self::Error> {
        let missing = |field| RuleError::MissingField {
            kind: record.kind.clone(),
            field,
        };
        let rule = match record.kind.as_str() {
            "daily" => FrequencyRule::Daily,
            "weekly" => {
                let raw = record.days_of_week.as_ref().ok_or_else(|| missing("days_of_week"))?;
                let mut days = BTreeSet::new();
                for day in raw {
                    let day = u8::try_from(*day)
                        .ok()
                        .filter(|d| *d <= 6)
                        .ok_or(RuleError::WeekdayOutOfRange(*day))?;
                    days.insert(day);
                }
                FrequencyRule::Weekly { days_of_week: days }
            }
            "custom" => {
                let dates = record.dates.as_ref().ok_or_else(|| missing("dates"))?;
                FrequencyRule::Custom {
                    dates: dates.iter().copied().collect(),
                }
            }
            "interval" => {
                let every = record.every_n_days.ok_or_else(|| missing("every_n_days"))?;
                let every = u32::try_from(every)
                    .ok()
                    .filter(|n| *n > 0)
                    .ok_or(RuleError::NonPositiveInterval(every))?;
                FrequencyRule::Interval { every_n_days: every }
            }
            other => return Err(RuleError::UnknownType(other.to_string())),
        };
        rule.validate()?;
        Ok(rule)
    }
}

impl TryFrom<HabitRecord> for Habit {
    type Error = RuleError;

    fn try_from(record: HabitRecord) -> Result<Self, Self::Error> {
        let frequency = FrequencyRule::try_from(record.frequency)?;
        let mut habit = Habit::new(record.name, frequency, record.start_date)?
            .with_id(HabitId::new(record.id))
            .with_archived(record.is_archived);
        if let Some(category) = record.category {
            habit = habit.with_category(category);
        }
        if let Some(end) = record.end_date {
            habit = habit.with_end_date(end)?;
        }
        Ok(habit)
    }
}

/// One day's check-in for a habit.
///
/// Only `date` matters for due-date and streak logic; `completed_at` is
/// informational and feeds time-of-day analytics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckIn {
    pub habit_id: HabitId,
    pub date: NaiveDate,
    pub is_completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<FixedOffset>>,
}

impl CheckIn {
    /// A completed check-in without a timestamp.
    pub fn completed(habit_id: HabitId, date: NaiveDate) -> Self {
        Self {
            habit_id,
            date,
            is_completed: true,
            completed_at: None,
        }
    }

    /// A recorded but not completed check-in.
    pub fn missed(habit_id: HabitId, date: NaiveDate) -> Self {
        Self {
            habit_id,
            date,
            is_completed: false,
            completed_at: None,
        }
    }

    pub fn at(mut self, completed_at: DateTime<FixedOffset>) -> Self {
        self.completed_at = Some(completed_at);
        self
    }
}
