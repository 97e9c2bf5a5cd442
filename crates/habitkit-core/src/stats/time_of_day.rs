//! Hour-of-day profile of completed check-ins.
//!
//! Uses the informational `completed_at` timestamp in the offset it was
//! recorded with, so hours are the user's local hours.

use chrono::Timelike;
use serde::{Deserialize, Serialize};

use crate::habit::CheckIn;

/// Completions recorded in one hour of the day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourlyCompletions {
    /// Hour of day (0-23)
    pub hour: u32,
    pub count: u32,
}

/// Distribution of completion times
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeOfDayProfile {
    /// Always 24 entries, hour 0 first
    pub by_hour: Vec<HourlyCompletions>,
    /// Completed check-ins that carried a timestamp
    pub total: u32,
    /// Busiest hour; earliest wins ties
    pub peak_hour: Option<u32>,
}

/// Build the hour-of-day profile for `checkins`.
pub fn profile(checkins: &[CheckIn]) -> TimeOfDayProfile {
    let mut counts = [0u32; 24];
    for completed_at in checkins
        .iter()
        .filter(|c| c.is_completed)
        .filter_map(|c| c.completed_at)
    {
        counts[completed_at.hour() as usize] += 1;
    }

    let total = counts.iter().sum();
    let peak_hour = counts
        .iter()
        .enumerate()
        .filter(|(_, count)| **count > 0)
        .max_by(|(ha, a), (hb, b)| a.cmp(b).then(hb.cmp(ha)))
        .map(|(hour, _)| hour as u32);

    TimeOfDayProfile {
        by_hour: counts
            .iter()
            .enumerate()
            .map(|(hour, count)| HourlyCompletions {
                hour: hour as u32,
                count: *count,
            })
            .collect(),
        total,
        peak_hour,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::habit::HabitId;
    use chrono::{DateTime, NaiveDate};

    fn at(rfc3339: &str) -> DateTime<chrono::FixedOffset> {
        DateTime::parse_from_rfc3339(rfc3339).unwrap()
    }

    #[test]
    fn profile_uses_local_hour() {
        let id = HabitId::new("h");
        let date = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        let checkins = vec![
            CheckIn::completed(id.clone(), date).at(at("2023-01-01T07:15:00+08:00")),
            CheckIn::completed(id.clone(), date).at(at("2023-01-02T07:45:00+08:00")),
            CheckIn::completed(id.clone(), date).at(at("2023-01-03T21:00:00+08:00")),
            CheckIn::missed(id.clone(), date).at(at("2023-01-04T09:00:00+08:00")),
            CheckIn::completed(id, date),
        ];
        let profile = profile(&checkins);
        assert_eq!(profile.by_hour.len(), 24);
        assert_eq!(profile.total, 3);
        assert_eq!(profile.by_hour[7].count, 2);
        assert_eq!(profile.by_hour[21].count, 1);
        assert_eq!(profile.by_hour[9].count, 0);
        assert_eq!(profile.peak_hour, Some(7));
    }

    #[test]
    fn ties_prefer_the_earlier_hour() {
        let id = HabitId::new("h");
        let date = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        let checkins = vec![
            CheckIn::completed(id.clone(), date).at(at("2023-01-01T18:00:00Z")),
            CheckIn::completed(id, date).at(at("2023-01-02T06:00:00Z")),
        ];
        assert_eq!(profile(&checkins).peak_hour, Some(6));
    }

    #[test]
    fn empty_profile_has_no_peak() {
        let profile = profile(&[]);
        assert_eq!(profile.total, 0);
        assert_eq!(profile.peak_hour, None);
    }
}
