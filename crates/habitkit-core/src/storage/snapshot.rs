//! JSON snapshot of habits and check-ins.
//!
//! ```json
//! {
//!   "habits": [
//!     { "id": "gym", "name": "Gym", "start_date": "2023-01-01",
//!       "frequency": { "type": "weekly", "days_of_week": [1, 3, 5] } }
//!   ],
//!   "checkins": [
//!     { "habit_id": "gym", "date": "2023-01-02", "is_completed": true }
//!   ]
//! }
//! ```
//!
//! Records are validated one by one. A habit with an invalid rule or a
//! malformed check-in is skipped and listed in [`Snapshot::rejected`];
//! the rest of the file still loads.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::HabitSource;
use crate::error::{Result, StorageError};
use crate::habit::{CheckIn, Habit, HabitId, HabitRecord};
use crate::stats::group_by_habit;

/// A record that could not be loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectedRecord {
    /// `habit` or `checkin`
    pub kind: String,
    /// Position in its array
    pub index: usize,
    /// Record id, when one could be read
    pub id: Option<String>,
    pub reason: String,
}

#[derive(Debug, Default, Deserialize)]
struct RawSnapshot {
    #[serde(default)]
    habits: Vec<serde_json::Value>,
    #[serde(default)]
    checkins: Vec<serde_json::Value>,
}

#[derive(Serialize)]
struct SnapshotOut<'a> {
    habits: &'a [Habit],
    checkins: &'a [CheckIn],
}

/// In-memory snapshot of stored habits and check-ins.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub habits: Vec<Habit>,
    pub checkins: Vec<CheckIn>,
    pub rejected: Vec<RejectedRecord>,
}

impl Snapshot {
    pub fn new(habits: Vec<Habit>, checkins: Vec<CheckIn>) -> Self {
        Self {
            habits,
            checkins,
            rejected: Vec::new(),
        }
    }

    /// Read and validate a snapshot file.
    ///
    /// # Errors
    ///
    /// Fails only if the file cannot be read or is not a JSON object with
    /// `habits`/`checkins` arrays. Individual bad records are rejected.
    pub fn load(path: &Path) -> Result<Self, StorageError> {
        let content = std::fs::read_to_string(path).map_err(|source| StorageError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let raw: RawSnapshot =
            serde_json::from_str(&content).map_err(|source| StorageError::ParseFailed {
                path: path.to_path_buf(),
                source,
            })?;
        let snapshot = Self::from_raw(raw);
        info!(
            path = %path.display(),
            habits = snapshot.habits.len(),
            checkins = snapshot.checkins.len(),
            rejected = snapshot.rejected.len(),
            "loaded snapshot"
        );
        Ok(snapshot)
    }

    /// Parse a snapshot from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        let raw: RawSnapshot = serde_json::from_str(json)?;
        Ok(Self::from_raw(raw))
    }

    fn from_raw(raw: RawSnapshot) -> Self {
        let mut snapshot = Snapshot::default();

        for (index, value) in raw.habits.into_iter().enumerate() {
            let id = record_id(&value, "id");
            let parsed = serde_json::from_value::<HabitRecord>(value)
                .map_err(|e| e.to_string())
                .and_then(|record| Habit::try_from(record).map_err(|e| e.to_string()));
            match parsed {
                Ok(habit) => snapshot.habits.push(habit),
                Err(reason) => {
                    warn!(index, id = ?id, %reason, "rejected habit record");
                    snapshot.rejected.push(RejectedRecord {
                        kind: "habit".into(),
                        index,
                        id,
                        reason,
                    });
                }
            }
        }

        for (index, value) in raw.checkins.into_iter().enumerate() {
            let id = record_id(&value, "habit_id");
            match serde_json::from_value::<CheckIn>(value) {
                Ok(checkin) => snapshot.checkins.push(checkin),
                Err(e) => {
                    let reason = e.to_string();
                    warn!(index, habit_id = ?id, %reason, "rejected check-in record");
                    snapshot.rejected.push(RejectedRecord {
                        kind: "checkin".into(),
                        index,
                        id,
                        reason,
                    });
                }
            }
        }

        snapshot
    }

    /// Write habits and check-ins back out as JSON.
    pub fn save(&self, path: &Path) -> Result<(), StorageError> {
        let write_failed = |message: String| StorageError::WriteFailed {
            path: path.to_path_buf(),
            message,
        };
        let out = SnapshotOut {
            habits: &self.habits,
            checkins: &self.checkins,
        };
        let payload = serde_json::to_vec_pretty(&out).map_err(|e| write_failed(e.to_string()))?;
        std::fs::write(path, payload).map_err(|e| write_failed(e.to_string()))
    }

    pub fn habit(&self, id: &HabitId) -> Option<&Habit> {
        self.habits.iter().find(|habit| habit.id() == id)
    }

    /// Check-ins grouped by habit id, for batch computation.
    pub fn checkins_by_habit(&self) -> HashMap<HabitId, Vec<CheckIn>> {
        group_by_habit(&self.checkins)
    }
}

impl HabitSource for Snapshot {
    fn habits(&self) -> Result<Vec<Habit>> {
        Ok(self.habits.clone())
    }

    fn checkins(&self, habit_id: Option<&HabitId>) -> Result<Vec<CheckIn>> {
        Ok(self
            .checkins
            .iter()
            .filter(|checkin| habit_id.map_or(true, |id| &checkin.habit_id == id))
            .cloned()
            .collect())
    }
}

fn record_id(value: &serde_json::Value, field: &str) -> Option<String> {
    value.get(field).and_then(|v| v.as_str()).map(str::to_string)
}
