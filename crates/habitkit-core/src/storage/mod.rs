mod config;
pub mod snapshot;

pub use config::{Config, DataConfig, LogConfig, ReportConfig, StatsConfig};
pub use snapshot::{RejectedRecord, Snapshot};

use std::path::PathBuf;

use crate::error::{ConfigError, Result};
use crate::habit::{CheckIn, Habit, HabitId};

/// Read-only access to stored habits and check-ins.
///
/// The engine treats whatever a source returns as an immutable snapshot
/// for the duration of one computation and never writes back.
pub trait HabitSource {
    /// All habits, archived ones included.
    fn habits(&self) -> Result<Vec<Habit>>;

    /// Check-ins for one habit, or for every habit when `habit_id` is `None`.
    fn checkins(&self, habit_id: Option<&HabitId>) -> Result<Vec<CheckIn>>;
}

/// Returns `~/.config/habitkit[-dev]/` based on HABITKIT_ENV.
///
/// Set HABITKIT_ENV=dev to use development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("HABITKIT_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("habitkit-dev")
    } else {
        base_dir.join("habitkit")
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
