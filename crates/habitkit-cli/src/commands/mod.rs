//! Subcommand implementations.

pub mod buckets;
pub mod config;
pub mod due;
pub mod profile;
pub mod stats;
pub mod today;

use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use habitkit_core::{Config, Habit, HabitId, Snapshot};

pub type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// Shared state for one CLI invocation.
pub struct Context {
    pub config: Config,
    snapshot_override: Option<PathBuf>,
}

impl Context {
    pub fn new(config: Config, snapshot_override: Option<PathBuf>) -> Self {
        Self {
            config,
            snapshot_override,
        }
    }

    pub fn load_snapshot(&self) -> Result<Snapshot, Box<dyn std::error::Error>> {
        let path = match &self.snapshot_override {
            Some(path) => path.clone(),
            None => self.config.snapshot_path()?,
        };
        let snapshot = Snapshot::load(&path)?;
        for rejected in &snapshot.rejected {
            eprintln!(
                "warning: skipped {} #{} ({}): {}",
                rejected.kind,
                rejected.index,
                rejected.id.as_deref().unwrap_or("no id"),
                rejected.reason
            );
        }
        Ok(snapshot)
    }
}

/// Today's local calendar date.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn find_habit<'a>(snapshot: &'a Snapshot, id: &str) -> Result<&'a Habit, Box<dyn std::error::Error>> {
    snapshot
        .habit(&HabitId::new(id))
        .ok_or_else(|| format!("habit not found: {id}").into())
}

pub fn print_json<T: serde::Serialize>(value: &T) -> CmdResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
