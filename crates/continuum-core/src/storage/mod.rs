mod config;
pub mod database;
pub mod migrations;

pub use config::{Config, DisplayConfig, HistoryConfig, LoggingConfig};
pub use database::Database;

use std::path::PathBuf;

use uuid::Uuid;

use crate::error::{ConfigError, Result};
use crate::habit::{DayKey, Habit};

/// Listing order for [`HabitStore::query`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HabitSort {
    /// Newest habit first.
    #[default]
    CreatedAtDesc,
    CreatedAtAsc,
}

/// Persistence for habit records.
///
/// Callers persist after every mutation; the engine never touches storage.
pub trait HabitStore {
    /// Create and store a habit with a fresh id and creation time.
    fn create(&self, name: &str, initial_dates: &[DayKey]) -> Result<Habit>;

    /// Write the habit's current field values.
    ///
    /// # Errors
    /// Returns `DatabaseError::NotFound` if the habit was never created.
    fn persist(&self, habit: &Habit) -> Result<()>;

    /// Remove the record. Returns whether one existed.
    fn delete(&self, habit: &Habit) -> Result<bool>;

    fn get(&self, id: Uuid) -> Result<Option<Habit>>;

    fn query(&self, sort: HabitSort) -> Result<Vec<Habit>>;
}

/// Returns the data directory.
///
/// `CONTINUUM_HOME` wins when set. Otherwise `~/.config/continuum`, or
/// `~/.config/continuum-dev` with `CONTINUUM_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("CONTINUUM_HOME") {
        Some(home) if !home.is_empty() => PathBuf::from(home),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("CONTINUUM_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("continuum-dev")
            } else {
                base_dir.join("continuum")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
