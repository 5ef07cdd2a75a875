//! # Continuum Core Library
//!
//! Business logic for Continuum, a personal habit tracker. A habit is a name
//! plus the calendar days on which it was completed; streaks and history are
//! derived from that set.
//!
//! ## Architecture
//!
//! - **Habit engine**: pure, deterministic streak and history computations
//!   plus in-place mutations (toggle, reset, back-fill, streak synthesis).
//!   Every operation takes an explicit "as of" day.
//! - **Storage**: SQLite-backed habit records and TOML configuration.
//!
//! ## Key Components
//!
//! - [`Habit`]: the entity and its streak engine
//! - [`DayKey`]: calendar-day key all completion tracking is expressed in
//! - [`HabitStore`] / [`Database`]: persistence for habit records
//! - [`Config`]: application configuration management

pub mod error;
pub mod habit;
pub mod storage;

pub use error::{ConfigError, CoreError, DatabaseError, ValidationError};
pub use habit::{
    normalize_day, ActionOutcome, DayKey, Habit, HabitAction, HabitSummary, IntoDayKey,
    HISTORY_WINDOW_DAYS, MAX_STREAK_TARGET,
};
pub use storage::{Config, Database, HabitSort, HabitStore};
