//! SQLite-based habit storage.
//!
//! One row per habit. The completion marker sequence is stored verbatim
//! (order and duplicates included) as a JSON array.

use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension, Transaction, TransactionBehavior};
use uuid::Uuid;

use super::{data_dir, migrations, HabitSort, HabitStore};
use crate::error::{DatabaseError, Result};
use crate::habit::{DayKey, Habit};

/// Raw column values of a `habits` row.
type HabitRow = (String, String, String, String);

/// SQLite database for habit records.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Get a reference to the underlying SQLite connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Open the database at `<data_dir>/continuum.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self> {
        let path = data_dir()?.join("continuum.db");
        Self::open_at(&path)
    }

    /// Open (or create) the database at `path`.
    pub fn open_at(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "database opened");
        Self::with_connection(conn)
    }

    /// Open an in-memory database.
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        migrations::migrate(&conn)
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;
        Ok(Self { conn })
    }

    /// Store a habit built by the caller.
    pub fn insert(&self, habit: &Habit) -> Result<()> {
        self.conn.execute(
            "INSERT INTO habits (id, name, created_at, completed_dates)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                habit.id().to_string(),
                habit.name,
                format_timestamp(habit.created_at()),
                serde_json::to_string(&habit.completed_dates)?,
            ],
        )?;
        tracing::debug!(habit = %habit.id(), "habit inserted");
        Ok(())
    }

    /// Load, mutate and persist one habit inside an immediate transaction.
    ///
    /// Returns `None` (and writes nothing) if no habit has this id.
    pub fn update_habit<T>(
        &self,
        id: Uuid,
        mutate: impl FnOnce(&mut Habit) -> T,
    ) -> Result<Option<(Habit, T)>> {
        let tx = Transaction::new_unchecked(&self.conn, TransactionBehavior::Immediate)?;
        let Some(mut habit) = self.get(id)? else {
            return Ok(None);
        };
        let out = mutate(&mut habit);
        self.persist(&habit)?;
        tx.commit()?;
        Ok(Some((habit, out)))
    }

    fn load_rows(&self, sql: &str) -> Result<Vec<Habit>> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt
            .query_map([], read_row)?
            .collect::<Result<Vec<HabitRow>, rusqlite::Error>>()?;
        rows.into_iter().map(decode_row).collect()
    }
}

impl HabitStore for Database {
    fn create(&self, name: &str, initial_dates: &[DayKey]) -> Result<Habit> {
        let habit = Habit::new(name, initial_dates.iter().copied());
        self.insert(&habit)?;
        Ok(habit)
    }

    fn persist(&self, habit: &Habit) -> Result<()> {
        let changed = self.conn.execute(
            "UPDATE habits SET name = ?1, completed_dates = ?2 WHERE id = ?3",
            params![
                habit.name,
                serde_json::to_string(&habit.completed_dates)?,
                habit.id().to_string(),
            ],
        )?;
        if changed == 0 {
            return Err(DatabaseError::NotFound(habit.id()).into());
        }
        tracing::debug!(habit = %habit.id(), markers = habit.completed_dates.len(), "habit persisted");
        Ok(())
    }

    fn delete(&self, habit: &Habit) -> Result<bool> {
        let changed = self.conn.execute(
            "DELETE FROM habits WHERE id = ?1",
            params![habit.id().to_string()],
        )?;
        tracing::debug!(habit = %habit.id(), removed = changed > 0, "habit deleted");
        Ok(changed > 0)
    }

    fn get(&self, id: Uuid) -> Result<Option<Habit>> {
        let row = self
            .conn
            .query_row(
                "SELECT id, name, created_at, completed_dates FROM habits WHERE id = ?1",
                params![id.to_string()],
                read_row,
            )
            .optional()?;
        row.map(decode_row).transpose()
    }

    fn query(&self, sort: HabitSort) -> Result<Vec<Habit>> {
        let sql = match sort {
            HabitSort::CreatedAtDesc => {
                "SELECT id, name, created_at, completed_dates FROM habits
                 ORDER BY created_at DESC, id DESC"
            }
            HabitSort::CreatedAtAsc => {
                "SELECT id, name, created_at, completed_dates FROM habits
                 ORDER BY created_at ASC, id ASC"
            }
        };
        self.load_rows(sql)
    }
}

/// Fixed-width UTC timestamps so text ordering matches time ordering.
fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

fn read_row(row: &rusqlite::Row) -> Result<HabitRow, rusqlite::Error> {
    Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
}

fn decode_row((id, name, created_at, completed_dates): HabitRow) -> Result<Habit> {
    let corrupt = |message: String| DatabaseError::CorruptRow {
        id: id.clone(),
        message,
    };
    let uuid = Uuid::parse_str(&id).map_err(|e| corrupt(format!("id: {e}")))?;
    let created_at = DateTime::parse_from_rfc3339(&created_at)
        .map_err(|e| corrupt(format!("created_at: {e}")))?
        .with_timezone(&Utc);
    let dates: Vec<DayKey> = serde_json::from_str(&completed_dates)
        .map_err(|e| corrupt(format!("completed_dates: {e}")))?;
    Ok(Habit::with_created_at(uuid, name, created_at, dates))
}
