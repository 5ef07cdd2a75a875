//! Habit commands for CLI.

use clap::Subcommand;
use continuum_core::{
    ActionOutcome, Config, CoreError, Database, DatabaseError, DayKey, Habit, HabitAction,
    HabitSort, HabitStore, HabitSummary, ValidationError,
};
use uuid::Uuid;

#[derive(Subcommand)]
pub enum HabitCommand {
    /// Start tracking a habit
    Add {
        /// Habit name
        name: String,
        /// Day already completed (YYYY-MM-DD), repeatable
        #[arg(long = "completed", value_name = "DATE")]
        completed: Vec<DayKey>,
    },
    /// List habits, newest first
    List {
        #[arg(long)]
        oldest_first: bool,
        /// Print JSON summaries
        #[arg(long)]
        json: bool,
    },
    /// Show one habit's streak and history
    Show {
        /// Habit id or unique id prefix
        id: String,
        /// History window length (defaults to history.days)
        #[arg(long)]
        days: Option<u32>,
        #[arg(long)]
        json: bool,
    },
    /// Toggle completion for a day (today by default)
    Toggle {
        id: String,
        #[arg(long, value_name = "DATE")]
        date: Option<DayKey>,
    },
    /// Clear all completion history
    Reset { id: String },
    /// Rename a habit
    Rename { id: String, name: String },
    /// Rewrite history so the current streak is exactly N days
    SetStreak {
        id: String,
        #[arg(allow_negative_numbers = true)]
        streak: i64,
    },
    /// Mark the most recent N days as completed
    Backfill {
        id: String,
        #[arg(allow_negative_numbers = true)]
        count: i64,
    },
    /// Delete a habit
    Delete { id: String },
}

pub fn run(
    action: HabitCommand,
    today: DayKey,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let days = config.history.days;

    match action {
        HabitCommand::Add { name, completed } => {
            let name = validate_name(&name)?;
            let habit = db.create(&name, &completed)?;
            print_summary(&habit.summary(days, today))?;
        }
        HabitCommand::List { oldest_first, json } => {
            let sort = if oldest_first {
                HabitSort::CreatedAtAsc
            } else {
                HabitSort::CreatedAtDesc
            };
            let habits = db.query(sort)?;
            if json {
                let summaries: Vec<HabitSummary> =
                    habits.iter().map(|h| h.summary(days, today)).collect();
                println!("{}", serde_json::to_string_pretty(&summaries)?);
            } else {
                for habit in &habits {
                    let summary = habit.summary(0, today);
                    println!(
                        "{}  {:<24} {}",
                        short_id(habit.id()),
                        habit.name,
                        caption(&summary)
                    );
                }
            }
        }
        HabitCommand::Show { id, days: window, json } => {
            let habit = find(&db, &id)?;
            let summary = habit.summary(window.unwrap_or(days), today);
            if json {
                print_summary(&summary)?;
            } else {
                print!("{}", render_card(&summary, config));
            }
        }
        HabitCommand::Toggle { id, date } => {
            let day = date.unwrap_or(today);
            let habit = mutate(&db, &id, |h| h.toggle_completion(day))?;
            print_summary(&habit.summary(days, today))?;
        }
        HabitCommand::Reset { id } => {
            let habit = apply(&db, &id, HabitAction::Reset, today)?;
            print_summary(&habit.summary(days, today))?;
        }
        HabitCommand::Rename { id, name } => {
            let name = validate_name(&name)?;
            let habit = apply(&db, &id, HabitAction::Rename(name), today)?;
            print_summary(&habit.summary(days, today))?;
        }
        HabitCommand::SetStreak { id, streak } => {
            let habit = apply(&db, &id, HabitAction::SetStreak(streak), today)?;
            print_summary(&habit.summary(days, today))?;
        }
        HabitCommand::Backfill { id, count } => {
            let habit = mutate(&db, &id, |h| h.add_recent_days(count, today))?;
            print_summary(&habit.summary(days, today))?;
        }
        HabitCommand::Delete { id } => {
            let mut habit = find(&db, &id)?;
            if habit.apply(HabitAction::Delete, today) == ActionOutcome::DeleteRequested {
                db.delete(&habit)?;
            }
            println!("Habit deleted: {}", habit.id());
        }
    }
    Ok(())
}

/// Trim a user-entered name, rejecting blanks.
fn validate_name(raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    Ok(trimmed.to_string())
}

/// Resolve a full id or a unique prefix of one.
fn resolve_id(db: &Database, raw: &str) -> Result<Uuid, CoreError> {
    if let Ok(id) = Uuid::parse_str(raw) {
        return Ok(id);
    }
    let prefix = raw.trim().to_ascii_lowercase();
    if prefix.is_empty() {
        return Err(ValidationError::AmbiguousId(raw.to_string()).into());
    }
    let mut matches = db
        .query(HabitSort::default())?
        .into_iter()
        .map(|h| h.id())
        .filter(|id| id.to_string().starts_with(&prefix));
    match (matches.next(), matches.next()) {
        (Some(id), None) => Ok(id),
        _ => Err(ValidationError::AmbiguousId(raw.to_string()).into()),
    }
}

fn find(db: &Database, raw: &str) -> Result<Habit, CoreError> {
    let id = resolve_id(db, raw)?;
    db.get(id)?.ok_or_else(|| DatabaseError::NotFound(id).into())
}

fn mutate(db: &Database, raw: &str, f: impl FnOnce(&mut Habit)) -> Result<Habit, CoreError> {
    let id = resolve_id(db, raw)?;
    db.update_habit(id, f)?
        .map(|(habit, ())| habit)
        .ok_or_else(|| DatabaseError::NotFound(id).into())
}

fn apply(db: &Database, raw: &str, action: HabitAction, today: DayKey) -> Result<Habit, CoreError> {
    mutate(db, raw, |h| {
        h.apply(action, today);
    })
}

fn print_summary(summary: &HabitSummary) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(summary)?);
    Ok(())
}

fn short_id(id: Uuid) -> String {
    id.simple().to_string()[..8].to_string()
}

/// The streak badge, or the "start today" prompt when it is hidden.
fn caption(summary: &HabitSummary) -> &str {
    if summary.show_streak_badge {
        summary.streak_label.as_str()
    } else {
        "Start today"
    }
}

/// Text card: name, caption and the history grid, oldest day first.
fn render_card(summary: &HabitSummary, config: &Config) -> String {
    let columns = config.history.columns.max(1) as usize;
    let mut out = format!("{}  [{}]\n{}\n", summary.name, summary.id, caption(summary));
    for row in summary.history.chunks(columns) {
        let line: String = row
            .iter()
            .map(|done| {
                if *done {
                    config.display.completed_glyph.as_str()
                } else {
                    config.display.missing_glyph.as_str()
                }
            })
            .collect();
        out.push_str(&line);
        out.push('\n');
    }
    out
}
