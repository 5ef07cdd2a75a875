//! Habit entity and streak engine.
//!
//! A [`Habit`] is a name plus the calendar days on which it was completed.
//! Everything else (current streak, display streak, rolling history) is
//! derived from the normalized set of those days on demand, so duplicate or
//! out-of-order entries in the raw sequence never change a result.
//!
//! All operations take an explicit "as of" day. Callers that mean "today"
//! pass `Local::now()`.

mod day;
mod history;
mod streak;
mod summary;
mod synthesis;

pub use day::{normalize_day, DayKey, IntoDayKey};
pub use history::HISTORY_WINDOW_DAYS;
pub use summary::HabitSummary;
pub use synthesis::MAX_STREAK_TARGET;

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A tracked habit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Habit {
    id: Uuid,
    /// Display name. The core does not validate it.
    pub name: String,
    created_at: DateTime<Utc>,
    /// Raw completion markers. May hold duplicates; reads go through
    /// [`Habit::completed_set`].
    pub completed_dates: Vec<DayKey>,
}

/// User-initiated actions from a habit's card menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "action", content = "value")]
pub enum HabitAction {
    Reset,
    SetStreak(i64),
    Rename(String),
    Delete,
}

/// What the caller has to do after [`Habit::apply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The habit changed in place and should be persisted.
    Updated,
    /// The habit should be removed by the storage layer.
    DeleteRequested,
}

impl Habit {
    /// Create a habit with a fresh id, created now.
    pub fn new<I, D>(name: impl Into<String>, initial_dates: I) -> Self
    where
        I: IntoIterator<Item = D>,
        D: IntoDayKey,
    {
        Self::with_created_at(Uuid::new_v4(), name, Utc::now(), initial_dates)
    }

    /// Create a habit with a caller-chosen id and creation time.
    pub fn with_created_at<I, D>(
        id: Uuid,
        name: impl Into<String>,
        created_at: DateTime<Utc>,
        initial_dates: I,
    ) -> Self
    where
        I: IntoIterator<Item = D>,
        D: IntoDayKey,
    {
        Self {
            id,
            name: name.into(),
            created_at,
            completed_dates: initial_dates
                .into_iter()
                .map(IntoDayKey::into_day_key)
                .collect(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Distinct completed days.
    pub fn completed_set(&self) -> BTreeSet<DayKey> {
        self.completed_dates.iter().copied().collect()
    }

    pub fn is_completed_on(&self, day: impl IntoDayKey) -> bool {
        let day = day.into_day_key();
        self.completed_dates.contains(&day)
    }

    pub fn is_completed_today(&self, now: impl IntoDayKey) -> bool {
        self.is_completed_on(now)
    }

    /// Flip completion of `date`'s day.
    ///
    /// Clears the day if it is marked (every duplicate marker included, so
    /// membership always flips), otherwise appends it. Any date is accepted,
    /// past or future.
    pub fn toggle_completion(&mut self, date: impl IntoDayKey) {
        let day = date.into_day_key();
        if self.clear_day(day) {
            tracing::debug!(habit = %self.id, %day, "completion cleared");
        } else {
            self.completed_dates.push(day);
            tracing::debug!(habit = %self.id, %day, "completion marked");
        }
    }

    /// Drop all completion history.
    pub fn reset_progress(&mut self) {
        self.completed_dates.clear();
        tracing::debug!(habit = %self.id, "progress reset");
    }

    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Apply a card-menu action.
    ///
    /// `Delete` does not touch the habit; the caller hands it to storage.
    pub fn apply(&mut self, action: HabitAction, now: impl IntoDayKey) -> ActionOutcome {
        match action {
            HabitAction::Reset => self.reset_progress(),
            HabitAction::SetStreak(target) => self.set_current_streak(target, now),
            HabitAction::Rename(name) => self.rename(name),
            HabitAction::Delete => return ActionOutcome::DeleteRequested,
        }
        ActionOutcome::Updated
    }

    /// Remove every marker for `day`. Returns whether any was found.
    fn clear_day(&mut self, day: DayKey) -> bool {
        let before = self.completed_dates.len();
        self.completed_dates.retain(|d| *d != day);
        self.completed_dates.len() != before
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn new_normalizes_initial_dates() {
        let late = NaiveDate::from_ymd_opt(2025, 10, 6)
            .unwrap()
            .and_hms_opt(22, 30, 0)
            .unwrap();
        let habit = Habit::new("Run", [late]);
        assert_eq!(habit.completed_dates, vec![day(2025, 10, 6)]);
        assert_eq!(habit.name, "Run");
    }

    #[test]
    fn completed_set_collapses_duplicates() {
        let mut habit = Habit::new("Run", [day(2025, 1, 2), day(2025, 1, 1)]);
        habit.completed_dates.push(day(2025, 1, 2));
        habit.completed_dates.push(day(2025, 1, 1));
        let set = habit.completed_set();
        assert_eq!(set.len(), 2);
        assert!(set.contains(&day(2025, 1, 1)));
    }

    #[test]
    fn toggle_marks_then_clears() {
        let today = day(2025, 10, 6);
        let mut habit = Habit::new("Run", Vec::<DayKey>::new());
        habit.toggle_completion(today);
        assert!(habit.is_completed_today(today));
        habit.toggle_completion(today);
        assert!(!habit.is_completed_today(today));
        assert!(habit.completed_dates.is_empty());
    }

    #[test]
    fn toggle_matches_by_calendar_day() {
        let mut habit = Habit::new("Run", [day(2025, 10, 6)]);
        let evening = NaiveDate::from_ymd_opt(2025, 10, 6)
            .unwrap()
            .and_hms_opt(21, 0, 0)
            .unwrap();
        habit.toggle_completion(evening);
        assert!(habit.completed_dates.is_empty());
    }

    #[test]
    fn toggle_flips_membership_despite_duplicates() {
        let d = day(2025, 10, 6);
        let other = day(2025, 10, 5);
        let mut habit = Habit::new("Run", [d, other, d]);
        habit.toggle_completion(d);
        assert_eq!(habit.completed_dates, vec![other]);
        habit.toggle_completion(d);
        assert!(habit.is_completed_on(d));
    }

    #[test]
    fn toggle_accepts_future_dates() {
        let mut habit = Habit::new("Run", Vec::<DayKey>::new());
        habit.toggle_completion(day(2099, 12, 31));
        assert!(habit.is_completed_on(day(2099, 12, 31)));
    }

    #[test]
    fn reset_is_idempotent() {
        let today = day(2025, 10, 6);
        let mut habit = habit_with_offsets(today, &[0, 1, 2, 9]);
        habit.reset_progress();
        let once = habit.clone();
        habit.reset_progress();
        assert_eq!(habit, once);
        assert!(habit.completed_dates.is_empty());
        assert_eq!(habit.current_streak(today), 0);
    }

    #[test]
    fn apply_dispatches_actions() {
        let today = day(2025, 10, 6);
        let mut habit = habit_with_offsets(today, &[0, 1]);

        assert_eq!(
            habit.apply(HabitAction::SetStreak(4), today),
            ActionOutcome::Updated
        );
        assert_eq!(habit.current_streak(today), 4);

        habit.apply(HabitAction::Rename("Stretch".into()), today);
        assert_eq!(habit.name, "Stretch");

        habit.apply(HabitAction::Reset, today);
        assert!(habit.completed_dates.is_empty());

        let before = habit.clone();
        assert_eq!(
            habit.apply(HabitAction::Delete, today),
            ActionOutcome::DeleteRequested
        );
        assert_eq!(habit, before);
    }

    #[test]
    fn id_and_created_at_survive_serde() {
        let habit = Habit::new("Run", [day(2025, 10, 6)]);
        let json = serde_json::to_string(&habit).unwrap();
        let back: Habit = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id(), habit.id());
        assert_eq!(back.created_at(), habit.created_at());
        assert_eq!(back.completed_dates, habit.completed_dates);
    }
}
