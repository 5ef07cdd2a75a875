//! Bulk back-fill and streak synthesis.
//!
//! These rewrite completion history directly. `set_current_streak` backs the
//! "Change Streak" card action and will fabricate completions to reach the
//! requested length.

use super::{DayKey, Habit, IntoDayKey};

/// Upper bound for a synthesized streak.
pub const MAX_STREAK_TARGET: u32 = 1000;

impl Habit {
    /// Mark the `count` days ending at `as_of` as completed.
    ///
    /// Days already marked are not duplicated and days outside the window
    /// are left alone. A non-positive `count` does nothing.
    pub fn add_recent_days(&mut self, count: i64, as_of: impl IntoDayKey) {
        if count <= 0 {
            return;
        }
        let end = as_of.into_day_key();
        let count = u32::try_from(count).unwrap_or(u32::MAX);
        self.fill_window(end, count);
        tracing::debug!(habit = %self.id, count, as_of = %end, "back-filled recent days");
    }

    /// Rewrite history so that `current_streak(as_of)` is exactly
    /// `target` clamped to `0..=MAX_STREAK_TARGET`.
    ///
    /// The window ending at `as_of` is filled, then the day just before it is
    /// cleared to cut off any longer chain. Older days are untouched.
    pub fn set_current_streak(&mut self, target: i64, as_of: impl IntoDayKey) {
        let end = as_of.into_day_key();
        let clamped = target.clamp(0, i64::from(MAX_STREAK_TARGET)) as u32;
        if i64::from(clamped) != target {
            tracing::warn!(habit = %self.id, target, clamped, "streak target clamped");
        }

        if clamped > 0 {
            self.fill_window(end, clamped);
        } else {
            self.clear_day(end);
        }

        if let Some(break_day) = end.days_before(clamped) {
            self.clear_day(break_day);
        }
        tracing::debug!(habit = %self.id, streak = clamped, as_of = %end, "streak synthesized");
    }

    /// Union the `count` days ending at `end` into the completion markers.
    fn fill_window(&mut self, end: DayKey, count: u32) {
        let mut present = self.completed_set();
        for delta in 0..count {
            let Some(day) = end.days_before(delta) else {
                break;
            };
            if present.insert(day) {
                self.completed_dates.push(day);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;

    #[test]
    fn backfill_ignores_non_positive_counts() {
        let today = day(2025, 10, 6);
        let mut habit = habit_with_offsets(today, &[3]);
        let before = habit.clone();
        habit.add_recent_days(0, today);
        habit.add_recent_days(-4, today);
        assert_eq!(habit, before);
    }

    #[test]
    fn backfill_unions_without_duplicates() {
        let today = day(2025, 10, 6);
        let mut habit = habit_with_offsets(today, &[1, 10]);
        habit.add_recent_days(3, today);
        assert_eq!(habit.completed_dates.len(), 4);
        assert_eq!(habit.current_streak(today), 3);
        assert!(habit.is_completed_on(today.days_before(10).unwrap()));
    }

    #[test]
    fn backfill_is_order_independent() {
        let today = day(2025, 10, 6);
        let mut twice = habit_with_offsets(today, &[20]);
        twice.add_recent_days(5, today);
        twice.add_recent_days(3, today);

        let mut once = habit_with_offsets(today, &[20]);
        once.add_recent_days(5, today);

        assert_eq!(twice.completed_set(), once.completed_set());
    }

    #[test]
    fn set_streak_caps_a_longer_run() {
        let today = day(2025, 10, 6);
        let mut habit = habit_with_offsets(today, &(0..30).collect::<Vec<_>>());
        habit.set_current_streak(5, today);
        assert_eq!(habit.current_streak(today), 5);
        assert!(!habit.is_completed_on(today.days_before(5).unwrap()));
        // Older history survives the break.
        assert!(habit.is_completed_on(today.days_before(6).unwrap()));
    }

    #[test]
    fn set_streak_extends_a_shorter_run() {
        let today = day(2025, 10, 6);
        let mut habit = habit_with_offsets(today, &[0, 1]);
        habit.set_current_streak(12, today);
        assert_eq!(habit.current_streak(today), 12);
    }

    #[test]
    fn set_streak_zero_clears_only_today() {
        let today = day(2025, 10, 6);
        let mut habit = habit_with_offsets(today, &[0, 1, 2]);
        habit.set_current_streak(0, today);
        assert_eq!(habit.current_streak(today), 0);
        assert!(!habit.is_completed_on(today));
        assert!(habit.is_completed_on(today.pred().unwrap()));
    }

    #[test]
    fn set_streak_clamps_out_of_range_targets() {
        let today = day(2025, 10, 6);
        let mut habit = habit_with_offsets(today, &[0, 1, 2]);
        habit.set_current_streak(-7, today);
        assert_eq!(habit.current_streak(today), 0);

        habit.set_current_streak(5000, today);
        assert_eq!(habit.current_streak(today), MAX_STREAK_TARGET);
    }

    #[test]
    fn set_streak_clears_duplicated_break_day() {
        let today = day(2025, 10, 6);
        let mut habit = habit_with_offsets(today, &[0, 1, 2, 3]);
        let break_day = today.days_before(2).unwrap();
        habit.completed_dates.push(break_day);
        habit.set_current_streak(2, today);
        assert_eq!(habit.current_streak(today), 2);
    }
}
