//! Current and display streaks.

use super::{DayKey, Habit, IntoDayKey};

const START_TODAY_LABEL: &str = "Start today";

impl Habit {
    /// Consecutive completed days ending at `as_of`, walking backward.
    ///
    /// Zero when `as_of` itself is not completed. The walk also stops if the
    /// calendar cannot step back any further.
    pub fn current_streak(&self, as_of: impl IntoDayKey) -> u32 {
        let set = self.completed_set();
        let mut count = 0;
        let mut cursor = Some(as_of.into_day_key());
        while let Some(day) = cursor {
            if !set.contains(&day) {
                break;
            }
            count += 1;
            cursor = day.pred();
        }
        count
    }

    /// Streak shown to the user.
    ///
    /// Until today is completed the streak is counted as of yesterday, so a
    /// running chain does not read as 0 right after midnight.
    pub fn display_streak(&self, now: impl IntoDayKey) -> u32 {
        let today = now.into_day_key();
        if self.is_completed_on(today) {
            return self.current_streak(today);
        }
        today
            .pred()
            .map(|yesterday| self.current_streak(yesterday))
            .unwrap_or(0)
    }

    /// False only in the "start today" state: nothing to display and today
    /// not yet completed.
    pub fn should_show_streak_badge(&self, now: impl IntoDayKey) -> bool {
        let today: DayKey = now.into_day_key();
        self.display_streak(today) != 0 || self.is_completed_on(today)
    }

    /// Card caption: `"N DAY STREAK"`, or `"Start today"` for a habit that
    /// has never been completed.
    pub fn streak_label(&self, now: impl IntoDayKey) -> String {
        if self.completed_dates.is_empty() {
            START_TODAY_LABEL.to_string()
        } else {
            format!("{} DAY STREAK", self.display_streak(now))
        }
    }
}
