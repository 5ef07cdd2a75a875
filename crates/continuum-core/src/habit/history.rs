//! Rolling completion history.

use super::{Habit, IntoDayKey};

/// Default history window: 66 days, laid out as 6 rows of 11.
pub const HISTORY_WINDOW_DAYS: u32 = 66;

impl Habit {
    /// Completion flags for the `days_back` days ending at `as_of`.
    ///
    /// Index 0 is the oldest day (`as_of - (days_back - 1)`), the last index
    /// is `as_of`. Always exactly `days_back` entries long.
    pub fn history_flags(&self, days_back: u32, as_of: impl IntoDayKey) -> Vec<bool> {
        let set = self.completed_set();
        let end = as_of.into_day_key();
        (0..days_back)
            .rev()
            .map(|offset| {
                end.days_before(offset)
                    .map(|day| set.contains(&day))
                    .unwrap_or(false)
            })
            .collect()
    }
}
