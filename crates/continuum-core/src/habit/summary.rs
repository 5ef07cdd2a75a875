use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{DayKey, Habit, IntoDayKey};

/// Presentation snapshot of a habit as of one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitSummary {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub as_of: DayKey,
    pub completed_today: bool,
    pub current_streak: u32,
    pub display_streak: u32,
    pub show_streak_badge: bool,
    pub streak_label: String,
    /// Oldest first, last entry is `as_of`.
    pub history: Vec<bool>,
}

impl Habit {
    pub fn summary(&self, days_back: u32, now: impl IntoDayKey) -> HabitSummary {
        let today = now.into_day_key();
        HabitSummary {
            id: self.id,
            name: self.name.clone(),
            created_at: self.created_at,
            as_of: today,
            completed_today: self.is_completed_today(today),
            current_streak: self.current_streak(today),
            display_streak: self.display_streak(today),
            show_streak_badge: self.should_show_streak_badge(today),
            streak_label: self.streak_label(today),
            history: self.history_flags(days_back, today),
        }
    }
}
