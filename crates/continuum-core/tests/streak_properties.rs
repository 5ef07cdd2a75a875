//! Property tests for the streak engine.

use continuum_core::{DayKey, Habit, MAX_STREAK_TARGET};
use proptest::prelude::*;

fn as_of() -> impl Strategy<Value = DayKey> {
    (1990i32..2100, 1u32..=12, 1u32..=28)
        .prop_map(|(y, m, d)| DayKey::from_ymd(y, m, d).unwrap())
}

/// A habit completed on arbitrary offsets before `as_of`, duplicates allowed.
fn habit_around(as_of: DayKey, offsets: &[u32]) -> Habit {
    Habit::new(
        "Meditate",
        offsets.iter().map(|o| as_of.days_before(*o).unwrap()),
    )
}

proptest! {
    #[test]
    fn set_current_streak_hits_clamped_target(
        today in as_of(),
        offsets in prop::collection::vec(0u32..1200, 0..80),
        target in -50i64..1100,
    ) {
        let mut habit = habit_around(today, &offsets);
        habit.set_current_streak(target, today);
        let expected = target.clamp(0, i64::from(MAX_STREAK_TARGET)) as u32;
        prop_assert_eq!(habit.current_streak(today), expected);
    }

    #[test]
    fn toggle_twice_restores_membership(
        today in as_of(),
        offsets in prop::collection::vec(0u32..30, 0..40),
        probe in 0u32..30,
    ) {
        let mut habit = habit_around(today, &offsets);
        let day = today.days_before(probe).unwrap();
        let before = habit.is_completed_on(day);

        habit.toggle_completion(day);
        prop_assert_ne!(habit.is_completed_on(day), before);
        habit.toggle_completion(day);
        prop_assert_eq!(habit.is_completed_on(day), before);
    }

    #[test]
    fn history_has_requested_length(
        today in as_of(),
        offsets in prop::collection::vec(0u32..200, 0..200),
        days_back in 0u32..400,
    ) {
        let habit = habit_around(today, &offsets);
        prop_assert_eq!(habit.history_flags(days_back, today).len(), days_back as usize);
    }

    #[test]
    fn history_matches_membership(
        today in as_of(),
        offsets in prop::collection::vec(0u32..90, 0..60),
    ) {
        let habit = habit_around(today, &offsets);
        let flags = habit.history_flags(66, today);
        for (idx, flag) in flags.iter().enumerate() {
            let day = today.days_before(65 - idx as u32).unwrap();
            prop_assert_eq!(*flag, habit.is_completed_on(day));
        }
    }

    #[test]
    fn backfill_union_is_order_independent(
        today in as_of(),
        offsets in prop::collection::vec(0u32..40, 0..20),
        a in -3i64..20,
        b in -3i64..20,
    ) {
        let mut ab = habit_around(today, &offsets);
        ab.add_recent_days(a, today);
        ab.add_recent_days(b, today);

        let mut single = habit_around(today, &offsets);
        single.add_recent_days(a.max(b), today);

        prop_assert_eq!(ab.completed_set(), single.completed_set());
    }

    #[test]
    fn reset_always_zeroes_streak(
        today in as_of(),
        offsets in prop::collection::vec(0u32..40, 0..40),
        probe in 0u32..40,
    ) {
        let mut habit = habit_around(today, &offsets);
        habit.reset_progress();
        prop_assert!(habit.completed_dates.is_empty());
        prop_assert_eq!(habit.current_streak(today.days_before(probe).unwrap()), 0);
    }

    #[test]
    fn display_streak_is_today_or_yesterday(
        today in as_of(),
        offsets in prop::collection::vec(0u32..20, 0..20),
    ) {
        let habit = habit_around(today, &offsets);
        let yesterday = today.pred().unwrap();
        let expected = if habit.is_completed_on(today) {
            habit.current_streak(today)
        } else {
            habit.current_streak(yesterday)
        };
        prop_assert_eq!(habit.display_streak(today), expected);
    }
}
