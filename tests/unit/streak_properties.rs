/// Property tests for the streak and progress calculators
use chrono::{Duration, NaiveDate};
use habit_streak_mcp::*;
use proptest::prelude::*;
use std::collections::BTreeSet;

fn reference() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 13).unwrap()
}

fn arb_frequency() -> impl Strategy<Value = Frequency> {
    prop_oneof![Just(Frequency::Daily), Just(Frequency::Weekly)]
}

/// Completion histories within roughly three months of the reference date,
/// duplicates and a few future dates included
fn arb_history() -> impl Strategy<Value = Vec<NaiveDate>> {
    prop::collection::vec(-3i64..90, 0..40)
        .prop_map(|offsets| offsets.into_iter().map(|n| reference() - Duration::days(n)).collect())
}

proptest! {
    #[test]
    fn prop_longest_at_least_current(dates in arb_history(), frequency in arb_frequency()) {
        let summary = compute_streaks(&dates, frequency, reference());
        prop_assert!(summary.longest_streak >= summary.current_streak);
    }

    #[test]
    fn prop_current_bounded_by_distinct_periods(dates in arb_history(), frequency in arb_frequency()) {
        let periods: BTreeSet<NaiveDate> = dates.iter().map(|d| period_start(frequency, *d)).collect();
        let summary = compute_streaks(&dates, frequency, reference());
        prop_assert!(summary.current_streak as usize <= periods.len());
        prop_assert!(summary.longest_streak as usize <= periods.len());
    }

    #[test]
    fn prop_order_and_duplicates_do_not_matter(dates in arb_history(), frequency in arb_frequency()) {
        let summary = compute_streaks(&dates, frequency, reference());

        let mut reversed = dates.clone();
        reversed.reverse();
        let mut doubled = dates.clone();
        doubled.extend_from_slice(&dates);

        prop_assert_eq!(compute_streaks(&reversed, frequency, reference()), summary);
        prop_assert_eq!(compute_streaks(&doubled, frequency, reference()), summary);
        prop_assert_eq!(compute_streaks(&dates, frequency, reference()), summary);
    }

    #[test]
    fn prop_progress_is_a_percentage(dates in arb_history(), frequency in arb_frequency()) {
        let progress = compute_weekly_progress(&dates, frequency, reference());
        prop_assert!(progress <= 100);
        if frequency == Frequency::Weekly {
            prop_assert!(progress == 0 || progress == 100);
        }
    }

    #[test]
    fn prop_last_completed_is_latest(dates in arb_history(), frequency in arb_frequency()) {
        let summary = compute_streaks(&dates, frequency, reference());
        prop_assert_eq!(summary.last_completed_at, dates.iter().max().copied());
    }
}
