/// Streak calculation
///
/// Streaks are counted in periods: days for daily habits, Sunday-anchored
/// weeks for weekly habits. Both modes reduce the completion history to an
/// ordered set of distinct periods and then scan it for runs of periods that
/// are exactly one period apart.
///
/// Every function here is pure. The reference date ("today") is always an
/// argument so results are reproducible across midnight and week rollovers.

use std::collections::BTreeSet;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::{period_length_days, period_start, Frequency};

/// Streak statistics derived from a habit's completion history
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakSummary {
    /// Consecutive periods completed, ending in the current period
    /// (or yesterday, for daily habits)
    pub current_streak: u32,
    /// Best run of consecutive periods ever achieved; never below `current_streak`
    pub longest_streak: u32,
    /// Most recent completion date, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_completed_at: Option<NaiveDate>,
}

/// Compute current and longest streaks for a completion history
///
/// `completion_dates` may be in any order and may contain duplicates.
/// An empty history yields all zeros and no last completion.
pub fn compute_streaks(
    completion_dates: &[NaiveDate],
    frequency: Frequency,
    reference: NaiveDate,
) -> StreakSummary {
    let days: BTreeSet<NaiveDate> = completion_dates.iter().copied().collect();

    let Some(&last_completed_at) = days.last() else {
        return StreakSummary::default();
    };

    let periods: BTreeSet<NaiveDate> = days
        .iter()
        .map(|&date| period_start(frequency, date))
        .collect();
    let step = period_length_days(frequency);

    let current_streak = match frequency {
        Frequency::Daily => current_daily_streak(&periods, reference),
        Frequency::Weekly => current_weekly_streak(&periods, reference),
    };
    let longest_streak = longest_run(periods.iter().rev().copied(), step);

    StreakSummary {
        current_streak,
        longest_streak: longest_streak.max(current_streak),
        last_completed_at: Some(last_completed_at),
    }
}

/// Daily streaks survive one missed day: the run may end today or yesterday.
fn current_daily_streak(days: &BTreeSet<NaiveDate>, reference: NaiveDate) -> u32 {
    let yesterday = reference - Duration::days(1);

    match days.last() {
        Some(&anchor) if anchor == reference || anchor == yesterday => {
            leading_run(days.range(..=anchor).rev().copied(), 1)
        }
        _ => 0,
    }
}

/// Weekly streaks only count when the reference week itself has a completion.
/// The run is then read from the newest recorded week downward.
fn current_weekly_streak(weeks: &BTreeSet<NaiveDate>, reference: NaiveDate) -> u32 {
    let this_week = period_start(Frequency::Weekly, reference);

    if !weeks.contains(&this_week) {
        return 0;
    }

    leading_run(weeks.iter().rev().copied(), period_length_days(Frequency::Weekly))
}

/// Length of the run at the head of a descending period sequence
fn leading_run(mut periods: impl Iterator<Item = NaiveDate>, step: i64) -> u32 {
    let Some(mut previous) = periods.next() else {
        return 0;
    };

    let mut run = 1;
    for period in periods {
        if (previous - period).num_days() != step {
            break;
        }
        run += 1;
        previous = period;
    }
    run
}

/// Longest run anywhere in a descending period sequence
fn longest_run(mut periods: impl Iterator<Item = NaiveDate>, step: i64) -> u32 {
    let Some(mut previous) = periods.next() else {
        return 0;
    };

    let mut run = 1;
    let mut longest = 1;
    for period in periods {
        run = if (previous - period).num_days() == step { run + 1 } else { 1 };
        longest = longest.max(run);
        previous = period;
    }
    longest
}

/// Celebration shown when a streak reaches a notable length
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    pub title: String,
    pub description: String,
}

/// Streak lengths that earn a milestone
pub const MILESTONES: [u32; 7] = [1, 3, 7, 14, 30, 60, 100];

/// Milestone reached by a streak of exactly `streak` periods, if any
pub fn milestone_for(streak: u32, habit_name: &str) -> Option<Milestone> {
    let (title, description) = match streak {
        1 => ("Great start!", format!("You've started your {} journey!", habit_name)),
        3 => ("Building momentum!", format!("3-day streak on {}. Keep it going!", habit_name)),
        7 => (
            "One week strong!",
            format!("You've completed {} for 7 days straight!", habit_name),
        ),
        14 => (
            "Two weeks of dedication!",
            format!("Incredible consistency on {}. You're unstoppable!", habit_name),
        ),
        30 => (
            "30-Day Milestone!",
            format!("A full month of {}. You're a champion!", habit_name),
        ),
        60 => (
            "60 Days of Excellence!",
            format!("Two months of {}. This is who you are now!", habit_name),
        ),
        100 => (
            "Century Club!",
            format!("100 days of {}. You've mastered this habit!", habit_name),
        ),
        _ => return None,
    };

    Some(Milestone {
        title: title.to_string(),
        description,
    })
}
