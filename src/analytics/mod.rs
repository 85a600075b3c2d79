/// Stats assembly
///
/// This module merges a stored habit with the statistics derived from its
/// completion history. The result is a read-only view that is rebuilt on
/// every request and never persisted.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{
    completion_dates, compute_streaks, compute_weekly_progress, is_period_complete, Completion,
    Habit,
};

/// A habit together with its derived statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitWithStats {
    #[serde(flatten)]
    pub habit: Habit,
    pub current_streak: u32,
    pub longest_streak: u32,
    /// Whether the current period (today, or this week) has a completion
    pub completed_today: bool,
    /// Progress through the current calendar week, 0-100
    pub weekly_progress: u8,
    pub total_completions: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_completed_at: Option<NaiveDate>,
}

/// Build the stats view for one habit as of `today`
pub fn habit_with_stats(habit: Habit, completions: &[Completion], today: NaiveDate) -> HabitWithStats {
    let dates = completion_dates(completions);
    let streak = compute_streaks(&dates, habit.frequency, today);

    HabitWithStats {
        current_streak: streak.current_streak,
        longest_streak: streak.longest_streak,
        completed_today: is_period_complete(&dates, habit.frequency, today),
        weekly_progress: compute_weekly_progress(&dates, habit.frequency, today),
        total_completions: completions.len() as u32,
        last_completed_at: streak.last_completed_at,
        habit,
    }
}

/// Dashboard-level summary across all habits
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsOverview {
    pub total_habits: u32,
    /// Habits with a current streak above zero
    pub active_streaks: u32,
    /// Best longest streak among all habits
    pub best_streak: u32,
    pub completed_today: u32,
    /// Share of habits whose current period is done, 0-100
    pub today_progress: u8,
}

/// Summarize a set of assembled habits
pub fn overview(habits: &[HabitWithStats]) -> StatsOverview {
    let total_habits = habits.len() as u32;
    let completed_today = habits.iter().filter(|h| h.completed_today).count() as u32;

    let today_progress = if total_habits == 0 {
        0
    } else {
        (completed_today as f64 / total_habits as f64 * 100.0).round() as u8
    };

    StatsOverview {
        total_habits,
        active_streaks: habits.iter().filter(|h| h.current_streak > 0).count() as u32,
        best_streak: habits.iter().map(|h| h.longest_streak).max().unwrap_or(0),
        completed_today,
        today_progress,
    }
}
