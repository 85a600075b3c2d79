/// Tool for toggling a habit's completion for the current period
///
/// This module implements the habit_toggle MCP tool. A toggle always acts on
/// today's date: it adds a completion when there is none and removes it
/// otherwise. For weekly habits a completion on another day of the week is
/// left alone, so the week can stay done after today's entry is removed.

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::analytics::HabitWithStats;
use crate::domain::{completion_dates, is_period_complete, milestone_for, Frequency, Milestone};
use crate::storage::{HabitStorage, ToggleOutcome};
use crate::tools::{load_stats, parse_habit_id, ToolError};

/// Parameters for toggling a habit
#[derive(Debug, Deserialize, JsonSchema)]
pub struct ToggleHabitParams {
    /// ID of the habit to toggle. Only today's date is flipped; for weekly
    /// habits, completions on other days of the week are kept.
    pub habit_id: String,
}

/// Response from toggling a habit
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleHabitResponse {
    #[serde(flatten)]
    pub habit: HabitWithStats,
    /// Whether today is now marked as done
    pub completed: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub milestone: Option<Milestone>,
}

/// Flip today's completion for a habit and report the new stats
pub fn toggle_habit<S: HabitStorage + ?Sized>(
    storage: &S,
    params: ToggleHabitParams,
    today: NaiveDate,
) -> Result<ToggleHabitResponse, ToolError> {
    let habit_id = parse_habit_id(&params.habit_id)?;
    let habit = storage.get_habit(&habit_id)?;

    // A weekly habit may already be done this week on another day
    let week_done_before = habit.frequency == Frequency::Weekly
        && is_period_complete(
            &completion_dates(&storage.list_completions(&habit_id)?),
            habit.frequency,
            today,
        );

    let outcome = storage.toggle_completion(&habit_id, today)?;
    let completed = matches!(outcome, ToggleOutcome::Added(_));
    tracing::info!(
        "Toggled habit '{}' on {}: {}",
        habit.name,
        today,
        if completed { "completed" } else { "cleared" }
    );

    let view = load_stats(storage, habit, today)?;

    let streak = view.current_streak;
    let noun = view.habit.frequency.period_noun(streak);
    let (message, milestone) = match (completed, view.completed_today) {
        (true, _) if week_done_before => (
            format!(
                "{} completed again this week. Current streak: {} {}.",
                view.habit.name, streak, noun
            ),
            None,
        ),
        (true, _) => (
            format!("{} completed! Current streak: {} {}.", view.habit.name, streak, noun),
            milestone_for(streak, &view.habit.name),
        ),
        (false, true) => (
            format!(
                "{} marked as incomplete for today. This week still counts as done.",
                view.habit.name
            ),
            None,
        ),
        (false, false) => (format!("{} marked as incomplete.", view.habit.name), None),
    };

    if let Some(milestone) = &milestone {
        tracing::debug!("Milestone reached for {}: {}", view.habit.id, milestone.title);
    }

    Ok(ToggleHabitResponse {
        habit: view,
        completed,
        message,
        milestone,
    })
}
