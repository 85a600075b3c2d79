/// Tool for creating new habits
///
/// This module implements the habit_create MCP tool.

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::Deserialize;

use crate::analytics::{habit_with_stats, HabitWithStats};
use crate::domain::{Frequency, Habit};
use crate::storage::HabitStorage;
use crate::tools::ToolError;

/// Parameters for creating a new habit
#[derive(Debug, Deserialize, JsonSchema)]
pub struct CreateHabitParams {
    /// Name of the habit
    pub name: String,
    /// Optional longer description
    #[serde(default)]
    pub description: Option<String>,
    /// How often the habit should be done: "daily" or "weekly"
    pub frequency: Frequency,
}

/// Create a new habit using the provided storage
///
/// The habit is stamped with `today` as its creation date and returned with
/// empty statistics.
pub fn create_habit<S: HabitStorage + ?Sized>(
    storage: &S,
    params: CreateHabitParams,
    today: NaiveDate,
) -> Result<HabitWithStats, ToolError> {
    let habit = Habit::new(params.name, params.description, params.frequency, today)?;

    storage.create_habit(&habit)?;
    tracing::info!("Created {} habit '{}' ({})", habit.frequency, habit.name, habit.id);

    Ok(habit_with_stats(habit, &[], today))
}
