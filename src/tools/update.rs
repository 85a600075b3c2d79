/// Tool for updating existing habits
///
/// This module implements the habit_update MCP tool. Updates are
/// full-record: name, description and frequency are all replaced.

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::Deserialize;

use crate::analytics::HabitWithStats;
use crate::domain::Frequency;
use crate::storage::HabitStorage;
use crate::tools::{load_stats, parse_habit_id, ToolError};

/// Parameters for updating an existing habit
#[derive(Debug, Deserialize, JsonSchema)]
pub struct UpdateHabitParams {
    /// ID of the habit to update
    pub habit_id: String,
    /// New name
    pub name: String,
    /// New description; omit or send null to clear it
    #[serde(default)]
    pub description: Option<String>,
    /// New frequency: "daily" or "weekly"
    pub frequency: Frequency,
}

/// Update an existing habit using the provided storage
pub fn update_habit<S: HabitStorage + ?Sized>(
    storage: &S,
    params: UpdateHabitParams,
    today: NaiveDate,
) -> Result<HabitWithStats, ToolError> {
    let habit_id = parse_habit_id(&params.habit_id)?;

    let mut habit = storage.get_habit(&habit_id)?;
    habit.update(params.name, params.description, params.frequency)?;
    storage.update_habit(&habit)?;

    tracing::info!("Updated habit '{}' ({})", habit.name, habit.id);

    // Stats follow the new frequency straight away
    load_stats(storage, habit, today)
}
