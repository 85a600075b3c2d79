/// Tool for fetching a single habit with its statistics
///
/// This module implements the habit_get MCP tool.

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::Deserialize;

use crate::analytics::HabitWithStats;
use crate::storage::HabitStorage;
use crate::tools::{load_stats, parse_habit_id, ToolError};

/// Parameters for fetching a habit
#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetHabitParams {
    /// ID of the habit to fetch
    pub habit_id: String,
}

pub fn get_habit<S: HabitStorage + ?Sized>(
    storage: &S,
    params: GetHabitParams,
    today: NaiveDate,
) -> Result<HabitWithStats, ToolError> {
    let habit_id = parse_habit_id(&params.habit_id)?;
    let habit = storage.get_habit(&habit_id)?;
    load_stats(storage, habit, today)
}
