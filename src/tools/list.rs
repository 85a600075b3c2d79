/// Tool for listing all habits
///
/// This module implements the habit_list MCP tool.

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::analytics::{overview, HabitWithStats, StatsOverview};
use crate::storage::HabitStorage;
use crate::tools::{load_stats, ToolError};

/// Parameters for listing habits
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct ListHabitsParams {}

/// Response from listing habits
#[derive(Debug, Serialize)]
pub struct ListHabitsResponse {
    pub habits: Vec<HabitWithStats>,
    pub overview: StatsOverview,
}

/// List habits in creation order, each with its stats, plus an overview
pub fn list_habits<S: HabitStorage + ?Sized>(
    storage: &S,
    _params: ListHabitsParams,
    today: NaiveDate,
) -> Result<ListHabitsResponse, ToolError> {
    let habits = storage
        .list_habits()?
        .into_iter()
        .map(|habit| load_stats(storage, habit, today))
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!("Listed {} habits", habits.len());

    let overview = overview(&habits);
    Ok(ListHabitsResponse { habits, overview })
}
