/// Tool for deleting habits
///
/// This module implements the habit_delete MCP tool. Deleting a habit also
/// removes its whole completion history.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::storage::HabitStorage;
use crate::tools::{parse_habit_id, ToolError};

/// Parameters for deleting a habit
#[derive(Debug, Deserialize, JsonSchema)]
pub struct DeleteHabitParams {
    /// ID of the habit to delete
    pub habit_id: String,
}

/// Response from deleting a habit
#[derive(Debug, Serialize)]
pub struct DeleteHabitResponse {
    pub success: bool,
}

/// Delete a habit and its completions
pub fn delete_habit<S: HabitStorage + ?Sized>(
    storage: &S,
    params: DeleteHabitParams,
) -> Result<DeleteHabitResponse, ToolError> {
    let habit_id = parse_habit_id(&params.habit_id)?;

    storage.delete_habit(&habit_id)?;
    tracing::info!("Deleted habit {}", habit_id);

    Ok(DeleteHabitResponse { success: true })
}
