/// MCP tools for habit management
///
/// This module contains all the MCP tools that external clients (like Claude)
/// can call to interact with the habit tracker. Each tool validates its
/// parameters, talks to storage, and answers with freshly assembled stats.

pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod toggle;
pub mod update;

// Re-export tool functions for easy access
pub use create::*;
pub use delete::*;
pub use get::*;
pub use list::*;
pub use toggle::*;
pub use update::*;

use chrono::NaiveDate;
use thiserror::Error;

use crate::analytics::{habit_with_stats, HabitWithStats};
use crate::domain::{DomainError, Habit, HabitId};
use crate::storage::{HabitStorage, StorageError};

/// Errors a tool call can fail with
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("Invalid parameters: {0}")]
    InvalidParams(String),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Parse a client-supplied habit id
///
/// Ids are opaque to clients, so one that isn't even well-formed is
/// reported the same way as one that doesn't exist.
pub(crate) fn parse_habit_id(raw: &str) -> Result<HabitId, ToolError> {
    raw.parse().map_err(|_| {
        ToolError::Storage(StorageError::HabitNotFound {
            habit_id: raw.to_string(),
        })
    })
}

/// Load a habit's completions and assemble its stats view
pub(crate) fn load_stats<S: HabitStorage + ?Sized>(
    storage: &S,
    habit: Habit,
    today: NaiveDate,
) -> Result<HabitWithStats, ToolError> {
    let completions = storage.list_completions(&habit.id)?;
    Ok(habit_with_stats(habit, &completions, today))
}
