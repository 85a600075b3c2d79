/// Completion entity for tracking habit check-ins
///
/// A completion records that a habit was done on a given calendar day.
/// There is no time component, and at most one completion exists per
/// (habit, day) pair.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{CompletionId, HabitId};

/// A record of completing a habit on a specific day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Completion {
    /// Unique identifier for this completion
    pub id: CompletionId,
    /// Which habit this completion belongs to
    pub habit_id: HabitId,
    /// Which day the habit was completed on
    pub completed_at: NaiveDate,
}

impl Completion {
    /// Create a new completion for the given habit and day
    pub fn new(habit_id: HabitId, completed_at: NaiveDate) -> Self {
        Self {
            id: CompletionId::new(),
            habit_id,
            completed_at,
        }
    }

    /// Create a completion from existing data (used when loading from database)
    pub fn from_existing(id: CompletionId, habit_id: HabitId, completed_at: NaiveDate) -> Self {
        Self {
            id,
            habit_id,
            completed_at,
        }
    }
}

/// Extract the completion dates the calculators work on
pub fn completion_dates(completions: &[Completion]) -> Vec<NaiveDate> {
    completions.iter().map(|c| c.completed_at).collect()
}
