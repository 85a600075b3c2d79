/// Storage layer for persisting habit data
///
/// This module defines the storage interface the request layer talks to,
/// plus two implementations: SQLite for real use and an in-memory store for
/// tests and throwaway sessions. The calculators never see storage; they
/// only receive the completion dates it returns.

pub mod sqlite;
pub mod memory;
pub mod migrations;

// Re-export the main storage types
pub use sqlite::*;
pub use memory::*;

use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::{Completion, Habit, HabitId};

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database connection error: {0}")]
    Connection(String),

    #[error("Database query error: {0}")]
    Query(#[from] rusqlite::Error),

    #[error("Habit not found: {habit_id}")]
    HabitNotFound { habit_id: String },

    #[error("Duplicate completion: habit {habit_id} already completed on {date}")]
    DuplicateCompletion { habit_id: String, date: NaiveDate },

    #[error("Migration error: {0}")]
    Migration(String),

    #[error("Storage lock poisoned")]
    LockPoisoned,
}

/// Result of flipping a habit's completion for one day
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// No completion existed; this one was created
    Added(Completion),
    /// An existing completion was removed
    Removed,
}

/// Trait defining the storage interface for habits and completions
///
/// Implementations are constructed explicitly and handed to the server, so
/// the request layer can run against any backend.
pub trait HabitStorage {
    /// List every habit, oldest first
    fn list_habits(&self) -> Result<Vec<Habit>, StorageError>;

    /// Get a habit by ID
    fn get_habit(&self, habit_id: &HabitId) -> Result<Habit, StorageError>;

    /// Create a new habit
    fn create_habit(&self, habit: &Habit) -> Result<(), StorageError>;

    /// Replace the editable fields of an existing habit
    fn update_habit(&self, habit: &Habit) -> Result<(), StorageError>;

    /// Delete a habit together with all of its completions
    fn delete_habit(&self, habit_id: &HabitId) -> Result<(), StorageError>;

    /// All completions of a habit, newest first
    fn list_completions(&self, habit_id: &HabitId) -> Result<Vec<Completion>, StorageError>;

    /// The completion of a habit on a given day, if there is one
    fn get_completion(
        &self,
        habit_id: &HabitId,
        date: NaiveDate,
    ) -> Result<Option<Completion>, StorageError>;

    /// Record a completion; fails if the habit already has one that day
    fn create_completion(&self, completion: &Completion) -> Result<(), StorageError>;

    /// Remove the completion of a habit on a given day.
    /// Returns false when there was nothing to remove.
    fn delete_completion(&self, habit_id: &HabitId, date: NaiveDate) -> Result<bool, StorageError>;

    /// Add the day's completion if missing, otherwise remove it.
    ///
    /// This is a single read-modify-write so two toggles for the same
    /// (habit, day) can never both insert.
    fn toggle_completion(
        &self,
        habit_id: &HabitId,
        date: NaiveDate,
    ) -> Result<ToggleOutcome, StorageError>;
}
