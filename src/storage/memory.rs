/// In-memory implementation of the habit storage interface
///
/// Nothing is written to disk; all data is dropped with the store. Useful
/// for tests and for trying the server out without touching a database.

use std::sync::{Mutex, MutexGuard};

use chrono::NaiveDate;

use crate::domain::{Completion, Habit, HabitId};
use crate::storage::{HabitStorage, StorageError, ToggleOutcome};

#[derive(Debug, Default)]
struct MemoryState {
    // Insertion order, so listings are stable
    habits: Vec<Habit>,
    completions: Vec<Completion>,
}

impl MemoryState {
    fn habit_index(&self, habit_id: &HabitId) -> Result<usize, StorageError> {
        self.habits
            .iter()
            .position(|h| h.id == *habit_id)
            .ok_or_else(|| StorageError::HabitNotFound {
                habit_id: habit_id.to_string(),
            })
    }

    fn completion_index(&self, habit_id: &HabitId, date: NaiveDate) -> Option<usize> {
        self.completions
            .iter()
            .position(|c| c.habit_id == *habit_id && c.completed_at == date)
    }
}

/// Storage backed by plain vectors behind a mutex
#[derive(Debug, Default)]
pub struct MemoryStorage {
    state: Mutex<MemoryState>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, MemoryState>, StorageError> {
        self.state.lock().map_err(|_| StorageError::LockPoisoned)
    }
}

impl HabitStorage for MemoryStorage {
    fn list_habits(&self) -> Result<Vec<Habit>, StorageError> {
        Ok(self.lock()?.habits.clone())
    }

    fn get_habit(&self, habit_id: &HabitId) -> Result<Habit, StorageError> {
        let state = self.lock()?;
        let index = state.habit_index(habit_id)?;
        Ok(state.habits[index].clone())
    }

    fn create_habit(&self, habit: &Habit) -> Result<(), StorageError> {
        self.lock()?.habits.push(habit.clone());
        tracing::debug!("Created habit in memory: {} ({})", habit.name, habit.id);
        Ok(())
    }

    fn update_habit(&self, habit: &Habit) -> Result<(), StorageError> {
        let mut state = self.lock()?;
        let index = state.habit_index(&habit.id)?;

        let stored = &mut state.habits[index];
        stored.name = habit.name.clone();
        stored.description = habit.description.clone();
        stored.frequency = habit.frequency;

        tracing::debug!("Updated habit in memory: {} ({})", habit.name, habit.id);
        Ok(())
    }

    fn delete_habit(&self, habit_id: &HabitId) -> Result<(), StorageError> {
        let mut state = self.lock()?;
        let index = state.habit_index(habit_id)?;

        state.habits.remove(index);
        state.completions.retain(|c| c.habit_id != *habit_id);

        tracing::debug!("Deleted habit from memory: {}", habit_id);
        Ok(())
    }

    fn list_completions(&self, habit_id: &HabitId) -> Result<Vec<Completion>, StorageError> {
        let state = self.lock()?;
        let mut completions: Vec<Completion> = state
            .completions
            .iter()
            .filter(|c| c.habit_id == *habit_id)
            .cloned()
            .collect();

        completions.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));
        Ok(completions)
    }

    fn get_completion(
        &self,
        habit_id: &HabitId,
        date: NaiveDate,
    ) -> Result<Option<Completion>, StorageError> {
        let state = self.lock()?;
        Ok(state
            .completion_index(habit_id, date)
            .map(|index| state.completions[index].clone()))
    }

    fn create_completion(&self, completion: &Completion) -> Result<(), StorageError> {
        let mut state = self.lock()?;
        state.habit_index(&completion.habit_id)?;

        if state
            .completion_index(&completion.habit_id, completion.completed_at)
            .is_some()
        {
            return Err(StorageError::DuplicateCompletion {
                habit_id: completion.habit_id.to_string(),
                date: completion.completed_at,
            });
        }

        state.completions.push(completion.clone());
        Ok(())
    }

    fn delete_completion(&self, habit_id: &HabitId, date: NaiveDate) -> Result<bool, StorageError> {
        let mut state = self.lock()?;
        match state.completion_index(habit_id, date) {
            Some(index) => {
                state.completions.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn toggle_completion(
        &self,
        habit_id: &HabitId,
        date: NaiveDate,
    ) -> Result<ToggleOutcome, StorageError> {
        // The guard is held across check and write
        let mut state = self.lock()?;
        state.habit_index(habit_id)?;

        let outcome = match state.completion_index(habit_id, date) {
            Some(index) => {
                state.completions.remove(index);
                ToggleOutcome::Removed
            }
            None => {
                let completion = Completion::new(*habit_id, date);
                state.completions.push(completion.clone());
                ToggleOutcome::Added(completion)
            }
        };

        tracing::debug!("Toggled habit {} on {} in memory: {:?}", habit_id, date, outcome);
        Ok(outcome)
    }
}
