/// Habit entity and related functionality
///
/// This module defines the core Habit struct that represents a user's habit
/// they want to track, along with its validation rules.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, Frequency, HabitId};

/// Longest accepted habit name, in characters
pub const MAX_NAME_LEN: usize = 100;
/// Longest accepted habit description, in characters
pub const MAX_DESCRIPTION_LEN: usize = 500;

/// A habit represents something the user wants to do regularly
///
/// Each habit has a name, an optional description and a frequency that
/// decides whether streaks are counted in days or in weeks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    /// Unique identifier for this habit
    pub id: HabitId,
    /// Display name (e.g., "Morning Run", "Read for 30min")
    pub name: String,
    /// Optional detailed description
    pub description: Option<String>,
    /// How often this habit should be performed
    pub frequency: Frequency,
    /// Calendar date the habit was created on; never changes afterwards
    pub created_at: NaiveDate,
}

impl Habit {
    /// Create a new habit with validation
    ///
    /// `created_at` is the caller's notion of "today"; the domain never reads
    /// the clock itself.
    pub fn new(
        name: String,
        description: Option<String>,
        frequency: Frequency,
        created_at: NaiveDate,
    ) -> Result<Self, DomainError> {
        let name = Self::validate_name(&name)?;
        let description = Self::normalize_description(description)?;

        Ok(Self {
            id: HabitId::new(),
            name,
            description,
            frequency,
            created_at,
        })
    }

    /// Create a habit from existing data (used when loading from database)
    ///
    /// This constructor assumes data is already validated and is mainly used
    /// by the storage layer when loading habits from the database.
    pub fn from_existing(
        id: HabitId,
        name: String,
        description: Option<String>,
        frequency: Frequency,
        created_at: NaiveDate,
    ) -> Self {
        Self {
            id,
            name,
            description,
            frequency,
            created_at,
        }
    }

    /// Replace the editable fields of the habit
    ///
    /// Updates are full-record: name, description and frequency are all
    /// replaced. The id and creation date are left untouched. Nothing is
    /// applied unless every new value is valid.
    pub fn update(
        &mut self,
        name: String,
        description: Option<String>,
        frequency: Frequency,
    ) -> Result<(), DomainError> {
        let name = Self::validate_name(&name)?;
        let description = Self::normalize_description(description)?;

        self.name = name;
        self.description = description;
        self.frequency = frequency;
        Ok(())
    }

    // Validation helper methods

    /// Validate habit name and return it trimmed
    fn validate_name(name: &str) -> Result<String, DomainError> {
        let trimmed = name.trim();

        if trimmed.is_empty() {
            return Err(DomainError::InvalidHabitName(
                "Habit name cannot be empty".to_string()
            ));
        }

        if trimmed.chars().count() > MAX_NAME_LEN {
            return Err(DomainError::InvalidHabitName(format!(
                "Habit name cannot be longer than {} characters",
                MAX_NAME_LEN
            )));
        }

        Ok(trimmed.to_string())
    }

    /// Validate optional description; blank descriptions become None
    fn normalize_description(description: Option<String>) -> Result<Option<String>, DomainError> {
        let Some(desc) = description else {
            return Ok(None);
        };

        if desc.trim().is_empty() {
            return Ok(None);
        }

        if desc.chars().count() > MAX_DESCRIPTION_LEN {
            return Err(DomainError::Validation {
                message: format!(
                    "Description cannot be longer than {} characters",
                    MAX_DESCRIPTION_LEN
                ),
            });
        }

        Ok(Some(desc))
    }
}
