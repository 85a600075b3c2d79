/// Domain module containing core business logic and data types
///
/// This module defines the core entities (Habit, Completion) and the pure
/// calculators that derive streak and progress statistics from a habit's
/// completion history. Nothing in here touches storage or the clock: every
/// calculation takes its reference date as an argument.

pub mod habit;
pub mod completion;
pub mod period;
pub mod streak;
pub mod progress;
pub mod types;

// Re-export public types for easy access
pub use habit::*;
pub use completion::*;
pub use period::*;
pub use streak::*;
pub use progress::*;
pub use types::*;

use thiserror::Error;

/// Errors that can occur during domain operations
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Invalid habit name: {0}")]
    InvalidHabitName(String),

    #[error("Invalid frequency: {0}")]
    InvalidFrequency(String),
}
