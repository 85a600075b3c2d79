/// Runtime configuration for the server
///
/// Built by the binary from its command line; tests construct it directly.

use std::path::PathBuf;

use chrono::NaiveDate;

use crate::clock::Clock;
use crate::storage::{HabitStorage, MemoryStorage, SqliteStorage, StorageError};

/// Where habits and completions are kept
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    /// A SQLite database file, created on first use
    Sqlite(PathBuf),
    /// Process-local storage that is lost on exit
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub backend: StorageBackend,
    /// Pin "today" to this date instead of reading the system clock
    pub today: Option<NaiveDate>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Memory,
            today: None,
        }
    }
}

impl ServerConfig {
    pub fn clock(&self) -> Clock {
        Clock::from(self.today)
    }

    /// Open the configured storage backend
    pub fn open_storage(&self) -> Result<Box<dyn HabitStorage>, StorageError> {
        match &self.backend {
            StorageBackend::Sqlite(path) => {
                tracing::info!("Opening SQLite database at {}", path.display());
                Ok(Box::new(SqliteStorage::new(path)?))
            }
            StorageBackend::Memory => {
                tracing::info!("Using in-memory storage; nothing will be saved");
                Ok(Box::new(MemoryStorage::new()))
            }
        }
    }
}
