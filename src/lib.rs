/// Public library interface for the Habit Streak MCP server
///
/// This module exports the server implementation along with the streak
/// engine, storage backends and tool functions it is built from, so that
/// other applications and tests can drive each layer directly.

use chrono::NaiveDate;
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncWrite};

pub mod analytics;
pub mod clock;
pub mod config;
pub mod domain;
pub mod mcp;
pub mod storage;
pub mod tools;

// Re-export public modules and types
pub use analytics::{habit_with_stats, overview, HabitWithStats, StatsOverview};
pub use clock::Clock;
pub use config::{ServerConfig, StorageBackend};
pub use domain::*;
pub use mcp::McpServer;
pub use storage::{HabitStorage, MemoryStorage, SqliteStorage, StorageError, ToggleOutcome};
pub use tools::ToolError;

/// Errors that can occur during server operation
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Database error: {0}")]
    Database(#[from] storage::StorageError),

    #[error("Domain validation error: {0}")]
    Domain(#[from] domain::DomainError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Main streak server that implements the MCP protocol
///
/// Owns the storage backend and the clock that decides what "today" is for
/// every request.
pub struct HabitTrackerServer {
    storage: Box<dyn HabitStorage>,
    clock: Clock,
}

impl HabitTrackerServer {
    /// Create a server over an already opened storage backend
    pub fn new(storage: Box<dyn HabitStorage>, clock: Clock) -> Self {
        Self { storage, clock }
    }

    /// Open the configured storage and build a server around it
    pub fn open(config: &ServerConfig) -> Result<Self, ServerError> {
        let storage = config.open_storage()?;
        Ok(Self::new(storage, config.clock()))
    }

    /// Run the MCP server, handling JSON-RPC requests over stdin/stdout
    ///
    /// Returns when stdin is closed or reading from it fails.
    pub async fn run(self) -> Result<(), ServerError> {
        self.serve(tokio::io::stdin(), tokio::io::stdout()).await
    }

    /// Run the MCP server over an arbitrary reader and writer
    pub async fn serve<R, W>(self, reader: R, writer: W) -> Result<(), ServerError>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let habits = self.storage.list_habits()?;
        tracing::info!(
            "Server started with {} existing habits, today is {}",
            habits.len(),
            self.today()
        );

        let mut mcp_server = McpServer::new(self);
        mcp_server.serve(reader, writer).await
    }

    /// The reference date for the current request
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Get a reference to the storage layer (useful for testing)
    pub fn storage(&self) -> &dyn HabitStorage {
        self.storage.as_ref()
    }
}
