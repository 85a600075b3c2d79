/// Main entry point for the Habit Streak MCP server
///
/// This file sets up logging, parses command line arguments, and starts the MCP server.
/// The server listens for JSON-RPC requests over stdin/stdout following the MCP protocol.

use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use habit_streak_mcp::{HabitTrackerServer, ServerConfig, StorageBackend};

const DATA_DIR: &str = "habit_streaks";
const DATABASE_FILE: &str = "habits.db";

/// Get the default database path with robust fallback strategy
fn get_default_database_path() -> Result<PathBuf, Box<dyn std::error::Error>> {
    // Candidate directories, most preferred first
    let potential_paths = [
        dirs::home_dir().map(|p| p.join(format!(".{}", DATA_DIR))),
        dirs::data_dir().map(|p| p.join(DATA_DIR)),
        dirs::config_dir().map(|p| p.join(DATA_DIR)),
        std::env::current_dir().ok().map(|p| p.join(format!(".{}", DATA_DIR))),
    ];

    for potential_path in potential_paths.iter().flatten() {
        if std::fs::create_dir_all(potential_path).is_err() {
            continue;
        }

        // Only accept directories we can actually write to
        let test_file = potential_path.join(".test_write");
        if std::fs::write(&test_file, "test").is_ok() {
            let _ = std::fs::remove_file(&test_file);
            return Ok(potential_path.join(DATABASE_FILE));
        }
    }

    let temp_path = std::env::temp_dir().join(DATA_DIR);
    std::fs::create_dir_all(&temp_path)?;

    tracing::warn!("Using temporary directory for database: {}", temp_path.display());
    Ok(temp_path.join(DATABASE_FILE))
}

/// Command line arguments for the Habit Streak MCP server
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the SQLite database file
    /// If not provided, uses a default location in the user's home directory
    #[arg(long, conflicts_with = "in_memory")]
    database: Option<PathBuf>,

    /// Keep all data in memory; nothing is written to disk
    #[arg(long)]
    in_memory: bool,

    /// Pin "today" to a fixed date (YYYY-MM-DD) instead of the system clock
    #[arg(long, value_name = "DATE")]
    today: Option<NaiveDate>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Enable verbose output (implies debug)
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.debug {
            "info"
        } else {
            "warn"
        }
    }

    fn into_config(self) -> Result<ServerConfig, Box<dyn std::error::Error>> {
        let backend = if self.in_memory {
            StorageBackend::Memory
        } else {
            let path = match self.database {
                Some(path) => {
                    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                        std::fs::create_dir_all(parent)?;
                    }
                    path
                }
                None => get_default_database_path()?,
            };
            StorageBackend::Sqlite(path)
        };

        Ok(ServerConfig {
            backend,
            today: self.today,
        })
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // RUST_LOG wins over the command line flags
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("habit_streak_mcp={}", args.log_level())));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr) // stdout carries the protocol
        .init();

    info!("Starting Habit Streak MCP server");

    let config = args.into_config()?;
    match &config.backend {
        StorageBackend::Sqlite(path) => info!("Using database at: {}", path.display()),
        StorageBackend::Memory => info!("Using in-memory storage"),
    }
    if let Some(today) = config.today {
        info!("Clock pinned to {}", today);
    }

    let server = HabitTrackerServer::open(&config)?;
    server.run().await?;

    info!("Habit Streak MCP server shutdown complete");
    Ok(())
}
