/// SQLite implementation of the habit storage interface
///
/// This module provides the concrete SQLite implementation for storing
/// and retrieving habits and completions. It handles all SQL queries and
/// data conversion.

use std::path::Path;
use std::str::FromStr;

use chrono::NaiveDate;
use rusqlite::types::Type;
use rusqlite::{ffi, params, Connection, OptionalExtension, Row, Transaction, TransactionBehavior};

use crate::domain::{Completion, Frequency, Habit, HabitId};
use crate::storage::{migrations, HabitStorage, StorageError, ToggleOutcome};

const HABIT_COLUMNS: &str = "id, name, description, frequency, created_at";
const COMPLETION_COLUMNS: &str = "id, habit_id, completed_at";

/// SQLite-based storage implementation
///
/// This struct holds a connection to the SQLite database and implements
/// all the storage operations defined in the HabitStorage trait.
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Create a new SQLite storage instance
    ///
    /// This opens the database file and runs any necessary migrations
    /// to ensure the schema is up to date.
    pub fn new(db_path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let db_path = db_path.as_ref();
        let conn = Connection::open(db_path)
            .map_err(|e| StorageError::Connection(format!("Failed to open database: {}", e)))?;

        let storage = Self::from_connection(conn)?;
        tracing::info!("SQLite storage initialized at: {}", db_path.display());
        Ok(storage)
    }

    /// Open a private database that lives only as long as this value
    pub fn in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| StorageError::Connection(format!("Failed to open in-memory database: {}", e)))?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self, StorageError> {
        // Completions are removed through ON DELETE CASCADE
        conn.execute_batch("PRAGMA foreign_keys = ON")
            .map_err(|e| StorageError::Connection(format!("Failed to enable foreign keys: {}", e)))?;

        migrations::initialize_database(&conn)?;

        Ok(Self { conn })
    }

    fn insert_completion(conn: &Connection, completion: &Completion) -> Result<(), StorageError> {
        conn.execute(
            "INSERT INTO completions (id, habit_id, completed_at) VALUES (?1, ?2, ?3)",
            params![
                completion.id.to_string(),
                completion.habit_id.to_string(),
                completion.completed_at
            ],
        )
        .map_err(|e| match constraint_violation(&e) {
            Some(ffi::SQLITE_CONSTRAINT_UNIQUE) => StorageError::DuplicateCompletion {
                habit_id: completion.habit_id.to_string(),
                date: completion.completed_at,
            },
            Some(ffi::SQLITE_CONSTRAINT_FOREIGNKEY) => StorageError::HabitNotFound {
                habit_id: completion.habit_id.to_string(),
            },
            _ => StorageError::Query(e),
        })?;

        Ok(())
    }
}

/// Extended result code of a constraint violation, if that's what `e` is
fn constraint_violation(e: &rusqlite::Error) -> Option<i32> {
    match e {
        rusqlite::Error::SqliteFailure(err, _) if err.code == ffi::ErrorCode::ConstraintViolation => {
            Some(err.extended_code)
        }
        _ => None,
    }
}

/// Parse a UUID-backed id column
fn id_column<T>(row: &Row, idx: usize) -> rusqlite::Result<T>
where
    T: FromStr<Err = uuid::Error>,
{
    let raw: String = row.get(idx)?;
    raw.parse()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn habit_from_row(row: &Row) -> rusqlite::Result<Habit> {
    let frequency_str: String = row.get(3)?;
    let frequency = frequency_str
        .parse::<Frequency>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(3, Type::Text, Box::new(e)))?;

    Ok(Habit::from_existing(
        id_column(row, 0)?,
        row.get(1)?, // name
        row.get(2)?, // description
        frequency,
        row.get(4)?, // created_at
    ))
}

fn completion_from_row(row: &Row) -> rusqlite::Result<Completion> {
    Ok(Completion::from_existing(
        id_column(row, 0)?,
        id_column(row, 1)?,
        row.get(2)?, // completed_at
    ))
}

impl HabitStorage for SqliteStorage {
    fn list_habits(&self) -> Result<Vec<Habit>, StorageError> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM habits ORDER BY created_at, rowid",
            HABIT_COLUMNS
        ))?;

        let habits = stmt
            .query_map([], habit_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(habits)
    }

    fn get_habit(&self, habit_id: &HabitId) -> Result<Habit, StorageError> {
        self.conn
            .query_row(
                &format!("SELECT {} FROM habits WHERE id = ?1", HABIT_COLUMNS),
                params![habit_id.to_string()],
                habit_from_row,
            )
            .optional()?
            .ok_or_else(|| StorageError::HabitNotFound {
                habit_id: habit_id.to_string(),
            })
    }

    fn create_habit(&self, habit: &Habit) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT INTO habits (id, name, description, frequency, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                habit.id.to_string(),
                habit.name,
                habit.description,
                habit.frequency.as_str(),
                habit.created_at
            ],
        )?;

        tracing::debug!("Created habit: {} ({})", habit.name, habit.id);
        Ok(())
    }

    fn update_habit(&self, habit: &Habit) -> Result<(), StorageError> {
        let rows_affected = self.conn.execute(
            "UPDATE habits SET
                name = ?2,
                description = ?3,
                frequency = ?4
             WHERE id = ?1",
            params![
                habit.id.to_string(),
                habit.name,
                habit.description,
                habit.frequency.as_str()
            ],
        )?;

        if rows_affected == 0 {
            return Err(StorageError::HabitNotFound {
                habit_id: habit.id.to_string(),
            });
        }

        tracing::debug!("Updated habit: {} ({})", habit.name, habit.id);
        Ok(())
    }

    fn delete_habit(&self, habit_id: &HabitId) -> Result<(), StorageError> {
        let rows_affected = self.conn.execute(
            "DELETE FROM habits WHERE id = ?1",
            params![habit_id.to_string()],
        )?;

        if rows_affected == 0 {
            return Err(StorageError::HabitNotFound {
                habit_id: habit_id.to_string(),
            });
        }

        tracing::debug!("Deleted habit: {}", habit_id);
        Ok(())
    }

    fn list_completions(&self, habit_id: &HabitId) -> Result<Vec<Completion>, StorageError> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM completions WHERE habit_id = ?1 ORDER BY completed_at DESC",
            COMPLETION_COLUMNS
        ))?;

        let completions = stmt
            .query_map(params![habit_id.to_string()], completion_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(completions)
    }

    fn get_completion(
        &self,
        habit_id: &HabitId,
        date: NaiveDate,
    ) -> Result<Option<Completion>, StorageError> {
        let completion = self
            .conn
            .query_row(
                &format!(
                    "SELECT {} FROM completions WHERE habit_id = ?1 AND completed_at = ?2",
                    COMPLETION_COLUMNS
                ),
                params![habit_id.to_string(), date],
                completion_from_row,
            )
            .optional()?;

        Ok(completion)
    }

    fn create_completion(&self, completion: &Completion) -> Result<(), StorageError> {
        Self::insert_completion(&self.conn, completion)?;

        tracing::debug!(
            "Created completion {} for habit {} on {}",
            completion.id,
            completion.habit_id,
            completion.completed_at
        );
        Ok(())
    }

    fn delete_completion(&self, habit_id: &HabitId, date: NaiveDate) -> Result<bool, StorageError> {
        let rows_affected = self.conn.execute(
            "DELETE FROM completions WHERE habit_id = ?1 AND completed_at = ?2",
            params![habit_id.to_string(), date],
        )?;

        tracing::debug!("Deleted {} completion(s) for habit {} on {}", rows_affected, habit_id, date);
        Ok(rows_affected > 0)
    }

    fn toggle_completion(
        &self,
        habit_id: &HabitId,
        date: NaiveDate,
    ) -> Result<ToggleOutcome, StorageError> {
        // IMMEDIATE takes the write lock up front, so the existence check and
        // the write below cannot interleave with another connection's toggle.
        let tx = Transaction::new_unchecked(&self.conn, TransactionBehavior::Immediate)?;

        let habit_exists = tx
            .query_row(
                "SELECT 1 FROM habits WHERE id = ?1",
                params![habit_id.to_string()],
                |_| Ok(()),
            )
            .optional()?
            .is_some();

        if !habit_exists {
            return Err(StorageError::HabitNotFound {
                habit_id: habit_id.to_string(),
            });
        }

        let removed = tx.execute(
            "DELETE FROM completions WHERE habit_id = ?1 AND completed_at = ?2",
            params![habit_id.to_string(), date],
        )?;

        let outcome = if removed > 0 {
            ToggleOutcome::Removed
        } else {
            let completion = Completion::new(*habit_id, date);
            Self::insert_completion(&tx, &completion)?;
            ToggleOutcome::Added(completion)
        };

        tx.commit()?;

        tracing::debug!("Toggled habit {} on {}: {:?}", habit_id, date, outcome);
        Ok(outcome)
    }
}
