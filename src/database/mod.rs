//! All things related to the storage of notes

use core::fmt;
use std::path::Path;
use std::time::Duration;

use chrono::Utc;
use sqlx::SqlitePool;
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::sqlite::SqliteConnection;
use sqlx::sqlite::SqlitePoolOptions;

pub use Config as DatabaseConfig;
pub use form_types::*;

use crate::notes::Note;
use crate::notes::format_timestamp;
use crate::utils::env_var_or_else;
use schema::ensure_schema;

mod form_types;
mod schema;

/// Location of the database when `SQLITE_DB` is not set
const DEFAULT_DATABASE_PATH: &str = "data/notes.db";

/// Storage errors
#[derive(Debug)]
pub enum Error {
    /// The database could not be prepared
    Setup(String),

    /// A connection error with the storage
    Connection(String),

    /// A row that was just written could not be read back
    MissingRow(i64),
}

impl std::error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Setup(error) => write!(f, "Setup error: {error}"),
            Error::Connection(error) => write!(f, "Connection error: {error}"),
            Error::MissingRow(id) => write!(f, "Note {id} could not be read back after writing"),
        }
    }
}

/// Result type for all storage interactions
pub type Result<T> = core::result::Result<T, Error>;

/// Database configuration
pub enum Config {
    /// Detect configuration from environment
    DetectConfig,

    /// Use existing connection
    ExistingConnection(SqlitePool),
}

/// SQLite storage
#[derive(Clone)]
pub struct Database {
    /// Pool of connections
    connection_pool: SqlitePool,
}

impl Database {
    /// Create a new SQLite storage
    ///
    /// The schema is bootstrapped before the storage is handed out
    pub async fn from_config(config: Config) -> Result<Self> {
        match config {
            Config::DetectConfig => Self::new().await,
            Config::ExistingConnection(pool) => Self::new_with_pool(pool).await,
        }
    }

    /// Create SQLite storage
    ///
    /// Use the `SQLITE_DB` environment variable, the file (and its directory)
    /// is created when missing
    async fn new() -> Result<Self> {
        let database_path = env_var_or_else("SQLITE_DB", || String::from(DEFAULT_DATABASE_PATH));

        tracing::info!("Using SQLite database at {database_path}");

        let parent = Path::new(&database_path)
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty());

        if let Some(parent) = parent {
            std::fs::create_dir_all(parent).map_err(|err| {
                Error::Setup(format!("Could not create {}: {err}", parent.display()))
            })?;
        }

        let options = SqliteConnectOptions::new()
            .filename(&database_path)
            .create_if_missing(true);

        let connection_pool = SqlitePoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect_with(options)
            .await
            .map_err(connection_error)?;

        Self::new_with_pool(connection_pool).await
    }

    /// Create SQLite storage with existing pool
    ///
    /// Schema is bootstrapped
    async fn new_with_pool(connection_pool: SqlitePool) -> Result<Self> {
        ensure_schema(&connection_pool)
            .await
            .map_err(|err| Error::Setup(format!("Schema could not be created: {err}")))?;

        Ok(Self { connection_pool })
    }
}

impl Database {
    /// Find all notes
    ///
    /// Most recently updated first, highest ID first on equal timestamps
    pub async fn find_all_notes(&self) -> Result<Vec<Note>> {
        let notes = sqlx::query_as::<_, Note>(
            r"
            SELECT id, title, content, created_at, updated_at
            FROM notes
            ORDER BY updated_at DESC, id DESC",
        )
        .fetch_all(&self.connection_pool)
        .await
        .map_err(connection_error)?;

        Ok(notes)
    }

    /// Find a single note by its ID
    pub async fn find_single_note_by_id(&self, id: i64) -> Result<Option<Note>> {
        let mut connection = self.connection_pool.acquire().await.map_err(connection_error)?;

        find_note(&mut connection, id).await
    }

    /// Create a note
    ///
    /// Both timestamps are set to the same instant, the inserted row is read
    /// back on the same connection
    pub async fn create_note(&self, values: &CreateNoteValues<'_>) -> Result<Note> {
        let mut connection = self.connection_pool.acquire().await.map_err(connection_error)?;

        let now = format_timestamp(&Utc::now());

        let id = sqlx::query(
            r"
            INSERT INTO notes (title, content, created_at, updated_at)
            VALUES (?, ?, ?, ?)",
        )
        .bind(values.title)
        .bind(values.content)
        .bind(&now)
        .bind(&now)
        .execute(&mut *connection)
        .await
        .map_err(connection_error)?
        .last_insert_rowid();

        find_note(&mut connection, id)
            .await?
            .ok_or(Error::MissingRow(id))
    }

    /// Replace the title and content of a note
    ///
    /// `updated_at` never moves backwards, even when the clock does.
    /// Returns `None` when the note disappeared in the meantime.
    pub async fn update_note(
        &self,
        note: &Note,
        values: &UpdateNoteValues<'_>,
    ) -> Result<Option<Note>> {
        let mut connection = self.connection_pool.acquire().await.map_err(connection_error)?;

        let now = format_timestamp(&Utc::now().max(note.updated_at));

        let rows_affected = sqlx::query(
            r"
            UPDATE notes
            SET title = ?, content = ?, updated_at = ?
            WHERE id = ?",
        )
        .bind(values.title)
        .bind(values.content)
        .bind(&now)
        .bind(note.id)
        .execute(&mut *connection)
        .await
        .map_err(connection_error)?
        .rows_affected();

        if rows_affected == 0 {
            return Ok(None);
        }

        find_note(&mut connection, note.id).await
    }

    /// Hard-delete a note
    ///
    /// Returns `false` when there was nothing to delete
    pub async fn delete_note(&self, id: i64) -> Result<bool> {
        let rows_affected = sqlx::query("DELETE FROM notes WHERE id = ?")
            .bind(id)
            .execute(&self.connection_pool)
            .await
            .map_err(connection_error)?
            .rows_affected();

        Ok(rows_affected > 0)
    }
}

/// Read a single note on an already acquired connection
async fn find_note(connection: &mut SqliteConnection, id: i64) -> Result<Option<Note>> {
    sqlx::query_as::<_, Note>(
        r"
        SELECT id, title, content, created_at, updated_at
        FROM notes
        WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(connection)
    .await
    .map_err(connection_error)
}

fn connection_error<E>(err: E) -> Error
where
    E: std::error::Error,
{
    Error::Connection(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn setup_database(pool: SqlitePool) -> Database {
        Database::from_config(Config::ExistingConnection(pool))
            .await
            .unwrap()
    }

    #[sqlx::test]
    async fn test_schema_bootstrap_is_idempotent(pool: SqlitePool) {
        let database = setup_database(pool.clone()).await;

        database
            .create_note(&CreateNoteValues {
                title: "Kept",
                content: "",
            })
            .await
            .unwrap();

        // a second startup against the same database keeps existing rows
        let database = setup_database(pool).await;

        let notes = database.find_all_notes().await.unwrap();
        assert_eq!(1, notes.len());
        assert_eq!("Kept", notes[0].title);
    }

    #[sqlx::test]
    async fn test_ids_are_not_reused(pool: SqlitePool) {
        let database = setup_database(pool).await;

        let values = CreateNoteValues {
            title: "First",
            content: "",
        };

        let first = database.create_note(&values).await.unwrap();
        assert!(database.delete_note(first.id).await.unwrap());

        let second = database.create_note(&values).await.unwrap();
        assert!(second.id > first.id);
    }

    #[sqlx::test]
    async fn test_update_keeps_updated_at_monotonic(pool: SqlitePool) {
        let database = setup_database(pool).await;

        let note = database
            .create_note(&CreateNoteValues {
                title: "Future",
                content: "",
            })
            .await
            .unwrap();

        // pretend the note was written by a clock running ahead
        let future = note.updated_at + chrono::Duration::days(1);
        let note = Note {
            updated_at: future,
            ..note
        };

        let updated = database
            .update_note(
                &note,
                &UpdateNoteValues {
                    title: "Future",
                    content: "still",
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(future, updated.updated_at);
        assert_eq!(note.created_at, updated.created_at);
    }

    #[sqlx::test]
    async fn test_update_vanished_note(pool: SqlitePool) {
        let database = setup_database(pool).await;

        let note = database
            .create_note(&CreateNoteValues {
                title: "Gone soon",
                content: "",
            })
            .await
            .unwrap();

        assert!(database.delete_note(note.id).await.unwrap());

        let updated = database
            .update_note(
                &note,
                &UpdateNoteValues {
                    title: "Too late",
                    content: "",
                },
            )
            .await
            .unwrap();

        assert!(updated.is_none());
        assert!(!database.delete_note(note.id).await.unwrap());
    }
}
