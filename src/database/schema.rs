//! Schema bootstrap

use sqlx::SqlitePool;

/// The notes table
///
/// Additive only, running it against an existing table is a no-op
const CREATE_NOTES_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS notes (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL,
        content TEXT NOT NULL,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )";

/// Make sure the notes table exists
pub async fn ensure_schema(connection_pool: &SqlitePool) -> sqlx::Result<()> {
    sqlx::query(CREATE_NOTES_TABLE)
        .execute(connection_pool)
        .await?;

    tracing::debug!("Notes table is in place");

    Ok(())
}
