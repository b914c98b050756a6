//! Database Connection and Setup
//!
//! Manages the SQLite connection and migrations. Collections are stored
//! as one row per document with the item list in a JSON column, the
//! closest relational shape to the managed document store this replaces.

use std::path::Path;
use std::sync::Arc;

use rusqlite::Connection;
use tokio::sync::Mutex;

use crate::domain::{DomainError, DomainResult};

/// Database state wrapper shared by the stores
#[derive(Clone)]
pub struct DbState {
    conn: Arc<Mutex<Option<Connection>>>,
}

impl DbState {
    pub fn connection(&self) -> Arc<Mutex<Option<Connection>>> {
        self.conn.clone()
    }
}

/// Open (or create) the database at `db_path` and run migrations.
/// Pass `:memory:` for an ephemeral database.
pub fn init_db(db_path: &Path) -> DomainResult<DbState> {
    let conn = Connection::open(db_path).map_err(|e| DomainError::Internal(e.to_string()))?;
    run_migrations(&conn)?;
    Ok(DbState {
        conn: Arc::new(Mutex::new(Some(conn))),
    })
}

/// Check if a column exists in a table
fn column_exists(conn: &Connection, table: &str, column: &str) -> bool {
    let query = format!("PRAGMA table_info({})", table);
    let Ok(mut stmt) = conn.prepare(&query) else {
        return false;
    };
    let Ok(mut rows) = stmt.query([]) else {
        return false;
    };
    while let Ok(Some(row)) = rows.next() {
        if let Ok(name) = row.get::<_, String>(1) {
            if name == column {
                return true;
            }
        }
    }
    false
}

/// Run database migrations
fn run_migrations(conn: &Connection) -> DomainResult<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS collections (
            id TEXT PRIMARY KEY,
            title TEXT NOT NULL,
            template TEXT NOT NULL DEFAULT 'classic',
            item_count INTEGER NOT NULL DEFAULT 0,
            cover_image TEXT NOT NULL DEFAULT '',
            items TEXT NOT NULL DEFAULT '[]',
            last_edited INTEGER NOT NULL DEFAULT 0,
            created_at INTEGER NOT NULL DEFAULT 0
        )",
        [],
    )
    .map_err(|e| DomainError::Internal(e.to_string()))?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS users (
            id TEXT PRIMARY KEY,
            avatar TEXT NOT NULL DEFAULT ''
        )",
        [],
    )
    .map_err(|e| DomainError::Internal(e.to_string()))?;

    // Added after the first schema shipped without a draft marker
    if !column_exists(conn, "collections", "is_draft") {
        conn.execute(
            "ALTER TABLE collections ADD COLUMN is_draft INTEGER NOT NULL DEFAULT 0",
            [],
        )
        .map_err(|e| DomainError::Internal(format!("Failed to add is_draft: {}", e)))?;
    }

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_collections_last_edited
         ON collections(last_edited DESC)",
        [],
    )
    .map_err(|e| DomainError::Internal(e.to_string()))?;

    Ok(())
}
