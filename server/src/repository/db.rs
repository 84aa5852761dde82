//! Database Connection and Setup
//!
//! Manages the SQLite connection and migrations.

use rusqlite::Connection;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::{DomainError, DomainResult};

/// Connection shared by every repository
pub type SharedConnection = Arc<Mutex<Option<Connection>>>;

/// Database state wrapper
#[derive(Clone, Default)]
pub struct DbState {
    pub conn: SharedConnection,
}

impl DbState {
    pub fn new() -> Self {
        Self::default()
    }

    /// `SELECT 1` against the live connection
    pub async fn ping(&self) -> DomainResult<()> {
        let guard = self.conn.lock().await;
        let conn = connection(&guard)?;
        conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))?;
        Ok(())
    }
}

/// Borrow the connection out of a lock guard
pub(crate) fn connection(guard: &Option<Connection>) -> DomainResult<&Connection> {
    guard
        .as_ref()
        .ok_or_else(|| DomainError::Internal("Database not initialized".to_string()))
}

/// Open (or create) the database and run migrations. `:memory:` works for tests.
pub async fn init_db(db_path: &Path) -> DomainResult<DbState> {
    let conn = Connection::open(db_path)
        .map_err(|e| DomainError::Internal(format!("Failed to open {}: {}", db_path.display(), e)))?;

    run_migrations(&conn)?;

    let state = DbState::new();
    *state.conn.lock().await = Some(conn);
    Ok(state)
}

/// Check if a column exists in a table
fn column_exists(conn: &Connection, table: &str, column: &str) -> DomainResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({})", table))?;
    let names = stmt.query_map([], |row| row.get::<_, String>(1))?;
    for name in names {
        if name? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Run database migrations
fn run_migrations(conn: &Connection) -> DomainResult<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS locations (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE,
            description TEXT NOT NULL DEFAULT '',
            notes TEXT NOT NULL DEFAULT '[]',
            updated_at INTEGER NOT NULL DEFAULT 0
        );
        CREATE TABLE IF NOT EXISTS equipment (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE,
            description TEXT NOT NULL DEFAULT '',
            count INTEGER,
            location_id INTEGER REFERENCES locations(id),
            notes TEXT NOT NULL DEFAULT '[]',
            updated_at INTEGER NOT NULL DEFAULT 0
        );
        CREATE TABLE IF NOT EXISTS tasks (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE,
            description TEXT NOT NULL DEFAULT '',
            steps TEXT NOT NULL DEFAULT '[]',
            notes TEXT NOT NULL DEFAULT '[]',
            updated_at INTEGER NOT NULL DEFAULT 0
        );
        CREATE TABLE IF NOT EXISTS task_equipment (
            task_id INTEGER NOT NULL REFERENCES tasks(id),
            equipment_id INTEGER NOT NULL REFERENCES equipment(id),
            PRIMARY KEY (task_id, equipment_id)
        );
        CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            email TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            role TEXT NOT NULL DEFAULT 'user',
            email_verified INTEGER NOT NULL DEFAULT 0,
            created_at INTEGER NOT NULL DEFAULT 0
        );
        CREATE TABLE IF NOT EXISTS chores (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            points INTEGER NOT NULL DEFAULT 0,
            is_recurring INTEGER NOT NULL DEFAULT 0,
            recurrence TEXT,
            recurrence_day_of_week TEXT,
            recurrence_day_of_month TEXT,
            penalize_incomplete INTEGER NOT NULL DEFAULT 0,
            penalty_amount INTEGER NOT NULL DEFAULT 0,
            age_restricted INTEGER NOT NULL DEFAULT 0,
            minimum_age INTEGER,
            notes TEXT NOT NULL DEFAULT '[]',
            updated_at INTEGER NOT NULL DEFAULT 0
        );
        CREATE TABLE IF NOT EXISTS chore_equipment (
            chore_id INTEGER NOT NULL REFERENCES chores(id),
            equipment_id INTEGER NOT NULL REFERENCES equipment(id),
            PRIMARY KEY (chore_id, equipment_id)
        );
        CREATE TABLE IF NOT EXISTS chore_tasks (
            chore_id INTEGER NOT NULL REFERENCES chores(id),
            task_id INTEGER NOT NULL REFERENCES tasks(id),
            PRIMARY KEY (chore_id, task_id)
        );
        CREATE INDEX IF NOT EXISTS idx_equipment_location ON equipment(location_id);",
    )?;

    // Images were added after the first release
    if !column_exists(conn, "equipment", "image_url")? {
        conn.execute("ALTER TABLE equipment ADD COLUMN image_url TEXT", [])
            .map_err(|e| DomainError::Internal(format!("Failed to add image_url: {}", e)))?;
    }

    Ok(())
}

/// Notes and steps are stored as JSON text
pub(crate) fn to_json_text<T: serde::Serialize>(value: &T) -> DomainResult<String> {
    serde_json::to_string(value).map_err(|e| DomainError::Internal(e.to_string()))
}

pub(crate) fn from_json_text<T: serde::de::DeserializeOwned + Default>(text: &str) -> T {
    serde_json::from_str(text).unwrap_or_default()
}

/// Row id of the last insert, which must fit the `u32` ids the API exposes
pub(crate) fn inserted_id(conn: &Connection) -> DomainResult<u32> {
    let rowid = conn.last_insert_rowid();
    u32::try_from(rowid).map_err(|_| DomainError::Internal(format!("row id {} out of range", rowid)))
}

pub(crate) fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inserted_id_rejects_out_of_range_rowid() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();

        conn.execute("INSERT INTO locations (name) VALUES ('Garage')", []).unwrap();
        assert_eq!(inserted_id(&conn).unwrap(), 1);

        conn.execute("INSERT INTO locations (id, name) VALUES (5000000000, 'Far')", []).unwrap();
        assert!(matches!(inserted_id(&conn), Err(DomainError::Internal(_))));
    }
}
