//! Location Repository
//!
//! SQLite-backed CRUD for locations.

use async_trait::async_trait;
use rusqlite::{params, OptionalExtension};

use crate::domain::{DomainError, DomainResult, Location};
use super::db::{connection, from_json_text, inserted_id, now_millis, to_json_text, SharedConnection};
use super::traits::{NamedRepository, Repository};

const SELECT_LOCATION: &str = "SELECT id, name, description, notes FROM locations";

pub struct LocationRepository {
    conn: SharedConnection,
}

impl LocationRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl Repository<Location> for LocationRepository {
    async fn create(&self, entity: &Location) -> DomainResult<Location> {
        let guard = self.conn.lock().await;
        let conn = connection(&guard)?;

        conn.execute(
            "INSERT INTO locations (name, description, notes, updated_at) VALUES (?, ?, ?, ?)",
            params![entity.name, entity.description, to_json_text(&entity.notes)?, now_millis()],
        )?;

        let mut location = entity.clone();
        location.id = inserted_id(conn)?;
        Ok(location)
    }

    async fn find_by_id(&self, id: u32) -> DomainResult<Option<Location>> {
        let guard = self.conn.lock().await;
        let conn = connection(&guard)?;

        let location = conn
            .query_row(&format!("{} WHERE id = ?", SELECT_LOCATION), params![id], row_to_location)
            .optional()?;
        Ok(location)
    }

    async fn list(&self) -> DomainResult<Vec<Location>> {
        let guard = self.conn.lock().await;
        let conn = connection(&guard)?;

        let mut stmt = conn.prepare(&format!("{} ORDER BY name", SELECT_LOCATION))?;
        let rows = stmt.query_map([], row_to_location)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    async fn update(&self, entity: &Location) -> DomainResult<Location> {
        let guard = self.conn.lock().await;
        let conn = connection(&guard)?;

        let changed = conn.execute(
            "UPDATE locations SET name = ?, description = ?, notes = ?, updated_at = ? WHERE id = ?",
            params![entity.name, entity.description, to_json_text(&entity.notes)?, now_millis(), entity.id],
        )?;
        if changed == 0 {
            return Err(DomainError::NotFound(format!("location {}", entity.id)));
        }
        Ok(entity.clone())
    }

    async fn delete(&self, id: u32) -> DomainResult<()> {
        let guard = self.conn.lock().await;
        let conn = connection(&guard)?;

        let tx = conn.unchecked_transaction()?;
        // Equipment stored here keeps existing, just without a location
        tx.execute("UPDATE equipment SET location_id = NULL WHERE location_id = ?", params![id])?;
        let deleted = tx.execute("DELETE FROM locations WHERE id = ?", params![id])?;
        if deleted == 0 {
            return Err(DomainError::NotFound(format!("location {}", id)));
        }
        tx.commit()?;
        Ok(())
    }
}

#[async_trait]
impl NamedRepository<Location> for LocationRepository {
    async fn find_by_name(&self, name: &str) -> DomainResult<Option<Location>> {
        let guard = self.conn.lock().await;
        let conn = connection(&guard)?;

        let location = conn
            .query_row(&format!("{} WHERE name = ?", SELECT_LOCATION), params![name], row_to_location)
            .optional()?;
        Ok(location)
    }
}

fn row_to_location(row: &rusqlite::Row) -> rusqlite::Result<Location> {
    Ok(Location {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
        notes: from_json_text(&row.get::<_, String>(3)?),
    })
}
