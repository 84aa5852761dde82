//! Equipment Repository
//!
//! SQLite-backed CRUD for equipment, joined with its location's name.

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};

use crate::domain::{DomainError, DomainResult, Equipment, NamedRef};
use super::db::{connection, from_json_text, inserted_id, now_millis, to_json_text, SharedConnection};
use super::traits::{NamedRepository, Repository};

const SELECT_EQUIPMENT: &str = "SELECT e.id, e.name, e.description, e.count, e.location_id, l.name, e.notes, e.image_url
     FROM equipment e LEFT JOIN locations l ON l.id = e.location_id";

pub struct EquipmentRepository {
    conn: SharedConnection,
}

impl EquipmentRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }
}

/// Re-read after a write so the location name is current
fn load(conn: &Connection, id: u32) -> DomainResult<Option<Equipment>> {
    let equipment = conn
        .query_row(&format!("{} WHERE e.id = ?", SELECT_EQUIPMENT), params![id], row_to_equipment)
        .optional()?;
    Ok(equipment)
}

#[async_trait]
impl Repository<Equipment> for EquipmentRepository {
    async fn create(&self, entity: &Equipment) -> DomainResult<Equipment> {
        let guard = self.conn.lock().await;
        let conn = connection(&guard)?;

        conn.execute(
            "INSERT INTO equipment (name, description, count, location_id, notes, image_url, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
            params![
                entity.name,
                entity.description,
                entity.count,
                entity.location.as_ref().map(|l| l.id),
                to_json_text(&entity.notes)?,
                entity.image_url,
                now_millis()
            ],
        )?;

        let id = inserted_id(conn)?;
        load(conn, id)?.ok_or_else(|| DomainError::Internal(format!("equipment {} vanished", id)))
    }

    async fn find_by_id(&self, id: u32) -> DomainResult<Option<Equipment>> {
        let guard = self.conn.lock().await;
        load(connection(&guard)?, id)
    }

    async fn list(&self) -> DomainResult<Vec<Equipment>> {
        let guard = self.conn.lock().await;
        let conn = connection(&guard)?;

        let mut stmt = conn.prepare(&format!("{} ORDER BY e.name", SELECT_EQUIPMENT))?;
        let rows = stmt.query_map([], row_to_equipment)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    async fn update(&self, entity: &Equipment) -> DomainResult<Equipment> {
        let guard = self.conn.lock().await;
        let conn = connection(&guard)?;

        let changed = conn.execute(
            "UPDATE equipment SET name = ?, description = ?, count = ?, location_id = ?, notes = ?,
                    image_url = ?, updated_at = ?
             WHERE id = ?",
            params![
                entity.name,
                entity.description,
                entity.count,
                entity.location.as_ref().map(|l| l.id),
                to_json_text(&entity.notes)?,
                entity.image_url,
                now_millis(),
                entity.id
            ],
        )?;
        if changed == 0 {
            return Err(DomainError::NotFound(format!("equipment {}", entity.id)));
        }
        load(conn, entity.id)?.ok_or_else(|| DomainError::NotFound(format!("equipment {}", entity.id)))
    }

    async fn delete(&self, id: u32) -> DomainResult<()> {
        let guard = self.conn.lock().await;
        let conn = connection(&guard)?;

        let tx = conn.unchecked_transaction()?;
        tx.execute("DELETE FROM task_equipment WHERE equipment_id = ?", params![id])?;
        tx.execute("DELETE FROM chore_equipment WHERE equipment_id = ?", params![id])?;
        let deleted = tx.execute("DELETE FROM equipment WHERE id = ?", params![id])?;
        if deleted == 0 {
            return Err(DomainError::NotFound(format!("equipment {}", id)));
        }
        tx.commit()?;
        Ok(())
    }
}

#[async_trait]
impl NamedRepository<Equipment> for EquipmentRepository {
    async fn find_by_name(&self, name: &str) -> DomainResult<Option<Equipment>> {
        let guard = self.conn.lock().await;
        let conn = connection(&guard)?;

        let equipment = conn
            .query_row(&format!("{} WHERE e.name = ?", SELECT_EQUIPMENT), params![name], row_to_equipment)
            .optional()?;
        Ok(equipment)
    }
}

fn row_to_equipment(row: &rusqlite::Row) -> rusqlite::Result<Equipment> {
    let location_id: Option<u32> = row.get(4)?;
    let location_name: Option<String> = row.get(5)?;
    Ok(Equipment {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
        count: row.get(3)?,
        location: location_id.zip(location_name).map(|(id, name)| NamedRef { id, name }),
        notes: from_json_text(&row.get::<_, String>(6)?),
        image_url: row.get(7)?,
    })
}
