//! Chore Repository
//!
//! Chores with their equipment and tasks (join tables).

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};

use crate::domain::{Chore, DomainError, DomainResult, NamedRef, Recurrence};
use super::db::{connection, from_json_text, inserted_id, now_millis, to_json_text, SharedConnection};
use super::traits::Repository;

const SELECT_CHORE: &str = "SELECT id, name, description, points, is_recurring, recurrence,
    recurrence_day_of_week, recurrence_day_of_month, penalize_incomplete, penalty_amount,
    age_restricted, minimum_age, notes FROM chores";

pub struct ChoreRepository {
    conn: SharedConnection,
}

impl ChoreRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }
}

/// `(join table, joined table, joined column)`
const EQUIPMENT_LINK: (&str, &str, &str) = ("chore_equipment", "equipment", "equipment_id");
const TASK_LINK: (&str, &str, &str) = ("chore_tasks", "tasks", "task_id");

fn linked(conn: &Connection, link: (&str, &str, &str), chore_id: u32) -> DomainResult<Vec<NamedRef>> {
    let (join, table, column) = link;
    let mut stmt = conn.prepare(&format!(
        "SELECT t.id, t.name FROM {join} j JOIN {table} t ON t.id = j.{column}
         WHERE j.chore_id = ? ORDER BY t.name"
    ))?;
    let rows = stmt.query_map(params![chore_id], |row| {
        Ok(NamedRef { id: row.get(0)?, name: row.get(1)? })
    })?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

fn set_linked(conn: &Connection, link: (&str, &str, &str), chore_id: u32, refs: &[NamedRef]) -> DomainResult<()> {
    let (join, _, column) = link;
    conn.execute(&format!("DELETE FROM {join} WHERE chore_id = ?"), params![chore_id])?;
    for r in refs {
        conn.execute(
            &format!("INSERT OR IGNORE INTO {join} (chore_id, {column}) VALUES (?, ?)"),
            params![chore_id, r.id],
        )?;
    }
    Ok(())
}

fn with_links(conn: &Connection, mut chore: Chore) -> DomainResult<Chore> {
    chore.equipment = linked(conn, EQUIPMENT_LINK, chore.id)?;
    chore.tasks = linked(conn, TASK_LINK, chore.id)?;
    Ok(chore)
}

fn load(conn: &Connection, id: u32) -> DomainResult<Option<Chore>> {
    let chore = conn
        .query_row(&format!("{} WHERE id = ?", SELECT_CHORE), params![id], row_to_chore)
        .optional()?;
    chore.map(|c| with_links(conn, c)).transpose()
}

fn write_links(conn: &Connection, chore_id: u32, entity: &Chore) -> DomainResult<()> {
    set_linked(conn, EQUIPMENT_LINK, chore_id, &entity.equipment)?;
    set_linked(conn, TASK_LINK, chore_id, &entity.tasks)
}

#[async_trait]
impl Repository<Chore> for ChoreRepository {
    async fn create(&self, entity: &Chore) -> DomainResult<Chore> {
        let guard = self.conn.lock().await;
        let conn = connection(&guard)?;

        let tx = conn.unchecked_transaction()?;
        tx.execute(
            "INSERT INTO chores (name, description, points, is_recurring, recurrence,
                recurrence_day_of_week, recurrence_day_of_month, penalize_incomplete,
                penalty_amount, age_restricted, minimum_age, notes, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            params![
                entity.name,
                entity.description,
                entity.points,
                entity.is_recurring,
                entity.recurrence.map(Recurrence::code),
                entity.recurrence_day_of_week,
                entity.recurrence_day_of_month,
                entity.penalize_incomplete,
                entity.penalty_amount,
                entity.age_restricted,
                entity.minimum_age,
                to_json_text(&entity.notes)?,
                now_millis()
            ],
        )?;
        let id = inserted_id(&tx)?;
        write_links(&tx, id, entity)?;
        tx.commit()?;

        load(conn, id)?.ok_or_else(|| DomainError::Internal(format!("chore {} vanished", id)))
    }

    async fn find_by_id(&self, id: u32) -> DomainResult<Option<Chore>> {
        let guard = self.conn.lock().await;
        load(connection(&guard)?, id)
    }

    async fn list(&self) -> DomainResult<Vec<Chore>> {
        let guard = self.conn.lock().await;
        let conn = connection(&guard)?;

        let mut stmt = conn.prepare(&format!("{} ORDER BY name, id", SELECT_CHORE))?;
        let chores = stmt
            .query_map([], row_to_chore)?
            .collect::<Result<Vec<_>, _>>()?;
        chores.into_iter().map(|c| with_links(conn, c)).collect()
    }

    async fn update(&self, entity: &Chore) -> DomainResult<Chore> {
        let guard = self.conn.lock().await;
        let conn = connection(&guard)?;

        let tx = conn.unchecked_transaction()?;
        let changed = tx.execute(
            "UPDATE chores SET name = ?, description = ?, points = ?, is_recurring = ?, recurrence = ?,
                recurrence_day_of_week = ?, recurrence_day_of_month = ?, penalize_incomplete = ?,
                penalty_amount = ?, age_restricted = ?, minimum_age = ?, notes = ?, updated_at = ?
             WHERE id = ?",
            params![
                entity.name,
                entity.description,
                entity.points,
                entity.is_recurring,
                entity.recurrence.map(Recurrence::code),
                entity.recurrence_day_of_week,
                entity.recurrence_day_of_month,
                entity.penalize_incomplete,
                entity.penalty_amount,
                entity.age_restricted,
                entity.minimum_age,
                to_json_text(&entity.notes)?,
                now_millis(),
                entity.id
            ],
        )?;
        if changed == 0 {
            return Err(DomainError::NotFound(format!("chore {}", entity.id)));
        }
        write_links(&tx, entity.id, entity)?;
        tx.commit()?;

        load(conn, entity.id)?.ok_or_else(|| DomainError::NotFound(format!("chore {}", entity.id)))
    }

    async fn delete(&self, id: u32) -> DomainResult<()> {
        let guard = self.conn.lock().await;
        let conn = connection(&guard)?;

        let tx = conn.unchecked_transaction()?;
        tx.execute("DELETE FROM chore_equipment WHERE chore_id = ?", params![id])?;
        tx.execute("DELETE FROM chore_tasks WHERE chore_id = ?", params![id])?;
        let deleted = tx.execute("DELETE FROM chores WHERE id = ?", params![id])?;
        if deleted == 0 {
            return Err(DomainError::NotFound(format!("chore {}", id)));
        }
        tx.commit()?;
        Ok(())
    }
}

fn row_to_chore(row: &rusqlite::Row) -> rusqlite::Result<Chore> {
    Ok(Chore {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
        points: row.get(3)?,
        is_recurring: row.get(4)?,
        recurrence: row.get::<_, Option<String>>(5)?.as_deref().and_then(Recurrence::from_code),
        recurrence_day_of_week: row.get(6)?,
        recurrence_day_of_month: row.get(7)?,
        penalize_incomplete: row.get(8)?,
        penalty_amount: row.get(9)?,
        age_restricted: row.get(10)?,
        minimum_age: row.get(11)?,
        equipment: Vec::new(),
        tasks: Vec::new(),
        notes: from_json_text(&row.get::<_, String>(12)?),
    })
}
