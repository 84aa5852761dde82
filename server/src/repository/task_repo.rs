//! Task Repository
//!
//! Tasks with their steps (JSON column) and required equipment (join table).

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};

use crate::domain::{DomainError, DomainResult, NamedRef, Task};
use super::db::{connection, from_json_text, inserted_id, now_millis, to_json_text, SharedConnection};
use super::traits::{NamedRepository, Repository};

const SELECT_TASK: &str = "SELECT id, name, description, steps, notes FROM tasks";

pub struct TaskRepository {
    conn: SharedConnection,
}

impl TaskRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }
}

fn task_equipment(conn: &Connection, task_id: u32) -> DomainResult<Vec<NamedRef>> {
    let mut stmt = conn.prepare(
        "SELECT e.id, e.name FROM task_equipment te
         JOIN equipment e ON e.id = te.equipment_id
         WHERE te.task_id = ? ORDER BY e.name",
    )?;
    let rows = stmt.query_map(params![task_id], |row| {
        Ok(NamedRef { id: row.get(0)?, name: row.get(1)? })
    })?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

fn set_task_equipment(conn: &Connection, task_id: u32, equipment: &[NamedRef]) -> DomainResult<()> {
    conn.execute("DELETE FROM task_equipment WHERE task_id = ?", params![task_id])?;
    for eq in equipment {
        conn.execute(
            "INSERT OR IGNORE INTO task_equipment (task_id, equipment_id) VALUES (?, ?)",
            params![task_id, eq.id],
        )?;
    }
    Ok(())
}

/// Load one task with its equipment
fn load(conn: &Connection, clause: &str, param: &dyn rusqlite::ToSql) -> DomainResult<Option<Task>> {
    let task = conn
        .query_row(&format!("{} {}", SELECT_TASK, clause), params![param], row_to_task)
        .optional()?;
    match task {
        Some(mut task) => {
            task.equipment = task_equipment(conn, task.id)?;
            Ok(Some(task))
        }
        None => Ok(None),
    }
}

#[async_trait]
impl Repository<Task> for TaskRepository {
    async fn create(&self, entity: &Task) -> DomainResult<Task> {
        let guard = self.conn.lock().await;
        let conn = connection(&guard)?;

        let tx = conn.unchecked_transaction()?;
        tx.execute(
            "INSERT INTO tasks (name, description, steps, notes, updated_at) VALUES (?, ?, ?, ?, ?)",
            params![
                entity.name,
                entity.description,
                to_json_text(&entity.steps)?,
                to_json_text(&entity.notes)?,
                now_millis()
            ],
        )?;
        let id = inserted_id(&tx)?;
        set_task_equipment(&tx, id, &entity.equipment)?;
        tx.commit()?;

        load(conn, "WHERE id = ?", &id)?
            .ok_or_else(|| DomainError::Internal(format!("task {} vanished", id)))
    }

    async fn find_by_id(&self, id: u32) -> DomainResult<Option<Task>> {
        let guard = self.conn.lock().await;
        load(connection(&guard)?, "WHERE id = ?", &id)
    }

    async fn list(&self) -> DomainResult<Vec<Task>> {
        let guard = self.conn.lock().await;
        let conn = connection(&guard)?;

        let mut stmt = conn.prepare(&format!("{} ORDER BY name", SELECT_TASK))?;
        let mut tasks = stmt
            .query_map([], row_to_task)?
            .collect::<Result<Vec<_>, _>>()?;
        for task in tasks.iter_mut() {
            task.equipment = task_equipment(conn, task.id)?;
        }
        Ok(tasks)
    }

    async fn update(&self, entity: &Task) -> DomainResult<Task> {
        let guard = self.conn.lock().await;
        let conn = connection(&guard)?;

        let tx = conn.unchecked_transaction()?;
        let changed = tx.execute(
            "UPDATE tasks SET name = ?, description = ?, steps = ?, notes = ?, updated_at = ? WHERE id = ?",
            params![
                entity.name,
                entity.description,
                to_json_text(&entity.steps)?,
                to_json_text(&entity.notes)?,
                now_millis(),
                entity.id
            ],
        )?;
        if changed == 0 {
            return Err(DomainError::NotFound(format!("task {}", entity.id)));
        }
        set_task_equipment(&tx, entity.id, &entity.equipment)?;
        tx.commit()?;

        load(conn, "WHERE id = ?", &entity.id)?
            .ok_or_else(|| DomainError::NotFound(format!("task {}", entity.id)))
    }

    async fn delete(&self, id: u32) -> DomainResult<()> {
        let guard = self.conn.lock().await;
        let conn = connection(&guard)?;

        let tx = conn.unchecked_transaction()?;
        tx.execute("DELETE FROM task_equipment WHERE task_id = ?", params![id])?;
        tx.execute("DELETE FROM chore_tasks WHERE task_id = ?", params![id])?;
        let deleted = tx.execute("DELETE FROM tasks WHERE id = ?", params![id])?;
        if deleted == 0 {
            return Err(DomainError::NotFound(format!("task {}", id)));
        }
        tx.commit()?;
        Ok(())
    }
}

#[async_trait]
impl NamedRepository<Task> for TaskRepository {
    async fn find_by_name(&self, name: &str) -> DomainResult<Option<Task>> {
        let guard = self.conn.lock().await;
        load(connection(&guard)?, "WHERE name = ?", &name)
    }
}

fn row_to_task(row: &rusqlite::Row) -> rusqlite::Result<Task> {
    Ok(Task {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
        steps: from_json_text(&row.get::<_, String>(3)?),
        equipment: Vec::new(),
        notes: from_json_text(&row.get::<_, String>(4)?),
    })
}
