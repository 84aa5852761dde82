//! User Repository
//!
//! Just enough user storage for seeding the first administrator.

use rusqlite::{params, OptionalExtension};

use crate::domain::{DomainResult, Role, User};
use super::db::{connection, inserted_id, now_millis, SharedConnection};

pub struct UserRepository {
    conn: SharedConnection,
}

impl UserRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }

    pub async fn count(&self) -> DomainResult<u64> {
        let guard = self.conn.lock().await;
        let conn = connection(&guard)?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    pub async fn create(&self, user: &User) -> DomainResult<User> {
        let guard = self.conn.lock().await;
        let conn = connection(&guard)?;

        conn.execute(
            "INSERT INTO users (name, email, password_hash, role, email_verified, created_at)
             VALUES (?, ?, ?, ?, ?, ?)",
            params![
                user.name,
                user.email,
                user.password_hash,
                user.role.as_str(),
                user.email_verified,
                now_millis()
            ],
        )?;

        let mut created = user.clone();
        created.id = inserted_id(conn)?;
        Ok(created)
    }

    pub async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        let guard = self.conn.lock().await;
        let conn = connection(&guard)?;

        let user = conn
            .query_row(
                "SELECT id, name, email, password_hash, role, email_verified FROM users WHERE email = ?",
                params![email],
                |row| {
                    Ok(User {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        email: row.get(2)?,
                        password_hash: row.get(3)?,
                        role: Role::from_str(&row.get::<_, String>(4)?),
                        email_verified: row.get(5)?,
                    })
                },
            )
            .optional()?;
        Ok(user)
    }
}
