//! SQLite-backed user storage.

use std::str::FromStr;

use async_trait::async_trait;
use emberfall_domain::{ChapterId, User, UserId, UserRole};
use sqlx::{Row, SqlitePool};

use crate::infrastructure::ports::{RepoError, UserRepo};

use super::helpers::{parse_timestamp, parse_uuid};

pub struct SqliteUserRepo {
    pool: SqlitePool,
}

impl SqliteUserRepo {
    pub async fn new(pool: SqlitePool) -> Result<Self, RepoError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                email TEXT NOT NULL UNIQUE,
                display_name TEXT NOT NULL,
                role TEXT NOT NULL,
                chapter_id TEXT,
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await
        .map_err(|e| RepoError::database("users", e))?;

        Ok(Self { pool })
    }

    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<User, RepoError> {
        let id: String = row.get("id");
        let chapter_id: Option<String> = row.get("chapter_id");
        let role: String = row.get("role");
        let created_at: String = row.get("created_at");

        Ok(User {
            id: UserId::from_uuid(parse_uuid(&id)?),
            email: row.get("email"),
            display_name: row.get("display_name"),
            role: UserRole::from_str(&role).map_err(|e| RepoError::serialization(e))?,
            chapter_id: chapter_id
                .as_deref()
                .map(parse_uuid)
                .transpose()?
                .map(ChapterId::from_uuid),
            created_at: parse_timestamp(&created_at)?,
        })
    }
}

#[async_trait]
impl UserRepo for SqliteUserRepo {
    async fn get(&self, id: UserId) -> Result<Option<User>, RepoError> {
        let row = sqlx::query("SELECT * FROM users WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::database("users.get", e))?;

        row.as_ref().map(Self::from_row).transpose()
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let row = sqlx::query("SELECT * FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::database("users.get_by_email", e))?;

        row.as_ref().map(Self::from_row).transpose()
    }

    async fn save(&self, user: &User) -> Result<(), RepoError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, email, display_name, role, chapter_id, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                email = excluded.email,
                display_name = excluded.display_name,
                role = excluded.role,
                chapter_id = excluded.chapter_id
            "#,
        )
        .bind(user.id.to_string())
        .bind(&user.email)
        .bind(&user.display_name)
        .bind(user.role.as_str())
        .bind(user.chapter_id.map(|c| c.to_string()))
        .bind(user.created_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::database("users.save", e))?;

        Ok(())
    }

    async fn list(&self) -> Result<Vec<User>, RepoError> {
        let rows = sqlx::query("SELECT * FROM users ORDER BY display_name")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepoError::database("users.list", e))?;

        rows.iter().map(Self::from_row).collect()
    }
}
