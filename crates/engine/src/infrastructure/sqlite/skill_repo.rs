//! SQLite-backed skill storage.

use async_trait::async_trait;
use emberfall_domain::{Skill, SkillId};
use sqlx::{Row, SqlitePool};

use crate::infrastructure::ports::{RepoError, SkillRepo};

use super::helpers::parse_uuid;

pub struct SqliteSkillRepo {
    pool: SqlitePool,
}

impl SqliteSkillRepo {
    pub async fn new(pool: SqlitePool) -> Result<Self, RepoError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS skills (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL UNIQUE,
                description TEXT,
                prerequisite TEXT
            )
            "#,
        )
        .execute(&pool)
        .await
        .map_err(|e| RepoError::database("skills", e))?;

        Ok(Self { pool })
    }

    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Skill, RepoError> {
        let id: String = row.get("id");

        Ok(Skill {
            id: SkillId::from_uuid(parse_uuid(&id)?),
            name: row.get("name"),
            description: row.get("description"),
            prerequisite: row.get("prerequisite"),
        })
    }
}

#[async_trait]
impl SkillRepo for SqliteSkillRepo {
    async fn get(&self, id: SkillId) -> Result<Option<Skill>, RepoError> {
        let row = sqlx::query("SELECT * FROM skills WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::database("skills.get", e))?;

        row.as_ref().map(Self::from_row).transpose()
    }

    async fn get_by_name(&self, name: &str) -> Result<Option<Skill>, RepoError> {
        let row = sqlx::query("SELECT * FROM skills WHERE name = ?")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::database("skills.get_by_name", e))?;

        row.as_ref().map(Self::from_row).transpose()
    }

    async fn save(&self, skill: &Skill) -> Result<(), RepoError> {
        sqlx::query(
            r#"
            INSERT INTO skills (id, name, description, prerequisite)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                description = excluded.description,
                prerequisite = excluded.prerequisite
            "#,
        )
        .bind(skill.id.to_string())
        .bind(&skill.name)
        .bind(&skill.description)
        .bind(&skill.prerequisite)
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::database("skills.save", e))?;

        Ok(())
    }

    async fn list(&self) -> Result<Vec<Skill>, RepoError> {
        let rows = sqlx::query("SELECT * FROM skills ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepoError::database("skills.list", e))?;

        rows.iter().map(Self::from_row).collect()
    }
}
