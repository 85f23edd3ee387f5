//! SQLite-backed archetype storage.

use async_trait::async_trait;
use emberfall_domain::{Archetype, ArchetypeId};
use sqlx::{Row, SqlitePool};

use crate::infrastructure::ports::{ArchetypeRepo, RepoError};

use super::helpers::{decode_names, encode_names, parse_uuid};

pub struct SqliteArchetypeRepo {
    pool: SqlitePool,
}

impl SqliteArchetypeRepo {
    pub async fn new(pool: SqlitePool) -> Result<Self, RepoError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS archetypes (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                primary_skills TEXT NOT NULL,
                secondary_skills TEXT NOT NULL,
                description TEXT NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await
        .map_err(|e| RepoError::database("archetypes", e))?;

        Ok(Self { pool })
    }

    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Archetype, RepoError> {
        let id: String = row.get("id");
        let primary_skills: String = row.get("primary_skills");
        let secondary_skills: String = row.get("secondary_skills");

        Ok(Archetype {
            id: ArchetypeId::from_uuid(parse_uuid(&id)?),
            name: row.get("name"),
            primary_skills: decode_names(&primary_skills)?,
            secondary_skills: decode_names(&secondary_skills)?,
            description: row.get("description"),
        })
    }
}

#[async_trait]
impl ArchetypeRepo for SqliteArchetypeRepo {
    async fn get(&self, id: ArchetypeId) -> Result<Option<Archetype>, RepoError> {
        let row = sqlx::query("SELECT * FROM archetypes WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::database("archetypes.get", e))?;

        row.as_ref().map(Self::from_row).transpose()
    }

    async fn save(&self, archetype: &Archetype) -> Result<(), RepoError> {
        sqlx::query(
            r#"
            INSERT INTO archetypes
                (id, name, primary_skills, secondary_skills, description)
            VALUES (?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                primary_skills = excluded.primary_skills,
                secondary_skills = excluded.secondary_skills,
                description = excluded.description
            "#,
        )
        .bind(archetype.id.to_string())
        .bind(&archetype.name)
        .bind(encode_names(&archetype.primary_skills)?)
        .bind(encode_names(&archetype.secondary_skills)?)
        .bind(&archetype.description)
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::database("archetypes.save", e))?;

        Ok(())
    }

    async fn list(&self) -> Result<Vec<Archetype>, RepoError> {
        let rows = sqlx::query("SELECT * FROM archetypes ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepoError::database("archetypes.list", e))?;

        rows.iter().map(Self::from_row).collect()
    }
}
