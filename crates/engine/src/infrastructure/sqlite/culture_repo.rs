//! SQLite-backed culture storage.

use async_trait::async_trait;
use emberfall_domain::{Culture, CultureId, HeritageId};
use sqlx::{Row, SqlitePool};

use crate::infrastructure::ports::{CultureRepo, RepoError};

use super::helpers::{decode_names, encode_names, parse_uuid};

pub struct SqliteCultureRepo {
    pool: SqlitePool,
}

impl SqliteCultureRepo {
    pub async fn new(pool: SqlitePool) -> Result<Self, RepoError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS cultures (
                id TEXT PRIMARY KEY,
                heritage_id TEXT NOT NULL,
                name TEXT NOT NULL,
                primary_skills TEXT NOT NULL,
                secondary_skills TEXT NOT NULL,
                description TEXT NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await
        .map_err(|e| RepoError::database("cultures", e))?;

        Ok(Self { pool })
    }

    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Culture, RepoError> {
        let id: String = row.get("id");
        let heritage_id: String = row.get("heritage_id");
        let primary_skills: String = row.get("primary_skills");
        let secondary_skills: String = row.get("secondary_skills");

        Ok(Culture {
            id: CultureId::from_uuid(parse_uuid(&id)?),
            heritage_id: HeritageId::from_uuid(parse_uuid(&heritage_id)?),
            name: row.get("name"),
            primary_skills: decode_names(&primary_skills)?,
            secondary_skills: decode_names(&secondary_skills)?,
            description: row.get("description"),
        })
    }
}

#[async_trait]
impl CultureRepo for SqliteCultureRepo {
    async fn get(&self, id: CultureId) -> Result<Option<Culture>, RepoError> {
        let row = sqlx::query("SELECT * FROM cultures WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::database("cultures.get", e))?;

        row.as_ref().map(Self::from_row).transpose()
    }

    async fn save(&self, culture: &Culture) -> Result<(), RepoError> {
        sqlx::query(
            r#"
            INSERT INTO cultures
                (id, heritage_id, name, primary_skills, secondary_skills, description)
            VALUES (?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                heritage_id = excluded.heritage_id,
                name = excluded.name,
                primary_skills = excluded.primary_skills,
                secondary_skills = excluded.secondary_skills,
                description = excluded.description
            "#,
        )
        .bind(culture.id.to_string())
        .bind(culture.heritage_id.to_string())
        .bind(&culture.name)
        .bind(encode_names(&culture.primary_skills)?)
        .bind(encode_names(&culture.secondary_skills)?)
        .bind(&culture.description)
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::database("cultures.save", e))?;

        Ok(())
    }

    async fn list(&self) -> Result<Vec<Culture>, RepoError> {
        let rows = sqlx::query("SELECT * FROM cultures ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepoError::database("cultures.list", e))?;

        rows.iter().map(Self::from_row).collect()
    }

    async fn list_for_heritage(&self, heritage_id: HeritageId) -> Result<Vec<Culture>, RepoError> {
        let rows = sqlx::query("SELECT * FROM cultures WHERE heritage_id = ? ORDER BY name")
            .bind(heritage_id.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepoError::database("cultures.list_for_heritage", e))?;

        rows.iter().map(Self::from_row).collect()
    }
}
