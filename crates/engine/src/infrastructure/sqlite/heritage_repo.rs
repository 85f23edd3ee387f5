//! SQLite-backed heritage storage.

use async_trait::async_trait;
use emberfall_domain::{Heritage, HeritageId};
use sqlx::{Row, SqlitePool};

use crate::infrastructure::ports::{HeritageRepo, RepoError};

use super::helpers::{decode_names, encode_names, parse_uuid};

pub struct SqliteHeritageRepo {
    pool: SqlitePool,
}

impl SqliteHeritageRepo {
    pub async fn new(pool: SqlitePool) -> Result<Self, RepoError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS heritages (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                base_body INTEGER NOT NULL,
                base_stamina INTEGER NOT NULL,
                secondary_skills TEXT NOT NULL,
                benefit TEXT NOT NULL,
                weakness TEXT NOT NULL,
                costume_requirement TEXT NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await
        .map_err(|e| RepoError::database("heritages", e))?;

        Ok(Self { pool })
    }

    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Heritage, RepoError> {
        let id: String = row.get("id");
        let base_body: i64 = row.get("base_body");
        let base_stamina: i64 = row.get("base_stamina");
        let secondary_skills: String = row.get("secondary_skills");

        Ok(Heritage {
            id: HeritageId::from_uuid(parse_uuid(&id)?),
            name: row.get("name"),
            base_body: base_body as u32,
            base_stamina: base_stamina as u32,
            secondary_skills: decode_names(&secondary_skills)?,
            benefit: row.get("benefit"),
            weakness: row.get("weakness"),
            costume_requirement: row.get("costume_requirement"),
        })
    }
}

#[async_trait]
impl HeritageRepo for SqliteHeritageRepo {
    async fn get(&self, id: HeritageId) -> Result<Option<Heritage>, RepoError> {
        let row = sqlx::query("SELECT * FROM heritages WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::database("heritages.get", e))?;

        row.as_ref().map(Self::from_row).transpose()
    }

    async fn save(&self, heritage: &Heritage) -> Result<(), RepoError> {
        sqlx::query(
            r#"
            INSERT INTO heritages
                (id, name, base_body, base_stamina, secondary_skills,
                 benefit, weakness, costume_requirement)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                base_body = excluded.base_body,
                base_stamina = excluded.base_stamina,
                secondary_skills = excluded.secondary_skills,
                benefit = excluded.benefit,
                weakness = excluded.weakness,
                costume_requirement = excluded.costume_requirement
            "#,
        )
        .bind(heritage.id.to_string())
        .bind(&heritage.name)
        .bind(i64::from(heritage.base_body))
        .bind(i64::from(heritage.base_stamina))
        .bind(encode_names(&heritage.secondary_skills)?)
        .bind(&heritage.benefit)
        .bind(&heritage.weakness)
        .bind(&heritage.costume_requirement)
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::database("heritages.save", e))?;

        Ok(())
    }

    async fn list(&self) -> Result<Vec<Heritage>, RepoError> {
        let rows = sqlx::query("SELECT * FROM heritages ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepoError::database("heritages.list", e))?;

        rows.iter().map(Self::from_row).collect()
    }
}
