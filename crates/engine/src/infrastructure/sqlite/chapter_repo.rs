//! SQLite-backed chapter storage.

use async_trait::async_trait;
use emberfall_domain::{Chapter, ChapterId};
use sqlx::{Row, SqlitePool};

use crate::infrastructure::ports::{ChapterRepo, RepoError};

use super::helpers::{parse_timestamp, parse_uuid};

pub struct SqliteChapterRepo {
    pool: SqlitePool,
}

impl SqliteChapterRepo {
    pub async fn new(pool: SqlitePool) -> Result<Self, RepoError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS chapters (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                region TEXT NOT NULL,
                active INTEGER NOT NULL,
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await
        .map_err(|e| RepoError::database("chapters", e))?;

        Ok(Self { pool })
    }

    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Chapter, RepoError> {
        let id: String = row.get("id");
        let active: i64 = row.get("active");
        let created_at: String = row.get("created_at");

        Ok(Chapter {
            id: ChapterId::from_uuid(parse_uuid(&id)?),
            name: row.get("name"),
            region: row.get("region"),
            active: active != 0,
            created_at: parse_timestamp(&created_at)?,
        })
    }
}

#[async_trait]
impl ChapterRepo for SqliteChapterRepo {
    async fn get(&self, id: ChapterId) -> Result<Option<Chapter>, RepoError> {
        let row = sqlx::query("SELECT * FROM chapters WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::database("chapters.get", e))?;

        row.as_ref().map(Self::from_row).transpose()
    }

    async fn save(&self, chapter: &Chapter) -> Result<(), RepoError> {
        sqlx::query(
            r#"
            INSERT INTO chapters (id, name, region, active, created_at)
            VALUES (?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                region = excluded.region,
                active = excluded.active
            "#,
        )
        .bind(chapter.id.to_string())
        .bind(&chapter.name)
        .bind(&chapter.region)
        .bind(i64::from(chapter.active))
        .bind(chapter.created_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::database("chapters.save", e))?;

        Ok(())
    }

    async fn list(&self) -> Result<Vec<Chapter>, RepoError> {
        let rows = sqlx::query("SELECT * FROM chapters ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepoError::database("chapters.list", e))?;

        rows.iter().map(Self::from_row).collect()
    }
}
