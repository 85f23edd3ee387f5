//! SQLite-backed event and RSVP storage.

use std::str::FromStr;

use async_trait::async_trait;
use emberfall_domain::{ChapterId, CharacterId, Event, EventId, Rsvp, RsvpId, RsvpStatus};
use sqlx::{Row, SqlitePool};

use crate::infrastructure::ports::{EventRepo, RepoError};

use super::helpers::{parse_timestamp, parse_uuid};

pub struct SqliteEventRepo {
    pool: SqlitePool,
}

impl SqliteEventRepo {
    pub async fn new(pool: SqlitePool) -> Result<Self, RepoError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS events (
                id TEXT PRIMARY KEY,
                chapter_id TEXT NOT NULL,
                name TEXT NOT NULL,
                description TEXT NOT NULL,
                starts_at TEXT NOT NULL,
                ends_at TEXT NOT NULL,
                xp_award INTEGER NOT NULL,
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await
        .map_err(|e| RepoError::database("events", e))?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS rsvps (
                id TEXT PRIMARY KEY,
                event_id TEXT NOT NULL,
                character_id TEXT NOT NULL,
                status TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                UNIQUE (event_id, character_id)
            )
            "#,
        )
        .execute(&pool)
        .await
        .map_err(|e| RepoError::database("rsvps", e))?;

        Ok(Self { pool })
    }

    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Event, RepoError> {
        let id: String = row.get("id");
        let chapter_id: String = row.get("chapter_id");
        let starts_at: String = row.get("starts_at");
        let ends_at: String = row.get("ends_at");
        let xp_award: i64 = row.get("xp_award");
        let created_at: String = row.get("created_at");

        Ok(Event {
            id: EventId::from_uuid(parse_uuid(&id)?),
            chapter_id: ChapterId::from_uuid(parse_uuid(&chapter_id)?),
            name: row.get("name"),
            description: row.get("description"),
            starts_at: parse_timestamp(&starts_at)?,
            ends_at: parse_timestamp(&ends_at)?,
            xp_award: xp_award as u32,
            created_at: parse_timestamp(&created_at)?,
        })
    }

    fn rsvp_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Rsvp, RepoError> {
        let id: String = row.get("id");
        let event_id: String = row.get("event_id");
        let character_id: String = row.get("character_id");
        let status: String = row.get("status");
        let created_at: String = row.get("created_at");
        let updated_at: String = row.get("updated_at");

        Ok(Rsvp {
            id: RsvpId::from_uuid(parse_uuid(&id)?),
            event_id: EventId::from_uuid(parse_uuid(&event_id)?),
            character_id: CharacterId::from_uuid(parse_uuid(&character_id)?),
            status: RsvpStatus::from_str(&status).map_err(|e| RepoError::serialization(e))?,
            created_at: parse_timestamp(&created_at)?,
            updated_at: parse_timestamp(&updated_at)?,
        })
    }
}

#[async_trait]
impl EventRepo for SqliteEventRepo {
    async fn get(&self, id: EventId) -> Result<Option<Event>, RepoError> {
        let row = sqlx::query("SELECT * FROM events WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::database("events.get", e))?;

        row.as_ref().map(Self::from_row).transpose()
    }

    async fn save(&self, event: &Event) -> Result<(), RepoError> {
        sqlx::query(
            r#"
            INSERT INTO events
                (id, chapter_id, name, description, starts_at, ends_at, xp_award, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                chapter_id = excluded.chapter_id,
                name = excluded.name,
                description = excluded.description,
                starts_at = excluded.starts_at,
                ends_at = excluded.ends_at,
                xp_award = excluded.xp_award
            "#,
        )
        .bind(event.id.to_string())
        .bind(event.chapter_id.to_string())
        .bind(&event.name)
        .bind(&event.description)
        .bind(event.starts_at.to_rfc3339())
        .bind(event.ends_at.to_rfc3339())
        .bind(i64::from(event.xp_award))
        .bind(event.created_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::database("events.save", e))?;

        Ok(())
    }

    async fn list(&self) -> Result<Vec<Event>, RepoError> {
        let rows = sqlx::query("SELECT * FROM events ORDER BY starts_at")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepoError::database("events.list", e))?;

        rows.iter().map(Self::from_row).collect()
    }

    async fn list_for_chapter(&self, chapter_id: ChapterId) -> Result<Vec<Event>, RepoError> {
        let rows = sqlx::query("SELECT * FROM events WHERE chapter_id = ? ORDER BY starts_at")
            .bind(chapter_id.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepoError::database("events.list_for_chapter", e))?;

        rows.iter().map(Self::from_row).collect()
    }

    async fn get_rsvp(
        &self,
        event_id: EventId,
        character_id: CharacterId,
    ) -> Result<Option<Rsvp>, RepoError> {
        let row = sqlx::query("SELECT * FROM rsvps WHERE event_id = ? AND character_id = ?")
            .bind(event_id.to_string())
            .bind(character_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::database("rsvps.get", e))?;

        row.as_ref().map(Self::rsvp_from_row).transpose()
    }

    async fn save_rsvp(&self, rsvp: &Rsvp) -> Result<(), RepoError> {
        sqlx::query(
            r#"
            INSERT INTO rsvps (id, event_id, character_id, status, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            ON CONFLICT(event_id, character_id) DO UPDATE SET
                status = excluded.status,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(rsvp.id.to_string())
        .bind(rsvp.event_id.to_string())
        .bind(rsvp.character_id.to_string())
        .bind(rsvp.status.as_str())
        .bind(rsvp.created_at.to_rfc3339())
        .bind(rsvp.updated_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::database("rsvps.save", e))?;

        Ok(())
    }

    async fn list_rsvps(&self, event_id: EventId) -> Result<Vec<Rsvp>, RepoError> {
        let rows = sqlx::query("SELECT * FROM rsvps WHERE event_id = ? ORDER BY created_at")
            .bind(event_id.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepoError::database("rsvps.list", e))?;

        rows.iter().map(Self::rsvp_from_row).collect()
    }
}
