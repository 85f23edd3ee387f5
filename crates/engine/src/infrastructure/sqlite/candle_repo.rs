//! SQLite-backed candle-ledger storage.
//!
//! The candle balance is the sum of entries; a spend is inserted through a
//! guarded `INSERT ... SELECT` so it cannot overdraw against a concurrent
//! spend.

use async_trait::async_trait;
use emberfall_domain::{CandleEntry, CandleEntryId, CharacterId};
use sqlx::{Row, SqlitePool};

use crate::infrastructure::ports::{CandleRepo, RepoError};

use super::helpers::{parse_timestamp, parse_uuid};

pub struct SqliteCandleRepo {
    pool: SqlitePool,
}

impl SqliteCandleRepo {
    pub async fn new(pool: SqlitePool) -> Result<Self, RepoError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS candle_entries (
                id TEXT PRIMARY KEY,
                character_id TEXT NOT NULL,
                delta INTEGER NOT NULL,
                note TEXT,
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await
        .map_err(|e| RepoError::database("candle_entries", e))?;

        Ok(Self { pool })
    }

    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<CandleEntry, RepoError> {
        let id: String = row.get("id");
        let character_id: String = row.get("character_id");
        let created_at: String = row.get("created_at");

        Ok(CandleEntry {
            id: CandleEntryId::from_uuid(parse_uuid(&id)?),
            character_id: CharacterId::from_uuid(parse_uuid(&character_id)?),
            delta: row.get("delta"),
            note: row.get("note"),
            created_at: parse_timestamp(&created_at)?,
        })
    }
}

#[async_trait]
impl CandleRepo for SqliteCandleRepo {
    async fn entries(&self, character_id: CharacterId) -> Result<Vec<CandleEntry>, RepoError> {
        let rows = sqlx::query(
            "SELECT * FROM candle_entries WHERE character_id = ? ORDER BY created_at, id",
        )
        .bind(character_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepoError::database("candle_entries.list", e))?;

        rows.iter().map(Self::from_row).collect()
    }

    async fn grant(&self, entry: &CandleEntry) -> Result<(), RepoError> {
        if entry.delta <= 0 {
            return Err(RepoError::constraint("Candle grant must be positive"));
        }

        sqlx::query(
            r#"
            INSERT INTO candle_entries (id, character_id, delta, note, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(entry.id.to_string())
        .bind(entry.character_id.to_string())
        .bind(entry.delta)
        .bind(&entry.note)
        .bind(entry.created_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::database("candle_entries.grant", e))?;

        Ok(())
    }

    async fn spend(&self, entry: &CandleEntry) -> Result<bool, RepoError> {
        if entry.delta >= 0 {
            return Err(RepoError::constraint("Candle spend must be negative"));
        }
        let amount = entry.delta.unsigned_abs() as i64;

        // Guarded insert: the row only lands if the summed balance covers it.
        let result = sqlx::query(
            r#"
            INSERT INTO candle_entries (id, character_id, delta, note, created_at)
            SELECT ?, ?, ?, ?, ?
            WHERE (SELECT COALESCE(SUM(delta), 0)
                   FROM candle_entries WHERE character_id = ?) >= ?
            "#,
        )
        .bind(entry.id.to_string())
        .bind(entry.character_id.to_string())
        .bind(entry.delta)
        .bind(&entry.note)
        .bind(entry.created_at.to_rfc3339())
        .bind(entry.character_id.to_string())
        .bind(amount)
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::database("candle_entries.spend", e))?;

        Ok(result.rows_affected() > 0)
    }
}
