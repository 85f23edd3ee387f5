//! SQLite-backed rarity-settings storage.
//!
//! A single-row table; the thresholds are validated by the caller before they
//! reach this repository.

use std::sync::Arc;

use async_trait::async_trait;
use emberfall_domain::RaritySettings;
use sqlx::{Row, SqlitePool};

use crate::infrastructure::ports::{ClockPort, RepoError, SettingsRepo};

pub struct SqliteSettingsRepo {
    pool: SqlitePool,
    clock: Arc<dyn ClockPort>,
}

impl SqliteSettingsRepo {
    pub async fn new(pool: SqlitePool, clock: Arc<dyn ClockPort>) -> Result<Self, RepoError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS rarity_settings (
                id INTEGER PRIMARY KEY CHECK (id = 1),
                common INTEGER NOT NULL,
                rare INTEGER NOT NULL,
                epic INTEGER NOT NULL,
                legendary INTEGER NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await
        .map_err(|e| RepoError::database("rarity_settings", e))?;

        Ok(Self { pool, clock })
    }
}

#[async_trait]
impl SettingsRepo for SqliteSettingsRepo {
    async fn get_rarity(&self) -> Result<Option<RaritySettings>, RepoError> {
        let row = sqlx::query("SELECT * FROM rarity_settings WHERE id = 1")
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::database("rarity_settings.get", e))?;

        Ok(row.map(|row| {
            let common: i64 = row.get("common");
            let rare: i64 = row.get("rare");
            let epic: i64 = row.get("epic");
            let legendary: i64 = row.get("legendary");
            RaritySettings {
                common: common as u32,
                rare: rare as u32,
                epic: epic as u32,
                legendary: legendary as u32,
            }
        }))
    }

    async fn save_rarity(&self, settings: &RaritySettings) -> Result<(), RepoError> {
        sqlx::query(
            r#"
            INSERT INTO rarity_settings (id, common, rare, epic, legendary, updated_at)
            VALUES (1, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                common = excluded.common,
                rare = excluded.rare,
                epic = excluded.epic,
                legendary = excluded.legendary,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(i64::from(settings.common))
        .bind(i64::from(settings.rare))
        .bind(i64::from(settings.epic))
        .bind(i64::from(settings.legendary))
        .bind(self.clock.now().to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::database("rarity_settings.save", e))?;

        Ok(())
    }
}
