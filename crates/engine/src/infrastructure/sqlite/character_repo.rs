//! SQLite-backed character and experience-ledger storage.
//!
//! Spends are committed with a single conditional `UPDATE` that decrements
//! `experience` relative to the stored balance, so two concurrent purchases
//! cannot both slip past an application-level affordability check. The ledger
//! entry rides in the same transaction; a rejected guard leaves no trace.

use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use emberfall_domain::{
    ArchetypeId, Character, CharacterId, CharacterStatus, CultureId, ExperienceEntry,
    ExperienceEntryId, ExperienceEntryKind, HeritageId, UserId,
};
use sqlx::{Row, SqlitePool};

use crate::infrastructure::ports::{CharacterRepo, ClockPort, RepoError};

use super::helpers::{decode_names, encode_names, parse_timestamp, parse_uuid};

pub struct SqliteCharacterRepo {
    pool: SqlitePool,
    clock: Arc<dyn ClockPort>,
}

impl SqliteCharacterRepo {
    pub async fn new(pool: SqlitePool, clock: Arc<dyn ClockPort>) -> Result<Self, RepoError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS characters (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                name TEXT NOT NULL,
                heritage_id TEXT NOT NULL,
                culture_id TEXT NOT NULL,
                archetype_id TEXT NOT NULL,
                second_archetype_id TEXT,
                body INTEGER NOT NULL,
                stamina INTEGER NOT NULL,
                experience INTEGER NOT NULL,
                skills TEXT NOT NULL,
                status TEXT NOT NULL,
                retired_reason TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await
        .map_err(|e| RepoError::database("characters", e))?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS experience_entries (
                id TEXT PRIMARY KEY,
                character_id TEXT NOT NULL,
                delta INTEGER NOT NULL,
                kind TEXT NOT NULL,
                note TEXT,
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await
        .map_err(|e| RepoError::database("experience_entries", e))?;

        Ok(Self { pool, clock })
    }

    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Character, RepoError> {
        let id: String = row.get("id");
        let user_id: String = row.get("user_id");
        let heritage_id: String = row.get("heritage_id");
        let culture_id: String = row.get("culture_id");
        let archetype_id: String = row.get("archetype_id");
        let second_archetype_id: Option<String> = row.get("second_archetype_id");
        let body: i64 = row.get("body");
        let stamina: i64 = row.get("stamina");
        let experience: i64 = row.get("experience");
        let skills: String = row.get("skills");
        let status: String = row.get("status");
        let retired_reason: Option<String> = row.get("retired_reason");
        let created_at: String = row.get("created_at");
        let updated_at: String = row.get("updated_at");

        Ok(Character {
            id: CharacterId::from_uuid(parse_uuid(&id)?),
            user_id: UserId::from_uuid(parse_uuid(&user_id)?),
            name: row.get("name"),
            heritage_id: HeritageId::from_uuid(parse_uuid(&heritage_id)?),
            culture_id: CultureId::from_uuid(parse_uuid(&culture_id)?),
            archetype_id: ArchetypeId::from_uuid(parse_uuid(&archetype_id)?),
            second_archetype_id: second_archetype_id
                .as_deref()
                .map(parse_uuid)
                .transpose()?
                .map(ArchetypeId::from_uuid),
            body: body as u32,
            stamina: stamina as u32,
            experience: experience as u32,
            skills: decode_names(&skills)?,
            status: CharacterStatus::from_label(&status, retired_reason)
                .map_err(|e| RepoError::serialization(e))?,
            created_at: parse_timestamp(&created_at)?,
            updated_at: parse_timestamp(&updated_at)?,
        })
    }

    fn entry_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<ExperienceEntry, RepoError> {
        let id: String = row.get("id");
        let character_id: String = row.get("character_id");
        let kind: String = row.get("kind");
        let created_at: String = row.get("created_at");

        Ok(ExperienceEntry {
            id: ExperienceEntryId::from_uuid(parse_uuid(&id)?),
            character_id: CharacterId::from_uuid(parse_uuid(&character_id)?),
            delta: row.get("delta"),
            kind: ExperienceEntryKind::from_str(&kind).map_err(|e| RepoError::serialization(e))?,
            note: row.get("note"),
            created_at: parse_timestamp(&created_at)?,
        })
    }

    fn retired_reason(status: &CharacterStatus) -> Option<&str> {
        match status {
            CharacterStatus::Retired { reason } => Some(reason.as_str()),
            _ => None,
        }
    }

    async fn insert_entry<'a>(
        tx: &mut sqlx::Transaction<'a, sqlx::Sqlite>,
        entry: &ExperienceEntry,
    ) -> Result<(), RepoError> {
        sqlx::query(
            r#"
            INSERT INTO experience_entries (id, character_id, delta, kind, note, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(entry.id.to_string())
        .bind(entry.character_id.to_string())
        .bind(entry.delta)
        .bind(entry.kind.as_str())
        .bind(&entry.note)
        .bind(entry.created_at.to_rfc3339())
        .execute(&mut **tx)
        .await
        .map_err(|e| RepoError::database("experience_entries.insert", e))?;

        Ok(())
    }
}

#[async_trait]
impl CharacterRepo for SqliteCharacterRepo {
    async fn get(&self, id: CharacterId) -> Result<Option<Character>, RepoError> {
        let row = sqlx::query("SELECT * FROM characters WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::database("characters.get", e))?;

        row.as_ref().map(Self::from_row).transpose()
    }

    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Character>, RepoError> {
        let rows = sqlx::query("SELECT * FROM characters WHERE user_id = ? ORDER BY created_at")
            .bind(user_id.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepoError::database("characters.list_for_user", e))?;

        rows.iter().map(Self::from_row).collect()
    }

    async fn create(
        &self,
        character: &Character,
        opening_entries: &[ExperienceEntry],
    ) -> Result<(), RepoError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| RepoError::database("characters.create", e))?;

        sqlx::query(
            r#"
            INSERT INTO characters
                (id, user_id, name, heritage_id, culture_id, archetype_id,
                 second_archetype_id, body, stamina, experience, skills,
                 status, retired_reason, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(character.id.to_string())
        .bind(character.user_id.to_string())
        .bind(&character.name)
        .bind(character.heritage_id.to_string())
        .bind(character.culture_id.to_string())
        .bind(character.archetype_id.to_string())
        .bind(character.second_archetype_id.map(|a| a.to_string()))
        .bind(i64::from(character.body))
        .bind(i64::from(character.stamina))
        .bind(i64::from(character.experience))
        .bind(encode_names(&character.skills)?)
        .bind(character.status.label())
        .bind(Self::retired_reason(&character.status))
        .bind(character.created_at.to_rfc3339())
        .bind(character.updated_at.to_rfc3339())
        .execute(&mut *tx)
        .await
        .map_err(|e| RepoError::database("characters.create", e))?;

        for entry in opening_entries {
            Self::insert_entry(&mut tx, entry).await?;
        }

        tx.commit()
            .await
            .map_err(|e| RepoError::database("characters.create", e))
    }

    async fn save(&self, character: &Character) -> Result<(), RepoError> {
        let result = sqlx::query(
            r#"
            UPDATE characters SET
                name = ?,
                second_archetype_id = ?,
                body = ?,
                stamina = ?,
                skills = ?,
                status = ?,
                retired_reason = ?,
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&character.name)
        .bind(character.second_archetype_id.map(|a| a.to_string()))
        .bind(i64::from(character.body))
        .bind(i64::from(character.stamina))
        .bind(encode_names(&character.skills)?)
        .bind(character.status.label())
        .bind(Self::retired_reason(&character.status))
        .bind(character.updated_at.to_rfc3339())
        .bind(character.id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::database("characters.save", e))?;

        if result.rows_affected() == 0 {
            return Err(RepoError::not_found("Character", character.id));
        }

        Ok(())
    }

    async fn commit_spend(
        &self,
        character: &Character,
        cost: u32,
        entry: &ExperienceEntry,
    ) -> Result<bool, RepoError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| RepoError::database("characters.commit_spend", e))?;

        // The balance decrement is relative to the stored value and guarded
        // in the WHERE clause; a stale in-memory snapshot cannot overdraw.
        let result = sqlx::query(
            r#"
            UPDATE characters SET
                second_archetype_id = ?,
                body = ?,
                stamina = ?,
                skills = ?,
                updated_at = ?,
                experience = experience - ?
            WHERE id = ? AND experience >= ? AND status != 'retired'
            "#,
        )
        .bind(character.second_archetype_id.map(|a| a.to_string()))
        .bind(i64::from(character.body))
        .bind(i64::from(character.stamina))
        .bind(encode_names(&character.skills)?)
        .bind(character.updated_at.to_rfc3339())
        .bind(i64::from(cost))
        .bind(character.id.to_string())
        .bind(i64::from(cost))
        .execute(&mut *tx)
        .await
        .map_err(|e| RepoError::database("characters.commit_spend", e))?;

        if result.rows_affected() == 0 {
            return Ok(false);
        }

        Self::insert_entry(&mut tx, entry).await?;

        tx.commit()
            .await
            .map_err(|e| RepoError::database("characters.commit_spend", e))?;

        Ok(true)
    }

    async fn commit_award(
        &self,
        character_id: CharacterId,
        amount: u32,
        entry: &ExperienceEntry,
    ) -> Result<bool, RepoError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| RepoError::database("characters.commit_award", e))?;

        let result = sqlx::query(
            r#"
            UPDATE characters SET
                experience = experience + ?,
                updated_at = ?
            WHERE id = ? AND status != 'retired'
            "#,
        )
        .bind(i64::from(amount))
        .bind(self.clock.now().to_rfc3339())
        .bind(character_id.to_string())
        .execute(&mut *tx)
        .await
        .map_err(|e| RepoError::database("characters.commit_award", e))?;

        if result.rows_affected() == 0 {
            return Ok(false);
        }

        Self::insert_entry(&mut tx, entry).await?;

        tx.commit()
            .await
            .map_err(|e| RepoError::database("characters.commit_award", e))?;

        Ok(true)
    }

    async fn ledger(&self, character_id: CharacterId) -> Result<Vec<ExperienceEntry>, RepoError> {
        let rows = sqlx::query(
            "SELECT * FROM experience_entries WHERE character_id = ? ORDER BY created_at, id",
        )
        .bind(character_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepoError::database("experience_entries.list", e))?;

        rows.iter().map(Self::entry_from_row).collect()
    }
}
