//! SQLite-backed repositories.
//!
//! One repository struct per aggregate over a shared pool. Each repository
//! ensures its own tables with idempotent DDL when constructed, so startup
//! order does not matter. Timestamps are stored as RFC 3339 text; skill-name
//! sets on reference rows are stored as JSON text columns.

mod archetype_repo;
mod candle_repo;
mod chapter_repo;
mod character_repo;
mod culture_repo;
mod event_repo;
mod helpers;
mod heritage_repo;
mod settings_repo;
mod skill_repo;
mod user_repo;

#[cfg(test)]
mod integration_tests;

pub use archetype_repo::SqliteArchetypeRepo;
pub use candle_repo::SqliteCandleRepo;
pub use chapter_repo::SqliteChapterRepo;
pub use character_repo::SqliteCharacterRepo;
pub use culture_repo::SqliteCultureRepo;
pub use event_repo::SqliteEventRepo;
pub use heritage_repo::SqliteHeritageRepo;
pub use settings_repo::SqliteSettingsRepo;
pub use skill_repo::SqliteSkillRepo;
pub use user_repo::SqliteUserRepo;

use sqlx::SqlitePool;

use crate::infrastructure::ports::RepoError;

/// Open (creating if needed) the database file and return the shared pool.
pub async fn connect(db_path: &str) -> Result<SqlitePool, RepoError> {
    SqlitePool::connect(&format!("sqlite:{db_path}?mode=rwc"))
        .await
        .map_err(|e| RepoError::database("connect", e))
}
