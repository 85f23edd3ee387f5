//! Integration tests for the SQLite repositories against a temp database file.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use emberfall_domain::{
    candle_balance, ArchetypeId, CandleEntry, Character, CultureId, ExperienceEntry,
    ExperienceEntryKind, Heritage, RaritySettings, UserId,
};

use crate::infrastructure::clock::FixedClock;
use crate::infrastructure::ports::{
    CandleRepo, CharacterRepo, ClockPort, HeritageRepo, SettingsRepo,
};
use crate::infrastructure::sqlite::{
    connect, SqliteCandleRepo, SqliteCharacterRepo, SqliteHeritageRepo, SqliteSettingsRepo,
};

fn fixed_clock() -> Arc<dyn ClockPort> {
    let now = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
    Arc::new(FixedClock(now))
}

fn test_character(clock: &dyn ClockPort) -> Character {
    let heritage = Heritage::new("Human", 10, 10);
    Character::new(
        UserId::new(),
        "Maeve",
        &heritage,
        CultureId::new(),
        ArchetypeId::new(),
        clock.now(),
    )
}

async fn temp_pool(dir: &tempfile::TempDir) -> sqlx::SqlitePool {
    let db_path = dir.path().join("emberfall.db");
    connect(&db_path.to_string_lossy())
        .await
        .expect("open temp database")
}

#[tokio::test]
async fn character_round_trips_through_storage() {
    let dir = tempfile::tempdir().expect("tempdir");
    let pool = temp_pool(&dir).await;
    let clock = fixed_clock();
    let repo = SqliteCharacterRepo::new(pool, clock.clone())
        .await
        .expect("create repo");

    let mut character = test_character(clock.as_ref());
    character.learn_skill("Bard", clock.now()).unwrap();
    repo.create(&character, &[]).await.expect("create");

    let loaded = repo
        .get(character.id)
        .await
        .expect("get")
        .expect("character exists");
    assert_eq!(loaded.name, "Maeve");
    assert_eq!(loaded.body, 10);
    assert_eq!(loaded.experience, character.experience);
    assert_eq!(loaded.skills, vec!["Bard".to_string()]);
    assert_eq!(loaded.status, character.status);

    let listed = repo.list_for_user(character.user_id).await.expect("list");
    assert_eq!(listed.len(), 1);
}

#[tokio::test]
async fn spend_decrements_balance_and_appends_ledger() {
    let dir = tempfile::tempdir().expect("tempdir");
    let pool = temp_pool(&dir).await;
    let clock = fixed_clock();
    let repo = SqliteCharacterRepo::new(pool, clock.clone())
        .await
        .expect("create repo");

    let mut character = test_character(clock.as_ref());
    repo.create(&character, &[]).await.expect("create");

    character.learn_skill("Bard", clock.now()).unwrap();
    let entry = ExperienceEntry::spend(
        character.id,
        ExperienceEntryKind::SkillPurchase,
        5,
        "Bard",
        clock.now(),
    );
    let accepted = repo.commit_spend(&character, 5, &entry).await.expect("spend");
    assert!(accepted);

    let loaded = repo.get(character.id).await.unwrap().unwrap();
    assert_eq!(loaded.experience, 20);
    assert_eq!(loaded.skills, vec!["Bard".to_string()]);

    let ledger = repo.ledger(character.id).await.expect("ledger");
    assert_eq!(ledger.len(), 1);
    assert_eq!(ledger[0].delta, -5);
    assert_eq!(ledger[0].kind, ExperienceEntryKind::SkillPurchase);
}

#[tokio::test]
async fn overdraft_spend_is_rejected_with_no_partial_effect() {
    let dir = tempfile::tempdir().expect("tempdir");
    let pool = temp_pool(&dir).await;
    let clock = fixed_clock();
    let repo = SqliteCharacterRepo::new(pool, clock.clone())
        .await
        .expect("create repo");

    let mut character = test_character(clock.as_ref());
    repo.create(&character, &[]).await.expect("create");

    // Balance is 25; a 50-point spend must bounce off the guard.
    character.learn_skill("Alchemy", clock.now()).unwrap();
    let entry = ExperienceEntry::spend(
        character.id,
        ExperienceEntryKind::ArchetypePurchase,
        50,
        "Second archetype",
        clock.now(),
    );
    let accepted = repo.commit_spend(&character, 50, &entry).await.expect("spend");
    assert!(!accepted);

    let loaded = repo.get(character.id).await.unwrap().unwrap();
    assert_eq!(loaded.experience, 25);
    assert!(loaded.skills.is_empty());
    assert!(repo.ledger(character.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn retired_character_cannot_spend_or_be_awarded() {
    let dir = tempfile::tempdir().expect("tempdir");
    let pool = temp_pool(&dir).await;
    let clock = fixed_clock();
    let repo = SqliteCharacterRepo::new(pool, clock.clone())
        .await
        .expect("create repo");

    let mut character = test_character(clock.as_ref());
    repo.create(&character, &[]).await.expect("create");
    character.retire("moved away", clock.now()).unwrap();
    repo.save(&character).await.expect("save retirement");

    let spend = ExperienceEntry::spend(
        character.id,
        ExperienceEntryKind::SkillPurchase,
        5,
        "Bard",
        clock.now(),
    );
    assert!(!repo.commit_spend(&character, 5, &spend).await.unwrap());

    let award = ExperienceEntry::award(
        character.id,
        ExperienceEntryKind::Award,
        3,
        "cleanup",
        clock.now(),
    );
    assert!(!repo.commit_award(character.id, 3, &award).await.unwrap());

    let loaded = repo.get(character.id).await.unwrap().unwrap();
    assert_eq!(loaded.experience, 25);
    assert!(loaded.status.is_retired());
}

#[tokio::test]
async fn award_increments_balance_and_appends_ledger() {
    let dir = tempfile::tempdir().expect("tempdir");
    let pool = temp_pool(&dir).await;
    let clock = fixed_clock();
    let repo = SqliteCharacterRepo::new(pool, clock.clone())
        .await
        .expect("create repo");

    let character = test_character(clock.as_ref());
    repo.create(&character, &[]).await.expect("create");

    let entry = ExperienceEntry::award(
        character.id,
        ExperienceEntryKind::EventAttendance,
        4,
        "Spring Gathering",
        clock.now(),
    );
    assert!(repo.commit_award(character.id, 4, &entry).await.unwrap());

    let loaded = repo.get(character.id).await.unwrap().unwrap();
    assert_eq!(loaded.experience, 29);

    let ledger = repo.ledger(character.id).await.unwrap();
    assert_eq!(ledger.len(), 1);
    assert_eq!(ledger[0].delta, 4);
}

#[tokio::test]
async fn candle_spend_cannot_overdraw() {
    let dir = tempfile::tempdir().expect("tempdir");
    let pool = temp_pool(&dir).await;
    let clock = fixed_clock();
    let repo = SqliteCandleRepo::new(pool).await.expect("create repo");

    let character = test_character(clock.as_ref());
    repo.grant(&CandleEntry::grant(
        character.id,
        10,
        "event purchase",
        clock.now(),
    ))
    .await
    .expect("grant");

    let ok = repo
        .spend(&CandleEntry::spend(character.id, 4, "ritual", clock.now()))
        .await
        .expect("spend");
    assert!(ok);

    let rejected = repo
        .spend(&CandleEntry::spend(character.id, 7, "ritual", clock.now()))
        .await
        .expect("spend");
    assert!(!rejected);

    let entries = repo.entries(character.id).await.expect("entries");
    assert_eq!(candle_balance(&entries), 6);
}

#[tokio::test]
async fn heritage_upsert_replaces_fields() {
    let dir = tempfile::tempdir().expect("tempdir");
    let pool = temp_pool(&dir).await;
    let repo = SqliteHeritageRepo::new(pool).await.expect("create repo");

    let heritage = Heritage::new("Human", 10, 10)
        .with_secondary_skills(vec!["Herbalism".to_string()])
        .with_benefit("Adaptable");
    repo.save(&heritage).await.expect("save");

    let mut updated = heritage.clone();
    updated.base_body = 12;
    repo.save(&updated).await.expect("resave");

    let loaded = repo.get(heritage.id).await.unwrap().unwrap();
    assert_eq!(loaded.base_body, 12);
    assert_eq!(loaded.secondary_skills, vec!["Herbalism".to_string()]);
    assert_eq!(repo.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn rarity_settings_persist_as_single_row() {
    let dir = tempfile::tempdir().expect("tempdir");
    let pool = temp_pool(&dir).await;
    let clock = fixed_clock();
    let repo = SqliteSettingsRepo::new(pool, clock).await.expect("create repo");

    assert!(repo.get_rarity().await.unwrap().is_none());

    repo.save_rarity(&RaritySettings::default()).await.unwrap();
    let custom = RaritySettings::new(60, 30, 12, 2).unwrap();
    repo.save_rarity(&custom).await.unwrap();

    let loaded = repo.get_rarity().await.unwrap().unwrap();
    assert_eq!(loaded, custom);
}
