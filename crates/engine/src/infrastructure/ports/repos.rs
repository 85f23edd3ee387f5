//! Repository port traits for database access.

use async_trait::async_trait;
use emberfall_domain::{
    Archetype, ArchetypeId, CandleEntry, Chapter, ChapterId, Character, CharacterId, Culture,
    CultureId, Event, EventId, ExperienceEntry, Heritage, HeritageId, RaritySettings, Rsvp, Skill,
    SkillId, User, UserId,
};

use super::error::RepoError;

// =============================================================================
// Accounts and organization
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepo: Send + Sync {
    async fn get(&self, id: UserId) -> Result<Option<User>, RepoError>;
    async fn get_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;
    async fn save(&self, user: &User) -> Result<(), RepoError>;
    async fn list(&self) -> Result<Vec<User>, RepoError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChapterRepo: Send + Sync {
    async fn get(&self, id: ChapterId) -> Result<Option<Chapter>, RepoError>;
    async fn save(&self, chapter: &Chapter) -> Result<(), RepoError>;
    async fn list(&self) -> Result<Vec<Chapter>, RepoError>;
}

// =============================================================================
// Reference data (one port per table)
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HeritageRepo: Send + Sync {
    async fn get(&self, id: HeritageId) -> Result<Option<Heritage>, RepoError>;
    async fn save(&self, heritage: &Heritage) -> Result<(), RepoError>;
    async fn list(&self) -> Result<Vec<Heritage>, RepoError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CultureRepo: Send + Sync {
    async fn get(&self, id: CultureId) -> Result<Option<Culture>, RepoError>;
    async fn save(&self, culture: &Culture) -> Result<(), RepoError>;
    async fn list(&self) -> Result<Vec<Culture>, RepoError>;
    async fn list_for_heritage(&self, heritage_id: HeritageId) -> Result<Vec<Culture>, RepoError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ArchetypeRepo: Send + Sync {
    async fn get(&self, id: ArchetypeId) -> Result<Option<Archetype>, RepoError>;
    async fn save(&self, archetype: &Archetype) -> Result<(), RepoError>;
    async fn list(&self) -> Result<Vec<Archetype>, RepoError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SkillRepo: Send + Sync {
    async fn get(&self, id: SkillId) -> Result<Option<Skill>, RepoError>;
    async fn get_by_name(&self, name: &str) -> Result<Option<Skill>, RepoError>;
    async fn save(&self, skill: &Skill) -> Result<(), RepoError>;
    async fn list(&self) -> Result<Vec<Skill>, RepoError>;
}

// =============================================================================
// Characters and the experience ledger
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CharacterRepo: Send + Sync {
    async fn get(&self, id: CharacterId) -> Result<Option<Character>, RepoError>;
    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Character>, RepoError>;

    /// Persist a freshly created character together with its opening ledger
    /// entries in one transaction.
    async fn create(
        &self,
        character: &Character,
        opening_entries: &[ExperienceEntry],
    ) -> Result<(), RepoError>;

    /// Persist non-economy mutations (status changes, retirement).
    async fn save(&self, character: &Character) -> Result<(), RepoError>;

    /// Atomically commit a purchase: writes the mutated character fields,
    /// decrements `experience` relative to the stored balance, and appends
    /// the ledger entry in one transaction.
    ///
    /// Returns `Ok(false)` without writing anything when the stored balance
    /// is below `cost` or the character is retired - the caller's
    /// affordability pre-check lost a race and the purchase must be rejected.
    async fn commit_spend(
        &self,
        character: &Character,
        cost: u32,
        entry: &ExperienceEntry,
    ) -> Result<bool, RepoError>;

    /// Atomically award experience and append the ledger entry. Returns
    /// `Ok(false)` when the character is missing or retired.
    async fn commit_award(
        &self,
        character_id: CharacterId,
        amount: u32,
        entry: &ExperienceEntry,
    ) -> Result<bool, RepoError>;

    /// All ledger entries for a character, oldest first.
    async fn ledger(&self, character_id: CharacterId) -> Result<Vec<ExperienceEntry>, RepoError>;
}

// =============================================================================
// Candle currency
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CandleRepo: Send + Sync {
    /// All candle entries for a character, oldest first.
    async fn entries(&self, character_id: CharacterId) -> Result<Vec<CandleEntry>, RepoError>;

    /// Append a grant (positive delta).
    async fn grant(&self, entry: &CandleEntry) -> Result<(), RepoError>;

    /// Append a spend only if the summed balance covers it. Returns
    /// `Ok(false)` without writing when the spend would overdraw.
    async fn spend(&self, entry: &CandleEntry) -> Result<bool, RepoError>;
}

// =============================================================================
// Events and RSVPs
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventRepo: Send + Sync {
    async fn get(&self, id: EventId) -> Result<Option<Event>, RepoError>;
    async fn save(&self, event: &Event) -> Result<(), RepoError>;
    async fn list(&self) -> Result<Vec<Event>, RepoError>;
    async fn list_for_chapter(&self, chapter_id: ChapterId) -> Result<Vec<Event>, RepoError>;

    async fn get_rsvp(
        &self,
        event_id: EventId,
        character_id: CharacterId,
    ) -> Result<Option<Rsvp>, RepoError>;
    async fn save_rsvp(&self, rsvp: &Rsvp) -> Result<(), RepoError>;
    async fn list_rsvps(&self, event_id: EventId) -> Result<Vec<Rsvp>, RepoError>;
}

// =============================================================================
// Settings
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SettingsRepo: Send + Sync {
    async fn get_rarity(&self) -> Result<Option<RaritySettings>, RepoError>;
    async fn save_rarity(&self, settings: &RaritySettings) -> Result<(), RepoError>;
}
