//! Emberfall domain - campaign entities, the experience economy, and invariants.

pub mod economy;
pub mod entities;
pub mod error;
pub mod ids;
pub mod value_objects;

// Re-export all entities (explicit list in entities/mod.rs)
pub use entities::{
    candle_balance, total_spent, Archetype, CandleEntry, Chapter, Character, Culture, Event,
    ExperienceEntry, ExperienceEntryKind, Heritage, Rsvp, RsvpStatus, Skill, User, UserRole,
};

pub use error::DomainError;

// Re-export the economy core
pub use economy::{
    attribute_cost, attribute_point_cost, attribute_purchase_cost, can_afford, classify_skill,
    summarize, LedgerTotals, SkillPricing, SkillTier, SpendingSnapshot, CREATION_XP_BUDGET,
    SECOND_ARCHETYPE_COST,
};

// Re-export ID types
pub use ids::{
    ArchetypeId, CandleEntryId, ChapterId, CharacterId, CultureId, EventId, ExperienceEntryId,
    HeritageId, RsvpId, SkillId, UserId,
};

// Re-export value objects (explicit list in value_objects/mod.rs)
pub use value_objects::{Attribute, CharacterStatus, RaritySettings};
