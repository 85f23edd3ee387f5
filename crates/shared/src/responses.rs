//! Response payloads returned by the REST API.
//!
//! Conversions from domain entities live in the engine's API layer; this
//! module is plain data.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use emberfall_domain::economy::SkillTier;
use emberfall_domain::entities::{ExperienceEntryKind, RsvpStatus, UserRole};

// =============================================================================
// Accounts and organization
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub display_name: String,
    pub role: UserRole,
    pub chapter_id: Option<Uuid>,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChapterResponse {
    pub id: Uuid,
    pub name: String,
    pub region: String,
    pub active: bool,
    pub created_at: String,
}

// =============================================================================
// Reference data
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeritageResponse {
    pub id: Uuid,
    pub name: String,
    pub base_body: u32,
    pub base_stamina: u32,
    pub secondary_skills: Vec<String>,
    pub benefit: String,
    pub weakness: String,
    pub costume_requirement: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CultureResponse {
    pub id: Uuid,
    pub heritage_id: Uuid,
    pub name: String,
    pub primary_skills: Vec<String>,
    pub secondary_skills: Vec<String>,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchetypeResponse {
    pub id: Uuid,
    pub name: String,
    pub primary_skills: Vec<String>,
    pub secondary_skills: Vec<String>,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillResponse {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub prerequisite: Option<String>,
}

/// A single problem found by reference-data validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationFinding {
    pub skill: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceValidationResponse {
    pub valid: bool,
    pub findings: Vec<ValidationFinding>,
}

// =============================================================================
// Characters and the economy
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub heritage_id: Uuid,
    pub culture_id: Uuid,
    pub archetype_id: Uuid,
    pub second_archetype_id: Option<Uuid>,
    pub body: u32,
    pub stamina: u32,
    /// Spendable balance
    pub experience: u32,
    /// Derived from the experience ledger, never client-supplied
    pub total_xp_spent: u64,
    pub skills: Vec<String>,
    pub status: String,
    pub retired_reason: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperienceEntryResponse {
    pub id: Uuid,
    pub character_id: Uuid,
    pub delta: i64,
    pub kind: ExperienceEntryKind,
    pub note: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerResponse {
    pub character_id: Uuid,
    pub total_spent: u64,
    pub entries: Vec<ExperienceEntryResponse>,
}

/// Live pricing feedback for a candidate skill purchase.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillQuoteResponse {
    pub skill: String,
    pub tier: SkillTier,
    pub cost: u32,
    pub available: u32,
    pub affordable: bool,
}

// =============================================================================
// Candles
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandleEntryResponse {
    pub id: Uuid,
    pub character_id: Uuid,
    pub delta: i64,
    pub note: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandleBalanceResponse {
    pub character_id: Uuid,
    pub balance: i64,
    pub entries: Vec<CandleEntryResponse>,
}

// =============================================================================
// Events
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventResponse {
    pub id: Uuid,
    pub chapter_id: Uuid,
    pub name: String,
    pub description: String,
    pub starts_at: String,
    pub ends_at: String,
    pub xp_award: u32,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RsvpResponse {
    pub id: Uuid,
    pub event_id: Uuid,
    pub character_id: Uuid,
    pub status: RsvpStatus,
    pub created_at: String,
    pub updated_at: String,
}
