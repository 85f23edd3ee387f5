//! Request payloads accepted by the REST API.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use emberfall_domain::value_objects::Attribute;

// =============================================================================
// Accounts and organization
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
    pub display_name: String,
    /// "player" (default) or "admin"
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub chapter_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateChapterRequest {
    pub name: String,
    pub region: String,
}

// =============================================================================
// Reference data (admin tooling)
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateHeritageRequest {
    pub name: String,
    pub base_body: u32,
    pub base_stamina: u32,
    #[serde(default)]
    pub secondary_skills: Vec<String>,
    #[serde(default)]
    pub benefit: String,
    #[serde(default)]
    pub weakness: String,
    #[serde(default)]
    pub costume_requirement: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCultureRequest {
    pub heritage_id: Uuid,
    pub name: String,
    #[serde(default)]
    pub primary_skills: Vec<String>,
    #[serde(default)]
    pub secondary_skills: Vec<String>,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateArchetypeRequest {
    pub name: String,
    #[serde(default)]
    pub primary_skills: Vec<String>,
    #[serde(default)]
    pub secondary_skills: Vec<String>,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSkillRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Name of the skill that must be learned first
    #[serde(default)]
    pub prerequisite: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct UpdateRaritySettingsRequest {
    pub common: u32,
    pub rare: u32,
    pub epic: u32,
    pub legendary: u32,
}

// =============================================================================
// Characters and the economy
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCharacterRequest {
    pub name: String,
    pub heritage_id: Uuid,
    pub culture_id: Uuid,
    pub archetype_id: Uuid,
    /// Skill names selected at creation, priced against the creation budget
    #[serde(default)]
    pub skills: Vec<String>,
    /// Body points purchased above the heritage base
    #[serde(default)]
    pub body_points: u32,
    /// Stamina points purchased above the heritage base
    #[serde(default)]
    pub stamina_points: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseSkillRequest {
    pub skill: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct IncreaseAttributeRequest {
    pub attribute: Attribute,
    pub points: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PurchaseArchetypeRequest {
    pub archetype_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AwardExperienceRequest {
    pub amount: u32,
    #[serde(default)]
    pub note: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetireCharacterRequest {
    pub reason: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SetStatusRequest {
    pub active: bool,
}

// =============================================================================
// Candles
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandleAction {
    Grant,
    Spend,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandleTransactionRequest {
    pub action: CandleAction,
    pub amount: u32,
    #[serde(default)]
    pub note: String,
}

// =============================================================================
// Events
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEventRequest {
    pub chapter_id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// RFC 3339 timestamp
    pub starts_at: String,
    /// RFC 3339 timestamp
    pub ends_at: String,
    pub xp_award: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RsvpRequest {
    pub character_id: Uuid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceOutcome {
    Attended,
    NoShow,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AttendanceRequest {
    pub character_id: Uuid,
    pub outcome: AttendanceOutcome,
}
