//! Emberfall Shared - Wire types for API clients
//!
//! This crate contains the request and response types exchanged between the
//! engine's REST API and any client.
//!
//! # Design Principles
//!
//! 1. **Minimal dependencies** - Only serde, uuid, serde_json, and thiserror
//! 2. **No business logic** - Pure data types and serialization
//! 3. **No domain IDs** - use raw `uuid::Uuid` in DTOs
//! 4. **Timestamps as RFC 3339 strings** - parsed at the API boundary

pub mod requests;
pub mod responses;

pub use requests::{
    AttendanceOutcome, AttendanceRequest, AwardExperienceRequest, CandleAction,
    CandleTransactionRequest, CreateArchetypeRequest, CreateChapterRequest,
    CreateCharacterRequest, CreateCultureRequest, CreateEventRequest, CreateHeritageRequest,
    CreateSkillRequest, CreateUserRequest, IncreaseAttributeRequest, PurchaseArchetypeRequest,
    PurchaseSkillRequest, RetireCharacterRequest, RsvpRequest, SetStatusRequest,
    UpdateRaritySettingsRequest,
};

pub use responses::{
    ArchetypeResponse, CandleBalanceResponse, CandleEntryResponse, ChapterResponse,
    CharacterResponse, CultureResponse, EventResponse, ExperienceEntryResponse, HeritageResponse,
    LedgerResponse, ReferenceValidationResponse, RsvpResponse, SkillQuoteResponse, SkillResponse,
    UserResponse, ValidationFinding,
};
