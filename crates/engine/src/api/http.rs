//! HTTP routes.

use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use emberfall_domain::{
    ArchetypeId, ChapterId, CharacterId, CultureId, EventId, HeritageId, RaritySettings, UserId,
};
use emberfall_shared::requests::{
    AttendanceOutcome, AttendanceRequest, AwardExperienceRequest, CandleAction,
    CandleTransactionRequest, CreateArchetypeRequest, CreateChapterRequest,
    CreateCharacterRequest, CreateCultureRequest, CreateEventRequest, CreateHeritageRequest,
    CreateSkillRequest, CreateUserRequest, IncreaseAttributeRequest, PurchaseArchetypeRequest,
    PurchaseSkillRequest, RetireCharacterRequest, RsvpRequest, SetStatusRequest,
    UpdateRaritySettingsRequest,
};
use emberfall_shared::responses::{
    ArchetypeResponse, CandleBalanceResponse, CandleEntryResponse, ChapterResponse,
    CharacterResponse, CultureResponse, EventResponse, HeritageResponse, LedgerResponse,
    ReferenceValidationResponse, RsvpResponse, SkillQuoteResponse, SkillResponse, UserResponse,
    ValidationFinding,
};

use crate::app::App;
use crate::use_cases::characters::CreateCharacterInput;
use crate::use_cases::events;
use crate::use_cases::reference::{NewArchetype, NewCulture, NewHeritage, NewSkill};
use crate::use_cases::NewUser;

use super::conversions::*;
use super::error::ApiError;

/// Create all HTTP routes.
pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/", get(health))
        .route("/api/health", get(health))
        // Accounts and organization
        .route("/api/users", get(list_users).post(create_user))
        .route("/api/users/{id}", get(get_user))
        .route("/api/users/{id}/characters", get(list_user_characters))
        .route("/api/chapters", get(list_chapters).post(create_chapter))
        .route("/api/chapters/{id}", get(get_chapter))
        .route("/api/chapters/{id}/deactivate", post(deactivate_chapter))
        // Reference data
        .route("/api/heritages", get(list_heritages).post(create_heritage))
        .route("/api/cultures", get(list_cultures).post(create_culture))
        .route("/api/archetypes", get(list_archetypes).post(create_archetype))
        .route("/api/skills", get(list_skills).post(create_skill))
        .route("/api/reference/validate", post(validate_reference))
        .route("/api/settings/rarity", get(get_rarity).put(update_rarity))
        // Characters and the economy
        .route("/api/characters", post(create_character))
        .route("/api/characters/{id}", get(get_character))
        .route("/api/characters/{id}/skills", post(purchase_skill))
        .route("/api/characters/{id}/attributes", post(increase_attribute))
        .route("/api/characters/{id}/archetype", post(purchase_archetype))
        .route("/api/characters/{id}/experience", post(award_experience))
        .route("/api/characters/{id}/retire", post(retire_character))
        .route("/api/characters/{id}/status", post(set_character_status))
        .route("/api/characters/{id}/ledger", get(get_ledger))
        .route("/api/characters/{id}/quote", get(quote_skill))
        .route(
            "/api/characters/{id}/candles",
            get(get_candles).post(transact_candles),
        )
        // Events
        .route("/api/events", get(list_events).post(create_event))
        .route("/api/events/{id}/rsvps", get(list_rsvps))
        .route("/api/events/{id}/rsvp", post(rsvp_to_event))
        .route("/api/events/{id}/attendance", post(record_attendance))
}

async fn health() -> &'static str {
    "OK"
}

/// The session collaborator is out of scope; the API trusts this header the
/// way the original trusted its session cookie.
fn user_id_from_headers(headers: &HeaderMap) -> Result<UserId, ApiError> {
    let raw = headers
        .get("x-user-id")
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| ApiError::BadRequest("Missing X-User-Id header".to_string()))?;
    let uuid = Uuid::parse_str(raw)
        .map_err(|_| ApiError::BadRequest("Invalid X-User-Id header".to_string()))?;
    Ok(UserId::from_uuid(uuid))
}

fn parse_timestamp(value: &str, field: &str) -> Result<DateTime<Utc>, ApiError> {
    DateTime::parse_from_rfc3339(value)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|_| ApiError::BadRequest(format!("{field} must be an RFC 3339 timestamp")))
}

// =============================================================================
// Accounts
// =============================================================================

async fn create_user(
    State(app): State<Arc<App>>,
    Json(request): Json<CreateUserRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = app
        .use_cases
        .accounts
        .register(NewUser {
            email: request.email,
            display_name: request.display_name,
            role: request.role,
            chapter_id: request.chapter_id.map(ChapterId::from_uuid),
        })
        .await?;
    Ok(Json(user_response(&user)))
}

async fn list_users(State(app): State<Arc<App>>) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let users = app.use_cases.accounts.list().await?;
    Ok(Json(users.iter().map(user_response).collect()))
}

async fn get_user(
    State(app): State<Arc<App>>,
    Path(id): Path<Uuid>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = app.use_cases.accounts.get(UserId::from_uuid(id)).await?;
    Ok(Json(user_response(&user)))
}

// =============================================================================
// Chapters
// =============================================================================

async fn create_chapter(
    State(app): State<Arc<App>>,
    Json(request): Json<CreateChapterRequest>,
) -> Result<Json<ChapterResponse>, ApiError> {
    let chapter = app
        .use_cases
        .chapters
        .create(request.name, request.region)
        .await?;
    Ok(Json(chapter_response(&chapter)))
}

async fn list_chapters(
    State(app): State<Arc<App>>,
) -> Result<Json<Vec<ChapterResponse>>, ApiError> {
    let chapters = app.use_cases.chapters.list().await?;
    Ok(Json(chapters.iter().map(chapter_response).collect()))
}

async fn get_chapter(
    State(app): State<Arc<App>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ChapterResponse>, ApiError> {
    let chapter = app.use_cases.chapters.get(ChapterId::from_uuid(id)).await?;
    Ok(Json(chapter_response(&chapter)))
}

async fn deactivate_chapter(
    State(app): State<Arc<App>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ChapterResponse>, ApiError> {
    let chapter = app
        .use_cases
        .chapters
        .deactivate(ChapterId::from_uuid(id))
        .await?;
    Ok(Json(chapter_response(&chapter)))
}

// =============================================================================
// Reference data
// =============================================================================

async fn list_heritages(
    State(app): State<Arc<App>>,
) -> Result<Json<Vec<HeritageResponse>>, ApiError> {
    let mut heritages = app.reference.heritages();
    heritages.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(Json(heritages.iter().map(heritage_response).collect()))
}

async fn create_heritage(
    State(app): State<Arc<App>>,
    Json(request): Json<CreateHeritageRequest>,
) -> Result<Json<HeritageResponse>, ApiError> {
    let heritage = app
        .use_cases
        .reference
        .admin
        .create_heritage(NewHeritage {
            name: request.name,
            base_body: request.base_body,
            base_stamina: request.base_stamina,
            secondary_skills: request.secondary_skills,
            benefit: request.benefit,
            weakness: request.weakness,
            costume_requirement: request.costume_requirement,
        })
        .await?;
    Ok(Json(heritage_response(&heritage)))
}

async fn list_cultures(
    State(app): State<Arc<App>>,
) -> Result<Json<Vec<CultureResponse>>, ApiError> {
    let mut cultures = app.reference.cultures();
    cultures.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(Json(cultures.iter().map(culture_response).collect()))
}

async fn create_culture(
    State(app): State<Arc<App>>,
    Json(request): Json<CreateCultureRequest>,
) -> Result<Json<CultureResponse>, ApiError> {
    let culture = app
        .use_cases
        .reference
        .admin
        .create_culture(NewCulture {
            heritage_id: HeritageId::from_uuid(request.heritage_id),
            name: request.name,
            primary_skills: request.primary_skills,
            secondary_skills: request.secondary_skills,
            description: request.description,
        })
        .await?;
    Ok(Json(culture_response(&culture)))
}

async fn list_archetypes(
    State(app): State<Arc<App>>,
) -> Result<Json<Vec<ArchetypeResponse>>, ApiError> {
    let mut archetypes = app.reference.archetypes();
    archetypes.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(Json(archetypes.iter().map(archetype_response).collect()))
}

async fn create_archetype(
    State(app): State<Arc<App>>,
    Json(request): Json<CreateArchetypeRequest>,
) -> Result<Json<ArchetypeResponse>, ApiError> {
    let archetype = app
        .use_cases
        .reference
        .admin
        .create_archetype(NewArchetype {
            name: request.name,
            primary_skills: request.primary_skills,
            secondary_skills: request.secondary_skills,
            description: request.description,
        })
        .await?;
    Ok(Json(archetype_response(&archetype)))
}

async fn list_skills(State(app): State<Arc<App>>) -> Result<Json<Vec<SkillResponse>>, ApiError> {
    let mut skills = app.reference.skills();
    skills.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(Json(skills.iter().map(skill_response).collect()))
}

async fn create_skill(
    State(app): State<Arc<App>>,
    Json(request): Json<CreateSkillRequest>,
) -> Result<Json<SkillResponse>, ApiError> {
    let skill = app
        .use_cases
        .reference
        .admin
        .create_skill(NewSkill {
            name: request.name,
            description: request.description,
            prerequisite: request.prerequisite,
        })
        .await?;
    Ok(Json(skill_response(&skill)))
}

async fn validate_reference(
    State(app): State<Arc<App>>,
) -> Result<Json<ReferenceValidationResponse>, ApiError> {
    let report = app.use_cases.reference.validate.execute();
    Ok(Json(ReferenceValidationResponse {
        valid: report.is_valid(),
        findings: report
            .findings
            .into_iter()
            .map(|finding| ValidationFinding {
                skill: finding.skill,
                message: finding.message,
            })
            .collect(),
    }))
}

async fn get_rarity(State(app): State<Arc<App>>) -> Result<Json<RaritySettings>, ApiError> {
    let settings = app.use_cases.reference.admin.get_rarity().await?;
    Ok(Json(settings))
}

async fn update_rarity(
    State(app): State<Arc<App>>,
    Json(request): Json<UpdateRaritySettingsRequest>,
) -> Result<Json<RaritySettings>, ApiError> {
    let settings = app
        .use_cases
        .reference
        .admin
        .update_rarity(RaritySettings {
            common: request.common,
            rare: request.rare,
            epic: request.epic,
            legendary: request.legendary,
        })
        .await?;
    Ok(Json(settings))
}

// =============================================================================
// Characters
// =============================================================================

async fn create_character(
    State(app): State<Arc<App>>,
    headers: HeaderMap,
    Json(request): Json<CreateCharacterRequest>,
) -> Result<Json<CharacterResponse>, ApiError> {
    let user_id = user_id_from_headers(&headers)?;
    let character = app
        .use_cases
        .characters
        .create
        .execute(CreateCharacterInput {
            user_id,
            name: request.name,
            heritage_id: HeritageId::from_uuid(request.heritage_id),
            culture_id: CultureId::from_uuid(request.culture_id),
            archetype_id: ArchetypeId::from_uuid(request.archetype_id),
            skills: request.skills,
            body_points: request.body_points,
            stamina_points: request.stamina_points,
        })
        .await?;

    // A fresh character's spending is exactly its creation selections.
    let details = app.use_cases.characters.get.execute(character.id).await?;
    Ok(Json(character_response(&details)))
}

async fn get_character(
    State(app): State<Arc<App>>,
    Path(id): Path<Uuid>,
) -> Result<Json<CharacterResponse>, ApiError> {
    let details = app
        .use_cases
        .characters
        .get
        .execute(CharacterId::from_uuid(id))
        .await?;
    Ok(Json(character_response(&details)))
}

async fn list_user_characters(
    State(app): State<Arc<App>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<CharacterResponse>>, ApiError> {
    let details = app
        .use_cases
        .characters
        .list
        .execute(UserId::from_uuid(id))
        .await?;
    Ok(Json(details.iter().map(character_response).collect()))
}

async fn purchase_skill(
    State(app): State<Arc<App>>,
    Path(id): Path<Uuid>,
    Json(request): Json<PurchaseSkillRequest>,
) -> Result<Json<CharacterResponse>, ApiError> {
    let character_id = CharacterId::from_uuid(id);
    app.use_cases
        .characters
        .purchase_skill
        .execute(character_id, &request.skill)
        .await?;

    let details = app.use_cases.characters.get.execute(character_id).await?;
    Ok(Json(character_response(&details)))
}

async fn increase_attribute(
    State(app): State<Arc<App>>,
    Path(id): Path<Uuid>,
    Json(request): Json<IncreaseAttributeRequest>,
) -> Result<Json<CharacterResponse>, ApiError> {
    let character_id = CharacterId::from_uuid(id);
    app.use_cases
        .characters
        .increase_attribute
        .execute(character_id, request.attribute, request.points)
        .await?;

    let details = app.use_cases.characters.get.execute(character_id).await?;
    Ok(Json(character_response(&details)))
}

async fn purchase_archetype(
    State(app): State<Arc<App>>,
    Path(id): Path<Uuid>,
    Json(request): Json<PurchaseArchetypeRequest>,
) -> Result<Json<CharacterResponse>, ApiError> {
    let character_id = CharacterId::from_uuid(id);
    app.use_cases
        .characters
        .purchase_archetype
        .execute(character_id, ArchetypeId::from_uuid(request.archetype_id))
        .await?;

    let details = app.use_cases.characters.get.execute(character_id).await?;
    Ok(Json(character_response(&details)))
}

async fn award_experience(
    State(app): State<Arc<App>>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
    Json(request): Json<AwardExperienceRequest>,
) -> Result<Json<CharacterResponse>, ApiError> {
    let acting_user = user_id_from_headers(&headers)?;
    let character_id = CharacterId::from_uuid(id);
    app.use_cases
        .characters
        .award
        .execute(acting_user, character_id, request.amount, request.note)
        .await?;

    let details = app.use_cases.characters.get.execute(character_id).await?;
    Ok(Json(character_response(&details)))
}

async fn retire_character(
    State(app): State<Arc<App>>,
    Path(id): Path<Uuid>,
    Json(request): Json<RetireCharacterRequest>,
) -> Result<Json<CharacterResponse>, ApiError> {
    let character_id = CharacterId::from_uuid(id);
    app.use_cases
        .characters
        .retire
        .execute(character_id, request.reason)
        .await?;

    let details = app.use_cases.characters.get.execute(character_id).await?;
    Ok(Json(character_response(&details)))
}

async fn set_character_status(
    State(app): State<Arc<App>>,
    Path(id): Path<Uuid>,
    Json(request): Json<SetStatusRequest>,
) -> Result<Json<CharacterResponse>, ApiError> {
    let character_id = CharacterId::from_uuid(id);
    app.use_cases
        .characters
        .set_status
        .execute(character_id, request.active)
        .await?;

    let details = app.use_cases.characters.get.execute(character_id).await?;
    Ok(Json(character_response(&details)))
}

async fn get_ledger(
    State(app): State<Arc<App>>,
    Path(id): Path<Uuid>,
) -> Result<Json<LedgerResponse>, ApiError> {
    let character_id = CharacterId::from_uuid(id);
    let (entries, total_spent) = app.use_cases.characters.ledger.execute(character_id).await?;
    Ok(Json(ledger_response(character_id, &entries, total_spent)))
}

#[derive(Debug, Deserialize)]
struct QuoteParams {
    skill: String,
}

async fn quote_skill(
    State(app): State<Arc<App>>,
    Path(id): Path<Uuid>,
    Query(params): Query<QuoteParams>,
) -> Result<Json<SkillQuoteResponse>, ApiError> {
    let quote = app
        .use_cases
        .characters
        .quote
        .execute(CharacterId::from_uuid(id), &params.skill)
        .await?;
    Ok(Json(SkillQuoteResponse {
        skill: quote.skill,
        tier: quote.pricing.tier,
        cost: quote.pricing.cost,
        available: quote.available,
        affordable: quote.affordable,
    }))
}

// =============================================================================
// Candles
// =============================================================================

async fn get_candles(
    State(app): State<Arc<App>>,
    Path(id): Path<Uuid>,
) -> Result<Json<CandleBalanceResponse>, ApiError> {
    let balance = app
        .use_cases
        .candles
        .ledger
        .execute(CharacterId::from_uuid(id))
        .await?;
    Ok(Json(candle_balance_response(&balance)))
}

async fn transact_candles(
    State(app): State<Arc<App>>,
    Path(id): Path<Uuid>,
    Json(request): Json<CandleTransactionRequest>,
) -> Result<Json<CandleEntryResponse>, ApiError> {
    let character_id = CharacterId::from_uuid(id);
    let entry = match request.action {
        CandleAction::Grant => {
            app.use_cases
                .candles
                .grant
                .execute(character_id, request.amount, request.note)
                .await?
        }
        CandleAction::Spend => {
            app.use_cases
                .candles
                .spend
                .execute(character_id, request.amount, request.note)
                .await?
        }
    };
    Ok(Json(candle_entry_response(&entry)))
}

// =============================================================================
// Events
// =============================================================================

#[derive(Debug, Deserialize)]
struct EventListParams {
    chapter_id: Option<Uuid>,
}

async fn list_events(
    State(app): State<Arc<App>>,
    Query(params): Query<EventListParams>,
) -> Result<Json<Vec<EventResponse>>, ApiError> {
    let events = app
        .use_cases
        .events
        .list
        .execute(params.chapter_id.map(ChapterId::from_uuid))
        .await?;
    Ok(Json(events.iter().map(event_response).collect()))
}

async fn create_event(
    State(app): State<Arc<App>>,
    Json(request): Json<CreateEventRequest>,
) -> Result<Json<EventResponse>, ApiError> {
    let event = app
        .use_cases
        .events
        .schedule
        .execute(events::ScheduleEventInput {
            chapter_id: ChapterId::from_uuid(request.chapter_id),
            name: request.name,
            description: request.description,
            starts_at: parse_timestamp(&request.starts_at, "starts_at")?,
            ends_at: parse_timestamp(&request.ends_at, "ends_at")?,
            xp_award: request.xp_award,
        })
        .await?;
    Ok(Json(event_response(&event)))
}

async fn list_rsvps(
    State(app): State<Arc<App>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<RsvpResponse>>, ApiError> {
    let rsvps = app
        .use_cases
        .events
        .list
        .rsvps(EventId::from_uuid(id))
        .await?;
    Ok(Json(rsvps.iter().map(rsvp_response).collect()))
}

async fn rsvp_to_event(
    State(app): State<Arc<App>>,
    Path(id): Path<Uuid>,
    Json(request): Json<RsvpRequest>,
) -> Result<Json<RsvpResponse>, ApiError> {
    let rsvp = app
        .use_cases
        .events
        .rsvp
        .execute(
            EventId::from_uuid(id),
            CharacterId::from_uuid(request.character_id),
        )
        .await?;
    Ok(Json(rsvp_response(&rsvp)))
}

async fn record_attendance(
    State(app): State<Arc<App>>,
    Path(id): Path<Uuid>,
    Json(request): Json<AttendanceRequest>,
) -> Result<Json<RsvpResponse>, ApiError> {
    let outcome = match request.outcome {
        AttendanceOutcome::Attended => events::AttendanceOutcome::Attended,
        AttendanceOutcome::NoShow => events::AttendanceOutcome::NoShow,
    };
    let rsvp = app
        .use_cases
        .events
        .attendance
        .execute(
            EventId::from_uuid(id),
            CharacterId::from_uuid(request.character_id),
            outcome,
        )
        .await?;
    Ok(Json(rsvp_response(&rsvp)))
}
