//! Domain entity -> wire DTO conversions.
//!
//! The shared crate is plain data; everything that knows about domain types
//! lives on this side of the boundary.

use emberfall_domain::{
    Archetype, CandleEntry, Chapter, CharacterStatus, Culture, Event, ExperienceEntry, Heritage,
    Rsvp, Skill, User,
};
use emberfall_shared::responses::{
    ArchetypeResponse, CandleBalanceResponse, CandleEntryResponse, ChapterResponse,
    CharacterResponse, CultureResponse, EventResponse, ExperienceEntryResponse, HeritageResponse,
    LedgerResponse, RsvpResponse, SkillResponse, UserResponse,
};

use crate::use_cases::candles::CandleBalance;
use crate::use_cases::characters::CharacterDetails;

pub fn user_response(user: &User) -> UserResponse {
    UserResponse {
        id: user.id.to_uuid(),
        email: user.email.clone(),
        display_name: user.display_name.clone(),
        role: user.role,
        chapter_id: user.chapter_id.map(|c| c.to_uuid()),
        created_at: user.created_at.to_rfc3339(),
    }
}

pub fn chapter_response(chapter: &Chapter) -> ChapterResponse {
    ChapterResponse {
        id: chapter.id.to_uuid(),
        name: chapter.name.clone(),
        region: chapter.region.clone(),
        active: chapter.active,
        created_at: chapter.created_at.to_rfc3339(),
    }
}

pub fn heritage_response(heritage: &Heritage) -> HeritageResponse {
    HeritageResponse {
        id: heritage.id.to_uuid(),
        name: heritage.name.clone(),
        base_body: heritage.base_body,
        base_stamina: heritage.base_stamina,
        secondary_skills: heritage.secondary_skills.clone(),
        benefit: heritage.benefit.clone(),
        weakness: heritage.weakness.clone(),
        costume_requirement: heritage.costume_requirement.clone(),
    }
}

pub fn culture_response(culture: &Culture) -> CultureResponse {
    CultureResponse {
        id: culture.id.to_uuid(),
        heritage_id: culture.heritage_id.to_uuid(),
        name: culture.name.clone(),
        primary_skills: culture.primary_skills.clone(),
        secondary_skills: culture.secondary_skills.clone(),
        description: culture.description.clone(),
    }
}

pub fn archetype_response(archetype: &Archetype) -> ArchetypeResponse {
    ArchetypeResponse {
        id: archetype.id.to_uuid(),
        name: archetype.name.clone(),
        primary_skills: archetype.primary_skills.clone(),
        secondary_skills: archetype.secondary_skills.clone(),
        description: archetype.description.clone(),
    }
}

pub fn skill_response(skill: &Skill) -> SkillResponse {
    SkillResponse {
        id: skill.id.to_uuid(),
        name: skill.name.clone(),
        description: skill.description.clone(),
        prerequisite: skill.prerequisite.clone(),
    }
}

pub fn character_response(details: &CharacterDetails) -> CharacterResponse {
    let character = &details.character;
    let retired_reason = match &character.status {
        CharacterStatus::Retired { reason } => Some(reason.clone()),
        _ => None,
    };

    CharacterResponse {
        id: character.id.to_uuid(),
        user_id: character.user_id.to_uuid(),
        name: character.name.clone(),
        heritage_id: character.heritage_id.to_uuid(),
        culture_id: character.culture_id.to_uuid(),
        archetype_id: character.archetype_id.to_uuid(),
        second_archetype_id: character.second_archetype_id.map(|a| a.to_uuid()),
        body: character.body,
        stamina: character.stamina,
        experience: character.experience,
        total_xp_spent: details.total_spent,
        skills: character.skills.clone(),
        status: character.status.label().to_string(),
        retired_reason,
        created_at: character.created_at.to_rfc3339(),
        updated_at: character.updated_at.to_rfc3339(),
    }
}

pub fn experience_entry_response(entry: &ExperienceEntry) -> ExperienceEntryResponse {
    ExperienceEntryResponse {
        id: entry.id.to_uuid(),
        character_id: entry.character_id.to_uuid(),
        delta: entry.delta,
        kind: entry.kind,
        note: entry.note.clone(),
        created_at: entry.created_at.to_rfc3339(),
    }
}

pub fn ledger_response(
    character_id: emberfall_domain::CharacterId,
    entries: &[ExperienceEntry],
    total_spent: u64,
) -> LedgerResponse {
    LedgerResponse {
        character_id: character_id.to_uuid(),
        total_spent,
        entries: entries.iter().map(experience_entry_response).collect(),
    }
}

pub fn candle_entry_response(entry: &CandleEntry) -> CandleEntryResponse {
    CandleEntryResponse {
        id: entry.id.to_uuid(),
        character_id: entry.character_id.to_uuid(),
        delta: entry.delta,
        note: entry.note.clone(),
        created_at: entry.created_at.to_rfc3339(),
    }
}

pub fn candle_balance_response(balance: &CandleBalance) -> CandleBalanceResponse {
    CandleBalanceResponse {
        character_id: balance.character_id.to_uuid(),
        balance: balance.balance,
        entries: balance.entries.iter().map(candle_entry_response).collect(),
    }
}

pub fn event_response(event: &Event) -> EventResponse {
    EventResponse {
        id: event.id.to_uuid(),
        chapter_id: event.chapter_id.to_uuid(),
        name: event.name.clone(),
        description: event.description.clone(),
        starts_at: event.starts_at.to_rfc3339(),
        ends_at: event.ends_at.to_rfc3339(),
        xp_award: event.xp_award,
        created_at: event.created_at.to_rfc3339(),
    }
}

pub fn rsvp_response(rsvp: &Rsvp) -> RsvpResponse {
    RsvpResponse {
        id: rsvp.id.to_uuid(),
        event_id: rsvp.event_id.to_uuid(),
        character_id: rsvp.character_id.to_uuid(),
        status: rsvp.status,
        created_at: rsvp.created_at.to_rfc3339(),
        updated_at: rsvp.updated_at.to_rfc3339(),
    }
}
