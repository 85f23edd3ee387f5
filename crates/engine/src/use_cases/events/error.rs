//! Event operation errors.

use emberfall_domain::{ChapterId, CharacterId, DomainError, EventId};

use crate::infrastructure::ports::RepoError;

#[derive(Debug, thiserror::Error)]
pub enum EventError {
    #[error("Event not found: {0}")]
    EventNotFound(EventId),
    #[error("Chapter not found: {0}")]
    ChapterNotFound(ChapterId),
    #[error("Character not found: {0}")]
    CharacterNotFound(CharacterId),
    #[error("Character {0} has already RSVP'd to this event")]
    DuplicateRsvp(CharacterId),
    #[error("Character {0} has no RSVP for this event")]
    RsvpNotFound(CharacterId),
    #[error("Validation error: {0}")]
    Validation(#[from] DomainError),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}
