//! Character operation errors.

use emberfall_domain::{ArchetypeId, CharacterId, CultureId, DomainError, HeritageId, UserId};

use crate::infrastructure::ports::RepoError;

#[derive(Debug, thiserror::Error)]
pub enum CharacterError {
    #[error("Character not found: {0}")]
    CharacterNotFound(CharacterId),
    #[error("User not found: {0}")]
    UserNotFound(UserId),
    #[error("Heritage not found: {0}")]
    HeritageNotFound(HeritageId),
    #[error("Culture not found: {0}")]
    CultureNotFound(CultureId),
    #[error("Archetype not found: {0}")]
    ArchetypeNotFound(ArchetypeId),
    #[error("Culture {culture} does not belong to heritage {heritage}")]
    CultureMismatch {
        culture: CultureId,
        heritage: HeritageId,
    },
    #[error("Skill \"{skill}\" requires \"{prerequisite}\" first")]
    PrerequisiteNotMet { skill: String, prerequisite: String },
    #[error("Insufficient experience: need {needed}, have {available}")]
    InsufficientExperience { needed: u32, available: u32 },
    #[error("Requires an admin account")]
    RequiresAdmin,
    #[error("Validation error: {0}")]
    Validation(#[from] DomainError),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}
