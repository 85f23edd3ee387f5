//! Character use cases.
//!
//! Creation, the economy mutations (skills, attributes, second archetype,
//! awards), lifecycle transitions, and read models.

mod award_experience;
mod create_character;
mod error;
mod increase_attribute;
mod lifecycle;
mod pricing;
mod purchase_archetype;
mod purchase_skill;
mod queries;

use std::sync::Arc;

pub use award_experience::AwardExperience;
pub use create_character::{CreateCharacter, CreateCharacterInput};
pub use error::CharacterError;
pub use increase_attribute::{AttributePurchaseReceipt, IncreaseAttribute};
pub use lifecycle::{RetireCharacter, SetCharacterStatus};
pub use purchase_archetype::PurchaseSecondArchetype;
pub use purchase_skill::{PurchaseSkill, SkillPurchaseReceipt};
pub use queries::{
    CharacterDetails, GetCharacter, GetLedger, ListCharacters, QuoteSkill, SkillQuote,
};

/// Container for character use cases.
pub struct CharacterUseCases {
    pub create: Arc<CreateCharacter>,
    pub get: Arc<GetCharacter>,
    pub list: Arc<ListCharacters>,
    pub ledger: Arc<GetLedger>,
    pub quote: Arc<QuoteSkill>,
    pub purchase_skill: Arc<PurchaseSkill>,
    pub increase_attribute: Arc<IncreaseAttribute>,
    pub purchase_archetype: Arc<PurchaseSecondArchetype>,
    pub award: Arc<AwardExperience>,
    pub set_status: Arc<SetCharacterStatus>,
    pub retire: Arc<RetireCharacter>,
}
