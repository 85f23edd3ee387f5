//! Shared skill-pricing lookup.
//!
//! Both the purchase path and the quote endpoint price through this one
//! function so the two can never drift apart.

use emberfall_domain::{classify_skill, Character, SkillPricing, SkillTier};

use crate::use_cases::reference::ReferenceDataService;

/// Classify a skill against the cached reference tables for this character.
///
/// Missing heritage or archetype rows price at the default tier instead of
/// failing - the conservative fallback for incomplete data.
pub(crate) fn price_skill(
    reference: &ReferenceDataService,
    character: &Character,
    skill_name: &str,
) -> SkillPricing {
    let heritage = reference.heritage(character.heritage_id);
    let archetype = reference.archetype(character.archetype_id);
    let second = character
        .second_archetype_id
        .and_then(|id| reference.archetype(id));

    match (heritage, archetype) {
        (Some(heritage), Some(archetype)) => {
            classify_skill(skill_name, &heritage, &archetype, second.as_ref())
        }
        _ => SkillPricing {
            tier: SkillTier::Other,
            cost: SkillTier::Other.xp_cost(),
        },
    }
}
