//! Increase attribute use case.
//!
//! Each point is priced at the attribute's value the moment it is bought, so
//! the cost of a multi-point purchase is the banded sum from the current
//! value, not a flat rate.

use std::sync::Arc;

use emberfall_domain::{
    attribute_cost, can_afford, Attribute, CharacterId, DomainError, ExperienceEntry,
    ExperienceEntryKind,
};

use crate::infrastructure::ports::{CharacterRepo, ClockPort};

use super::error::CharacterError;

#[derive(Debug, Clone)]
pub struct AttributePurchaseReceipt {
    pub character_id: CharacterId,
    pub attribute: Attribute,
    pub new_value: u32,
    pub cost: u32,
    pub remaining_experience: u32,
}

pub struct IncreaseAttribute {
    character_repo: Arc<dyn CharacterRepo>,
    clock: Arc<dyn ClockPort>,
}

impl IncreaseAttribute {
    pub fn new(character_repo: Arc<dyn CharacterRepo>, clock: Arc<dyn ClockPort>) -> Self {
        Self {
            character_repo,
            clock,
        }
    }

    pub async fn execute(
        &self,
        character_id: CharacterId,
        attribute: Attribute,
        points: u32,
    ) -> Result<AttributePurchaseReceipt, CharacterError> {
        if points == 0 {
            return Err(
                DomainError::validation("Must purchase at least one point").into(),
            );
        }

        let mut character = self
            .character_repo
            .get(character_id)
            .await?
            .ok_or(CharacterError::CharacterNotFound(character_id))?;

        character.ensure_can_spend()?;

        let current = match attribute {
            Attribute::Body => character.body,
            Attribute::Stamina => character.stamina,
        };
        let cost = attribute_cost(current, points);
        if !can_afford(character.experience, cost) {
            return Err(CharacterError::InsufficientExperience {
                needed: cost,
                available: character.experience,
            });
        }

        let now = self.clock.now();
        let available_before = character.experience;
        match attribute {
            Attribute::Body => character.increase_body(points, now)?,
            Attribute::Stamina => character.increase_stamina(points, now)?,
        }
        let new_value = current + points;

        let entry = ExperienceEntry::spend(
            character.id,
            ExperienceEntryKind::AttributePurchase,
            cost,
            format!("{} {} -> {}", attribute.display_name(), current, new_value),
            now,
        );
        let accepted = self
            .character_repo
            .commit_spend(&character, cost, &entry)
            .await?;
        if !accepted {
            return Err(CharacterError::InsufficientExperience {
                needed: cost,
                available: available_before,
            });
        }

        tracing::info!(
            character_id = %character.id,
            attribute = %attribute,
            points,
            cost,
            "Purchased attribute points"
        );

        Ok(AttributePurchaseReceipt {
            character_id: character.id,
            attribute,
            new_value,
            cost,
            remaining_experience: available_before - cost,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{MockCharacterRepo, MockClockPort};
    use chrono::{TimeZone, Utc};
    use emberfall_domain::{ArchetypeId, Character, CultureId, Heritage, UserId};

    fn fixed_now() -> chrono::DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000, 0).unwrap()
    }

    fn test_character() -> Character {
        let heritage = Heritage::new("Human", 10, 10);
        Character::new(
            UserId::new(),
            "Maeve",
            &heritage,
            CultureId::new(),
            ArchetypeId::new(),
            fixed_now(),
        )
    }

    fn clock() -> Arc<MockClockPort> {
        let mut clock = MockClockPort::new();
        clock.expect_now().returning(fixed_now);
        Arc::new(clock)
    }

    #[tokio::test]
    async fn when_points_fit_budget_body_increases_at_banded_cost() {
        let character = test_character();
        let character_id = character.id;

        let mut character_repo = MockCharacterRepo::new();
        let character_clone = character.clone();
        character_repo
            .expect_get()
            .returning(move |_| Ok(Some(character_clone.clone())));
        character_repo
            .expect_commit_spend()
            .withf(|character, cost, entry| {
                character.body == 13 && *cost == 3 && entry.delta == -3
            })
            .times(1)
            .returning(|_, _, _| Ok(true));

        let use_case = IncreaseAttribute::new(Arc::new(character_repo), clock());
        let receipt = use_case
            .execute(character_id, Attribute::Body, 3)
            .await
            .unwrap();

        assert_eq!(receipt.new_value, 13);
        assert_eq!(receipt.cost, 3);
        assert_eq!(receipt.remaining_experience, 22);
    }

    #[tokio::test]
    async fn when_purchase_crosses_a_band_the_higher_rate_applies_past_it() {
        let mut character = test_character();
        character.body = 18;
        let character_id = character.id;

        let mut character_repo = MockCharacterRepo::new();
        let character_clone = character.clone();
        character_repo
            .expect_get()
            .returning(move |_| Ok(Some(character_clone.clone())));
        // 18 -> 22: two points at 1 XP, two at 2 XP
        character_repo
            .expect_commit_spend()
            .withf(|_, cost, _| *cost == 6)
            .times(1)
            .returning(|_, _, _| Ok(true));

        let use_case = IncreaseAttribute::new(Arc::new(character_repo), clock());
        let receipt = use_case
            .execute(character_id, Attribute::Body, 4)
            .await
            .unwrap();
        assert_eq!(receipt.cost, 6);
    }

    #[tokio::test]
    async fn when_cost_exceeds_balance_purchase_is_rejected() {
        let mut character = test_character();
        character.experience = 2;
        let character_id = character.id;

        let mut character_repo = MockCharacterRepo::new();
        let character_clone = character.clone();
        character_repo
            .expect_get()
            .returning(move |_| Ok(Some(character_clone.clone())));
        character_repo.expect_commit_spend().times(0);

        let use_case = IncreaseAttribute::new(Arc::new(character_repo), clock());
        let result = use_case.execute(character_id, Attribute::Stamina, 3).await;

        assert!(matches!(
            result,
            Err(CharacterError::InsufficientExperience {
                needed: 3,
                available: 2
            })
        ));
    }

    #[tokio::test]
    async fn when_zero_points_requested_purchase_is_rejected() {
        let character_repo = MockCharacterRepo::new();
        let use_case = IncreaseAttribute::new(Arc::new(character_repo), clock());

        let result = use_case
            .execute(CharacterId::new(), Attribute::Body, 0)
            .await;
        assert!(matches!(result, Err(CharacterError::Validation(_))));
    }
}
