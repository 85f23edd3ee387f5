//! Character lifecycle transitions.
//!
//! `Active ⇄ Inactive` is a reversible flag; retirement is terminal and
//! requires a reason. The state machine itself lives on `CharacterStatus`.

use std::sync::Arc;

use emberfall_domain::{Character, CharacterId};

use crate::infrastructure::ports::{CharacterRepo, ClockPort};

use super::error::CharacterError;

pub struct SetCharacterStatus {
    character_repo: Arc<dyn CharacterRepo>,
    clock: Arc<dyn ClockPort>,
}

impl SetCharacterStatus {
    pub fn new(character_repo: Arc<dyn CharacterRepo>, clock: Arc<dyn ClockPort>) -> Self {
        Self {
            character_repo,
            clock,
        }
    }

    pub async fn execute(
        &self,
        character_id: CharacterId,
        active: bool,
    ) -> Result<Character, CharacterError> {
        let mut character = self
            .character_repo
            .get(character_id)
            .await?
            .ok_or(CharacterError::CharacterNotFound(character_id))?;

        character.set_active(active, self.clock.now())?;
        self.character_repo.save(&character).await?;
        Ok(character)
    }
}

pub struct RetireCharacter {
    character_repo: Arc<dyn CharacterRepo>,
    clock: Arc<dyn ClockPort>,
}

impl RetireCharacter {
    pub fn new(character_repo: Arc<dyn CharacterRepo>, clock: Arc<dyn ClockPort>) -> Self {
        Self {
            character_repo,
            clock,
        }
    }

    pub async fn execute(
        &self,
        character_id: CharacterId,
        reason: String,
    ) -> Result<Character, CharacterError> {
        let mut character = self
            .character_repo
            .get(character_id)
            .await?
            .ok_or(CharacterError::CharacterNotFound(character_id))?;

        character.retire(reason, self.clock.now())?;
        self.character_repo.save(&character).await?;

        tracing::info!(character_id = %character.id, "Retired character");
        Ok(character)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{MockCharacterRepo, MockClockPort};
    use chrono::{TimeZone, Utc};
    use emberfall_domain::{ArchetypeId, CharacterStatus, CultureId, Heritage, UserId};

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

    fn repo_with(character: Character, expect_save: usize) -> MockCharacterRepo {
        let mut character_repo = MockCharacterRepo::new();
        character_repo
            .expect_get()
            .returning(move |_| Ok(Some(character.clone())));
        character_repo
            .expect_save()
            .times(expect_save)
            .returning(|_| Ok(()));
        character_repo
    }

    #[tokio::test]
    async fn when_deactivated_character_becomes_inactive() {
        let character = test_character();
        let character_id = character.id;
        let use_case = SetCharacterStatus::new(Arc::new(repo_with(character, 1)), clock());

        let updated = use_case.execute(character_id, false).await.unwrap();
        assert_eq!(updated.status, CharacterStatus::Inactive);
    }

    #[tokio::test]
    async fn when_retired_without_reason_transition_is_rejected() {
        let character = test_character();
        let character_id = character.id;
        let use_case = RetireCharacter::new(Arc::new(repo_with(character, 0)), clock());

        let result = use_case.execute(character_id, "  ".to_string()).await;
        assert!(matches!(result, Err(CharacterError::Validation(_))));
    }

    #[tokio::test]
    async fn when_retired_character_is_reactivated_transition_is_rejected() {
        let mut character = test_character();
        character.retire("left the game", fixed_now()).unwrap();
        let character_id = character.id;
        let use_case = SetCharacterStatus::new(Arc::new(repo_with(character, 0)), clock());

        let result = use_case.execute(character_id, true).await;
        assert!(matches!(result, Err(CharacterError::Validation(_))));
    }
}
