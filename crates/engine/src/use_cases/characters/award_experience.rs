//! Admin experience award use case.

use std::sync::Arc;

use emberfall_domain::{
    CharacterId, DomainError, ExperienceEntry, ExperienceEntryKind, UserId,
};

use crate::infrastructure::ports::{CharacterRepo, ClockPort, UserRepo};

use super::error::CharacterError;

pub struct AwardExperience {
    character_repo: Arc<dyn CharacterRepo>,
    user_repo: Arc<dyn UserRepo>,
    clock: Arc<dyn ClockPort>,
}

impl AwardExperience {
    pub fn new(
        character_repo: Arc<dyn CharacterRepo>,
        user_repo: Arc<dyn UserRepo>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            character_repo,
            user_repo,
            clock,
        }
    }

    pub async fn execute(
        &self,
        acting_user_id: UserId,
        character_id: CharacterId,
        amount: u32,
        note: String,
    ) -> Result<(), CharacterError> {
        let user = self
            .user_repo
            .get(acting_user_id)
            .await?
            .ok_or(CharacterError::UserNotFound(acting_user_id))?;
        if !user.is_admin() {
            return Err(CharacterError::RequiresAdmin);
        }

        if amount == 0 {
            return Err(DomainError::validation("Award must be positive").into());
        }

        let character = self
            .character_repo
            .get(character_id)
            .await?
            .ok_or(CharacterError::CharacterNotFound(character_id))?;
        character.ensure_can_spend()?;

        let entry = ExperienceEntry::award(
            character_id,
            ExperienceEntryKind::Award,
            amount,
            note,
            self.clock.now(),
        );
        let accepted = self
            .character_repo
            .commit_award(character_id, amount, &entry)
            .await?;
        if !accepted {
            // Retired between the read above and the guarded update.
            return Err(DomainError::invalid_state_transition(
                "Retired characters cannot be awarded experience",
            )
            .into());
        }

        tracing::info!(
            character_id = %character_id,
            admin = %acting_user_id,
            amount,
            "Awarded experience"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{MockCharacterRepo, MockClockPort, MockUserRepo};
    use chrono::{TimeZone, Utc};
    use emberfall_domain::{
        ArchetypeId, Character, CultureId, Heritage, User, UserRole,
    };

    fn fixed_now() -> chrono::DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000, 0).unwrap()
    }

    fn admin() -> User {
        User::new("gm@example.com", "GM", fixed_now()).with_role(UserRole::Admin)
    }

    fn player() -> User {
        User::new("player@example.com", "Player", fixed_now())
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

    fn user_repo_with(user: User) -> MockUserRepo {
        let mut user_repo = MockUserRepo::new();
        user_repo
            .expect_get()
            .returning(move |_| Ok(Some(user.clone())));
        user_repo
    }

    #[tokio::test]
    async fn when_admin_awards_the_ledger_entry_is_positive() {
        let character = test_character();
        let character_id = character.id;

        let mut character_repo = MockCharacterRepo::new();
        let character_clone = character.clone();
        character_repo
            .expect_get()
            .returning(move |_| Ok(Some(character_clone.clone())));
        character_repo
            .expect_commit_award()
            .withf(move |id, amount, entry| {
                *id == character_id && *amount == 4 && entry.delta == 4
            })
            .times(1)
            .returning(|_, _, _| Ok(true));

        let use_case = AwardExperience::new(
            Arc::new(character_repo),
            Arc::new(user_repo_with(admin())),
            clock(),
        );
        let result = use_case
            .execute(UserId::new(), character_id, 4, "event cleanup".to_string())
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn when_acting_user_is_not_admin_award_is_rejected() {
        let mut character_repo = MockCharacterRepo::new();
        character_repo.expect_commit_award().times(0);

        let use_case = AwardExperience::new(
            Arc::new(character_repo),
            Arc::new(user_repo_with(player())),
            clock(),
        );
        let result = use_case
            .execute(UserId::new(), CharacterId::new(), 4, String::new())
            .await;
        assert!(matches!(result, Err(CharacterError::RequiresAdmin)));
    }

    #[tokio::test]
    async fn when_amount_is_zero_award_is_rejected() {
        let character_repo = MockCharacterRepo::new();
        let use_case = AwardExperience::new(
            Arc::new(character_repo),
            Arc::new(user_repo_with(admin())),
            clock(),
        );
        let result = use_case
            .execute(UserId::new(), CharacterId::new(), 0, String::new())
            .await;
        assert!(matches!(result, Err(CharacterError::Validation(_))));
    }

    #[tokio::test]
    async fn when_character_is_retired_award_is_rejected() {
        let mut character = test_character();
        character.retire("moved away", fixed_now()).unwrap();
        let character_id = character.id;

        let mut character_repo = MockCharacterRepo::new();
        let character_clone = character.clone();
        character_repo
            .expect_get()
            .returning(move |_| Ok(Some(character_clone.clone())));
        character_repo.expect_commit_award().times(0);

        let use_case = AwardExperience::new(
            Arc::new(character_repo),
            Arc::new(user_repo_with(admin())),
            clock(),
        );
        let result = use_case
            .execute(UserId::new(), character_id, 4, String::new())
            .await;
        assert!(matches!(result, Err(CharacterError::Validation(_))));
    }
}
