//! RSVP use case.
//!
//! Registers a character for an event. Retired characters cannot RSVP, and a
//! character registers at most once per event.

use std::sync::Arc;

use emberfall_domain::{CharacterId, DomainError, EventId, Rsvp};

use crate::infrastructure::ports::{CharacterRepo, ClockPort, EventRepo};

use super::error::EventError;

pub struct RsvpToEvent {
    event_repo: Arc<dyn EventRepo>,
    character_repo: Arc<dyn CharacterRepo>,
    clock: Arc<dyn ClockPort>,
}

impl RsvpToEvent {
    pub fn new(
        event_repo: Arc<dyn EventRepo>,
        character_repo: Arc<dyn CharacterRepo>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            event_repo,
            character_repo,
            clock,
        }
    }

    pub async fn execute(
        &self,
        event_id: EventId,
        character_id: CharacterId,
    ) -> Result<Rsvp, EventError> {
        if self.event_repo.get(event_id).await?.is_none() {
            return Err(EventError::EventNotFound(event_id));
        }

        let character = self
            .character_repo
            .get(character_id)
            .await?
            .ok_or(EventError::CharacterNotFound(character_id))?;
        if !character.status.can_participate() {
            return Err(DomainError::invalid_state_transition(
                "Retired characters cannot RSVP to events",
            )
            .into());
        }

        if self
            .event_repo
            .get_rsvp(event_id, character_id)
            .await?
            .is_some()
        {
            return Err(EventError::DuplicateRsvp(character_id));
        }

        let rsvp = Rsvp::new(event_id, character_id, self.clock.now());
        self.event_repo.save_rsvp(&rsvp).await?;

        tracing::info!(event_id = %event_id, character_id = %character_id, "Recorded RSVP");
        Ok(rsvp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{MockCharacterRepo, MockClockPort, MockEventRepo};
    use chrono::{Duration, TimeZone, Utc};
    use emberfall_domain::{
        ArchetypeId, ChapterId, Character, CultureId, Event, Heritage, RsvpStatus, UserId,
    };

    fn fixed_now() -> chrono::DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000, 0).unwrap()
    }

    fn test_event() -> Event {
        Event::new(
            ChapterId::new(),
            "Spring Gathering",
            fixed_now(),
            fixed_now() + Duration::hours(8),
            3,
            fixed_now(),
        )
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
    async fn when_character_is_eligible_rsvp_is_registered() {
        let event = test_event();
        let event_id = event.id;
        let character = test_character();
        let character_id = character.id;

        let mut event_repo = MockEventRepo::new();
        event_repo
            .expect_get()
            .returning(move |_| Ok(Some(event.clone())));
        event_repo.expect_get_rsvp().returning(|_, _| Ok(None));
        event_repo.expect_save_rsvp().times(1).returning(|_| Ok(()));

        let mut character_repo = MockCharacterRepo::new();
        character_repo
            .expect_get()
            .returning(move |_| Ok(Some(character.clone())));

        let use_case = RsvpToEvent::new(Arc::new(event_repo), Arc::new(character_repo), clock());
        let rsvp = use_case.execute(event_id, character_id).await.unwrap();
        assert_eq!(rsvp.status, RsvpStatus::Registered);
    }

    #[tokio::test]
    async fn when_character_already_registered_rsvp_is_rejected() {
        let event = test_event();
        let event_id = event.id;
        let character = test_character();
        let character_id = character.id;

        let mut event_repo = MockEventRepo::new();
        event_repo
            .expect_get()
            .returning(move |_| Ok(Some(event.clone())));
        event_repo
            .expect_get_rsvp()
            .returning(move |eid, cid| Ok(Some(Rsvp::new(eid, cid, fixed_now()))));
        event_repo.expect_save_rsvp().times(0);

        let mut character_repo = MockCharacterRepo::new();
        character_repo
            .expect_get()
            .returning(move |_| Ok(Some(character.clone())));

        let use_case = RsvpToEvent::new(Arc::new(event_repo), Arc::new(character_repo), clock());
        let result = use_case.execute(event_id, character_id).await;
        assert!(matches!(result, Err(EventError::DuplicateRsvp(_))));
    }

    #[tokio::test]
    async fn when_character_is_retired_rsvp_is_rejected() {
        let event = test_event();
        let event_id = event.id;
        let mut character = test_character();
        character.retire("left the game", fixed_now()).unwrap();
        let character_id = character.id;

        let mut event_repo = MockEventRepo::new();
        event_repo
            .expect_get()
            .returning(move |_| Ok(Some(event.clone())));
        event_repo.expect_save_rsvp().times(0);

        let mut character_repo = MockCharacterRepo::new();
        character_repo
            .expect_get()
            .returning(move |_| Ok(Some(character.clone())));

        let use_case = RsvpToEvent::new(Arc::new(event_repo), Arc::new(character_repo), clock());
        let result = use_case.execute(event_id, character_id).await;
        assert!(matches!(result, Err(EventError::Validation(_))));
    }
}
