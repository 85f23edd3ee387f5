//! Attendance recording use case.
//!
//! Flipping an RSVP from `Registered` to `Attended` awards the event's XP
//! through the experience ledger. The award fires only on that transition,
//! so an RSVP can never pay out twice. No-shows are recorded without award.

use std::sync::Arc;

use emberfall_domain::{
    CharacterId, EventId, ExperienceEntry, ExperienceEntryKind, Rsvp,
};

use crate::infrastructure::ports::{CharacterRepo, ClockPort, EventRepo};

use super::error::EventError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttendanceOutcome {
    Attended,
    NoShow,
}

pub struct RecordAttendance {
    event_repo: Arc<dyn EventRepo>,
    character_repo: Arc<dyn CharacterRepo>,
    clock: Arc<dyn ClockPort>,
}

impl RecordAttendance {
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
        outcome: AttendanceOutcome,
    ) -> Result<Rsvp, EventError> {
        let event = self
            .event_repo
            .get(event_id)
            .await?
            .ok_or(EventError::EventNotFound(event_id))?;

        let mut rsvp = self
            .event_repo
            .get_rsvp(event_id, character_id)
            .await?
            .ok_or(EventError::RsvpNotFound(character_id))?;

        let now = self.clock.now();
        match outcome {
            AttendanceOutcome::Attended => {
                rsvp.mark_attended(now)?;
                self.event_repo.save_rsvp(&rsvp).await?;

                if event.xp_award > 0 {
                    let entry = ExperienceEntry::award(
                        character_id,
                        ExperienceEntryKind::EventAttendance,
                        event.xp_award,
                        event.name.clone(),
                        now,
                    );
                    let awarded = self
                        .character_repo
                        .commit_award(character_id, event.xp_award, &entry)
                        .await?;
                    if !awarded {
                        tracing::warn!(
                            event_id = %event_id,
                            character_id = %character_id,
                            "Attendance recorded but XP not awarded (character missing or retired)"
                        );
                    }
                }
                tracing::info!(
                    event_id = %event_id,
                    character_id = %character_id,
                    xp_award = event.xp_award,
                    "Recorded attendance"
                );
            }
            AttendanceOutcome::NoShow => {
                rsvp.mark_no_show(now)?;
                self.event_repo.save_rsvp(&rsvp).await?;
                tracing::info!(
                    event_id = %event_id,
                    character_id = %character_id,
                    "Recorded no-show"
                );
            }
        }

        Ok(rsvp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{MockCharacterRepo, MockClockPort, MockEventRepo};
    use chrono::{Duration, TimeZone, Utc};
    use emberfall_domain::{ChapterId, Event, RsvpStatus};

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

    fn clock() -> Arc<MockClockPort> {
        let mut clock = MockClockPort::new();
        clock.expect_now().returning(fixed_now);
        Arc::new(clock)
    }

    #[tokio::test]
    async fn when_attendance_is_recorded_event_xp_is_awarded() {
        let event = test_event();
        let event_id = event.id;
        let character_id = CharacterId::new();

        let mut event_repo = MockEventRepo::new();
        event_repo
            .expect_get()
            .returning(move |_| Ok(Some(event.clone())));
        event_repo
            .expect_get_rsvp()
            .returning(move |eid, cid| Ok(Some(Rsvp::new(eid, cid, fixed_now()))));
        event_repo
            .expect_save_rsvp()
            .withf(|rsvp| rsvp.status == RsvpStatus::Attended)
            .times(1)
            .returning(|_| Ok(()));

        let mut character_repo = MockCharacterRepo::new();
        character_repo
            .expect_commit_award()
            .withf(move |cid, amount, entry| {
                *cid == character_id && *amount == 3 && entry.delta == 3
            })
            .times(1)
            .returning(|_, _, _| Ok(true));

        let use_case =
            RecordAttendance::new(Arc::new(event_repo), Arc::new(character_repo), clock());
        let rsvp = use_case
            .execute(event_id, character_id, AttendanceOutcome::Attended)
            .await
            .unwrap();
        assert_eq!(rsvp.status, RsvpStatus::Attended);
    }

    #[tokio::test]
    async fn when_attendance_is_recorded_twice_second_award_is_blocked() {
        let event = test_event();
        let event_id = event.id;
        let character_id = CharacterId::new();

        let mut event_repo = MockEventRepo::new();
        event_repo
            .expect_get()
            .returning(move |_| Ok(Some(event.clone())));
        event_repo.expect_get_rsvp().returning(move |eid, cid| {
            let mut rsvp = Rsvp::new(eid, cid, fixed_now());
            rsvp.mark_attended(fixed_now()).unwrap();
            Ok(Some(rsvp))
        });
        event_repo.expect_save_rsvp().times(0);

        let mut character_repo = MockCharacterRepo::new();
        character_repo.expect_commit_award().times(0);

        let use_case =
            RecordAttendance::new(Arc::new(event_repo), Arc::new(character_repo), clock());
        let result = use_case
            .execute(event_id, character_id, AttendanceOutcome::Attended)
            .await;
        assert!(matches!(result, Err(EventError::Validation(_))));
    }

    #[tokio::test]
    async fn when_no_show_is_recorded_no_xp_is_awarded() {
        let event = test_event();
        let event_id = event.id;
        let character_id = CharacterId::new();

        let mut event_repo = MockEventRepo::new();
        event_repo
            .expect_get()
            .returning(move |_| Ok(Some(event.clone())));
        event_repo
            .expect_get_rsvp()
            .returning(move |eid, cid| Ok(Some(Rsvp::new(eid, cid, fixed_now()))));
        event_repo
            .expect_save_rsvp()
            .withf(|rsvp| rsvp.status == RsvpStatus::NoShow)
            .times(1)
            .returning(|_| Ok(()));

        let mut character_repo = MockCharacterRepo::new();
        character_repo.expect_commit_award().times(0);

        let use_case =
            RecordAttendance::new(Arc::new(event_repo), Arc::new(character_repo), clock());
        let rsvp = use_case
            .execute(event_id, character_id, AttendanceOutcome::NoShow)
            .await
            .unwrap();
        assert_eq!(rsvp.status, RsvpStatus::NoShow);
    }

    #[tokio::test]
    async fn when_rsvp_is_missing_attendance_is_rejected() {
        let event = test_event();
        let event_id = event.id;

        let mut event_repo = MockEventRepo::new();
        event_repo
            .expect_get()
            .returning(move |_| Ok(Some(event.clone())));
        event_repo.expect_get_rsvp().returning(|_, _| Ok(None));

        let character_repo = MockCharacterRepo::new();
        let use_case =
            RecordAttendance::new(Arc::new(event_repo), Arc::new(character_repo), clock());
        let result = use_case
            .execute(event_id, CharacterId::new(), AttendanceOutcome::Attended)
            .await;
        assert!(matches!(result, Err(EventError::RsvpNotFound(_))));
    }
}
