//! Schedule event use case.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use emberfall_domain::{ChapterId, Event};

use crate::infrastructure::ports::{ChapterRepo, ClockPort, EventRepo};

use super::error::EventError;

#[derive(Debug, Clone)]
pub struct ScheduleEventInput {
    pub chapter_id: ChapterId,
    pub name: String,
    pub description: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub xp_award: u32,
}

pub struct ScheduleEvent {
    event_repo: Arc<dyn EventRepo>,
    chapter_repo: Arc<dyn ChapterRepo>,
    clock: Arc<dyn ClockPort>,
}

impl ScheduleEvent {
    pub fn new(
        event_repo: Arc<dyn EventRepo>,
        chapter_repo: Arc<dyn ChapterRepo>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            event_repo,
            chapter_repo,
            clock,
        }
    }

    pub async fn execute(&self, input: ScheduleEventInput) -> Result<Event, EventError> {
        if self.chapter_repo.get(input.chapter_id).await?.is_none() {
            return Err(EventError::ChapterNotFound(input.chapter_id));
        }

        let event = Event::new(
            input.chapter_id,
            input.name,
            input.starts_at,
            input.ends_at,
            input.xp_award,
            self.clock.now(),
        )
        .with_description(input.description);
        event.validate()?;

        self.event_repo.save(&event).await?;
        tracing::info!(event_id = %event.id, chapter_id = %event.chapter_id, "Scheduled event");
        Ok(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{MockChapterRepo, MockClockPort, MockEventRepo};
    use chrono::{Duration, TimeZone, Utc};
    use emberfall_domain::Chapter;

    fn fixed_now() -> chrono::DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000, 0).unwrap()
    }

    fn clock() -> Arc<MockClockPort> {
        let mut clock = MockClockPort::new();
        clock.expect_now().returning(fixed_now);
        Arc::new(clock)
    }

    fn input(chapter_id: ChapterId) -> ScheduleEventInput {
        ScheduleEventInput {
            chapter_id,
            name: "Spring Gathering".to_string(),
            description: String::new(),
            starts_at: fixed_now(),
            ends_at: fixed_now() + Duration::hours(8),
            xp_award: 3,
        }
    }

    #[tokio::test]
    async fn when_chapter_exists_event_is_saved() {
        let chapter = Chapter::new("Northern Marches", "Pacific Northwest", fixed_now());
        let chapter_id = chapter.id;

        let mut chapter_repo = MockChapterRepo::new();
        chapter_repo
            .expect_get()
            .returning(move |_| Ok(Some(chapter.clone())));
        let mut event_repo = MockEventRepo::new();
        event_repo.expect_save().times(1).returning(|_| Ok(()));

        let use_case = ScheduleEvent::new(Arc::new(event_repo), Arc::new(chapter_repo), clock());
        let event = use_case.execute(input(chapter_id)).await.unwrap();
        assert_eq!(event.xp_award, 3);
    }

    #[tokio::test]
    async fn when_chapter_is_missing_event_is_rejected() {
        let mut chapter_repo = MockChapterRepo::new();
        chapter_repo.expect_get().returning(|_| Ok(None));
        let mut event_repo = MockEventRepo::new();
        event_repo.expect_save().times(0);

        let use_case = ScheduleEvent::new(Arc::new(event_repo), Arc::new(chapter_repo), clock());
        let result = use_case.execute(input(ChapterId::new())).await;
        assert!(matches!(result, Err(EventError::ChapterNotFound(_))));
    }

    #[tokio::test]
    async fn when_event_ends_before_it_starts_it_is_rejected() {
        let chapter = Chapter::new("Northern Marches", "Pacific Northwest", fixed_now());
        let chapter_id = chapter.id;

        let mut chapter_repo = MockChapterRepo::new();
        chapter_repo
            .expect_get()
            .returning(move |_| Ok(Some(chapter.clone())));
        let mut event_repo = MockEventRepo::new();
        event_repo.expect_save().times(0);

        let use_case = ScheduleEvent::new(Arc::new(event_repo), Arc::new(chapter_repo), clock());
        let mut bad = input(chapter_id);
        bad.ends_at = bad.starts_at - Duration::hours(1);
        let result = use_case.execute(bad).await;
        assert!(matches!(result, Err(EventError::Validation(_))));
    }
}
