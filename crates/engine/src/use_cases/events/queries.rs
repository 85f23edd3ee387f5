//! Event read models.

use std::sync::Arc;

use emberfall_domain::{ChapterId, Event, EventId, Rsvp};

use crate::infrastructure::ports::EventRepo;

use super::error::EventError;

pub struct ListEvents {
    event_repo: Arc<dyn EventRepo>,
}

impl ListEvents {
    pub fn new(event_repo: Arc<dyn EventRepo>) -> Self {
        Self { event_repo }
    }

    pub async fn execute(&self, chapter_id: Option<ChapterId>) -> Result<Vec<Event>, EventError> {
        let events = match chapter_id {
            Some(chapter_id) => self.event_repo.list_for_chapter(chapter_id).await?,
            None => self.event_repo.list().await?,
        };
        Ok(events)
    }

    pub async fn rsvps(&self, event_id: EventId) -> Result<Vec<Rsvp>, EventError> {
        if self.event_repo.get(event_id).await?.is_none() {
            return Err(EventError::EventNotFound(event_id));
        }
        Ok(self.event_repo.list_rsvps(event_id).await?)
    }
}
