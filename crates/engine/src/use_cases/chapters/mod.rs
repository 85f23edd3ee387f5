//! Chapter use cases - CRUD-lite for the organizational units.

use std::sync::Arc;

use emberfall_domain::{Chapter, ChapterId, DomainError};

use crate::infrastructure::ports::{ChapterRepo, ClockPort, RepoError};

#[derive(Debug, thiserror::Error)]
pub enum ChapterError {
    #[error("Chapter not found: {0}")]
    ChapterNotFound(ChapterId),
    #[error("Validation error: {0}")]
    Validation(#[from] DomainError),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

pub struct ChapterUseCases {
    chapter_repo: Arc<dyn ChapterRepo>,
    clock: Arc<dyn ClockPort>,
}

impl ChapterUseCases {
    pub fn new(chapter_repo: Arc<dyn ChapterRepo>, clock: Arc<dyn ClockPort>) -> Self {
        Self {
            chapter_repo,
            clock,
        }
    }

    pub async fn create(&self, name: String, region: String) -> Result<Chapter, ChapterError> {
        let chapter = Chapter::new(name, region, self.clock.now());
        chapter.validate()?;
        self.chapter_repo.save(&chapter).await?;
        tracing::info!(chapter_id = %chapter.id, name = %chapter.name, "Created chapter");
        Ok(chapter)
    }

    pub async fn get(&self, id: ChapterId) -> Result<Chapter, ChapterError> {
        self.chapter_repo
            .get(id)
            .await?
            .ok_or(ChapterError::ChapterNotFound(id))
    }

    pub async fn list(&self) -> Result<Vec<Chapter>, ChapterError> {
        Ok(self.chapter_repo.list().await?)
    }

    pub async fn deactivate(&self, id: ChapterId) -> Result<Chapter, ChapterError> {
        let mut chapter = self.get(id).await?;
        chapter.deactivate();
        self.chapter_repo.save(&chapter).await?;
        Ok(chapter)
    }
}
