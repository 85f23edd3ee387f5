//! Account use cases.
//!
//! Credential and session handling are outside this system; accounts here
//! carry identity, role, and chapter membership only.

use std::str::FromStr;
use std::sync::Arc;

use emberfall_domain::{ChapterId, DomainError, User, UserId, UserRole};

use crate::infrastructure::ports::{ChapterRepo, ClockPort, RepoError, UserRepo};

#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    #[error("User not found: {0}")]
    UserNotFound(UserId),
    #[error("Chapter not found: {0}")]
    ChapterNotFound(ChapterId),
    #[error("Email already registered: {0}")]
    EmailTaken(String),
    #[error("Validation error: {0}")]
    Validation(#[from] DomainError),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub display_name: String,
    pub role: Option<String>,
    pub chapter_id: Option<ChapterId>,
}

pub struct AccountUseCases {
    user_repo: Arc<dyn UserRepo>,
    chapter_repo: Arc<dyn ChapterRepo>,
    clock: Arc<dyn ClockPort>,
}

impl AccountUseCases {
    pub fn new(
        user_repo: Arc<dyn UserRepo>,
        chapter_repo: Arc<dyn ChapterRepo>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            user_repo,
            chapter_repo,
            clock,
        }
    }

    pub async fn register(&self, input: NewUser) -> Result<User, AccountError> {
        if self.user_repo.get_by_email(&input.email).await?.is_some() {
            return Err(AccountError::EmailTaken(input.email));
        }

        let mut user = User::new(input.email, input.display_name, self.clock.now());
        if let Some(role) = input.role.as_deref() {
            user = user.with_role(UserRole::from_str(role)?);
        }
        if let Some(chapter_id) = input.chapter_id {
            if self.chapter_repo.get(chapter_id).await?.is_none() {
                return Err(AccountError::ChapterNotFound(chapter_id));
            }
            user = user.with_chapter(chapter_id);
        }
        user.validate()?;

        self.user_repo.save(&user).await?;
        tracing::info!(user_id = %user.id, "Registered user");
        Ok(user)
    }

    pub async fn get(&self, id: UserId) -> Result<User, AccountError> {
        self.user_repo
            .get(id)
            .await?
            .ok_or(AccountError::UserNotFound(id))
    }

    pub async fn list(&self) -> Result<Vec<User>, AccountError> {
        Ok(self.user_repo.list().await?)
    }
}
