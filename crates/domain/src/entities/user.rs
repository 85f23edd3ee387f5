//! User entity - a player or admin account
//!
//! Credential and session handling live outside the domain; the entity only
//! carries identity, role, and chapter membership.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::ids::{ChapterId, UserId};
use crate::DomainError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub display_name: String,
    pub role: UserRole,
    pub chapter_id: Option<ChapterId>,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(
        email: impl Into<String>,
        display_name: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: UserId::new(),
            email: email.into(),
            display_name: display_name.into(),
            role: UserRole::Player,
            chapter_id: None,
            created_at: now,
        }
    }

    pub fn with_role(mut self, role: UserRole) -> Self {
        self.role = role;
        self
    }

    pub fn with_chapter(mut self, chapter_id: ChapterId) -> Self {
        self.chapter_id = Some(chapter_id);
        self
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.display_name.trim().is_empty() {
            return Err(DomainError::validation("Display name cannot be empty"));
        }
        if !self.email.contains('@') {
            return Err(DomainError::validation(format!(
                "Invalid email address: {}",
                self.email
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Player,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Player => "player",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "player" => Ok(Self::Player),
            "admin" => Ok(Self::Admin),
            other => Err(DomainError::parse(format!("Unknown user role: {other}"))),
        }
    }
}
