//! Event entity and RSVPs
//!
//! Events belong to a chapter and award XP for attendance. Characters RSVP,
//! then an admin records attendance or a no-show after the event.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::ids::{ChapterId, CharacterId, EventId, RsvpId};
use crate::DomainError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub chapter_id: ChapterId,
    pub name: String,
    pub description: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    /// Experience awarded to each attending character
    pub xp_award: u32,
    pub created_at: DateTime<Utc>,
}

impl Event {
    pub fn new(
        chapter_id: ChapterId,
        name: impl Into<String>,
        starts_at: DateTime<Utc>,
        ends_at: DateTime<Utc>,
        xp_award: u32,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: EventId::new(),
            chapter_id,
            name: name.into(),
            description: String::new(),
            starts_at,
            ends_at,
            xp_award,
            created_at: now,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("Event name cannot be empty"));
        }
        if self.ends_at <= self.starts_at {
            return Err(DomainError::validation("Event must end after it starts"));
        }
        Ok(())
    }
}

/// A character's registration for an event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rsvp {
    pub id: RsvpId,
    pub event_id: EventId,
    pub character_id: CharacterId,
    pub status: RsvpStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Rsvp {
    pub fn new(event_id: EventId, character_id: CharacterId, now: DateTime<Utc>) -> Self {
        Self {
            id: RsvpId::new(),
            event_id,
            character_id,
            status: RsvpStatus::Registered,
            created_at: now,
            updated_at: now,
        }
    }

    /// Mark the character as having attended. Only valid once, from `Registered`.
    pub fn mark_attended(&mut self, now: DateTime<Utc>) -> Result<(), DomainError> {
        match self.status {
            RsvpStatus::Registered => {
                self.status = RsvpStatus::Attended;
                self.updated_at = now;
                Ok(())
            }
            RsvpStatus::Attended => Err(DomainError::invalid_state_transition(
                "Attendance already recorded",
            )),
            RsvpStatus::NoShow => Err(DomainError::invalid_state_transition(
                "RSVP was already marked as a no-show",
            )),
        }
    }

    /// Mark the character as a no-show. Only valid from `Registered`.
    pub fn mark_no_show(&mut self, now: DateTime<Utc>) -> Result<(), DomainError> {
        match self.status {
            RsvpStatus::Registered => {
                self.status = RsvpStatus::NoShow;
                self.updated_at = now;
                Ok(())
            }
            _ => Err(DomainError::invalid_state_transition(
                "RSVP is no longer pending",
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RsvpStatus {
    Registered,
    Attended,
    NoShow,
}

impl RsvpStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Registered => "registered",
            Self::Attended => "attended",
            Self::NoShow => "no_show",
        }
    }
}

impl fmt::Display for RsvpStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RsvpStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "registered" => Ok(Self::Registered),
            "attended" => Ok(Self::Attended),
            "no_show" => Ok(Self::NoShow),
            other => Err(DomainError::parse(format!("Unknown RSVP status: {other}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attendance_is_recorded_once() {
        let mut rsvp = Rsvp::new(EventId::new(), CharacterId::new(), Utc::now());
        rsvp.mark_attended(Utc::now()).unwrap();
        assert_eq!(rsvp.status, RsvpStatus::Attended);
        assert!(rsvp.mark_attended(Utc::now()).is_err());
    }

    #[test]
    fn no_show_blocks_attendance() {
        let mut rsvp = Rsvp::new(EventId::new(), CharacterId::new(), Utc::now());
        rsvp.mark_no_show(Utc::now()).unwrap();
        assert!(rsvp.mark_attended(Utc::now()).is_err());
    }

    #[test]
    fn event_must_end_after_start() {
        let now = Utc::now();
        let event = Event::new(ChapterId::new(), "Spring Gathering", now, now, 3, now);
        assert!(event.validate().is_err());
    }
}
