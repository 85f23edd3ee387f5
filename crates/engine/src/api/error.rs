//! API error type and mappings from use-case errors.
//!
//! Business-rule rejections surface as 400/409 with a user-visible message;
//! only repository failures become 500s, with the detail kept in the log.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use emberfall_domain::DomainError;

use crate::use_cases::{
    AccountError, CandleError, ChapterError, CharacterError, EventError, ReferenceError,
};

#[derive(Debug)]
pub enum ApiError {
    NotFound,
    BadRequest(String),
    Conflict(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound => (StatusCode::NOT_FOUND, "Not found").into_response(),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg).into_response(),
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal error").into_response()
            }
        }
    }
}

fn from_domain(error: DomainError) -> ApiError {
    match error {
        DomainError::NotFound { .. } => ApiError::NotFound,
        DomainError::Validation(_) | DomainError::Parse(_) => {
            ApiError::BadRequest(error.to_string())
        }
        DomainError::Constraint(_)
        | DomainError::InvalidStateTransition(_)
        | DomainError::InsufficientExperience { .. } => ApiError::Conflict(error.to_string()),
    }
}

impl From<crate::infrastructure::ports::RepoError> for ApiError {
    fn from(error: crate::infrastructure::ports::RepoError) -> Self {
        if error.is_not_found() {
            ApiError::NotFound
        } else {
            ApiError::Internal(error.to_string())
        }
    }
}

impl From<CharacterError> for ApiError {
    fn from(error: CharacterError) -> Self {
        match error {
            CharacterError::CharacterNotFound(_)
            | CharacterError::UserNotFound(_)
            | CharacterError::HeritageNotFound(_)
            | CharacterError::CultureNotFound(_)
            | CharacterError::ArchetypeNotFound(_) => ApiError::NotFound,
            CharacterError::CultureMismatch { .. } | CharacterError::RequiresAdmin => {
                ApiError::BadRequest(error.to_string())
            }
            CharacterError::PrerequisiteNotMet { .. }
            | CharacterError::InsufficientExperience { .. } => ApiError::Conflict(error.to_string()),
            CharacterError::Validation(e) => from_domain(e),
            CharacterError::Repo(e) => e.into(),
        }
    }
}

impl From<EventError> for ApiError {
    fn from(error: EventError) -> Self {
        match error {
            EventError::EventNotFound(_)
            | EventError::ChapterNotFound(_)
            | EventError::CharacterNotFound(_)
            | EventError::RsvpNotFound(_) => ApiError::NotFound,
            EventError::DuplicateRsvp(_) => ApiError::Conflict(error.to_string()),
            EventError::Validation(e) => from_domain(e),
            EventError::Repo(e) => e.into(),
        }
    }
}

impl From<CandleError> for ApiError {
    fn from(error: CandleError) -> Self {
        match error {
            CandleError::CharacterNotFound(_) => ApiError::NotFound,
            CandleError::InsufficientCandles { .. } => ApiError::Conflict(error.to_string()),
            CandleError::Validation(e) => from_domain(e),
            CandleError::Repo(e) => e.into(),
        }
    }
}

impl From<ChapterError> for ApiError {
    fn from(error: ChapterError) -> Self {
        match error {
            ChapterError::ChapterNotFound(_) => ApiError::NotFound,
            ChapterError::Validation(e) => from_domain(e),
            ChapterError::Repo(e) => e.into(),
        }
    }
}

impl From<AccountError> for ApiError {
    fn from(error: AccountError) -> Self {
        match error {
            AccountError::UserNotFound(_) | AccountError::ChapterNotFound(_) => ApiError::NotFound,
            AccountError::EmailTaken(_) => ApiError::Conflict(error.to_string()),
            AccountError::Validation(e) => from_domain(e),
            AccountError::Repo(e) => e.into(),
        }
    }
}

impl From<ReferenceError> for ApiError {
    fn from(error: ReferenceError) -> Self {
        match error {
            ReferenceError::HeritageNotFound(_) => ApiError::NotFound,
            ReferenceError::Validation(e) => from_domain(e),
            ReferenceError::Repo(e) => e.into(),
        }
    }
}
