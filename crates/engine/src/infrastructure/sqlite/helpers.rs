//! Row-decoding helpers shared by the SQLite repositories.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::infrastructure::ports::RepoError;

pub(super) fn parse_uuid(value: &str) -> Result<Uuid, RepoError> {
    Uuid::parse_str(value).map_err(|e| RepoError::serialization(format!("bad uuid {value}: {e}")))
}

pub(super) fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, RepoError> {
    DateTime::parse_from_rfc3339(value)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| RepoError::serialization(format!("bad timestamp {value}: {e}")))
}

pub(super) fn encode_names(names: &[String]) -> Result<String, RepoError> {
    serde_json::to_string(names).map_err(|e| RepoError::serialization(e.to_string()))
}

pub(super) fn decode_names(json: &str) -> Result<Vec<String>, RepoError> {
    serde_json::from_str(json).map_err(|e| RepoError::serialization(e.to_string()))
}
