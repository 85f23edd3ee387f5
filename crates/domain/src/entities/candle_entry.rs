//! Candle ledger entries
//!
//! Candles are a separate in-game currency, unrelated to experience. The
//! balance is the sum of entries; spends must not overdraw.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{CandleEntryId, CharacterId};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandleEntry {
    pub id: CandleEntryId,
    pub character_id: CharacterId,
    /// Signed change to the candle balance
    pub delta: i64,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl CandleEntry {
    pub fn grant(
        character_id: CharacterId,
        amount: u32,
        note: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: CandleEntryId::new(),
            character_id,
            delta: i64::from(amount),
            note: Some(note.into()),
            created_at: now,
        }
    }

    pub fn spend(
        character_id: CharacterId,
        amount: u32,
        note: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: CandleEntryId::new(),
            character_id,
            delta: -i64::from(amount),
            note: Some(note.into()),
            created_at: now,
        }
    }
}

/// Current candle balance for a set of entries.
pub fn balance(entries: &[CandleEntry]) -> i64 {
    entries.iter().map(|e| e.delta).sum()
}
