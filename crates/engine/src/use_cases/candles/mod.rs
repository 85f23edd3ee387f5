//! Candle currency use cases.
//!
//! Candles are a separate in-game currency, unrelated to experience. The
//! balance is the sum of ledger entries; spends go through a guarded insert
//! so they cannot overdraw.

mod transact;

use std::sync::Arc;

use emberfall_domain::{CharacterId, DomainError};

use crate::infrastructure::ports::RepoError;

pub use transact::{CandleBalance, CandleLedger, GrantCandles, SpendCandles};

#[derive(Debug, thiserror::Error)]
pub enum CandleError {
    #[error("Character not found: {0}")]
    CharacterNotFound(CharacterId),
    #[error("Insufficient candles: need {needed}, have {available}")]
    InsufficientCandles { needed: u32, available: i64 },
    #[error("Validation error: {0}")]
    Validation(#[from] DomainError),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

/// Container for candle use cases.
pub struct CandleUseCases {
    pub grant: Arc<GrantCandles>,
    pub spend: Arc<SpendCandles>,
    pub ledger: Arc<CandleLedger>,
}
