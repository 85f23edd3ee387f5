//! Candle grants, spends, and history.

use std::sync::Arc;

use emberfall_domain::{candle_balance, CandleEntry, CharacterId, DomainError};

use crate::infrastructure::ports::{CandleRepo, CharacterRepo, ClockPort};

use super::CandleError;

pub struct GrantCandles {
    candle_repo: Arc<dyn CandleRepo>,
    character_repo: Arc<dyn CharacterRepo>,
    clock: Arc<dyn ClockPort>,
}

impl GrantCandles {
    pub fn new(
        candle_repo: Arc<dyn CandleRepo>,
        character_repo: Arc<dyn CharacterRepo>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            candle_repo,
            character_repo,
            clock,
        }
    }

    pub async fn execute(
        &self,
        character_id: CharacterId,
        amount: u32,
        note: String,
    ) -> Result<CandleEntry, CandleError> {
        if amount == 0 {
            return Err(DomainError::validation("Grant must be positive").into());
        }
        if self.character_repo.get(character_id).await?.is_none() {
            return Err(CandleError::CharacterNotFound(character_id));
        }

        let entry = CandleEntry::grant(character_id, amount, note, self.clock.now());
        self.candle_repo.grant(&entry).await?;

        tracing::info!(character_id = %character_id, amount, "Granted candles");
        Ok(entry)
    }
}

pub struct SpendCandles {
    candle_repo: Arc<dyn CandleRepo>,
    character_repo: Arc<dyn CharacterRepo>,
    clock: Arc<dyn ClockPort>,
}

impl SpendCandles {
    pub fn new(
        candle_repo: Arc<dyn CandleRepo>,
        character_repo: Arc<dyn CharacterRepo>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            candle_repo,
            character_repo,
            clock,
        }
    }

    pub async fn execute(
        &self,
        character_id: CharacterId,
        amount: u32,
        note: String,
    ) -> Result<CandleEntry, CandleError> {
        if amount == 0 {
            return Err(DomainError::validation("Spend must be positive").into());
        }
        if self.character_repo.get(character_id).await?.is_none() {
            return Err(CandleError::CharacterNotFound(character_id));
        }

        let entry = CandleEntry::spend(character_id, amount, note, self.clock.now());
        let accepted = self.candle_repo.spend(&entry).await?;
        if !accepted {
            let balance = candle_balance(&self.candle_repo.entries(character_id).await?);
            return Err(CandleError::InsufficientCandles {
                needed: amount,
                available: balance,
            });
        }

        tracing::info!(character_id = %character_id, amount, "Spent candles");
        Ok(entry)
    }
}

/// A character's candle balance with its full history.
#[derive(Debug, Clone)]
pub struct CandleBalance {
    pub character_id: CharacterId,
    pub balance: i64,
    pub entries: Vec<CandleEntry>,
}

pub struct CandleLedger {
    candle_repo: Arc<dyn CandleRepo>,
    character_repo: Arc<dyn CharacterRepo>,
}

impl CandleLedger {
    pub fn new(candle_repo: Arc<dyn CandleRepo>, character_repo: Arc<dyn CharacterRepo>) -> Self {
        Self {
            candle_repo,
            character_repo,
        }
    }

    pub async fn execute(&self, character_id: CharacterId) -> Result<CandleBalance, CandleError> {
        if self.character_repo.get(character_id).await?.is_none() {
            return Err(CandleError::CharacterNotFound(character_id));
        }
        let entries = self.candle_repo.entries(character_id).await?;
        Ok(CandleBalance {
            character_id,
            balance: candle_balance(&entries),
            entries,
        })
    }
}
