//! A participant's wager on a market's resolving value.

use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::id::ParticipantId;
use super::money::{decimal_from_f64, Amount, Value};

/// A single bet in a range market.
///
/// Bets are immutable once the betting period closes; the allocator only
/// ever sees the frozen set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bet {
    /// Who placed the bet.
    pub participant: ParticipantId,
    /// Amount contributed to the pool.
    pub stake: Amount,
    /// The participant's forecast of the resolving value.
    pub predicted_value: Value,
    /// Unix seconds at which the bet was placed.
    #[serde(default)]
    pub timestamp: u64,
}

impl Bet {
    /// Create a new bet.
    pub fn new(
        participant: impl Into<ParticipantId>,
        stake: Amount,
        predicted_value: Value,
        timestamp: u64,
    ) -> Self {
        Self {
            participant: participant.into(),
            stake,
            predicted_value,
            timestamp,
        }
    }

    /// Create a bet from floating-point inputs, as delivered by a UI layer.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput::NonFinite` if either number is NaN or infinite.
    pub fn from_f64(
        participant: impl Into<ParticipantId>,
        stake: f64,
        predicted_value: f64,
        timestamp: u64,
    ) -> Result<Self, DomainError> {
        Ok(Self::new(
            participant,
            decimal_from_f64("stake", stake)?,
            decimal_from_f64("predicted_value", predicted_value)?,
            timestamp,
        ))
    }
}
