//! Market resolution workflow around the reward allocator.
//!
//! The allocator only sees a post-fee pool. This module derives that pool
//! from the stakes, applies the platform fee, and cancels markets that never
//! reached the minimum number of participants by refunding every stake.

use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{info, warn};

use super::allocation::{Distribution, RewardAllocator};
use super::bet::Bet;
use super::error::{DomainError, InvalidInput};
use super::id::ParticipantId;
use super::market::MarketStatus;
use super::money::{Amount, Denomination, Value};

/// Basis points in 100%.
pub const BPS_DENOMINATOR: u32 = 10_000;

/// Participation and fee rules for a market's pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolPolicy {
    min_participants: usize,
    fee_bps: u32,
}

impl PoolPolicy {
    /// Create a policy.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput::Parameter` if `min_participants` is zero or
    /// `fee_bps` exceeds 10 000.
    pub fn new(min_participants: usize, fee_bps: u32) -> Result<Self, DomainError> {
        if min_participants == 0 {
            return Err(InvalidInput::Parameter {
                field: "min_participants",
                reason: "must be at least 1".to_string(),
            }
            .into());
        }
        if fee_bps > BPS_DENOMINATOR {
            return Err(InvalidInput::Parameter {
                field: "fee_bps",
                reason: format!("must be at most {BPS_DENOMINATOR}, got {fee_bps}"),
            }
            .into());
        }
        Ok(Self {
            min_participants,
            fee_bps,
        })
    }

    #[must_use]
    pub const fn min_participants(&self) -> usize {
        self.min_participants
    }

    #[must_use]
    pub const fn fee_bps(&self) -> u32 {
        self.fee_bps
    }
}

impl Default for PoolPolicy {
    fn default() -> Self {
        Self {
            min_participants: 3,
            fee_bps: 0,
        }
    }
}

/// How a market's stakes split into platform fee and distributable pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PoolBreakdown {
    /// Sum of all stakes.
    pub gross: Amount,
    /// Platform fee, rounded down to the currency unit.
    pub fee: Amount,
    /// `gross - fee`, the amount handed to the allocator.
    pub net: Amount,
}

impl PoolBreakdown {
    /// Compute the pool for `bets` after a `fee_bps` platform fee.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput::NegativeStake` for negative stakes and
    /// `InvalidInput::OutOfRange` if the stakes overflow.
    pub fn from_bets(
        bets: &[Bet],
        fee_bps: u32,
        denomination: Denomination,
    ) -> Result<Self, DomainError> {
        let mut gross = Decimal::ZERO;
        for bet in bets {
            if bet.stake.is_sign_negative() && !bet.stake.is_zero() {
                return Err(InvalidInput::NegativeStake {
                    participant: bet.participant.clone(),
                    stake: bet.stake,
                }
                .into());
            }
            gross = gross
                .checked_add(bet.stake)
                .ok_or(InvalidInput::OutOfRange { field: "pool" })?;
        }

        let fee = gross
            .checked_mul(Decimal::from(fee_bps))
            .map(|scaled| denomination.floor(scaled / Decimal::from(BPS_DENOMINATOR)))
            .ok_or(InvalidInput::OutOfRange { field: "fee" })?;

        Ok(Self {
            gross,
            fee,
            net: gross - fee,
        })
    }
}

/// A stake returned in full to its owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Refund {
    pub participant: ParticipantId,
    pub amount: Amount,
}

/// What happened when a market was settled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SettlementOutcome {
    /// Enough participants: the net pool was allocated by accuracy.
    Distributed {
        pool: PoolBreakdown,
        distribution: Distribution,
    },
    /// Too few participants: the market is cancelled and stakes returned.
    Refunded {
        participants: usize,
        min_participants: usize,
        refunds: Vec<Refund>,
    },
}

impl SettlementOutcome {
    /// The status the market ends in.
    #[must_use]
    pub const fn market_status(&self) -> MarketStatus {
        match self {
            Self::Distributed { .. } => MarketStatus::Resolved,
            Self::Refunded { .. } => MarketStatus::Cancelled,
        }
    }
}

/// Settles resolved markets under a [`PoolPolicy`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Settler {
    allocator: RewardAllocator,
    policy: PoolPolicy,
}

impl Settler {
    #[must_use]
    pub const fn new(allocator: RewardAllocator, policy: PoolPolicy) -> Self {
        Self { allocator, policy }
    }

    #[must_use]
    pub const fn policy(&self) -> PoolPolicy {
        self.policy
    }

    /// Settle a market whose betting period has closed.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidInput` for duplicate participants,
    /// negative stakes, or anything the allocator rejects.
    pub fn settle(
        &self,
        bets: &[Bet],
        actual_value: Value,
    ) -> Result<SettlementOutcome, DomainError> {
        reject_duplicates(bets)?;
        let denomination = self.allocator.denomination();
        let pool = PoolBreakdown::from_bets(bets, self.policy.fee_bps, denomination)?;

        if bets.len() < self.policy.min_participants {
            warn!(
                participants = bets.len(),
                min_participants = self.policy.min_participants,
                gross = %pool.gross,
                "too few participants, refunding stakes"
            );
            return Ok(SettlementOutcome::Refunded {
                participants: bets.len(),
                min_participants: self.policy.min_participants,
                refunds: bets
                    .iter()
                    .map(|bet| Refund {
                        participant: bet.participant.clone(),
                        amount: bet.stake,
                    })
                    .collect(),
            });
        }

        let distribution = self.allocator.allocate(bets, actual_value, pool.net)?;
        info!(
            participants = bets.len(),
            %actual_value,
            gross = %pool.gross,
            fee = %pool.fee,
            net = %pool.net,
            "market settled"
        );
        Ok(SettlementOutcome::Distributed { pool, distribution })
    }
}

fn reject_duplicates(bets: &[Bet]) -> Result<(), DomainError> {
    let mut seen = HashSet::with_capacity(bets.len());
    for bet in bets {
        if !seen.insert(&bet.participant) {
            return Err(InvalidInput::DuplicateParticipant {
                participant: bet.participant.clone(),
            }
            .into());
        }
    }
    Ok(())
}
