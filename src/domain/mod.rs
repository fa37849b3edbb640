//! Pure domain logic: bets, markets, and accuracy-weighted payouts.

mod allocation;
mod bet;
mod distribution;
mod error;
mod id;
mod market;
mod money;
mod settlement;

// Core domain types
pub use bet::Bet;
pub use error::{DomainError, InvalidInput};
pub use id::{MarketId, ParticipantId};
pub use money::{decimal_from_f64, Amount, Denomination, Value, DEFAULT_DECIMALS, MAX_DECIMALS};

// Reward allocation
pub use allocation::{accuracy, distance, Allocation, Distribution, RewardAllocator};

// Resolution workflow
pub use settlement::{
    PoolBreakdown, PoolPolicy, Refund, SettlementOutcome, Settler, BPS_DENOMINATOR,
};

// Market catalogue
pub use distribution::PredictionDistribution;
pub use market::{list_markets, Market, MarketFilter, MarketStatus};
