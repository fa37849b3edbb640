//! Accuracy-weighted reward distribution for range prediction markets.
//!
//! Participants bet on a numeric outcome. Once the market resolves, the pool
//! is split in proportion to how close each prediction was:
//!
//! - distance = |prediction - actual|
//! - accuracy = 1 / (distance + 1)
//! - reward = accuracy / Σ accuracy × pool
//!
//! Rewards are rounded down to the pool's currency unit and the remainder is
//! assigned so the payouts sum to the pool exactly.
//!
//! # Modules
//!
//! - [`domain`] - Bets, markets, the reward allocator and settlement
//! - [`error`] - Error types for the crate
//! - [`infrastructure`] - Configuration loading and logging
//! - [`adapter`] - The `accuracy-pool` command line
//!
//! # Example
//!
//! ```
//! use accuracy_pool::domain::{Bet, MarketStatus, Settler};
//! use rust_decimal_macros::dec;
//!
//! let bets = vec![
//!     Bet::new("alice", dec!(100), dec!(820), 1),
//!     Bet::new("bob", dec!(100), dec!(850), 2),
//!     Bet::new("charlie", dec!(100), dec!(880), 3),
//! ];
//! let outcome = Settler::default().settle(&bets, dec!(850)).unwrap();
//! assert_eq!(outcome.market_status(), MarketStatus::Resolved);
//! ```

pub mod adapter;
pub mod domain;
pub mod error;
pub mod infrastructure;
