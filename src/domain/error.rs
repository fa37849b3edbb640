//! Domain validation errors.
//!
//! Every rejected input surfaces as [`DomainError::InvalidInput`]. The
//! payload names the rule that was broken. None of these are retryable.
//!
//! # Examples
//!
//! ```
//! use accuracy_pool::domain::{DomainError, InvalidInput, RewardAllocator};
//! use rust_decimal_macros::dec;
//!
//! let allocator = RewardAllocator::default();
//! let result = allocator.allocate(&[], dec!(850), dec!(-1));
//!
//! assert!(matches!(
//!     result,
//!     Err(DomainError::InvalidInput(InvalidInput::NegativePool { .. }))
//! ));
//! ```

use rust_decimal::Decimal;
use thiserror::Error;

use super::id::ParticipantId;
use super::market::MarketStatus;

/// Errors raised when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// The caller supplied data that violates a domain rule.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInput),
}

/// The specific rule an invalid input broke.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvalidInput {
    /// The pool to distribute is below zero.
    #[error("pool must not be negative, got {pool}")]
    NegativePool {
        /// The pool that was provided.
        pool: Decimal,
    },

    /// A bet carries a stake below zero.
    #[error("stake for {participant} must not be negative, got {stake}")]
    NegativeStake {
        /// Owner of the offending bet.
        participant: ParticipantId,
        /// The stake that was provided.
        stake: Decimal,
    },

    /// A floating-point input was NaN or infinite.
    #[error("{field} must be a finite number, got {value}")]
    NonFinite {
        /// Which input was rejected.
        field: &'static str,
        /// The raw value as received.
        value: f64,
    },

    /// A value (or an intermediate derived from it) exceeds decimal range.
    #[error("{field} is outside the representable range")]
    OutOfRange {
        /// Which input or derived quantity overflowed.
        field: &'static str,
    },

    /// Two bets in the same market share a participant.
    #[error("participant {participant} has more than one bet")]
    DuplicateParticipant {
        /// The repeated participant.
        participant: ParticipantId,
    },

    /// A prediction lies outside the market's allowed range.
    #[error("prediction {value} must be between {min} and {max}")]
    PredictionOutOfRange {
        /// The rejected prediction.
        value: Decimal,
        /// Lower bound (inclusive).
        min: Decimal,
        /// Upper bound (inclusive).
        max: Decimal,
    },

    /// A market status code outside `0..=3`.
    #[error("unknown market status code {code}")]
    UnknownStatus {
        /// The raw code.
        code: u8,
    },

    /// A status change the market lifecycle does not allow.
    #[error("market cannot move from {from} to {to}")]
    IllegalTransition {
        /// Current status.
        from: MarketStatus,
        /// Requested status.
        to: MarketStatus,
    },

    /// A configuration-like parameter is out of bounds.
    #[error("invalid {field}: {reason}")]
    Parameter {
        /// Parameter name.
        field: &'static str,
        /// Why it was rejected.
        reason: String,
    },
}

impl DomainError {
    /// Borrow the underlying reason.
    #[must_use]
    pub const fn reason(&self) -> &InvalidInput {
        match self {
            Self::InvalidInput(reason) => reason,
        }
    }
}
