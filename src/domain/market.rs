//! Market metadata, lifecycle and listing.
//!
//! - [`MarketStatus`] - Lifecycle state with the on-chain numeric codes
//! - [`Market`] - A range market: what is measured, when, and within what bounds
//! - [`MarketFilter`] / [`list_markets`] - Status filter and newest-first ordering

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::{DomainError, InvalidInput};
use super::id::MarketId;
use super::money::Value;

/// Lifecycle of a market.
///
/// Serialized as the contract's numeric code: `0 = Pending`, `1 = Active`,
/// `2 = Resolved`, `3 = Cancelled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum MarketStatus {
    /// Created, waiting for enough participants.
    #[default]
    Pending,
    /// Accepting bets.
    Active,
    /// Final value known; rewards allocated.
    Resolved,
    /// Closed without resolution; stakes refunded.
    Cancelled,
}

impl MarketStatus {
    /// All statuses in code order.
    pub const ALL: [Self; 4] = [Self::Pending, Self::Active, Self::Resolved, Self::Cancelled];

    /// The on-chain numeric code.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Pending => 0,
            Self::Active => 1,
            Self::Resolved => 2,
            Self::Cancelled => 3,
        }
    }

    /// Lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Active => "active",
            Self::Resolved => "resolved",
            Self::Cancelled => "cancelled",
        }
    }

    /// True for terminal states.
    #[must_use]
    pub const fn is_settled(self) -> bool {
        matches!(self, Self::Resolved | Self::Cancelled)
    }

    /// Whether the lifecycle allows moving from `self` to `next`.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Active)
                | (Self::Active, Self::Resolved)
                | (Self::Pending | Self::Active, Self::Cancelled)
        )
    }

    /// Validate a transition.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput::IllegalTransition` if the lifecycle forbids it.
    pub fn transition(self, next: Self) -> Result<Self, DomainError> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(InvalidInput::IllegalTransition {
                from: self,
                to: next,
            }
            .into())
        }
    }
}

impl TryFrom<u8> for MarketStatus {
    type Error = DomainError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|s| s.code() == code)
            .ok_or_else(|| InvalidInput::UnknownStatus { code }.into())
    }
}

impl From<MarketStatus> for u8 {
    fn from(status: MarketStatus) -> Self {
        status.code()
    }
}

impl FromStr for MarketStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == name)
            .ok_or_else(|| format!("unknown market status '{s}'"))
    }
}

impl fmt::Display for MarketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A range prediction market.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Market {
    /// Contract address.
    pub id: MarketId,
    /// Display name.
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    /// What is being measured, e.g. `BTC/USD`.
    #[serde(default)]
    pub parameter: String,
    #[serde(default)]
    pub image_url: String,
    /// Unix seconds when betting opens.
    pub start_time: u64,
    /// Unix seconds when betting closes.
    pub end_time: u64,
    /// Smallest allowed prediction.
    pub min_value: Value,
    /// Largest allowed prediction.
    pub max_value: Value,
    /// Prediction granularity offered by the UI.
    #[serde(default = "default_step")]
    pub step: Value,
    #[serde(default)]
    initial_value: Option<Value>,
    #[serde(default)]
    pub status: MarketStatus,
    /// Sum of stakes, in base units.
    #[serde(default)]
    pub total_volume: u128,
    #[serde(default)]
    pub total_participants: u64,
    /// Resolved value, once known.
    #[serde(default)]
    pub final_value: Option<Value>,
}

fn default_step() -> Value {
    Decimal::ONE
}

impl Market {
    /// Create a pending market over `[min_value, max_value]`.
    pub fn new(
        id: impl Into<MarketId>,
        name: impl Into<String>,
        start_time: u64,
        end_time: u64,
        min_value: Value,
        max_value: Value,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            category: String::new(),
            parameter: String::new(),
            image_url: String::new(),
            start_time,
            end_time,
            min_value,
            max_value,
            step: default_step(),
            initial_value: None,
            status: MarketStatus::Pending,
            total_volume: 0,
            total_participants: 0,
            final_value: None,
        }
    }

    /// Set the initial slider value.
    #[must_use]
    pub fn with_initial_value(mut self, value: Value) -> Self {
        self.initial_value = Some(value);
        self
    }

    /// Set the status.
    #[must_use]
    pub fn with_status(mut self, status: MarketStatus) -> Self {
        self.status = status;
        self
    }

    /// Starting prediction: the explicit initial value or the range midpoint.
    #[must_use]
    pub fn initial_value(&self) -> Value {
        self.initial_value.unwrap_or_else(|| {
            match self.min_value.checked_add(self.max_value) {
                Some(sum) => sum / Decimal::TWO,
                // Same-signed bounds near the limit; their difference fits.
                None => self.min_value + (self.max_value - self.min_value) / Decimal::TWO,
            }
        })
    }

    /// Check that a prediction falls within `[min_value, max_value]`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput::PredictionOutOfRange` otherwise.
    pub fn check_prediction(&self, value: Value) -> Result<(), DomainError> {
        if value < self.min_value || value > self.max_value {
            return Err(InvalidInput::PredictionOutOfRange {
                value,
                min: self.min_value,
                max: self.max_value,
            }
            .into());
        }
        Ok(())
    }

    /// Move to `status`, enforcing the lifecycle.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput::IllegalTransition` for forbidden moves.
    pub fn set_status(&mut self, status: MarketStatus) -> Result<(), DomainError> {
        self.status = self.status.transition(status)?;
        Ok(())
    }
}

/// Which markets a listing should include.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MarketFilter {
    #[default]
    All,
    Status(MarketStatus),
}

impl MarketFilter {
    /// Whether `market` passes this filter.
    #[must_use]
    pub fn matches(&self, market: &Market) -> bool {
        match self {
            Self::All => true,
            Self::Status(status) => market.status == *status,
        }
    }
}

impl From<Option<MarketStatus>> for MarketFilter {
    fn from(status: Option<MarketStatus>) -> Self {
        status.map_or(Self::All, Self::Status)
    }
}

/// Markets passing `filter`, most recently started first.
///
/// Markets with equal start times keep their input order.
#[must_use]
pub fn list_markets(markets: &[Market], filter: MarketFilter) -> Vec<&Market> {
    let mut listed: Vec<&Market> = markets.iter().filter(|m| filter.matches(m)).collect();
    listed.sort_by(|a, b| b.start_time.cmp(&a.start_time));
    listed
}
