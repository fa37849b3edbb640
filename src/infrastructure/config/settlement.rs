//! Reward allocation and pool policy configuration.

use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, PoolPolicy, DEFAULT_DECIMALS};

/// How rewards are rounded.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AllocationConfig {
    /// Fractional digits of the pool token (18 for wei-denominated tokens).
    #[serde(default = "default_decimals")]
    pub decimals: u32,
}

const fn default_decimals() -> u32 {
    DEFAULT_DECIMALS
}

impl Default for AllocationConfig {
    fn default() -> Self {
        Self {
            decimals: default_decimals(),
        }
    }
}

/// Participation and fee rules applied at settlement.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PoolConfig {
    /// Markets with fewer bets than this are cancelled and refunded.
    #[serde(default = "default_min_participants")]
    pub min_participants: usize,
    /// Platform fee in basis points, deducted before allocation.
    #[serde(default)]
    pub fee_bps: u32,
}

const fn default_min_participants() -> usize {
    3
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            min_participants: default_min_participants(),
            fee_bps: 0,
        }
    }
}

impl TryFrom<&PoolConfig> for PoolPolicy {
    type Error = DomainError;

    fn try_from(config: &PoolConfig) -> Result<Self, Self::Error> {
        Self::new(config.min_participants, config.fee_bps)
    }
}
