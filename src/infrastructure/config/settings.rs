//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all application settings.
//! Configuration is loaded from a TOML file; every section is optional and
//! falls back to defaults.
//!
//! # Example
//!
//! ```no_run
//! use accuracy_pool::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("accuracy-pool.toml")?;
//!     config.logging.init();
//!     Ok(())
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::logging::LoggingConfig;
use super::settlement::{AllocationConfig, PoolConfig};
use crate::domain::{
    Denomination, PoolPolicy, RewardAllocator, Settler, BPS_DENOMINATOR, MAX_DECIMALS,
};
use crate::error::{ConfigError, Result};

/// Main application configuration.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Reward rounding.
    #[serde(default)]
    pub allocation: AllocationConfig,

    /// Minimum participants and platform fee.
    #[serde(default)]
    pub pool: PoolConfig,
}

/// Serializable view of the effective settings, for `config show`.
#[derive(Debug, Serialize)]
pub struct EffectiveConfig<'a> {
    pub allocation: &'a AllocationConfig,
    pub pool: &'a PoolConfig,
    pub log_level: &'a str,
    pub log_format: &'a str,
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML content is malformed
    /// - Validation fails
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse_toml(&content)
    }

    /// Load `path` if it exists, otherwise use defaults.
    ///
    /// # Errors
    ///
    /// Same as [`Config::load`] when the file exists.
    #[allow(clippy::result_large_err)]
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    #[allow(clippy::result_large_err)]
    pub fn validate(&self) -> Result<()> {
        if self.allocation.decimals > MAX_DECIMALS {
            return Err(ConfigError::InvalidValue {
                field: "decimals",
                reason: format!("must be at most {MAX_DECIMALS}"),
            }
            .into());
        }
        if self.pool.min_participants == 0 {
            return Err(ConfigError::InvalidValue {
                field: "min_participants",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.pool.fee_bps > BPS_DENOMINATOR {
            return Err(ConfigError::InvalidValue {
                field: "fee_bps",
                reason: format!("must be between 0 and {BPS_DENOMINATOR}"),
            }
            .into());
        }
        let level = self.logging.level.trim();
        if level.is_empty() {
            return Err(ConfigError::MissingField { field: "level" }.into());
        }
        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(ConfigError::InvalidValue {
                field: "format",
                reason: "must be \"pretty\" or \"json\"".to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// The allocator described by `[allocation]`.
    ///
    /// # Errors
    ///
    /// Returns an error if `decimals` is out of range.
    #[allow(clippy::result_large_err)]
    pub fn allocator(&self) -> Result<RewardAllocator> {
        let denomination = Denomination::new(self.allocation.decimals)?;
        Ok(RewardAllocator::new(denomination))
    }

    /// The settler described by `[allocation]` and `[pool]`.
    ///
    /// # Errors
    ///
    /// Returns an error if either section holds out-of-range values.
    #[allow(clippy::result_large_err)]
    pub fn settler(&self) -> Result<Settler> {
        let policy = PoolPolicy::try_from(&self.pool)?;
        Ok(Settler::new(self.allocator()?, policy))
    }

    /// Borrow the effective settings for display.
    #[must_use]
    pub fn effective(&self) -> EffectiveConfig<'_> {
        EffectiveConfig {
            allocation: &self.allocation,
            pool: &self.pool,
            log_level: &self.logging.level,
            log_format: &self.logging.format,
        }
    }
}
