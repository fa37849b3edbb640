//! Command-line interface definitions.
//!
//! Defines the CLI structure using `clap`. Every command reads JSON exported
//! from the market contracts and prints either a human-readable report or,
//! with `--json`, a single JSON document.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use super::paths;
use crate::domain::MarketStatus;

/// Accuracy-weighted reward distribution for range prediction markets
#[derive(Parser, Debug)]
#[command(name = "accuracy-pool")]
#[command(version, about)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, global = true, default_value_os_t = paths::default_config())]
    pub config: PathBuf,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Allocate a pool across bets by prediction accuracy
    Allocate(AllocateArgs),

    /// Settle a market: apply fee and minimum-participant rules, then allocate or refund
    Settle(SettleArgs),

    /// List markets, newest first
    Markets(MarketsArgs),

    /// Show how predictions are spread across values
    Distribution(InputArg),

    /// Walk through the reward formula on a worked example
    Explain,

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// Subcommands for `accuracy-pool config`.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Generate a new configuration file from template.
    Init(ConfigInitArgs),
    /// Display the effective configuration with defaults applied.
    Show,
    /// Validate the configuration file.
    Validate,
}

/// Shared argument for commands that read one resolution document.
#[derive(Parser, Debug)]
pub struct InputArg {
    /// Path to a JSON resolution document (actual value, pool, bets)
    pub input: PathBuf,
}

/// Arguments for the `allocate` subcommand.
#[derive(Parser, Debug)]
pub struct AllocateArgs {
    /// Path to a JSON resolution document (actual value, pool, bets)
    pub input: PathBuf,

    /// Override the number of fractional digits rewards are rounded to
    #[arg(long)]
    pub decimals: Option<u32>,
}

/// Arguments for the `settle` subcommand.
#[derive(Parser, Debug)]
pub struct SettleArgs {
    /// Path to a JSON resolution document (actual value, bets)
    pub input: PathBuf,

    /// Override the platform fee in basis points
    #[arg(long)]
    pub fee_bps: Option<u32>,

    /// Override the minimum number of participants
    #[arg(long)]
    pub min_participants: Option<usize>,
}

/// Arguments for the `markets` subcommand.
#[derive(Parser, Debug)]
pub struct MarketsArgs {
    /// Path to a JSON array of markets
    pub input: PathBuf,

    /// Only show markets with this status
    #[arg(long)]
    pub status: Option<MarketStatus>,
}

/// Arguments for `config init`.
#[derive(Parser, Debug)]
pub struct ConfigInitArgs {
    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}
