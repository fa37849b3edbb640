//! Handler for the `settle` command.

use serde_json::json;
use tabled::Tabled;

use super::allocate::print_distribution;
use super::command::SettleArgs;
use super::input;
use super::output;
use crate::domain::{PoolPolicy, Refund, SettlementOutcome, Settler};
use crate::error::Result;
use crate::infrastructure::config::settings::Config;

#[derive(Tabled)]
struct RefundRow {
    #[tabled(rename = "Participant")]
    participant: String,
    #[tabled(rename = "Refund")]
    amount: String,
}

impl From<&Refund> for RefundRow {
    fn from(refund: &Refund) -> Self {
        Self {
            participant: refund.participant.to_string(),
            amount: output::amount(refund.amount),
        }
    }
}

/// Apply command-line overrides on top of the configured policy.
fn settler(config: &Config, args: &SettleArgs) -> Result<Settler> {
    let configured = config.settler()?;
    if args.fee_bps.is_none() && args.min_participants.is_none() {
        return Ok(configured);
    }
    let base = configured.policy();
    let policy = PoolPolicy::new(
        args.min_participants.unwrap_or(base.min_participants()),
        args.fee_bps.unwrap_or(base.fee_bps()),
    )?;
    Ok(Settler::new(config.allocator()?, policy))
}

/// Execute `settle`.
pub fn execute(config: &Config, args: &SettleArgs) -> Result<()> {
    let settler = settler(config, args)?;
    let resolution = input::read_resolution(&args.input)?;
    if resolution.pool.is_some() {
        tracing::debug!("ignoring `pool` in input, settlement derives it from stakes");
    }
    let outcome = settler.settle(&resolution.bets, resolution.actual_value()?)?;

    if output::is_json() {
        output::json_output(json!({
            "command": "settle",
            "status": outcome.market_status(),
            "status_name": outcome.market_status().as_str(),
            "settlement": outcome,
        }));
        return Ok(());
    }

    output::header(env!("CARGO_PKG_VERSION"));
    output::section("Settlement");
    output::field("Min participants", settler.policy().min_participants());
    output::field("Fee", format!("{} bps", settler.policy().fee_bps()));

    match &outcome {
        SettlementOutcome::Distributed { pool, distribution } => {
            output::field("Gross pool", output::amount(pool.gross));
            output::field("Platform fee", output::amount(pool.fee));
            output::field("Status", output::status(outcome.market_status()));

            output::section("Reward allocation");
            print_distribution(&resolution.bets, distribution);
        }
        SettlementOutcome::Refunded {
            participants,
            min_participants,
            refunds,
        } => {
            output::field("Status", output::status(outcome.market_status()));
            output::warning(&format!(
                "{participants} participant(s), at least {min_participants} required; market cancelled"
            ));
            if refunds.is_empty() {
                output::note("no stakes to refund");
                return Ok(());
            }
            output::table(refunds.iter().map(RefundRow::from));
        }
    }
    Ok(())
}
