//! Handler for the `allocate` command.

use serde_json::json;
use tabled::Tabled;
use tracing::debug;

use super::command::AllocateArgs;
use super::input;
use super::output;
use crate::domain::{Bet, Denomination, Distribution, PoolBreakdown, RewardAllocator};
use crate::error::Result;
use crate::infrastructure::config::settings::Config;

#[derive(Tabled)]
pub(super) struct AllocationRow {
    #[tabled(rename = "Participant")]
    participant: String,
    #[tabled(rename = "Prediction")]
    prediction: String,
    #[tabled(rename = "Distance")]
    distance: String,
    #[tabled(rename = "Accuracy")]
    accuracy: String,
    #[tabled(rename = "Reward")]
    reward: String,
}

/// Build one table row per bet, in input order.
pub(super) fn rows(bets: &[Bet], distribution: &Distribution) -> Vec<AllocationRow> {
    bets.iter()
        .zip(&distribution.allocations)
        .map(|(bet, allocation)| AllocationRow {
            participant: allocation.participant.to_string(),
            prediction: output::amount(bet.predicted_value),
            distance: output::amount(allocation.distance),
            accuracy: allocation.accuracy.round_dp(6).to_string(),
            reward: output::amount(allocation.reward),
        })
        .collect()
}

/// Print the rows and totals of a distribution.
pub(super) fn print_distribution(bets: &[Bet], distribution: &Distribution) {
    output::field("Actual value", output::amount(distribution.actual_value));
    output::field("Pool", output::amount(distribution.pool));
    output::field("Bets", distribution.allocations.len());

    if distribution.is_empty() {
        output::note("no bets, nothing to distribute");
        return;
    }

    output::field("Total accuracy", distribution.total_accuracy.round_dp(6));

    output::table(rows(bets, distribution));

    match &distribution.residual_recipient {
        Some(participant) => output::field(
            "Residual",
            format!(
                "{} {}",
                output::amount(distribution.residual),
                output::muted(format!("→ {participant}"))
            ),
        ),
        None => output::field("Residual", "0"),
    }
    output::success(&format!(
        "distributed {} of {}",
        output::highlight(output::amount(distribution.total_distributed())),
        output::amount(distribution.pool)
    ));
}

/// Execute `allocate`.
pub fn execute(config: &Config, args: &AllocateArgs) -> Result<()> {
    let allocator = match args.decimals {
        Some(decimals) => RewardAllocator::new(Denomination::new(decimals)?),
        None => config.allocator()?,
    };

    let resolution = input::read_resolution(&args.input)?;
    let actual_value = resolution.actual_value()?;
    let pool = match resolution.pool {
        Some(pool) => pool,
        None => {
            let breakdown =
                PoolBreakdown::from_bets(&resolution.bets, 0, allocator.denomination())?;
            debug!(gross = %breakdown.gross, "pool not given, using sum of stakes");
            breakdown.gross
        }
    };

    let distribution = allocator.allocate(&resolution.bets, actual_value, pool)?;

    if output::is_json() {
        output::json_output(json!({
            "command": "allocate",
            "distribution": distribution,
        }));
        return Ok(());
    }

    output::header(env!("CARGO_PKG_VERSION"));
    output::section("Reward allocation");
    print_distribution(&resolution.bets, &distribution);
    Ok(())
}
