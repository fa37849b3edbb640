//! Handler for the `markets` command.

use chrono::{DateTime, Utc};
use serde_json::json;
use tabled::Tabled;

use super::command::MarketsArgs;
use super::input;
use super::output;
use crate::domain::{list_markets, Denomination, Market, MarketFilter};
use crate::error::Result;
use crate::infrastructure::config::settings::Config;

#[derive(Tabled)]
struct MarketRow {
    #[tabled(rename = "Market")]
    name: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Range")]
    range: String,
    #[tabled(rename = "Starts")]
    starts: String,
    #[tabled(rename = "Ends")]
    ends: String,
    #[tabled(rename = "Bets")]
    participants: u64,
    #[tabled(rename = "Volume")]
    volume: String,
}

fn format_time(secs: u64) -> String {
    i64::try_from(secs)
        .ok()
        .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
        .map_or_else(
            || secs.to_string(),
            |time| time.format("%Y-%m-%d %H:%M UTC").to_string(),
        )
}

fn row(market: &Market, denomination: Denomination) -> MarketRow {
    let volume = denomination
        .from_base_units(market.total_volume)
        .map_or_else(|_| market.total_volume.to_string(), output::amount);
    MarketRow {
        name: market.name.clone(),
        status: market.status.to_string(),
        range: format!(
            "{} – {}",
            output::amount(market.min_value),
            output::amount(market.max_value)
        ),
        starts: format_time(market.start_time),
        ends: format_time(market.end_time),
        participants: market.total_participants,
        volume,
    }
}

/// Execute `markets`.
pub fn execute(config: &Config, args: &MarketsArgs) -> Result<()> {
    let denomination = Denomination::new(config.allocation.decimals)?;
    let markets = input::read_markets(&args.input)?;
    let listed = list_markets(&markets, MarketFilter::from(args.status));

    if output::is_json() {
        output::json_output(json!({
            "command": "markets",
            "total": markets.len(),
            "markets": listed,
        }));
        return Ok(());
    }

    output::header(env!("CARGO_PKG_VERSION"));
    output::section("Markets");
    if let Some(status) = args.status {
        output::field("Status", output::status(status));
    }
    output::field("Shown", format!("{} of {}", listed.len(), markets.len()));

    if listed.is_empty() {
        output::note("no markets match");
        return Ok(());
    }

    output::table(listed.iter().map(|m| row(m, denomination)));
    Ok(())
}
