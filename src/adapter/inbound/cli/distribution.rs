//! Handler for the `distribution` command.

use serde_json::json;
use tabled::Tabled;

use super::command::InputArg;
use super::input;
use super::output;
use crate::domain::PredictionDistribution;
use crate::error::Result;

const BAR_WIDTH: u64 = 30;

#[derive(Tabled)]
struct BucketRow {
    #[tabled(rename = "Prediction")]
    value: String,
    #[tabled(rename = "Bets")]
    count: u64,
    #[tabled(rename = "")]
    bar: String,
}

fn bar(count: u64, max: u64) -> String {
    if max == 0 {
        return String::new();
    }
    let width = (count * BAR_WIDTH).div_ceil(max);
    "█".repeat(usize::try_from(width).unwrap_or(0))
}

/// Execute `distribution`.
pub fn execute(args: &InputArg) -> Result<()> {
    let resolution = input::read_resolution(&args.input)?;
    let histogram = PredictionDistribution::from_bets(&resolution.bets);

    if output::is_json() {
        output::json_output(json!({
            "command": "distribution",
            "total": histogram.total(),
            "mode": histogram.mode(),
            "distribution": histogram,
        }));
        return Ok(());
    }

    output::header(env!("CARGO_PKG_VERSION"));
    output::section("Prediction distribution");
    output::field("Bets", histogram.total());
    output::field("Distinct values", histogram.len());

    let Some(mode) = histogram.mode() else {
        output::note("no bets");
        return Ok(());
    };
    output::field("Most common", output::highlight(mode));
    if let Some(actual) = resolution.actual_value {
        output::field("Actual value", output::amount(actual));
    }

    let max = histogram.counts.iter().copied().max().unwrap_or(0);
    output::table(histogram.iter().map(|(value, count)| BucketRow {
        value: value.to_string(),
        count,
        bar: bar(count, max),
    }));
    Ok(())
}
