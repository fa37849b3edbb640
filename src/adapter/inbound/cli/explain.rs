//! Handler for the `explain` command.
//!
//! Walks the reward formula through a four-bet market resolving at 850 with
//! a pool of 400, rounded to cents.

use rust_decimal_macros::dec;
use serde_json::json;

use super::allocate::print_distribution;
use super::output;
use crate::domain::{Bet, Denomination, Distribution, RewardAllocator};
use crate::error::Result;

const FORMULAS: [(&str, &str); 4] = [
    ("Distance", "|prediction - actual|"),
    ("Accuracy", "1 / (distance + 1)"),
    ("Raw reward", "accuracy / Σ accuracy × pool"),
    ("Reward", "raw reward rounded down; remainder to the most accurate bet"),
];

fn example_bets() -> Vec<Bet> {
    vec![
        Bet::new("alice", dec!(100), dec!(820), 1),
        Bet::new("bob", dec!(100), dec!(850), 2),
        Bet::new("charlie", dec!(100), dec!(880), 3),
        Bet::new("diana", dec!(100), dec!(830), 4),
    ]
}

fn example() -> Result<(Vec<Bet>, Distribution)> {
    let bets = example_bets();
    let allocator = RewardAllocator::new(Denomination::new(2)?);
    let distribution = allocator.allocate(&bets, dec!(850), dec!(400))?;
    Ok((bets, distribution))
}

/// Execute `explain`.
pub fn execute() -> Result<()> {
    let (bets, distribution) = example()?;

    if output::is_json() {
        let formulas: serde_json::Map<String, serde_json::Value> = FORMULAS
            .iter()
            .map(|(name, formula)| ((*name).to_string(), json!(formula)))
            .collect();
        output::json_output(json!({
            "command": "explain",
            "formulas": formulas,
            "example": {
                "bets": bets,
                "distribution": distribution,
            },
        }));
        return Ok(());
    }

    output::header(env!("CARGO_PKG_VERSION"));
    output::section("Formula");
    for (name, formula) in FORMULAS {
        output::field(name, formula);
    }
    output::note("Stakes do not affect the split; only closeness to the outcome does.");

    output::section("Example");
    print_distribution(&bets, &distribution);
    output::hint("Bob predicted exactly, so accuracy 1 and the largest share.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ParticipantId;

    #[test]
    fn example_distributes_whole_pool() {
        let (_, distribution) = example().unwrap();
        assert_eq!(distribution.total_distributed(), dec!(400));
        assert_eq!(
            distribution.residual_recipient,
            Some(ParticipantId::from("bob"))
        );
    }
}
