//! Histogram of predicted values across a market's bets.

use std::collections::BTreeMap;

use serde::Serialize;

use super::bet::Bet;
use super::money::Value;

/// Predicted values and how many bets chose each, ascending by value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PredictionDistribution {
    pub values: Vec<Value>,
    pub counts: Vec<u64>,
}

impl PredictionDistribution {
    /// Build the histogram for a set of bets.
    #[must_use]
    pub fn from_bets(bets: &[Bet]) -> Self {
        let mut buckets: BTreeMap<Value, u64> = BTreeMap::new();
        for bet in bets {
            *buckets.entry(bet.predicted_value.normalize()).or_default() += 1;
        }
        let (values, counts) = buckets.into_iter().unzip();
        Self { values, counts }
    }

    /// Number of bets counted.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Number of distinct predicted values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// `(value, count)` pairs in ascending value order.
    pub fn iter(&self) -> impl Iterator<Item = (Value, u64)> + '_ {
        self.values.iter().copied().zip(self.counts.iter().copied())
    }

    /// Most common prediction; ties resolve to the lowest value.
    #[must_use]
    pub fn mode(&self) -> Option<Value> {
        self.iter()
            .fold(None, |best: Option<(Value, u64)>, (value, count)| match best {
                Some((_, best_count)) if best_count >= count => best,
                _ => Some((value, count)),
            })
            .map(|(value, _)| value)
    }
}
