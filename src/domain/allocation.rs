//! Accuracy-weighted reward allocation.
//!
//! Each bet scores `accuracy = 1 / (|predicted - actual| + 1)` and receives
//! `accuracy / total_accuracy` of the pool. Payouts are rounded down to the
//! smallest currency unit and the rounding residual goes to one designated
//! bet, so the pool is always distributed exactly.
//!
//! # Example
//!
//! ```
//! use accuracy_pool::domain::{Bet, Denomination, RewardAllocator};
//! use rust_decimal_macros::dec;
//!
//! let allocator = RewardAllocator::new(Denomination::new(2).unwrap());
//! let bets = vec![
//!     Bet::new("alice", dec!(100), dec!(820), 1),
//!     Bet::new("bob", dec!(100), dec!(850), 2),
//! ];
//!
//! let distribution = allocator.allocate(&bets, dec!(850), dec!(200)).unwrap();
//! assert_eq!(distribution.total_distributed(), dec!(200));
//! ```

use std::cmp::Ordering;

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use super::bet::Bet;
use super::error::{DomainError, InvalidInput};
use super::id::ParticipantId;
use super::money::{decimal_from_f64, Amount, Denomination, Value};

/// One participant's share of a resolved market.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Allocation {
    /// Owner of the bet.
    pub participant: ParticipantId,
    /// `|predicted - actual|`.
    pub distance: Decimal,
    /// `1 / (distance + 1)`, in `(0, 1]`.
    pub accuracy: Decimal,
    /// Proportional share before rounding.
    pub raw_reward: Amount,
    /// Final payout, a whole number of currency units except for the
    /// residual recipient.
    pub reward: Amount,
}

/// The full result of allocating a pool across a market's bets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Distribution {
    /// The value the market resolved to.
    pub actual_value: Value,
    /// The pool that was distributed.
    pub pool: Amount,
    /// Sum of all accuracy scores.
    pub total_accuracy: Decimal,
    /// `pool - sum(rounded rewards)` before reconciliation.
    pub residual: Amount,
    /// Who absorbed the residual, if there was one.
    pub residual_recipient: Option<ParticipantId>,
    /// Per-bet results, in input order.
    pub allocations: Vec<Allocation>,
}

impl Distribution {
    fn empty(actual_value: Value, pool: Amount) -> Self {
        Self {
            actual_value,
            pool,
            total_accuracy: Decimal::ZERO,
            residual: Decimal::ZERO,
            residual_recipient: None,
            allocations: Vec::new(),
        }
    }

    /// Sum of final rewards. Equals `pool` for every non-empty distribution.
    ///
    /// Saturates at `Decimal::MAX`; an allocator-built distribution never
    /// gets there.
    #[must_use]
    pub fn total_distributed(&self) -> Amount {
        self.allocations
            .iter()
            .fold(Decimal::ZERO, |sum, a| sum.saturating_add(a.reward))
    }

    /// True when there were no bets to pay.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.allocations.is_empty()
    }

    /// Look up a participant's allocation.
    #[must_use]
    pub fn get(&self, participant: &ParticipantId) -> Option<&Allocation> {
        self.allocations
            .iter()
            .find(|a| &a.participant == participant)
    }
}

/// Distance between a prediction and the actual value.
///
/// # Errors
///
/// Returns `InvalidInput::OutOfRange` if the difference overflows.
pub fn distance(predicted_value: Value, actual_value: Value) -> Result<Decimal, DomainError> {
    predicted_value
        .checked_sub(actual_value)
        .map(|d| d.abs())
        .ok_or_else(|| InvalidInput::OutOfRange { field: "distance" }.into())
}

/// Accuracy score for a distance: `1 / (distance + 1)`.
///
/// # Errors
///
/// Returns `InvalidInput::OutOfRange` if `distance + 1` overflows.
pub fn accuracy(distance: Decimal) -> Result<Decimal, DomainError> {
    distance
        .checked_add(Decimal::ONE)
        .and_then(|denominator| Decimal::ONE.checked_div(denominator))
        .ok_or_else(|| InvalidInput::OutOfRange { field: "accuracy" }.into())
}

/// Splits a resolved market's pool by prediction accuracy.
///
/// Stateless; the only setting is the currency unit rewards are rounded to.
#[derive(Debug, Clone, Copy, Default)]
pub struct RewardAllocator {
    denomination: Denomination,
}

impl RewardAllocator {
    /// Create an allocator that pays out in multiples of `denomination`'s unit.
    #[must_use]
    pub const fn new(denomination: Denomination) -> Self {
        Self { denomination }
    }

    /// The denomination rewards are rounded to.
    #[must_use]
    pub const fn denomination(&self) -> Denomination {
        self.denomination
    }

    /// Allocate `pool` across `bets` given the market's `actual_value`.
    ///
    /// An empty bet list yields an empty distribution. A zero pool yields
    /// all-zero rewards. Stake does not enter the formula; it is only
    /// validated.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidInput` if the pool or any stake is
    /// negative, or if a derived quantity overflows decimal range. Nothing is
    /// computed when validation fails.
    pub fn allocate(
        &self,
        bets: &[Bet],
        actual_value: Value,
        pool: Amount,
    ) -> Result<Distribution, DomainError> {
        validate(bets, pool)?;

        if bets.is_empty() {
            debug!(%pool, "no bets to allocate");
            return Ok(Distribution::empty(actual_value, pool));
        }

        let mut scores = Vec::with_capacity(bets.len());
        for bet in bets {
            let distance = distance(bet.predicted_value, actual_value)?;
            scores.push((distance, accuracy(distance)?));
        }

        let total_accuracy = scores
            .iter()
            .try_fold(Decimal::ZERO, |sum, (_, accuracy)| sum.checked_add(*accuracy))
            .ok_or(InvalidInput::OutOfRange {
                field: "total_accuracy",
            })?;

        debug!(
            bets = bets.len(),
            %actual_value,
            %pool,
            %total_accuracy,
            "scored predictions"
        );

        let mut allocations = Vec::with_capacity(bets.len());
        for (bet, (distance, accuracy)) in bets.iter().zip(scores) {
            let raw_reward = accuracy
                .checked_div(total_accuracy)
                .and_then(|share| share.checked_mul(pool))
                .ok_or(InvalidInput::OutOfRange { field: "reward" })?;
            allocations.push(Allocation {
                participant: bet.participant.clone(),
                distance,
                accuracy,
                raw_reward,
                reward: self.denomination.floor(raw_reward),
            });
        }

        // Subtract as we go: the floors can sum past `Decimal::MAX` when the
        // pool sits at the top of the range, the running residual cannot.
        let residual = allocations
            .iter()
            .try_fold(pool, |left, a| left.checked_sub(a.reward))
            .ok_or(InvalidInput::OutOfRange { field: "residual" })?;
        let recipient = reconcile(&mut allocations, bets, residual);

        let residual_recipient = recipient.map(|idx| allocations[idx].participant.clone());
        if let Some(participant) = &residual_recipient {
            debug!(%residual, %participant, "assigned rounding residual");
        }

        Ok(Distribution {
            actual_value,
            pool,
            total_accuracy,
            residual,
            residual_recipient,
            allocations,
        })
    }

    /// Allocate from floating-point resolution inputs.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput::NonFinite` if `actual_value` or `pool` is NaN or
    /// infinite, plus everything [`RewardAllocator::allocate`] rejects.
    pub fn allocate_f64(
        &self,
        bets: &[Bet],
        actual_value: f64,
        pool: f64,
    ) -> Result<Distribution, DomainError> {
        let actual_value = decimal_from_f64("actual_value", actual_value)?;
        let pool = decimal_from_f64("pool", pool)?;
        self.allocate(bets, actual_value, pool)
    }
}

fn validate(bets: &[Bet], pool: Amount) -> Result<(), DomainError> {
    if pool.is_sign_negative() && !pool.is_zero() {
        return Err(InvalidInput::NegativePool { pool }.into());
    }
    if let Some(bet) = bets
        .iter()
        .find(|b| b.stake.is_sign_negative() && !b.stake.is_zero())
    {
        return Err(InvalidInput::NegativeStake {
            participant: bet.participant.clone(),
            stake: bet.stake,
        }
        .into());
    }
    Ok(())
}

/// Residual priority: largest raw reward, then earliest bet, then input order.
fn priority(allocations: &[Allocation], bets: &[Bet], a: usize, b: usize) -> Ordering {
    allocations[b]
        .raw_reward
        .cmp(&allocations[a].raw_reward)
        .then_with(|| bets[a].timestamp.cmp(&bets[b].timestamp))
        .then_with(|| a.cmp(&b))
}

/// Fold `residual` into the rewards so they sum to the pool exactly.
///
/// A surplus goes to the highest-priority bet. A shortfall, which only
/// finite-precision division can produce, is taken from the lowest-priority
/// bets first. Returns the index of the bet that absorbed it.
fn reconcile(allocations: &mut [Allocation], bets: &[Bet], residual: Amount) -> Option<usize> {
    if residual.is_zero() {
        return None;
    }

    let mut order: Vec<usize> = (0..allocations.len()).collect();
    order.sort_by(|&a, &b| priority(allocations, bets, a, b));

    if residual.is_sign_positive() {
        let idx = order[0];
        allocations[idx].reward += residual;
        return Some(idx);
    }

    let mut shortfall = -residual;
    let mut recipient = None;
    for &idx in order.iter().rev() {
        let take = shortfall.min(allocations[idx].reward);
        if take.is_zero() {
            continue;
        }
        allocations[idx].reward -= take;
        shortfall -= take;
        recipient.get_or_insert(idx);
        if shortfall.is_zero() {
            break;
        }
    }
    recipient
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn cents() -> RewardAllocator {
        RewardAllocator::new(Denomination::new(2).unwrap())
    }

    fn documented_bets() -> Vec<Bet> {
        vec![
            Bet::new("alice", dec!(100), dec!(820), 1),
            Bet::new("bob", dec!(100), dec!(850), 2),
            Bet::new("charlie", dec!(100), dec!(880), 3),
            Bet::new("diana", dec!(100), dec!(830), 4),
        ]
    }

    fn reward_of(distribution: &Distribution, name: &str) -> Amount {
        distribution
            .get(&ParticipantId::from(name))
            .map(|a| a.reward)
            .unwrap()
    }

    #[test]
    fn distance_is_absolute() {
        assert_eq!(distance(dec!(820), dec!(850)).unwrap(), dec!(30));
        assert_eq!(distance(dec!(880), dec!(850)).unwrap(), dec!(30));
        assert_eq!(distance(dec!(-5), dec!(5)).unwrap(), dec!(10));
    }

    #[test]
    fn accuracy_is_one_for_exact_match() {
        assert_eq!(accuracy(Decimal::ZERO).unwrap(), Decimal::ONE);
        assert_eq!(accuracy(dec!(1)).unwrap(), dec!(0.5));
        assert_eq!(accuracy(dec!(3)).unwrap(), dec!(0.25));
    }

    #[test]
    fn distance_overflow_is_invalid_input() {
        let result = distance(Decimal::MAX, Decimal::MIN);
        assert!(matches!(
            result,
            Err(DomainError::InvalidInput(InvalidInput::OutOfRange {
                field: "distance"
            }))
        ));
    }

    #[test]
    fn documented_example_distances_and_accuracies() {
        let distribution = cents()
            .allocate(&documented_bets(), dec!(850), dec!(400))
            .unwrap();

        let distances: Vec<Decimal> = distribution
            .allocations
            .iter()
            .map(|a| a.distance)
            .collect();
        assert_eq!(distances, vec![dec!(30), dec!(0), dec!(30), dec!(20)]);

        assert_eq!(distribution.allocations[1].accuracy, Decimal::ONE);
        assert_eq!(
            distribution.allocations[0].accuracy.round_dp(6),
            dec!(0.032258)
        );
        assert_eq!(
            distribution.allocations[3].accuracy.round_dp(6),
            dec!(0.047619)
        );
        assert_eq!(distribution.total_accuracy.round_dp(6), dec!(1.112135));
    }

    #[test]
    fn documented_example_rewards() {
        let distribution = cents()
            .allocate(&documented_bets(), dec!(850), dec!(400))
            .unwrap();

        let raw: Vec<Decimal> = distribution
            .allocations
            .iter()
            .map(|a| a.raw_reward.round_dp(2))
            .collect();
        assert_eq!(raw, vec![dec!(11.60), dec!(359.67), dec!(11.60), dec!(17.13)]);

        // Floors sum to 399.98; bob has the largest share and absorbs 0.02.
        assert_eq!(distribution.residual, dec!(0.02));
        assert_eq!(
            distribution.residual_recipient,
            Some(ParticipantId::from("bob"))
        );
        assert_eq!(reward_of(&distribution, "alice"), dec!(11.60));
        assert_eq!(reward_of(&distribution, "bob"), dec!(359.68));
        assert_eq!(reward_of(&distribution, "charlie"), dec!(11.60));
        assert_eq!(reward_of(&distribution, "diana"), dec!(17.12));
        assert_eq!(distribution.total_distributed(), dec!(400));
    }

    #[test]
    fn single_bet_takes_entire_pool() {
        let bets = vec![Bet::new("solo", dec!(10), dec!(1), 0)];
        let distribution = cents().allocate(&bets, dec!(9999), dec!(100)).unwrap();

        assert_eq!(distribution.allocations.len(), 1);
        assert_eq!(distribution.allocations[0].reward, dec!(100));
    }

    #[test]
    fn empty_bets_yield_empty_distribution() {
        let distribution = cents().allocate(&[], dec!(850), dec!(100)).unwrap();
        assert!(distribution.is_empty());
        assert_eq!(distribution.residual_recipient, None);
        assert_eq!(distribution.total_distributed(), Decimal::ZERO);
    }

    #[test]
    fn zero_pool_pays_nothing() {
        let distribution = cents()
            .allocate(&documented_bets(), dec!(850), Decimal::ZERO)
            .unwrap();
        assert!(distribution.allocations.iter().all(|a| a.reward.is_zero()));
        assert_eq!(distribution.residual_recipient, None);
    }

    #[test]
    fn negative_pool_is_rejected() {
        let result = cents().allocate(&documented_bets(), dec!(850), dec!(-0.01));
        assert!(matches!(
            result,
            Err(DomainError::InvalidInput(InvalidInput::NegativePool { .. }))
        ));
    }

    #[test]
    fn negative_stake_is_rejected() {
        let mut bets = documented_bets();
        bets[2].stake = dec!(-5);
        let result = cents().allocate(&bets, dec!(850), dec!(400));
        match result {
            Err(DomainError::InvalidInput(InvalidInput::NegativeStake { participant, stake })) => {
                assert_eq!(participant.as_str(), "charlie");
                assert_eq!(stake, dec!(-5));
            }
            other => panic!("expected negative stake error, got {other:?}"),
        }
    }

    #[test]
    fn non_finite_actual_value_is_rejected() {
        let result = cents().allocate_f64(&documented_bets(), f64::NAN, 400.0);
        assert!(matches!(
            result,
            Err(DomainError::InvalidInput(InvalidInput::NonFinite {
                field: "actual_value",
                ..
            }))
        ));
    }

    #[test]
    fn allocate_f64_matches_decimal_path() {
        let from_f64 = cents()
            .allocate_f64(&documented_bets(), 850.0, 400.0)
            .unwrap();
        let from_decimal = cents()
            .allocate(&documented_bets(), dec!(850), dec!(400))
            .unwrap();
        assert_eq!(from_f64, from_decimal);
    }

    #[test]
    fn residual_tie_goes_to_earliest_bet() {
        // Three identical predictions: 100 / 3 floors to 33.33 each.
        let bets = vec![
            Bet::new("late", dec!(1), dec!(10), 30),
            Bet::new("early", dec!(1), dec!(10), 10),
            Bet::new("middle", dec!(1), dec!(10), 20),
        ];
        let distribution = cents().allocate(&bets, dec!(10), dec!(100)).unwrap();

        assert_eq!(distribution.residual, dec!(0.01));
        assert_eq!(reward_of(&distribution, "early"), dec!(33.34));
        assert_eq!(reward_of(&distribution, "late"), dec!(33.33));
        assert_eq!(reward_of(&distribution, "middle"), dec!(33.33));
    }

    #[test]
    fn residual_tie_on_timestamp_falls_back_to_input_order() {
        let bets = vec![
            Bet::new("first", dec!(1), dec!(10), 5),
            Bet::new("second", dec!(1), dec!(10), 5),
            Bet::new("third", dec!(1), dec!(10), 5),
        ];
        let distribution = cents().allocate(&bets, dec!(10), dec!(100)).unwrap();
        assert_eq!(
            distribution.residual_recipient,
            Some(ParticipantId::from("first"))
        );
    }

    #[test]
    fn stake_does_not_change_raw_reward() {
        let bets = vec![
            Bet::new("whale", dec!(1000), dec!(12), 1),
            Bet::new("minnow", dec!(1), dec!(8), 2),
        ];
        let distribution = cents().allocate(&bets, dec!(10), dec!(50)).unwrap();
        assert_eq!(
            distribution.allocations[0].raw_reward,
            distribution.allocations[1].raw_reward
        );
    }

    #[test]
    fn largest_representable_pool_is_distributed_exactly() {
        let bets = vec![
            Bet::new("a", dec!(1), dec!(1), 1),
            Bet::new("b", dec!(1), dec!(2), 2),
            Bet::new("c", dec!(1), dec!(7), 3),
        ];
        let distribution = cents().allocate(&bets, dec!(2), Decimal::MAX).unwrap();

        assert_eq!(distribution.total_distributed(), Decimal::MAX);
        assert!(distribution.allocations.iter().all(|a| a.reward >= Decimal::ZERO));
        assert_eq!(
            distribution.residual_recipient.is_some(),
            !distribution.residual.is_zero()
        );
    }

    #[test]
    fn shortfall_is_taken_from_lowest_priority() {
        let bets = documented_bets();
        let mut allocations: Vec<Allocation> = bets
            .iter()
            .zip([dec!(1), dec!(4), dec!(1), dec!(2)])
            .map(|(bet, reward)| Allocation {
                participant: bet.participant.clone(),
                distance: Decimal::ZERO,
                accuracy: Decimal::ONE,
                raw_reward: reward,
                reward,
            })
            .collect();

        // alice and charlie tie on raw reward; charlie bet later, so pays first.
        let recipient = reconcile(&mut allocations, &bets, dec!(-1.5));
        assert_eq!(recipient, Some(2));
        assert_eq!(allocations[2].reward, Decimal::ZERO);
        assert_eq!(allocations[0].reward, dec!(0.5));
        assert_eq!(allocations[1].reward, dec!(4));
        assert_eq!(allocations[3].reward, dec!(2));
    }
}
