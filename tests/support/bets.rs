use rand::rngs::StdRng;
use rand::Rng;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use accuracy_pool::domain::{Bet, Denomination, RewardAllocator};

/// The four-bet market resolving at 850 with a pool of 400.
pub fn documented_bets() -> Vec<Bet> {
    vec![
        Bet::new("alice", dec!(100), dec!(820), 1),
        Bet::new("bob", dec!(100), dec!(850), 2),
        Bet::new("charlie", dec!(100), dec!(880), 3),
        Bet::new("diana", dec!(100), dec!(830), 4),
    ]
}

pub fn bet(name: &str, predicted: Decimal) -> Bet {
    Bet::new(name, dec!(10), predicted, 0)
}

pub fn allocator(decimals: u32) -> RewardAllocator {
    RewardAllocator::new(Denomination::new(decimals).expect("valid decimals"))
}

/// `count` bets with predictions in `[lo, hi]` at two decimal places.
pub fn random_bets(rng: &mut StdRng, count: usize, lo: i64, hi: i64) -> Vec<Bet> {
    (0..count)
        .map(|i| {
            let cents = rng.gen_range(lo * 100..=hi * 100);
            let stake = Decimal::from(rng.gen_range(1..=1_000u32));
            Bet::new(
                format!("p{i}"),
                stake,
                Decimal::new(cents, 2),
                rng.gen_range(0..10_000u64),
            )
        })
        .collect()
}

/// A pool between 0.01 and 1 000 000.00.
pub fn random_pool(rng: &mut StdRng) -> Decimal {
    Decimal::new(rng.gen_range(1..=100_000_000i64), 2)
}
