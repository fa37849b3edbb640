//! Monetary types and the smallest-unit arithmetic used for payouts.

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};

use super::error::{DomainError, InvalidInput};

/// Amount of the pool token, represented as a Decimal for precision.
pub type Amount = Decimal;

/// A predicted or actual value of the market's resolving metric.
pub type Value = Decimal;

/// Fractional digits of an 18-decimal (wei-denominated) token.
pub const DEFAULT_DECIMALS: u32 = 18;

/// Largest scale a `Decimal` can carry.
pub const MAX_DECIMALS: u32 = 28;

/// The smallest currency unit payouts are rounded to.
///
/// A token with `decimals = 18` pays out in multiples of `10^-18`; a
/// cent-denominated ledger would use `decimals = 2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Denomination {
    decimals: u32,
}

impl Denomination {
    /// Create a denomination with the given number of fractional digits.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput::Parameter` if `decimals` exceeds
    /// [`MAX_DECIMALS`].
    pub fn new(decimals: u32) -> Result<Self, DomainError> {
        if decimals > MAX_DECIMALS {
            return Err(InvalidInput::Parameter {
                field: "decimals",
                reason: format!("must be at most {MAX_DECIMALS}, got {decimals}"),
            }
            .into());
        }
        Ok(Self { decimals })
    }

    /// Number of fractional digits.
    #[must_use]
    pub const fn decimals(&self) -> u32 {
        self.decimals
    }

    /// The smallest representable amount, `10^-decimals`.
    #[must_use]
    pub fn unit(&self) -> Amount {
        Decimal::new(1, self.decimals)
    }

    /// Round toward zero to a whole number of units.
    #[must_use]
    pub fn floor(&self, amount: Amount) -> Amount {
        amount.round_dp_with_strategy(self.decimals, RoundingStrategy::ToZero)
    }

    /// Convert an integer amount of base units (e.g. wei) to a token amount.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput::OutOfRange` if the amount exceeds what a
    /// `Decimal` can represent at this scale.
    pub fn from_base_units(&self, units: u128) -> Result<Amount, DomainError> {
        let out_of_range = || InvalidInput::OutOfRange {
            field: "base_units",
        };
        let units = i128::try_from(units).map_err(|_| out_of_range())?;
        Decimal::try_from_i128_with_scale(units, self.decimals).map_err(|_| out_of_range().into())
    }

    /// Convert a token amount to integer base units, truncating sub-unit dust.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput::OutOfRange` for negative amounts or amounts
    /// whose base-unit count overflows.
    pub fn to_base_units(&self, amount: Amount) -> Result<u128, DomainError> {
        let out_of_range = || InvalidInput::OutOfRange {
            field: "base_units",
        };
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(out_of_range().into());
        }
        let scale = Decimal::from_i128_with_scale(10_i128.pow(self.decimals), 0);
        self.floor(amount)
            .checked_mul(scale)
            .and_then(|units| units.to_u128())
            .ok_or_else(|| out_of_range().into())
    }
}

impl Default for Denomination {
    fn default() -> Self {
        Self {
            decimals: DEFAULT_DECIMALS,
        }
    }
}

/// Convert a boundary floating-point input into a `Decimal`.
///
/// # Errors
///
/// Returns `InvalidInput::NonFinite` for NaN or infinities and
/// `InvalidInput::OutOfRange` for finite values beyond decimal range.
pub fn decimal_from_f64(field: &'static str, value: f64) -> Result<Decimal, DomainError> {
    if !value.is_finite() {
        return Err(InvalidInput::NonFinite { field, value }.into());
    }
    Decimal::from_f64(value).ok_or_else(|| InvalidInput::OutOfRange { field }.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn default_denomination_is_eighteen_decimals() {
        let denom = Denomination::default();
        assert_eq!(denom.decimals(), 18);
        assert_eq!(denom.unit(), dec!(0.000000000000000001));
    }

    #[test]
    fn rejects_scale_beyond_decimal_precision() {
        assert!(Denomination::new(28).is_ok());
        assert!(matches!(
            Denomination::new(29),
            Err(DomainError::InvalidInput(InvalidInput::Parameter {
                field: "decimals",
                ..
            }))
        ));
    }

    #[test]
    fn floor_truncates_toward_zero() {
        let cents = Denomination::new(2).unwrap();
        assert_eq!(cents.floor(dec!(11.6099)), dec!(11.60));
        assert_eq!(cents.floor(dec!(359.659999)), dec!(359.65));
        assert_eq!(cents.floor(dec!(7)), dec!(7));
    }

    #[test]
    fn base_units_convert_like_format_ether() {
        let wei = Denomination::default();
        let amount = wei.from_base_units(1_500_000_000_000_000_000).unwrap();
        assert_eq!(amount, dec!(1.5));
        assert_eq!(wei.to_base_units(amount).unwrap(), 1_500_000_000_000_000_000);
    }

    #[test]
    fn to_base_units_drops_sub_unit_dust() {
        let cents = Denomination::new(2).unwrap();
        assert_eq!(cents.to_base_units(dec!(1.239)).unwrap(), 123);
    }

    #[test]
    fn to_base_units_rejects_negative_amounts() {
        let cents = Denomination::new(2).unwrap();
        assert!(cents.to_base_units(dec!(-1)).is_err());
    }

    #[test]
    fn from_base_units_rejects_overflow() {
        let wei = Denomination::default();
        assert!(wei.from_base_units(u128::MAX).is_err());
    }

    #[test]
    fn decimal_from_f64_rejects_non_finite() {
        for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(matches!(
                decimal_from_f64("actual_value", value),
                Err(DomainError::InvalidInput(InvalidInput::NonFinite {
                    field: "actual_value",
                    ..
                }))
            ));
        }
    }

    #[test]
    fn decimal_from_f64_accepts_finite() {
        assert_eq!(decimal_from_f64("x", 850.0).unwrap(), dec!(850));
        assert_eq!(decimal_from_f64("x", -2.5).unwrap(), dec!(-2.5));
    }
}
