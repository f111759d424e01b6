//! Rounding helpers shared by the calculation modules.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a money value to cents, with midpoints rounded away from zero.
///
/// # Examples
///
/// ```
/// use income_engine::calculation::round_currency;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let dec = |s: &str| Decimal::from_str(s).unwrap();
/// assert_eq!(round_currency(dec("123.454")), dec("123.45"));
/// assert_eq!(round_currency(dec("123.455")), dec("123.46"));
/// assert_eq!(round_currency(dec("-123.455")), dec("-123.46"));
/// ```
pub fn round_currency(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Returns the fractional part of a non-negative value.
pub(crate) fn fractional_part(value: Decimal) -> Decimal {
    value - value.floor()
}
