//! Shared helpers for pricing calculations.

use rust_decimal::Decimal;

/// Rounds a dollar amount to cents using half-up rounding.
///
/// Values at exactly half a cent round away from zero, following standard
/// financial convention.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use quote_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn rounds_down_below_midpoint() {
        assert_eq!(round_half_up(dec!(19.994)), dec!(19.99));
    }

    #[test]
    fn rounds_up_at_midpoint() {
        assert_eq!(round_half_up(dec!(19.995)), dec!(20.00));
    }

    #[test]
    fn rounds_negative_values_away_from_zero() {
        assert_eq!(round_half_up(dec!(-19.995)), dec!(-20.00));
    }

    #[test]
    fn preserves_already_rounded_values() {
        assert_eq!(round_half_up(dec!(19.99)), dec!(19.99));
    }
}
