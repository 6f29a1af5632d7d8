//! Money primitives shared by every calculation.
//!
//! Monetary values are [`Decimal`]s rounded to cents with round-half-away-from-zero,
//! and monthly series are plain vectors indexed by absolute project period.

use rust_decimal::{Decimal, RoundingStrategy};

/// A monetary amount.
pub type Money = Decimal;

/// An interest, discount or escalation rate expressed as a decimal fraction (0.05 = 5%).
pub type Rate = Decimal;

/// A monthly series of money, index 0 being period 0 of the project timeline.
pub type MonthlyArray = Vec<Money>;

/// Number of decimal places money is rounded to.
pub const MONEY_DP: u32 = 2;

/// Rounds an amount to cents, halves away from zero.
///
/// # Example
///
/// ```
/// use feasibility_engine::models::round_money;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(round_money(dec!(2.345)), dec!(2.35));
/// assert_eq!(round_money(dec!(-2.345)), dec!(-2.35));
/// ```
pub fn round_money(amount: Decimal) -> Money {
    amount.round_dp_with_strategy(MONEY_DP, RoundingStrategy::MidpointAwayFromZero)
}

/// Sums a series of amounts.
pub fn sum_money(values: &[Money]) -> Money {
    values.iter().copied().sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_round_money_half_away_from_zero() {
        assert_eq!(round_money(dec!(0.005)), dec!(0.01));
        assert_eq!(round_money(dec!(-0.005)), dec!(-0.01));
        assert_eq!(round_money(dec!(0.004)), dec!(0.00));
    }

    #[test]
    fn test_round_money_keeps_cents() {
        assert_eq!(round_money(dec!(400000)), dec!(400000));
        assert_eq!(round_money(dec!(33976.7315)), dec!(33976.73));
    }

    #[test]
    fn test_sum_money_empty_is_zero() {
        assert_eq!(sum_money(&[]), Decimal::ZERO);
    }

    #[test]
    fn test_sum_money_adds_all_periods() {
        assert_eq!(sum_money(&[dec!(1.10), dec!(2.20), dec!(-0.30)]), dec!(3.00));
    }
}
