//! Even-spread cost expansion.
//!
//! This module spreads a single escalated lump amount evenly over an inclusive
//! period range of the project timeline.

use rust_decimal::Decimal;
use tracing::debug;

use crate::error::EngineResult;
use crate::models::{CostItem, Money, MonthlyArray, round_money, sum_money};

/// Expands a cost or revenue item into a monthly array of `timeline_months` periods.
///
/// The escalated total (see [`CostItem::escalation_factor`]) is divided evenly
/// over `[start_period, end_period]` and rounded to cents. The rounding remainder
/// is added entirely to `end_period`, so the array always sums to the escalated
/// total rounded to cents. Periods outside the range are zero.
///
/// # Errors
///
/// Any validation error from [`CostItem::validate`], including an item that ends
/// on or after `timeline_months`.
///
/// # Examples
///
/// ```
/// use feasibility_engine::calculation::expand_cost;
/// use feasibility_engine::models::CostItem;
/// use rust_decimal_macros::dec;
///
/// let row = expand_cost(&CostItem::new(dec!(1200000), 1, 3), 12).unwrap();
/// assert_eq!(row.len(), 12);
/// assert_eq!(&row[1..4], &[dec!(400000), dec!(400000), dec!(400000)]);
/// assert_eq!(row[0], dec!(0));
/// ```
pub fn expand_cost(item: &CostItem, timeline_months: usize) -> EngineResult<MonthlyArray> {
    item.validate(timeline_months)?;

    let escalated = item.escalated_amount()?;
    let per_period = round_money(escalated / Decimal::from(item.period_count()));

    let mut row = vec![Decimal::ZERO; timeline_months];
    let span = item.start_period..=item.end_period;
    row[span.clone()].fill(per_period);

    // The last period absorbs all rounding drift.
    let filled: Money = sum_money(&row[span]);
    let remainder = round_money(escalated - filled);
    row[item.end_period] += remainder;

    debug!(
        start_period = item.start_period,
        end_period = item.end_period,
        escalated = %escalated,
        per_period = %per_period,
        remainder = %remainder,
        "Expanded cost item"
    );

    Ok(row)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use crate::models::EscalationBasis;
    use rust_decimal_macros::dec;

    #[test]
    fn test_even_split_without_remainder() {
        let row = expand_cost(&CostItem::new(dec!(1200000), 1, 3), 12).unwrap();

        assert_eq!(row.len(), 12);
        assert_eq!(&row[1..4], &[dec!(400000), dec!(400000), dec!(400000)]);
        assert!(row[4..].iter().all(|v| v.is_zero()));
        assert!(row[0].is_zero());
    }

    #[test]
    fn test_remainder_goes_to_last_period() {
        let row = expand_cost(&CostItem::new(dec!(100), 0, 2), 3).unwrap();

        assert_eq!(row, vec![dec!(33.33), dec!(33.33), dec!(33.34)]);
        assert_eq!(sum_money(&row), dec!(100));
    }

    #[test]
    fn test_negative_remainder_reduces_last_period() {
        // 200 / 3 = 66.666.. rounds up to 66.67, leaving -0.01 for the last period
        let row = expand_cost(&CostItem::new(dec!(200), 0, 2), 3).unwrap();

        assert_eq!(row, vec![dec!(66.67), dec!(66.67), dec!(66.66)]);
        assert_eq!(sum_money(&row), dec!(200));
    }

    #[test]
    fn test_single_period_item_gets_whole_amount() {
        let row = expand_cost(&CostItem::new(dec!(1234.567), 4, 4).with_escalation(dec!(0.1)), 6)
            .unwrap();

        assert_eq!(row[4], dec!(1234.57));
        assert_eq!(sum_money(&row), dec!(1234.57));
    }

    #[test]
    fn test_annual_escalation_over_one_year() {
        let item = CostItem::new(dec!(1000000), 0, 12).with_escalation(dec!(0.06));
        let row = expand_cost(&item, 24).unwrap();

        assert_eq!(sum_money(&row), dec!(1060000.00));
        assert!(row[13..].iter().all(|v| v.is_zero()));
    }

    #[test]
    fn test_monthly_escalation_over_one_year() {
        let item = CostItem::new(dec!(1000000), 0, 12)
            .with_escalation(dec!(0.06))
            .with_basis(EscalationBasis::Monthly);
        let row = expand_cost(&item, 24).unwrap();

        assert_eq!(sum_money(&row), dec!(1061677.81));
    }

    #[test]
    fn test_zero_amount_yields_zero_row() {
        let row = expand_cost(&CostItem::new(dec!(0), 2, 5), 8).unwrap();
        assert!(row.iter().all(|v| v.is_zero()));
    }

    #[test]
    fn test_inverted_range_is_rejected() {
        let result = expand_cost(&CostItem::new(dec!(100), 6, 2), 12);
        assert!(matches!(result, Err(EngineError::InvalidPeriodRange { .. })));
    }

    #[test]
    fn test_end_on_timeline_boundary_is_rejected() {
        let result = expand_cost(&CostItem::new(dec!(100), 0, 12), 12);
        assert!(matches!(
            result,
            Err(EngineError::PeriodOutOfBounds {
                period: 12,
                timeline_months: 12
            })
        ));
    }
}
