//! Category-level aggregation of line-item rows.
//!
//! Line items are expanded independently and summed element-wise into one
//! series per category (construction, sales, rent, ...) before reconciliation.

use rust_decimal::Decimal;

use crate::error::EngineResult;
use crate::models::{ConstructionItem, CostItem, MonthlyArray};

use super::construction_row::build_construction_row;
use super::cost_expansion::expand_cost;

/// Adds `row` into `total` period by period, growing `total` if `row` is longer.
fn accumulate(total: &mut MonthlyArray, row: &[Decimal]) {
    if row.len() > total.len() {
        total.resize(row.len(), Decimal::ZERO);
    }
    for (sum, value) in total.iter_mut().zip(row) {
        *sum += *value;
    }
}

/// Sums rows element-wise.
///
/// The result has `horizon` periods, or more when a row extends past the
/// horizon (a retention release after the last modelled month), so no cash is
/// dropped. Shorter rows contribute zero to the missing periods.
///
/// # Example
///
/// ```
/// use feasibility_engine::calculation::aggregate_rows;
/// use rust_decimal_macros::dec;
///
/// let total = aggregate_rows(&[vec![dec!(1), dec!(2)], vec![dec!(10)]], 3);
/// assert_eq!(total, vec![dec!(11), dec!(2), dec!(0)]);
/// ```
pub fn aggregate_rows(rows: &[MonthlyArray], horizon: usize) -> MonthlyArray {
    let mut total = vec![Decimal::ZERO; horizon];
    for row in rows {
        accumulate(&mut total, row);
    }
    total
}

/// Expands every cost item and sums them into one category series.
///
/// Fails on the first invalid item.
pub fn aggregate_cost_items(
    items: &[CostItem],
    timeline_months: usize,
) -> EngineResult<MonthlyArray> {
    let mut total = vec![Decimal::ZERO; timeline_months];
    for item in items {
        accumulate(&mut total, &expand_cost(item, timeline_months)?);
    }
    Ok(total)
}

/// Builds every construction row and sums them into one category series.
///
/// The result is longer than `timeline_months` when any retention release
/// falls beyond the timeline.
pub fn aggregate_construction_items(
    items: &[ConstructionItem],
    timeline_months: usize,
) -> EngineResult<MonthlyArray> {
    let mut total = vec![Decimal::ZERO; timeline_months];
    for item in items {
        accumulate(&mut total, &build_construction_row(item, timeline_months)?);
    }
    Ok(total)
}
