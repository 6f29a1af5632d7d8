//! Construction cost rows with retention.
//!
//! A construction line is an escalated even spread from which a share of every
//! payment is withheld and released as one lump some months after completion.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::EngineResult;
use crate::models::{ConstructionItem, Money, MonthlyArray, round_money, sum_money};

use super::cost_expansion::expand_cost;

/// Breakdown of a construction line's payments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstructionSchedule {
    /// Escalated spread before retention, `timeline_months` long.
    pub gross: MonthlyArray,
    /// Amount withheld in each period, `timeline_months` long.
    pub retained: MonthlyArray,
    /// Cash actually paid: gross less retention, plus the release lump.
    /// Longer than the timeline when the release falls beyond it.
    pub payable: MonthlyArray,
    /// Total withheld and later released.
    pub retained_total: Money,
    /// Period of the release lump, `None` without retention.
    pub release_period: Option<usize>,
}

/// Builds the full payment breakdown of a construction line.
///
/// # Errors
///
/// Validation errors from [`ConstructionItem::validate`].
pub fn build_construction_schedule(
    item: &ConstructionItem,
    timeline_months: usize,
) -> EngineResult<ConstructionSchedule> {
    item.validate(timeline_months)?;

    let gross = expand_cost(&item.cost, timeline_months)?;

    if !item.has_retention() {
        return Ok(ConstructionSchedule {
            payable: gross.clone(),
            retained: vec![Decimal::ZERO; gross.len()],
            gross,
            retained_total: Decimal::ZERO,
            release_period: None,
        });
    }

    let percent = item.retention_percent;
    let (retained, mut payable): (MonthlyArray, MonthlyArray) = gross
        .iter()
        .map(|&value| {
            let withheld = round_money(value * percent);
            (withheld, round_money(value - withheld))
        })
        .unzip();

    let retained_total = round_money(sum_money(&retained));
    let release_period = item.release_period();

    if release_period >= payable.len() {
        payable.resize(release_period + 1, Decimal::ZERO);
    }
    payable[release_period] += retained_total;

    debug!(
        retention_percent = %percent,
        retained_total = %retained_total,
        release_period,
        row_len = payable.len(),
        "Applied construction retention"
    );

    Ok(ConstructionSchedule {
        gross,
        retained,
        payable,
        retained_total,
        release_period: Some(release_period),
    })
}

/// Builds the cash row of a construction line.
///
/// Each period pays the escalated spread less `retention_percent`; the withheld
/// total is paid at `end_period + retention_release_lag`. The row grows with
/// zeros when that period lies beyond `timeline_months`. Without retention the
/// row equals [`expand_cost`]'s output.
///
/// # Examples
///
/// ```
/// use feasibility_engine::calculation::build_construction_row;
/// use feasibility_engine::models::{ConstructionItem, CostItem};
/// use rust_decimal_macros::dec;
///
/// let item = ConstructionItem::new(CostItem::new(dec!(300), 0, 2)).with_retention(dec!(0.1), 2);
/// let row = build_construction_row(&item, 3).unwrap();
/// assert_eq!(row, vec![dec!(90), dec!(90), dec!(90), dec!(0), dec!(30)]);
/// ```
pub fn build_construction_row(
    item: &ConstructionItem,
    timeline_months: usize,
) -> EngineResult<MonthlyArray> {
    Ok(build_construction_schedule(item, timeline_months)?.payable)
}
