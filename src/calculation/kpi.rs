//! KPI aggregation.
//!
//! Combines undiscounted profit, NPV and IRR of a net cash-flow series into
//! one [`Kpis`] record for display.

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::{IrrConfig, KpiOptions};
use crate::error::{EngineError, EngineResult};
use crate::models::{Kpis, Money, sum_money};

use super::irr::{calc_irr_with, npv_at};

/// Computes profit, NPV and IRR with the standard IRR solver settings.
///
/// - `profit` is the plain sum of the series.
/// - `npv` discounts period `i` by `(1 + discount_rate)^i`; period 0 is not
///   discounted. The rate must use the same period length as the series.
/// - `project_irr` is [`calc_irr`](super::calc_irr) of the series.
///
/// # Errors
///
/// [`EngineError::InvalidRate`] when `discount_rate <= -1`.
///
/// # Examples
///
/// ```
/// use feasibility_engine::calculation::compute_kpis;
/// use feasibility_engine::config::KpiOptions;
/// use rust_decimal_macros::dec;
///
/// let cashflow = [dec!(-1000), dec!(200), dec!(300), dec!(400), dec!(500)];
/// let kpis = compute_kpis(&cashflow, &KpiOptions::new(dec!(0.10))).unwrap();
///
/// assert_eq!(kpis.profit, dec!(400));
/// assert_eq!(kpis.npv.round_dp(2), dec!(71.78));
/// assert!(kpis.project_irr.is_some());
/// ```
pub fn compute_kpis(net_cashflow: &[Money], options: &KpiOptions) -> EngineResult<Kpis> {
    compute_kpis_with(net_cashflow, options, &IrrConfig::default())
}

/// Computes profit, NPV and IRR using the given IRR solver settings.
pub fn compute_kpis_with(
    net_cashflow: &[Money],
    options: &KpiOptions,
    irr_config: &IrrConfig,
) -> EngineResult<Kpis> {
    let rate = options.discount_rate;
    if rate <= Decimal::NEGATIVE_ONE {
        return Err(EngineError::InvalidRate {
            rate,
            message: "discount rate must be greater than -1".to_string(),
        });
    }

    let profit = sum_money(net_cashflow);
    let npv = npv_at(net_cashflow, rate).ok_or_else(|| EngineError::CalculationError {
        message: format!(
            "discounting {} periods at {} overflowed",
            net_cashflow.len(),
            rate
        ),
    })?;
    let project_irr = calc_irr_with(net_cashflow, irr_config);

    debug!(
        periods = net_cashflow.len(),
        discount_rate = %rate,
        profit = %profit,
        npv = %npv,
        irr = ?project_irr,
        "Computed KPIs"
    );

    Ok(Kpis {
        project_irr,
        npv,
        profit,
    })
}
