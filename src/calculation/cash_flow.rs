//! Cash-flow reconciliation.
//!
//! Combines the category series of a scenario into operating, investing and
//! financing cash flows, cumulates them into closing cash, and ties that
//! closing cash out against the balance sheet.

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::config::ReconciliationConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{CashFlowDetail, CashFlowInputs, CashFlowResult, Money, MonthlyArray};

/// Value of `series` at `t`; periods past the end of the series are zero.
fn value_at(series: &[Money], t: usize) -> Money {
    series.get(t).copied().unwrap_or(Decimal::ZERO)
}

/// Period-on-period change of a balance; zero in period 0.
fn change_at(series: &[Money], t: usize) -> Money {
    if t == 0 {
        Decimal::ZERO
    } else {
        value_at(series, t) - value_at(series, t - 1)
    }
}

/// Rejects series longer than the horizon.
///
/// Shorter series are accepted and read as zero in the missing periods.
fn check_lengths(inputs: &CashFlowInputs) -> EngineResult<()> {
    for (name, series) in inputs.series() {
        if series.len() > inputs.horizon {
            return Err(EngineError::SeriesLengthMismatch {
                series: name.to_string(),
                expected: inputs.horizon,
                actual: series.len(),
            });
        }
        if !series.is_empty() && series.len() < inputs.horizon {
            debug!(
                series = name,
                len = series.len(),
                horizon = inputs.horizon,
                "Zero-padding short series"
            );
        }
    }
    Ok(())
}

/// Builds the cash-flow statement with the default one-cent tie-out tolerance.
///
/// See [`compute_cash_flow_with`].
///
/// # Examples
///
/// ```
/// use feasibility_engine::calculation::compute_cash_flow;
/// use feasibility_engine::models::CashFlowInputs;
/// use rust_decimal_macros::dec;
///
/// let mut inputs = CashFlowInputs::new(2);
/// inputs.pnl.patmi = vec![dec!(100), dec!(100)];
/// inputs.balance_sheet.cash = vec![dec!(100), dec!(200)];
///
/// let result = compute_cash_flow(&inputs).unwrap();
/// assert_eq!(result.cash_closing, vec![dec!(100), dec!(200)]);
/// assert!(result.detail.tie_out_ok_cash);
/// ```
pub fn compute_cash_flow(inputs: &CashFlowInputs) -> EngineResult<CashFlowResult> {
    compute_cash_flow_with(inputs, &ReconciliationConfig::default())
}

/// Builds the cash-flow statement for `inputs.horizon` periods.
///
/// For each period `t`:
/// - operating = `patmi + depreciation - ΔAR - ΔVAT carry` (Δ is zero at `t = 0`)
/// - investing = `-capex`
/// - financing = `draws - principal - fees_upfront - fees_ongoing - dsra_funding
///   + dsra_release + max(equity_cf, 0)`; equity distributions are not included
/// - net = operating + investing + financing
///
/// Closing cash is the running sum of net starting from zero. The tie-out passes
/// when `|closing - balance_sheet.cash|` stays below `config.tie_out_tolerance`
/// in every period; a failed tie-out is reported, not raised.
///
/// # Errors
///
/// [`EngineError::SeriesLengthMismatch`] when a series is longer than the horizon.
pub fn compute_cash_flow_with(
    inputs: &CashFlowInputs,
    config: &ReconciliationConfig,
) -> EngineResult<CashFlowResult> {
    check_lengths(inputs)?;

    let horizon = inputs.horizon;
    let pnl = &inputs.pnl;
    let financing = &inputs.financing;

    let mut from_operations = MonthlyArray::with_capacity(horizon);
    let mut from_investing = MonthlyArray::with_capacity(horizon);
    let mut from_financing = MonthlyArray::with_capacity(horizon);
    let mut net_change = MonthlyArray::with_capacity(horizon);
    let mut cash_closing = MonthlyArray::with_capacity(horizon);

    let mut running = Decimal::ZERO;
    let mut max_cash_error = Decimal::ZERO;
    let mut max_cash_error_period = None;

    for t in 0..horizon {
        let operating = value_at(&pnl.patmi, t) + value_at(&inputs.depreciation.total, t)
            - change_at(&inputs.revenue.accounts_receivable, t)
            - change_at(&inputs.tax.carry_vat, t);

        let investing = -value_at(&inputs.costs.capex, t);

        let equity_injection = value_at(&inputs.cash.equity_cf, t).max(Decimal::ZERO);
        let financing_cf = value_at(&financing.draws, t)
            - value_at(&financing.principal, t)
            - value_at(&financing.fees_upfront, t)
            - value_at(&financing.fees_ongoing, t)
            - value_at(&financing.dsra_funding, t)
            + value_at(&financing.dsra_release, t)
            + equity_injection;

        let net = operating + investing + financing_cf;
        running += net;

        let error = (running - value_at(&inputs.balance_sheet.cash, t)).abs();
        if max_cash_error_period.is_none() || error > max_cash_error {
            max_cash_error = error;
            max_cash_error_period = Some(t);
        }

        from_operations.push(operating);
        from_investing.push(investing);
        from_financing.push(financing_cf);
        net_change.push(net);
        cash_closing.push(running);
    }

    let tie_out_ok_cash = max_cash_error < config.tie_out_tolerance;
    if tie_out_ok_cash {
        debug!(horizon, max_cash_error = %max_cash_error, "Cash tie-out passed");
    } else {
        warn!(
            horizon,
            max_cash_error = %max_cash_error,
            period = ?max_cash_error_period,
            tolerance = %config.tie_out_tolerance,
            "Cash tie-out failed"
        );
    }

    Ok(CashFlowResult {
        from_operations,
        from_investing,
        from_financing,
        net_change,
        cash_closing,
        detail: CashFlowDetail {
            tie_out_ok_cash,
            max_cash_error,
            max_cash_error_period,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn series(values: &[i64]) -> MonthlyArray {
        values.iter().map(|&v| Decimal::from(v)).collect()
    }

    #[test]
    fn test_operating_adds_back_depreciation() {
        let mut inputs = CashFlowInputs::new(3);
        inputs.pnl.patmi = series(&[100, 100, 100]);
        inputs.depreciation.total = series(&[10, 10, 10]);

        let result = compute_cash_flow(&inputs).unwrap();
        assert_eq!(result.from_operations, series(&[110, 110, 110]));
    }

    #[test]
    fn test_receivable_increase_absorbs_cash_and_release_frees_it() {
        let mut inputs = CashFlowInputs::new(4);
        inputs.revenue.accounts_receivable = series(&[50, 80, 80, 20]);

        let result = compute_cash_flow(&inputs).unwrap();
        // No change in period 0 even though AR opens at 50.
        assert_eq!(result.from_operations, series(&[0, -30, 0, 60]));
    }

    #[test]
    fn test_vat_carry_change_hits_operating() {
        let mut inputs = CashFlowInputs::new(3);
        inputs.tax.carry_vat = series(&[0, 15, 5]);

        let result = compute_cash_flow(&inputs).unwrap();
        assert_eq!(result.from_operations, series(&[0, -15, 10]));
    }

    #[test]
    fn test_capex_is_an_outflow() {
        let mut inputs = CashFlowInputs::new(2);
        inputs.costs.capex = series(&[500, 0]);

        let result = compute_cash_flow(&inputs).unwrap();
        assert_eq!(result.from_investing, series(&[-500, 0]));
    }

    #[test]
    fn test_financing_components() {
        let mut inputs = CashFlowInputs::new(1);
        inputs.financing.draws = series(&[1000]);
        inputs.financing.principal = series(&[100]);
        inputs.financing.fees_upfront = series(&[20]);
        inputs.financing.fees_ongoing = series(&[5]);
        inputs.financing.dsra_funding = series(&[50]);
        inputs.financing.dsra_release = series(&[30]);
        inputs.cash.equity_cf = series(&[200]);

        let result = compute_cash_flow(&inputs).unwrap();
        assert_eq!(result.from_financing, series(&[1055]));
    }

    #[test]
    fn test_equity_distributions_are_excluded() {
        let mut inputs = CashFlowInputs::new(3);
        inputs.cash.equity_cf = series(&[300, -100, 0]);

        let result = compute_cash_flow(&inputs).unwrap();
        assert_eq!(result.from_financing, series(&[300, 0, 0]));
    }

    #[test]
    fn test_closing_cash_cumulates_net_change() {
        let mut inputs = CashFlowInputs::new(3);
        inputs.pnl.patmi = series(&[10, 20, 30]);
        inputs.costs.capex = series(&[100, 0, 0]);
        inputs.financing.draws = series(&[100, 0, 0]);

        let result = compute_cash_flow(&inputs).unwrap();
        assert_eq!(result.net_change, series(&[10, 20, 30]));
        assert_eq!(result.cash_closing, series(&[10, 30, 60]));
    }

    #[test]
    fn test_tie_out_reports_largest_error() {
        let mut inputs = CashFlowInputs::new(3);
        inputs.pnl.patmi = series(&[10, 10, 10]);
        inputs.balance_sheet.cash = vec![dec!(10), dec!(25), dec!(29.5)];

        let result = compute_cash_flow(&inputs).unwrap();
        assert!(!result.detail.tie_out_ok_cash);
        assert_eq!(result.detail.max_cash_error, dec!(5));
        assert_eq!(result.detail.max_cash_error_period, Some(1));
    }

    #[test]
    fn test_tie_out_tolerance_is_strict() {
        let mut inputs = CashFlowInputs::new(1);
        inputs.pnl.patmi = vec![dec!(100.00)];
        inputs.balance_sheet.cash = vec![dec!(100.01)];

        let result = compute_cash_flow(&inputs).unwrap();
        assert!(!result.detail.tie_out_ok_cash);

        inputs.balance_sheet.cash = vec![dec!(100.009)];
        assert!(compute_cash_flow(&inputs).unwrap().detail.tie_out_ok_cash);
    }

    #[test]
    fn test_custom_tolerance() {
        let mut inputs = CashFlowInputs::new(1);
        inputs.pnl.patmi = vec![dec!(100)];
        inputs.balance_sheet.cash = vec![dec!(100.40)];

        let config = ReconciliationConfig {
            tie_out_tolerance: dec!(0.5),
        };
        assert!(compute_cash_flow_with(&inputs, &config).unwrap().detail.tie_out_ok_cash);
    }

    #[test]
    fn test_short_series_are_zero_padded() {
        let mut inputs = CashFlowInputs::new(3);
        inputs.pnl.patmi = series(&[5]);
        inputs.balance_sheet.cash = series(&[5, 5, 5]);

        let result = compute_cash_flow(&inputs).unwrap();
        assert_eq!(result.cash_closing, series(&[5, 5, 5]));
        assert!(result.detail.tie_out_ok_cash);
    }

    #[test]
    fn test_long_series_is_rejected() {
        let mut inputs = CashFlowInputs::new(2);
        inputs.financing.fees_ongoing = series(&[1, 1, 1]);

        match compute_cash_flow(&inputs) {
            Err(EngineError::SeriesLengthMismatch {
                series,
                expected,
                actual,
            }) => {
                assert_eq!(series, "financing.fees_ongoing");
                assert_eq!(expected, 2);
                assert_eq!(actual, 3);
            }
            other => panic!("Expected SeriesLengthMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_horizon() {
        let result = compute_cash_flow(&CashFlowInputs::new(0)).unwrap();

        assert!(result.cash_closing.is_empty());
        assert!(result.detail.tie_out_ok_cash);
        assert_eq!(result.detail.max_cash_error_period, None);
    }

    #[test]
    fn test_inputs_deserialize_from_category_bundles() {
        let json = r#"{
            "T": 2,
            "pnl": { "patmi": ["100", "100"] },
            "financing": { "draws": ["50", "0"] },
            "balance_sheet": { "cash": ["150", "250"] }
        }"#;
        let inputs: CashFlowInputs = serde_json::from_str(json).unwrap();
        let result = compute_cash_flow(&inputs).unwrap();

        assert_eq!(result.cash_closing, series(&[150, 250]));
        assert!(result.detail.tie_out_ok_cash);
    }
}
