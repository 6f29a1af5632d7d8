//! Inputs and outputs of the cash-flow reconciler.
//!
//! Category series arrive grouped the way the scenario-assembly layer produces
//! them (`pnl.patmi`, `financing.draws`, ...). Every series is optional and
//! defaults to empty, which the reconciler reads as zero in every period.

use serde::{Deserialize, Serialize};

use super::money::{Money, MonthlyArray};

/// Profit and loss series.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PnlSeries {
    /// Profit after tax and minority interest.
    #[serde(default)]
    pub patmi: MonthlyArray,
}

/// Revenue working-capital series.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevenueSeries {
    /// Closing accounts receivable balance.
    #[serde(default)]
    pub accounts_receivable: MonthlyArray,
}

/// Cost series.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostSeries {
    /// Capital expenditure paid in the period.
    #[serde(default)]
    pub capex: MonthlyArray,
}

/// Depreciation series.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepreciationSeries {
    /// Total non-cash depreciation charge.
    #[serde(default)]
    pub total: MonthlyArray,
}

/// Debt financing series.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancingSeries {
    /// Loan drawdowns.
    #[serde(default)]
    pub draws: MonthlyArray,
    /// Principal repayments.
    #[serde(default)]
    pub principal: MonthlyArray,
    /// Arrangement fees paid at financial close.
    #[serde(default)]
    pub fees_upfront: MonthlyArray,
    /// Commitment and agency fees.
    #[serde(default)]
    pub fees_ongoing: MonthlyArray,
    /// Cash moved into the debt service reserve account.
    #[serde(default)]
    pub dsra_funding: MonthlyArray,
    /// Cash released from the debt service reserve account.
    #[serde(default)]
    pub dsra_release: MonthlyArray,
}

/// Tax series.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxSeries {
    /// Closing VAT receivable carried forward.
    #[serde(default)]
    pub carry_vat: MonthlyArray,
}

/// Balance sheet series used for the tie-out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceSheetSeries {
    /// Closing cash per the balance sheet.
    #[serde(default)]
    pub cash: MonthlyArray,
}

/// Equity series.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquitySeries {
    /// Net equity cash flow: injections positive, distributions negative.
    #[serde(default)]
    pub equity_cf: MonthlyArray,
}

/// Everything the reconciler needs for one scenario.
///
/// # Example
///
/// ```
/// use feasibility_engine::models::CashFlowInputs;
/// use rust_decimal_macros::dec;
///
/// let mut inputs = CashFlowInputs::new(3);
/// inputs.pnl.patmi = vec![dec!(100), dec!(100), dec!(100)];
/// assert_eq!(inputs.series().count(), 13);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashFlowInputs {
    /// Model horizon in periods.
    #[serde(rename = "T")]
    pub horizon: usize,
    /// Profit and loss.
    #[serde(default)]
    pub pnl: PnlSeries,
    /// Revenue working capital.
    #[serde(default)]
    pub revenue: RevenueSeries,
    /// Costs.
    #[serde(default)]
    pub costs: CostSeries,
    /// Depreciation.
    #[serde(default)]
    pub depreciation: DepreciationSeries,
    /// Debt financing.
    #[serde(default)]
    pub financing: FinancingSeries,
    /// Tax.
    #[serde(default)]
    pub tax: TaxSeries,
    /// Balance sheet.
    #[serde(default)]
    pub balance_sheet: BalanceSheetSeries,
    /// Equity.
    #[serde(default)]
    pub cash: EquitySeries,
}

impl CashFlowInputs {
    /// Creates inputs with every series empty.
    pub fn new(horizon: usize) -> Self {
        Self {
            horizon,
            ..Self::default()
        }
    }

    /// Every series with its dotted name.
    pub fn series(&self) -> impl Iterator<Item = (&'static str, &[Money])> {
        [
            ("pnl.patmi", self.pnl.patmi.as_slice()),
            ("revenue.accounts_receivable", self.revenue.accounts_receivable.as_slice()),
            ("costs.capex", self.costs.capex.as_slice()),
            ("depreciation.total", self.depreciation.total.as_slice()),
            ("financing.draws", self.financing.draws.as_slice()),
            ("financing.principal", self.financing.principal.as_slice()),
            ("financing.fees_upfront", self.financing.fees_upfront.as_slice()),
            ("financing.fees_ongoing", self.financing.fees_ongoing.as_slice()),
            ("financing.dsra_funding", self.financing.dsra_funding.as_slice()),
            ("financing.dsra_release", self.financing.dsra_release.as_slice()),
            ("tax.carry_vat", self.tax.carry_vat.as_slice()),
            ("balance_sheet.cash", self.balance_sheet.cash.as_slice()),
            ("cash.equity_cf", self.cash.equity_cf.as_slice()),
        ]
        .into_iter()
    }
}

/// Tie-out diagnostics against the balance sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashFlowDetail {
    /// Whether derived closing cash matches balance sheet cash in every period.
    pub tie_out_ok_cash: bool,
    /// Largest absolute difference between the two cash series.
    pub max_cash_error: Money,
    /// First period at which `max_cash_error` occurs, `None` for an empty horizon.
    pub max_cash_error_period: Option<usize>,
}

/// Cash-flow statement derived from the category series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashFlowResult {
    /// Cash flow from operating activities.
    pub from_operations: MonthlyArray,
    /// Cash flow from investing activities.
    pub from_investing: MonthlyArray,
    /// Cash flow from financing activities.
    pub from_financing: MonthlyArray,
    /// Sum of the three buckets.
    pub net_change: MonthlyArray,
    /// Running total of `net_change` from a zero opening balance.
    pub cash_closing: MonthlyArray,
    /// Tie-out diagnostics.
    pub detail: CashFlowDetail,
}
