//! Core data models for the Feasibility Engine.
//!
//! This module contains the line-item inputs, the cash-flow category bundles,
//! and the result types produced by the calculation functions.

mod cash_flow;
mod cost_item;
mod kpi;
mod money;
mod timeline;

pub use cash_flow::{
    BalanceSheetSeries, CashFlowDetail, CashFlowInputs, CashFlowResult, CostSeries,
    DepreciationSeries, EquitySeries, FinancingSeries, PnlSeries, RevenueSeries, TaxSeries,
};
pub use cost_item::{ConstructionItem, CostItem, EscalationBasis};
pub use kpi::Kpis;
pub use money::{MONEY_DP, Money, MonthlyArray, Rate, round_money, sum_money};
pub use timeline::Timeline;
