//! Calculation logic for the Feasibility Engine.
//!
//! This module contains the pure numeric pipeline: even-spread expansion of
//! escalated line items, construction rows with retention, aggregation of rows
//! into category series, cash-flow reconciliation with a balance-sheet tie-out,
//! and the IRR solver and KPI aggregator built on top of them.

mod aggregation;
mod cash_flow;
mod construction_row;
mod cost_expansion;
mod irr;
mod kpi;

pub use aggregation::{aggregate_construction_items, aggregate_cost_items, aggregate_rows};
pub use cash_flow::{compute_cash_flow, compute_cash_flow_with};
pub use construction_row::{
    ConstructionSchedule, build_construction_row, build_construction_schedule,
};
pub use cost_expansion::expand_cost;
pub use irr::{annualize_rate, calc_irr, calc_irr_with, npv_at};
pub use kpi::{compute_kpis, compute_kpis_with};
