//! Feasibility Engine for real-estate development models
//!
//! This crate turns per-line-item project assumptions (construction costs with
//! escalation and retention, sales, financing, tax) into monthly cash-flow arrays,
//! reconciles them into operating/investing/financing buckets, and derives the
//! investment metrics (NPV, IRR, profit) shown on feasibility dashboards.
//!
//! All calculations are pure functions over [`rust_decimal::Decimal`] money values.

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
