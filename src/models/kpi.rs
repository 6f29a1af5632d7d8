//! Scalar investment metrics.

use serde::{Deserialize, Serialize};

use super::money::{Money, Rate};

/// Headline metrics of a net cash-flow series.
///
/// Serializes as `{ "projectIRR", "npv", "profit" }`. A missing IRR means the
/// solver could not find a root and must be shown as "N/A", never as zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Kpis {
    /// Periodic internal rate of return, `None` when no root was found.
    #[serde(rename = "projectIRR")]
    pub project_irr: Option<Rate>,
    /// Net present value at the requested discount rate.
    pub npv: Money,
    /// Undiscounted sum of the series.
    pub profit: Money,
}
