//! Line-item inputs for the cost expander and the construction row builder.
//!
//! A [`CostItem`] is one lump amount (cost or revenue) spread over an inclusive
//! period range. A [`ConstructionItem`] adds contractual retention on top.

use rust_decimal::{Decimal, MathematicalOps};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::money::{Money, Rate};

const MONTHS_PER_YEAR: i64 = 12;

/// How an annual escalation rate is turned into a growth factor over an item's duration.
///
/// # Example
///
/// ```
/// use feasibility_engine::models::EscalationBasis;
///
/// assert_eq!(EscalationBasis::default(), EscalationBasis::Annual);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EscalationBasis {
    /// `(1 + r)^(months / 12)`: the annual rate compounded over the duration in years.
    #[default]
    Annual,
    /// `(1 + r / 12)^months`: the nominal annual rate compounded monthly.
    Monthly,
}

/// A single cost or revenue line spread evenly over `[start_period, end_period]`.
///
/// # Example
///
/// ```
/// use feasibility_engine::models::CostItem;
/// use rust_decimal_macros::dec;
///
/// let item = CostItem::new(dec!(1200000), 1, 3);
/// assert_eq!(item.duration_months(), 2);
/// assert_eq!(item.escalation_rate, dec!(0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostItem {
    /// The base (unescalated) amount.
    #[serde(alias = "baseCost")]
    pub amount: Money,
    /// First period the amount is paid in (absolute timeline index).
    pub start_period: usize,
    /// Last period the amount is paid in, inclusive.
    pub end_period: usize,
    /// Annual escalation rate, 0 when the amount is fixed.
    #[serde(default)]
    pub escalation_rate: Rate,
    /// Compounding convention for `escalation_rate`.
    #[serde(default)]
    pub escalation_basis: EscalationBasis,
}

impl CostItem {
    /// Creates an unescalated item.
    pub fn new(amount: Money, start_period: usize, end_period: usize) -> Self {
        Self {
            amount,
            start_period,
            end_period,
            escalation_rate: Decimal::ZERO,
            escalation_basis: EscalationBasis::Annual,
        }
    }

    /// Sets the annual escalation rate.
    pub fn with_escalation(mut self, rate: Rate) -> Self {
        self.escalation_rate = rate;
        self
    }

    /// Sets the escalation compounding convention.
    pub fn with_basis(mut self, basis: EscalationBasis) -> Self {
        self.escalation_basis = basis;
        self
    }

    /// Elapsed months between the first and the last period.
    ///
    /// Saturates at zero for an inverted range; [`CostItem::validate`] rejects those.
    pub fn duration_months(&self) -> usize {
        self.end_period.saturating_sub(self.start_period)
    }

    /// Number of periods the amount is spread over.
    pub fn period_count(&self) -> usize {
        self.duration_months() + 1
    }

    /// Checks the item can be expanded onto a timeline of `timeline_months` periods.
    ///
    /// # Errors
    ///
    /// - [`EngineError::InvalidPeriodRange`] when `end_period < start_period`
    /// - [`EngineError::PeriodOutOfBounds`] when `end_period >= timeline_months`
    /// - [`EngineError::InvalidCostItem`] for a negative amount or escalation rate
    pub fn validate(&self, timeline_months: usize) -> EngineResult<()> {
        if self.end_period < self.start_period {
            return Err(EngineError::InvalidPeriodRange {
                start_period: self.start_period,
                end_period: self.end_period,
            });
        }

        if self.end_period >= timeline_months {
            return Err(EngineError::PeriodOutOfBounds {
                period: self.end_period,
                timeline_months,
            });
        }

        if self.amount < Decimal::ZERO {
            return Err(EngineError::InvalidCostItem {
                field: "amount".to_string(),
                message: format!("must not be negative, got {}", self.amount),
            });
        }

        if self.escalation_rate < Decimal::ZERO {
            return Err(EngineError::InvalidCostItem {
                field: "escalationRate".to_string(),
                message: format!("must not be negative, got {}", self.escalation_rate),
            });
        }

        Ok(())
    }

    /// Growth factor applied to `amount` over the item's duration.
    ///
    /// Whole-year durations (and monthly compounding) use integer powers so the
    /// common cases are exact; fractional years fall back to `powd`.
    pub fn escalation_factor(&self) -> EngineResult<Decimal> {
        let months = self.duration_months() as i64;
        if self.escalation_rate.is_zero() || months == 0 {
            return Ok(Decimal::ONE);
        }

        let factor = match self.escalation_basis {
            EscalationBasis::Annual => {
                let base = Decimal::ONE + self.escalation_rate;
                if months % MONTHS_PER_YEAR == 0 {
                    base.checked_powi(months / MONTHS_PER_YEAR)
                } else {
                    base.checked_powd(Decimal::from(months) / Decimal::from(MONTHS_PER_YEAR))
                }
            }
            EscalationBasis::Monthly => {
                let base =
                    Decimal::ONE + self.escalation_rate / Decimal::from(MONTHS_PER_YEAR);
                base.checked_powi(months)
            }
        };

        factor.ok_or_else(|| EngineError::CalculationError {
            message: format!(
                "escalation factor overflowed for rate {} over {} months",
                self.escalation_rate, months
            ),
        })
    }

    /// The amount after escalation, unrounded.
    pub fn escalated_amount(&self) -> EngineResult<Money> {
        let factor = self.escalation_factor()?;
        self.amount
            .checked_mul(factor)
            .ok_or_else(|| EngineError::CalculationError {
                message: format!("escalated amount overflowed for base {}", self.amount),
            })
    }
}

/// One construction cost line with contractual retention withholding.
///
/// # Example
///
/// ```
/// use feasibility_engine::models::{ConstructionItem, CostItem};
/// use rust_decimal_macros::dec;
///
/// let item = ConstructionItem::new(CostItem::new(dec!(1000000), 6, 24))
///     .with_retention(dec!(0.05), 2);
/// assert_eq!(item.release_period(), 26);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstructionItem {
    /// The underlying escalated spread.
    #[serde(flatten)]
    pub cost: CostItem,
    /// Share of each payment withheld, between 0 and 1.
    #[serde(default)]
    pub retention_percent: Decimal,
    /// Months after `end_period` at which the withheld sum is released.
    #[serde(default)]
    pub retention_release_lag: usize,
}

impl ConstructionItem {
    /// Wraps a cost item with no retention.
    pub fn new(cost: CostItem) -> Self {
        Self {
            cost,
            retention_percent: Decimal::ZERO,
            retention_release_lag: 0,
        }
    }

    /// Sets the retention share and release lag.
    pub fn with_retention(mut self, percent: Decimal, release_lag: usize) -> Self {
        self.retention_percent = percent;
        self.retention_release_lag = release_lag;
        self
    }

    /// Absolute period the retained sum is paid out in.
    pub fn release_period(&self) -> usize {
        self.cost.end_period + self.retention_release_lag
    }

    /// Whether any part of the payments is withheld.
    pub fn has_retention(&self) -> bool {
        self.retention_percent > Decimal::ZERO
    }

    /// Validates the cost spread and the retention percentage.
    pub fn validate(&self, timeline_months: usize) -> EngineResult<()> {
        self.cost.validate(timeline_months)?;

        if self.retention_percent < Decimal::ZERO || self.retention_percent > Decimal::ONE {
            return Err(EngineError::InvalidRetention {
                percent: self.retention_percent,
            });
        }

        Ok(())
    }
}
