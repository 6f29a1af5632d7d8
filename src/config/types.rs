//! Configuration types for the calculation engine.
//!
//! This module contains the strongly-typed settings that are deserialized
//! from YAML. Every field has a default, so an empty document yields the
//! standard engine behaviour.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::models::{Money, Rate};

/// Newton-Raphson settings for the IRR solver.
///
/// # Example
///
/// ```
/// use feasibility_engine::config::IrrConfig;
/// use rust_decimal_macros::dec;
///
/// let config = IrrConfig::default();
/// assert_eq!(config.guesses, vec![dec!(0.1), dec!(0.0), dec!(0.2), dec!(-0.1), dec!(0.3)]);
/// assert_eq!(config.max_iterations, 200);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IrrConfig {
    /// Starting rates, tried in order; the first that converges wins.
    pub guesses: Vec<Rate>,
    /// Convergence threshold on the absolute NPV at the candidate rate.
    pub tolerance: Decimal,
    /// Iteration cap per guess.
    pub max_iterations: u32,
}

impl Default for IrrConfig {
    fn default() -> Self {
        Self {
            guesses: vec![dec!(0.1), dec!(0.0), dec!(0.2), dec!(-0.1), dec!(0.3)],
            tolerance: dec!(0.0001),
            max_iterations: 200,
        }
    }
}

/// Settings for the balance-sheet cash tie-out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconciliationConfig {
    /// Absolute currency tolerance below which the cash series are considered equal.
    pub tie_out_tolerance: Money,
}

impl Default for ReconciliationConfig {
    fn default() -> Self {
        Self {
            tie_out_tolerance: dec!(0.01),
        }
    }
}

/// Options for the KPI aggregator.
///
/// The discount rate must use the same period as the cash-flow series
/// (a monthly rate for monthly series).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct KpiOptions {
    /// Per-period discount rate used for NPV.
    pub discount_rate: Rate,
}

impl KpiOptions {
    /// Options with the given per-period discount rate.
    pub fn new(discount_rate: Rate) -> Self {
        Self { discount_rate }
    }
}

/// Complete engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// IRR solver settings.
    pub irr: IrrConfig,
    /// Cash tie-out settings.
    pub reconciliation: ReconciliationConfig,
    /// KPI settings.
    pub kpi: KpiOptions,
}

impl EngineConfig {
    /// Returns a description of the first invalid setting, if any.
    pub fn check(&self) -> Option<String> {
        if self.irr.guesses.is_empty() {
            return Some("irr.guesses must contain at least one rate".to_string());
        }
        if self.irr.tolerance <= Decimal::ZERO {
            return Some(format!(
                "irr.tolerance must be positive, got {}",
                self.irr.tolerance
            ));
        }
        if self.irr.max_iterations == 0 {
            return Some("irr.max_iterations must be at least 1".to_string());
        }
        if self.reconciliation.tie_out_tolerance < Decimal::ZERO {
            return Some(format!(
                "reconciliation.tie_out_tolerance must not be negative, got {}",
                self.reconciliation.tie_out_tolerance
            ));
        }
        if self.kpi.discount_rate <= Decimal::NEGATIVE_ONE {
            return Some(format!(
                "kpi.discountRate must be greater than -1, got {}",
                self.kpi.discount_rate
            ));
        }
        None
    }
}
