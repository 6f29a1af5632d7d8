//! Error types for the Feasibility Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while building cash-flow models.
//! Convergence failures and tie-out mismatches are not errors: they are
//! reported through `Option` results and diagnostic flags.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

/// The main error type for the Feasibility Engine.
///
/// # Example
///
/// ```
/// use feasibility_engine::error::EngineError;
///
/// let error = EngineError::InvalidPeriodRange {
///     start_period: 12,
///     end_period: 6,
/// };
/// assert_eq!(
///     error.to_string(),
///     "Invalid period range: end period 6 is before start period 12"
/// );
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// A line item ends before it starts.
    #[error("Invalid period range: end period {end_period} is before start period {start_period}")]
    InvalidPeriodRange {
        /// The first period of the item.
        start_period: usize,
        /// The last period of the item.
        end_period: usize,
    },

    /// A line item extends past the end of the timeline.
    #[error("Period {period} is outside a timeline of {timeline_months} months")]
    PeriodOutOfBounds {
        /// The offending period index.
        period: usize,
        /// The number of months in the timeline.
        timeline_months: usize,
    },

    /// A line item field holds a value outside its allowed domain.
    #[error("Invalid cost item field '{field}': {message}")]
    InvalidCostItem {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// Retention percentage outside `[0, 1]`.
    #[error("Invalid retention percent {percent}: must be between 0 and 1")]
    InvalidRetention {
        /// The rejected percentage.
        percent: Decimal,
    },

    /// A cash-flow series is longer than the model horizon.
    #[error("Series '{series}' has {actual} periods but the horizon is {expected}")]
    SeriesLengthMismatch {
        /// Dotted name of the series (e.g. `financing.draws`).
        series: String,
        /// The model horizon.
        expected: usize,
        /// The length of the supplied series.
        actual: usize,
    },

    /// A discount or growth rate that cannot be used for discounting.
    #[error("Invalid rate {rate}: {message}")]
    InvalidRate {
        /// The rejected rate.
        rate: Decimal,
        /// A description of the problem.
        message: String,
    },

    /// A calendar date that does not fall inside the project timeline.
    #[error("Date {date} is outside the timeline starting {start} ({months} months)")]
    DateOutOfRange {
        /// The date that was requested.
        date: NaiveDate,
        /// The first day of the timeline.
        start: NaiveDate,
        /// The number of months in the timeline.
        months: usize,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_invalid_period_range_displays_periods() {
        let error = EngineError::InvalidPeriodRange {
            start_period: 10,
            end_period: 3,
        };
        assert_eq!(
            error.to_string(),
            "Invalid period range: end period 3 is before start period 10"
        );
    }

    #[test]
    fn test_period_out_of_bounds_displays_timeline() {
        let error = EngineError::PeriodOutOfBounds {
            period: 24,
            timeline_months: 24,
        };
        assert_eq!(
            error.to_string(),
            "Period 24 is outside a timeline of 24 months"
        );
    }

    #[test]
    fn test_invalid_cost_item_displays_field_and_message() {
        let error = EngineError::InvalidCostItem {
            field: "amount".to_string(),
            message: "must not be negative".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid cost item field 'amount': must not be negative"
        );
    }

    #[test]
    fn test_invalid_retention_displays_percent() {
        let error = EngineError::InvalidRetention {
            percent: dec!(1.5),
        };
        assert_eq!(
            error.to_string(),
            "Invalid retention percent 1.5: must be between 0 and 1"
        );
    }

    #[test]
    fn test_series_length_mismatch_displays_series() {
        let error = EngineError::SeriesLengthMismatch {
            series: "financing.draws".to_string(),
            expected: 12,
            actual: 14,
        };
        assert_eq!(
            error.to_string(),
            "Series 'financing.draws' has 14 periods but the horizon is 12"
        );
    }

    #[test]
    fn test_date_out_of_range_displays_timeline() {
        let error = EngineError::DateOutOfRange {
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            start: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            months: 36,
        };
        assert_eq!(
            error.to_string(),
            "Date 2024-01-01 is outside the timeline starting 2025-01-01 (36 months)"
        );
    }

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/engine.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/engine.yaml"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_rate_error() -> EngineResult<()> {
            Err(EngineError::InvalidRate {
                rate: dec!(-1),
                message: "discount factor is undefined".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_rate_error()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
