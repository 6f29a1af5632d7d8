//! Internal Rate of Return (IRR) calculation.
//!
//! Newton-Raphson over the periodic NPV function with a fixed list of starting
//! guesses. Guesses are tried in order and the first one that converges is
//! returned, so series with several sign changes always resolve to the same root.

use rust_decimal::{Decimal, MathematicalOps};
use tracing::{debug, warn};

use crate::config::IrrConfig;
use crate::models::{Money, Rate};

/// NPV of `cashflow` at `rate` and its derivative with respect to `rate`.
///
/// `None` when `1 + rate` is zero or the arithmetic overflows.
fn npv_and_derivative(cashflow: &[Money], rate: Rate) -> Option<(Decimal, Decimal)> {
    let base = Decimal::ONE.checked_add(rate)?;
    let discount = Decimal::ONE.checked_div(base)?;

    let mut factor = Decimal::ONE;
    let mut value = Decimal::ZERO;
    let mut derivative = Decimal::ZERO;

    for (t, cf) in cashflow.iter().enumerate() {
        value = value.checked_add(cf.checked_mul(factor)?)?;
        if t > 0 {
            // d/dr cf / (1 + r)^t = -t * cf / (1 + r)^(t + 1)
            let term = Decimal::from(t)
                .checked_mul(*cf)?
                .checked_mul(factor)?
                .checked_mul(discount)?;
            derivative = derivative.checked_sub(term)?;
        }
        factor = factor.checked_mul(discount)?;
    }

    Some((value, derivative))
}

/// Net present value of `cashflow` at a periodic `rate`; period 0 is undiscounted.
///
/// Returns `None` when `1 + rate` is zero or the discounting overflows.
///
/// # Example
///
/// ```
/// use feasibility_engine::calculation::npv_at;
/// use rust_decimal_macros::dec;
///
/// let npv = npv_at(&[dec!(-100), dec!(110)], dec!(0.1)).unwrap();
/// assert_eq!(npv.round_dp(10), dec!(0));
/// ```
pub fn npv_at(cashflow: &[Money], rate: Rate) -> Option<Money> {
    let base = Decimal::ONE.checked_add(rate)?;
    let discount = Decimal::ONE.checked_div(base)?;

    let mut factor = Decimal::ONE;
    let mut value = Decimal::ZERO;
    for cf in cashflow {
        value = value.checked_add(cf.checked_mul(factor)?)?;
        factor = factor.checked_mul(discount)?;
    }
    Some(value)
}

/// Runs Newton-Raphson from one starting guess.
fn solve_from(cashflow: &[Money], guess: Rate, config: &IrrConfig) -> Option<Rate> {
    let mut rate = guess;

    for _ in 0..config.max_iterations {
        let (value, derivative) = npv_and_derivative(cashflow, rate)?;

        if value.abs() < config.tolerance {
            return Some(rate);
        }

        if derivative.is_zero() {
            return None;
        }

        rate = rate.checked_sub(value.checked_div(derivative)?)?;
    }

    None
}

/// Calculates the periodic IRR with the standard solver settings.
///
/// Uses guesses `[0.1, 0.0, 0.2, -0.1, 0.3]`, tolerance `1e-4` on the NPV and
/// at most 200 iterations per guess. See [`calc_irr_with`].
///
/// # Examples
///
/// ```
/// use feasibility_engine::calculation::calc_irr;
/// use rust_decimal_macros::dec;
///
/// let irr = calc_irr(&[dec!(-1000), dec!(200), dec!(300), dec!(400), dec!(500)]).unwrap();
/// assert_eq!(irr.round_dp(4), dec!(0.1283));
///
/// // No sign change, no root.
/// assert!(calc_irr(&[dec!(100), dec!(100)]).is_none());
/// ```
pub fn calc_irr(cashflow: &[Money]) -> Option<Rate> {
    calc_irr_with(cashflow, &IrrConfig::default())
}

/// Calculates the periodic IRR of `cashflow`.
///
/// For each guess in `config.guesses`, in order, Newton-Raphson runs for up to
/// `config.max_iterations` steps and the rate is accepted as soon as
/// `|NPV(rate)| < config.tolerance`. A guess is abandoned early when the
/// derivative is exactly zero or the discounting overflows.
///
/// Returns `None` when no guess converges or the series is empty. `None` means
/// the IRR cannot be determined, not that it is zero.
pub fn calc_irr_with(cashflow: &[Money], config: &IrrConfig) -> Option<Rate> {
    if cashflow.is_empty() {
        return None;
    }

    for (attempt, &guess) in config.guesses.iter().enumerate() {
        if let Some(rate) = solve_from(cashflow, guess, config) {
            debug!(attempt, guess = %guess, irr = %rate, "IRR converged");
            return Some(rate);
        }
    }

    warn!(
        periods = cashflow.len(),
        guesses = config.guesses.len(),
        "IRR did not converge from any starting guess"
    );
    None
}

/// Converts a periodic rate into an effective annual rate.
///
/// # Example
///
/// ```
/// use feasibility_engine::calculation::annualize_rate;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(annualize_rate(dec!(0.1), 2), Some(dec!(0.21)));
/// ```
pub fn annualize_rate(periodic: Rate, periods_per_year: u32) -> Option<Rate> {
    let growth = (Decimal::ONE + periodic).checked_powi(i64::from(periods_per_year))?;
    Some(growth - Decimal::ONE)
}
