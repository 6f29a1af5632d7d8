//! Calendar mapping for the project timeline.
//!
//! The engine works on absolute period indices; a [`Timeline`] ties those
//! indices to calendar months so dated line items can be placed and exported
//! series can be labelled.

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::cost_item::CostItem;
use super::money::Money;

/// A monthly project timeline starting on the first day of `start`'s month.
///
/// # Example
///
/// ```
/// use feasibility_engine::models::Timeline;
/// use chrono::NaiveDate;
///
/// let timeline = Timeline::new(NaiveDate::from_ymd_opt(2026, 3, 17).unwrap(), 24);
/// assert_eq!(timeline.start(), NaiveDate::from_ymd_opt(2026, 3, 1).unwrap());
/// assert_eq!(timeline.label(10).as_deref(), Some("2027-01"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeline {
    start: NaiveDate,
    months: usize,
}

impl Timeline {
    /// Creates a timeline of `months` periods; `start` is snapped to the first of its month.
    pub fn new(start: NaiveDate, months: usize) -> Self {
        let start = NaiveDate::from_ymd_opt(start.year(), start.month(), 1).unwrap_or(start);
        Self { start, months }
    }

    /// First day of period 0.
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Number of periods.
    pub fn months(&self) -> usize {
        self.months
    }

    /// First day of period `period`, or `None` beyond the horizon.
    pub fn period_start(&self, period: usize) -> Option<NaiveDate> {
        if period >= self.months {
            return None;
        }
        let offset = u32::try_from(period).ok()?;
        self.start.checked_add_months(Months::new(offset))
    }

    /// `YYYY-MM` label for a period.
    pub fn label(&self, period: usize) -> Option<String> {
        self.period_start(period)
            .map(|date| date.format("%Y-%m").to_string())
    }

    /// Labels for every period on the timeline.
    pub fn labels(&self) -> Vec<String> {
        (0..self.months).filter_map(|t| self.label(t)).collect()
    }

    /// Period index containing `date`.
    ///
    /// # Errors
    ///
    /// [`EngineError::DateOutOfRange`] when the date falls before the start
    /// or after the last period.
    pub fn period_of(&self, date: NaiveDate) -> EngineResult<usize> {
        let out_of_range = || EngineError::DateOutOfRange {
            date,
            start: self.start,
            months: self.months,
        };

        if date < self.start {
            return Err(out_of_range());
        }

        let elapsed = (date.year() - self.start.year()) * 12 + date.month() as i32
            - self.start.month() as i32;
        let period = usize::try_from(elapsed).map_err(|_| out_of_range())?;

        if period >= self.months {
            return Err(out_of_range());
        }

        Ok(period)
    }

    /// Builds an unescalated [`CostItem`] paid from the month of `from` through the month of `to`.
    pub fn cost_item_between(
        &self,
        amount: Money,
        from: NaiveDate,
        to: NaiveDate,
    ) -> EngineResult<CostItem> {
        let start_period = self.period_of(from)?;
        let end_period = self.period_of(to)?;
        let item = CostItem::new(amount, start_period, end_period);
        item.validate(self.months)?;
        Ok(item)
    }
}
