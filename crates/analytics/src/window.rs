use crate::error::AnalyticsError;
use chrono::{Days, Months, NaiveDate};
use core_types::RangeSelector;
use serde::{Deserialize, Serialize};

/// The current window ending today and the equally long window right before it.
///
/// All four boundaries are inclusive calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonWindow {
    pub current_start: NaiveDate,
    pub current_end: NaiveDate,
    pub prior_start: NaiveDate,
    pub prior_end: NaiveDate,
}

impl ComparisonWindow {
    /// Whole days between the start and end of the current window.
    pub fn current_span_days(&self) -> i64 {
        (self.current_end - self.current_start).num_days()
    }

    /// Whole days between the start and end of the prior window.
    pub fn prior_span_days(&self) -> i64 {
        (self.prior_end - self.prior_start).num_days()
    }
}

/// Derives the comparison window for `selector` relative to `today`.
///
/// The current window starts `selector.months()` calendar months before today.
/// Month subtraction clamps to the last valid day, so 2024-03-31 minus one month
/// is 2024-02-29. The prior window ends the day before the current one starts
/// and spans the same number of days.
pub fn compute_window(
    selector: RangeSelector,
    today: NaiveDate,
) -> Result<ComparisonWindow, AnalyticsError> {
    let out_of_range = || AnalyticsError::DateOutOfRange {
        today,
        months: selector.months(),
    };

    let current_end = today;
    let current_start = current_end
        .checked_sub_months(Months::new(selector.months()))
        .ok_or_else(out_of_range)?;

    // Never negative: current_start is at or before today.
    let days = (current_end - current_start).num_days() as u64;

    let prior_end = current_start
        .checked_sub_days(Days::new(1))
        .ok_or_else(out_of_range)?;
    let prior_start = prior_end
        .checked_sub_days(Days::new(days))
        .ok_or_else(out_of_range)?;

    Ok(ComparisonWindow {
        current_start,
        current_end,
        prior_start,
        prior_end,
    })
}
