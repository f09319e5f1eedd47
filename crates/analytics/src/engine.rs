use crate::error::AnalyticsError;
use crate::report::{PercentageChange, SeatBreakdown};
use core_types::{AppStatus, TimeSeriesPoint};

/// A stateless calculator for the metrics shown on the dashboard.
#[derive(Debug, Default)]
pub struct AnalyticsEngine {}

impl AnalyticsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sums linked and unlinked counts over every point of a window.
    ///
    /// An empty series is a window without activity and totals to zero. A total
    /// that does not fit in a `u64` is rejected.
    pub fn aggregate(&self, series: &[TimeSeriesPoint]) -> Result<u64, AnalyticsError> {
        series.iter().try_fold(0u64, |total, point| {
            total
                .checked_add(point.linked_count)
                .and_then(|total| total.checked_add(point.unlinked_count))
                .ok_or(AnalyticsError::TotalOverflow {
                    points: series.len(),
                })
        })
    }

    /// Computes `(current - prior) / prior * 100`.
    ///
    /// # Returns
    ///
    /// `PercentageChange::Undefined` when `prior` is zero, otherwise the signed,
    /// unclamped change in percent.
    pub fn percentage_change(&self, current: u64, prior: u64) -> PercentageChange {
        if prior == 0 {
            return PercentageChange::Undefined;
        }

        let current = current as f64;
        let prior = prior as f64;
        PercentageChange::Change((current - prior) / prior * 100.0)
    }

    /// Splits an application's seats into inactive, abandoned and active segments.
    ///
    /// An application with no seats yields all-zero percentages. Counts where
    /// inactive plus abandoned exceed the total are rejected.
    pub fn seat_breakdown(&self, status: &AppStatus) -> Result<SeatBreakdown, AnalyticsError> {
        let flagged = status
            .inactive_count
            .checked_add(status.abandoned_count)
            .filter(|flagged| *flagged <= status.total_count)
            .ok_or_else(|| AnalyticsError::InvalidSeatCounts {
                name: status.name.clone(),
                flagged: status.inactive_count.saturating_add(status.abandoned_count),
                total: status.total_count,
            })?;

        let (inactive_pct, abandoned_pct, active_pct) = if status.total_count == 0 {
            (0.0, 0.0, 0.0)
        } else {
            let total = status.total_count as f64;
            let inactive_pct = status.inactive_count as f64 / total * 100.0;
            let abandoned_pct = status.abandoned_count as f64 / total * 100.0;
            (inactive_pct, abandoned_pct, 100.0 - inactive_pct - abandoned_pct)
        };

        Ok(SeatBreakdown {
            name: status.name.clone(),
            icon: status.icon.clone(),
            inactive_pct,
            abandoned_pct,
            active_pct,
            inactive_count: status.inactive_count,
            abandoned_count: status.abandoned_count,
            active_count: status.total_count - flagged,
            flagged_count: flagged,
            total_count: status.total_count,
        })
    }

    /// Breaks down every row, failing on the first invalid one.
    pub fn seat_breakdowns(
        &self,
        statuses: &[AppStatus],
    ) -> Result<Vec<SeatBreakdown>, AnalyticsError> {
        statuses
            .iter()
            .map(|status| self.seat_breakdown(status))
            .collect()
    }
}
