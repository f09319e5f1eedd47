//! Orchestration for the dashboard: fetches snapshot data through an
//! `AnalyticsSource` and runs it through the pure `analytics` calculations.

use crate::error::EngineError;
use analytics::{AnalyticsEngine, ComparisonWindow, PercentageChange, SeatBreakdown, compute_window};
use api_client::AnalyticsSource;
use chrono::NaiveDate;
use core_types::{AppStats, RangeSelector, TimeSeriesPoint};
use serde::Serialize;
use std::sync::Arc;

pub mod controller;
pub mod error;

#[cfg(test)]
pub(crate) mod testkit;

pub use controller::{RangeController, Selection};

/// Everything the adoption chart needs for one range selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonOutcome {
    pub selector: RangeSelector,
    pub window: ComparisonWindow,
    /// The current window's points, in source order, for charting.
    pub series: Vec<TimeSeriesPoint>,
    pub current_total: u64,
    pub prior_total: u64,
    pub change: PercentageChange,
}

/// Summary cards and seat table, loaded together for a full page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardOverview {
    pub stats: AppStats,
    pub breakdown: Vec<SeatBreakdown>,
}

/// The central orchestrator. Stateless apart from the shared source handle,
/// so one instance can serve any number of concurrent invocations.
#[derive(Clone)]
pub struct InsightsEngine {
    source: Arc<dyn AnalyticsSource>,
    analytics: Arc<AnalyticsEngine>,
}

impl InsightsEngine {
    pub fn new(source: Arc<dyn AnalyticsSource>) -> Self {
        Self {
            source,
            analytics: Arc::new(AnalyticsEngine::new()),
        }
    }

    /// Compares the selected range ending `today` with the equally long range
    /// before it.
    ///
    /// Both windows are fetched concurrently and joined before aggregation.
    /// If either fetch fails the whole comparison fails; there is no partial
    /// result.
    pub async fn compute_comparison(
        &self,
        selector: RangeSelector,
        today: NaiveDate,
    ) -> Result<ComparisonOutcome, EngineError> {
        let window = compute_window(selector, today)?;

        let (series, prior_series) = tokio::try_join!(
            self.source
                .fetch_series(window.current_start, window.current_end),
            self.source.fetch_series(window.prior_start, window.prior_end),
        )?;

        let current_total = self.analytics.aggregate(&series)?;
        let prior_total = self.analytics.aggregate(&prior_series)?;
        let change = self.analytics.percentage_change(current_total, prior_total);

        tracing::info!(
            range = %selector,
            current_start = %window.current_start,
            current_end = %window.current_end,
            current_total,
            prior_total,
            change = ?change,
            "Computed range comparison."
        );

        Ok(ComparisonOutcome {
            selector,
            window,
            series,
            current_total,
            prior_total,
            change,
        })
    }

    pub async fn load_stats(&self) -> Result<AppStats, EngineError> {
        Ok(self.source.fetch_app_stats().await?)
    }

    /// Fetches the inactivity counts and breaks every application down into
    /// seat segments. One invalid row fails the whole table.
    pub async fn load_breakdown(&self) -> Result<Vec<SeatBreakdown>, EngineError> {
        let statuses = self.source.fetch_inactive_apps().await?;
        let breakdown = self.analytics.seat_breakdowns(&statuses)?;
        tracing::debug!(apps = breakdown.len(), "Computed seat breakdown.");
        Ok(breakdown)
    }

    /// Loads the summary cards and the seat table concurrently.
    pub async fn load_overview(&self) -> Result<DashboardOverview, EngineError> {
        let (stats, breakdown) = tokio::try_join!(self.load_stats(), self.load_breakdown())?;
        Ok(DashboardOverview { stats, breakdown })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::{ScriptedSource, date, point};
    use std::time::Duration;

    /// Points for the 1 month range ending 2024-04-15: the current window
    /// totals 120, the prior window 100, and two points sit just outside both.
    fn april_points() -> Vec<TimeSeriesPoint> {
        vec![
            point(date(2024, 2, 11), 999, 0),
            point(date(2024, 2, 12), 30, 20),
            point(date(2024, 3, 14), 25, 25),
            point(date(2024, 3, 15), 50, 10),
            point(date(2024, 4, 15), 40, 20),
            point(date(2024, 4, 16), 999, 0),
        ]
    }

    #[tokio::test]
    async fn test_comparison_for_one_month_in_april() {
        let engine = InsightsEngine::new(Arc::new(ScriptedSource::new(april_points())));

        let outcome = engine
            .compute_comparison(RangeSelector::ShortRange, date(2024, 4, 15))
            .await
            .unwrap();

        assert_eq!(outcome.window.current_start, date(2024, 3, 15));
        assert_eq!(outcome.window.prior_start, date(2024, 2, 12));
        assert_eq!(outcome.window.prior_end, date(2024, 3, 14));
        assert_eq!(outcome.series.len(), 2);
        assert_eq!(outcome.current_total, 120);
        assert_eq!(outcome.prior_total, 100);
        assert_eq!(outcome.change, PercentageChange::Change(20.0));
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetches_run_concurrently() {
        let source = ScriptedSource::new(april_points())
            .with_delay(date(2024, 3, 15), Duration::from_millis(40))
            .with_delay(date(2024, 2, 12), Duration::from_millis(40));
        let engine = InsightsEngine::new(Arc::new(source.clone()));

        engine
            .compute_comparison(RangeSelector::ShortRange, date(2024, 4, 15))
            .await
            .unwrap();

        assert_eq!(source.max_in_flight(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_result_is_independent_of_completion_order() {
        let today = date(2024, 4, 15);
        let in_order = InsightsEngine::new(Arc::new(
            ScriptedSource::new(april_points()).with_delay(date(2024, 2, 12), Duration::from_millis(30)),
        ));
        let reversed = InsightsEngine::new(Arc::new(
            ScriptedSource::new(april_points()).with_delay(date(2024, 3, 15), Duration::from_millis(30)),
        ));

        let first = in_order
            .compute_comparison(RangeSelector::ShortRange, today)
            .await
            .unwrap();
        let second = reversed
            .compute_comparison(RangeSelector::ShortRange, today)
            .await
            .unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_prior_window_failure_fails_comparison() {
        let source = ScriptedSource::new(april_points()).failing_on(date(2024, 2, 12));
        let engine = InsightsEngine::new(Arc::new(source));

        let err = engine
            .compute_comparison(RangeSelector::ShortRange, date(2024, 4, 15))
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::Retrieval(_)));
    }

    #[tokio::test]
    async fn test_empty_prior_window_gives_undefined_change() {
        let points = vec![point(date(2024, 4, 1), 3, 3)];
        let engine = InsightsEngine::new(Arc::new(ScriptedSource::new(points)));

        let outcome = engine
            .compute_comparison(RangeSelector::MediumRange, date(2024, 4, 15))
            .await
            .unwrap();
        assert_eq!(outcome.prior_total, 0);
        assert_eq!(outcome.change, PercentageChange::Undefined);
    }

    #[tokio::test]
    async fn test_overflowing_window_total_fails_comparison() {
        let huge = i64::MAX as u64;
        let points = vec![
            point(date(2024, 4, 1), huge, huge),
            point(date(2024, 4, 2), 2, 0),
        ];
        let engine = InsightsEngine::new(Arc::new(ScriptedSource::new(points)));

        let err = engine
            .compute_comparison(RangeSelector::ShortRange, date(2024, 4, 15))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            EngineError::Analytics(analytics::AnalyticsError::TotalOverflow { points: 2 })
        ));
    }

    #[tokio::test]
    async fn test_overview_loads_stats_and_breakdown() {
        let engine = InsightsEngine::new(Arc::new(ScriptedSource::new(Vec::new())));

        let overview = engine.load_overview().await.unwrap();
        assert_eq!(overview.stats.applications.total, 120);
        assert_eq!(overview.breakdown.len(), 2);
        assert_eq!(overview.breakdown[0].ratio_label(), "5/20");
    }

    #[tokio::test]
    async fn test_invalid_seat_counts_fail_breakdown() {
        let source = ScriptedSource::new(Vec::new()).with_invalid_seat_row();
        let engine = InsightsEngine::new(Arc::new(source));

        let err = engine.load_breakdown().await.unwrap_err();
        assert!(matches!(err, EngineError::Analytics(_)));
    }
}
