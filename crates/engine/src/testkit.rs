//! In-memory `AnalyticsSource` for engine tests.

use api_client::AnalyticsSource;
use api_client::error::ApiError;
use async_trait::async_trait;
use chrono::NaiveDate;
use core_types::{
    AppStats, AppStatus, ApplicationCounts, SavingsStats, TimeSeriesPoint, UtilizationStats,
};
use rust_decimal_macros::dec;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn point(date: NaiveDate, linked: u64, unlinked: u64) -> TimeSeriesPoint {
    TimeSeriesPoint::new(date, linked, unlinked)
}

fn app(name: &str, inactive: u64, abandoned: u64, total: u64) -> AppStatus {
    AppStatus {
        icon: name.to_lowercase(),
        name: name.to_string(),
        inactive_count: inactive,
        abandoned_count: abandoned,
        total_count: total,
    }
}

#[derive(Default)]
struct Counters {
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

/// Serves a fixed set of points. Series requests can be delayed or failed
/// per window, keyed by the window's start date.
#[derive(Clone)]
pub struct ScriptedSource {
    points: Vec<TimeSeriesPoint>,
    delays: HashMap<NaiveDate, Duration>,
    fail_on: Option<NaiveDate>,
    invalid_seat_row: bool,
    counters: Arc<Counters>,
}

impl ScriptedSource {
    pub fn new(points: Vec<TimeSeriesPoint>) -> Self {
        Self {
            points,
            delays: HashMap::new(),
            fail_on: None,
            invalid_seat_row: false,
            counters: Arc::new(Counters::default()),
        }
    }

    pub fn with_delay(mut self, start: NaiveDate, delay: Duration) -> Self {
        self.delays.insert(start, delay);
        self
    }

    pub fn failing_on(mut self, start: NaiveDate) -> Self {
        self.fail_on = Some(start);
        self
    }

    pub fn with_invalid_seat_row(mut self) -> Self {
        self.invalid_seat_row = true;
        self
    }

    /// Highest number of series requests that were pending at the same time.
    pub fn max_in_flight(&self) -> usize {
        self.counters.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AnalyticsSource for ScriptedSource {
    async fn fetch_series(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<TimeSeriesPoint>, ApiError> {
        let now = self.counters.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.counters.max_in_flight.fetch_max(now, Ordering::SeqCst);

        if let Some(delay) = self.delays.get(&start) {
            tokio::time::sleep(*delay).await;
        }
        self.counters.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.fail_on == Some(start) {
            return Err(ApiError::UnexpectedStatus {
                status: 503,
                url: format!("scripted://series?start={}", start),
            });
        }

        Ok(api_client::within_window(self.points.clone(), start, end))
    }

    async fn fetch_app_stats(&self) -> Result<AppStats, ApiError> {
        Ok(AppStats {
            applications: ApplicationCounts {
                total: 120,
                unlinked: 30,
            },
            utilization: UtilizationStats {
                average: dec!(0.72),
                change: dec!(-0.035),
            },
            savings: SavingsStats {
                potential: dec!(48500),
            },
        })
    }

    async fn fetch_inactive_apps(&self) -> Result<Vec<AppStatus>, ApiError> {
        let mut rows = vec![app("GitHub", 4, 1, 20), app("Asana", 2, 0, 10)];
        if self.invalid_seat_row {
            rows.push(app("Atlassian", 9, 9, 10));
        }
        Ok(rows)
    }
}
