use crate::error::ApiError;
use async_trait::async_trait;
use chrono::NaiveDate;
use configuration::{PayloadFiles, SourceSettings};
use core_types::{AppStats, AppStatus, TimeSeriesPoint};
use std::time::Duration;

pub mod error;
pub mod file_source;
pub mod responses;

// --- Public API ---
pub use file_source::FileSource;
pub use responses::{parse_inactive_apps, parse_series, parse_stats, within_window};

/// The read-only interface to the dashboard's snapshot data.
///
/// Implementations must be idempotent and side-effect free from the caller's
/// point of view. Each call either returns the complete result or fails.
#[async_trait]
pub trait AnalyticsSource: Send + Sync {
    /// Fetches the adoption points whose date lies in `[start, end]`.
    ///
    /// An empty result is a valid window without activity.
    async fn fetch_series(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<TimeSeriesPoint>, ApiError>;

    /// Fetches the aggregate statistics shown on the summary cards.
    async fn fetch_app_stats(&self) -> Result<AppStats, ApiError>;

    /// Fetches the per-application inactivity counts.
    async fn fetch_inactive_apps(&self) -> Result<Vec<AppStatus>, ApiError>;
}

/// Fetches snapshot payloads from the dashboard backend over HTTP.
#[derive(Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    base_url: String,
    payloads: PayloadFiles,
}

impl HttpSource {
    pub fn new(settings: &SourceSettings) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            payloads: settings.payloads.clone(),
        })
    }

    fn url(&self, payload: &str) -> String {
        format!("{}/{}", self.base_url, payload.trim_start_matches('/'))
    }

    async fn get_text(&self, payload: &str, query: &[(&str, String)]) -> Result<String, ApiError> {
        let url = self.url(payload);

        let response = self.client.get(&url).query(query).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::UnexpectedStatus {
                status: status.as_u16(),
                url,
            });
        }

        let text = response.text().await?;
        tracing::debug!(url = %url, bytes = text.len(), "Fetched snapshot payload.");
        Ok(text)
    }
}

#[async_trait]
impl AnalyticsSource for HttpSource {
    async fn fetch_series(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<TimeSeriesPoint>, ApiError> {
        let query = [
            ("start", start.format("%Y-%m-%d").to_string()),
            ("end", end.format("%Y-%m-%d").to_string()),
        ];
        let text = self.get_text(&self.payloads.chart, &query).await?;

        // A static snapshot server ignores the query, so filter here as well.
        let points = within_window(parse_series(&text)?, start, end);
        tracing::debug!(%start, %end, points = points.len(), "Fetched adoption series.");
        Ok(points)
    }

    async fn fetch_app_stats(&self) -> Result<AppStats, ApiError> {
        let text = self.get_text(&self.payloads.stats, &[]).await?;
        parse_stats(&text)
    }

    async fn fetch_inactive_apps(&self) -> Result<Vec<AppStatus>, ApiError> {
        let text = self.get_text(&self.payloads.inactive_apps, &[]).await?;
        parse_inactive_apps(&text)
    }
}
