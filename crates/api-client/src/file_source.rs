use crate::error::ApiError;
use crate::responses::{parse_inactive_apps, parse_series, parse_stats, within_window};
use crate::AnalyticsSource;
use async_trait::async_trait;
use chrono::NaiveDate;
use configuration::{PayloadFiles, SourceSettings};
use core_types::{AppStats, AppStatus, TimeSeriesPoint};
use std::path::{Path, PathBuf};

/// Reads snapshot payloads from a local directory.
///
/// The files have the same shape the HTTP backend serves. Every call re-reads
/// the file, so edits to the snapshot show up on the next fetch.
#[derive(Debug, Clone)]
pub struct FileSource {
    data_dir: PathBuf,
    payloads: PayloadFiles,
}

impl FileSource {
    pub fn new(settings: &SourceSettings) -> Self {
        Self {
            data_dir: settings.data_dir.clone(),
            payloads: settings.payloads.clone(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    async fn read(&self, payload: &str) -> Result<String, ApiError> {
        let path = self.data_dir.join(payload);
        let text = tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| ApiError::Io {
                path: path.clone(),
                source,
            })?;
        tracing::debug!(path = %path.display(), bytes = text.len(), "Read snapshot file.");
        Ok(text)
    }
}

#[async_trait]
impl AnalyticsSource for FileSource {
    async fn fetch_series(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<TimeSeriesPoint>, ApiError> {
        let text = self.read(&self.payloads.chart).await?;
        Ok(within_window(parse_series(&text)?, start, end))
    }

    async fn fetch_app_stats(&self) -> Result<AppStats, ApiError> {
        let text = self.read(&self.payloads.stats).await?;
        parse_stats(&text)
    }

    async fn fetch_inactive_apps(&self) -> Result<Vec<AppStatus>, ApiError> {
        let text = self.read(&self.payloads.inactive_apps).await?;
        parse_inactive_apps(&text)
    }
}
