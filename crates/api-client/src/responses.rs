use crate::error::ApiError;
use chrono::{DateTime, NaiveDate};
use core_types::{AppStats, AppStatus, TimeSeriesPoint};
use serde::Deserialize;

/// A chart point exactly as it appears in the payload.
///
/// Counts are signed here so negative values can be reported as malformed
/// points rather than generic deserialization failures.
#[derive(Debug, Clone, Deserialize)]
pub struct RawChartPoint {
    pub date: String,
    pub linked: i64,
    pub unlinked: i64,
}

impl RawChartPoint {
    fn validate(self, index: usize) -> Result<TimeSeriesPoint, ApiError> {
        let malformed = |reason: String| ApiError::MalformedPoint { index, reason };

        let date = parse_day(&self.date)
            .ok_or_else(|| malformed(format!("unparsable date '{}'", self.date)))?;
        let linked = u64::try_from(self.linked)
            .map_err(|_| malformed(format!("negative linked count {}", self.linked)))?;
        let unlinked = u64::try_from(self.unlinked)
            .map_err(|_| malformed(format!("negative unlinked count {}", self.unlinked)))?;

        Ok(TimeSeriesPoint::new(date, linked, unlinked))
    }
}

/// The stats payload wraps the cards in a top-level `stats` object.
#[derive(Debug, Clone, Deserialize)]
pub struct StatsEnvelope {
    pub stats: AppStats,
}

/// Accepts a plain `YYYY-MM-DD` day or an RFC 3339 timestamp, taking the UTC
/// calendar day of the latter.
fn parse_day(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.naive_utc().date()))
}

/// Parses and validates a chart payload. A single malformed point fails the
/// whole payload.
pub fn parse_series(body: &str) -> Result<Vec<TimeSeriesPoint>, ApiError> {
    let raw: Vec<RawChartPoint> =
        serde_json::from_str(body).map_err(|e| ApiError::Deserialization(e.to_string()))?;

    raw.into_iter()
        .enumerate()
        .map(|(index, point)| point.validate(index))
        .collect()
}

pub fn parse_stats(body: &str) -> Result<AppStats, ApiError> {
    serde_json::from_str::<StatsEnvelope>(body)
        .map(|envelope| envelope.stats)
        .map_err(|e| ApiError::Deserialization(e.to_string()))
}

pub fn parse_inactive_apps(body: &str) -> Result<Vec<AppStatus>, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

/// Keeps the points whose date lies in `[start, end]`, preserving order.
pub fn within_window(
    points: Vec<TimeSeriesPoint>,
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<TimeSeriesPoint> {
    points
        .into_iter()
        .filter(|point| point.date >= start && point.date <= end)
        .collect()
}
