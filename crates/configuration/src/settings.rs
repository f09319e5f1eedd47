use crate::error::ConfigError;
use core_types::RangeSelector;
use serde::Deserialize;
use std::path::PathBuf;

/// The root configuration structure for the entire application.
///
/// Every section is optional; a missing section falls back to its defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub source: SourceSettings,
    #[serde(default)]
    pub dashboard: DashboardSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

impl Config {
    /// Checks the cross-field rules serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.source.kind == SourceKind::Http && self.source.base_url.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "source.base_url must be set when source.kind is 'http'".to_string(),
            ));
        }
        if self.source.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "source.timeout_secs must be greater than zero".to_string(),
            ));
        }
        let payloads = &self.source.payloads;
        for (key, value) in [
            ("chart", &payloads.chart),
            ("stats", &payloads.stats),
            ("inactive_apps", &payloads.inactive_apps),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::ValidationError(format!(
                    "source.payloads.{} must not be empty",
                    key
                )));
            }
        }
        Ok(())
    }
}

/// Where dashboard snapshots are read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum SourceKind {
    /// Fetch the payloads from a snapshot server over HTTP.
    #[default]
    Http,
    /// Read the payloads from a local directory.
    File,
}

/// Settings for the retrieval collaborator.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceSettings {
    pub kind: SourceKind,
    /// Base URL of the snapshot server, e.g. `http://localhost:3000`.
    pub base_url: String,
    /// Directory holding the payload files when `kind = "file"`.
    pub data_dir: PathBuf,
    /// Per-request timeout for the HTTP client.
    pub timeout_secs: u64,
    pub payloads: PayloadFiles,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            kind: SourceKind::Http,
            base_url: "http://localhost:3000".to_string(),
            data_dir: PathBuf::from("data"),
            timeout_secs: 10,
            payloads: PayloadFiles::default(),
        }
    }
}

/// File names (or URL paths) of the three snapshot payloads.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PayloadFiles {
    pub chart: String,
    pub stats: String,
    pub inactive_apps: String,
}

impl Default for PayloadFiles {
    fn default() -> Self {
        Self {
            chart: "mock-chart.json".to_string(),
            stats: "mock-app-stats.json".to_string(),
            inactive_apps: "mock-inactive-apps.json".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DashboardSettings {
    /// The range the adoption chart opens with.
    pub default_range: RangeSelector,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Logging configuration. `RUST_LOG` takes precedence over `level` when set.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
    pub format: LogFormat,
    /// When set, logs are also written to a daily rolling file in this directory.
    pub directory: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
            directory: None,
        }
    }
}
