use std::path::PathBuf;
use thiserror::Error;

/// Everything that can go wrong while retrieving a snapshot.
///
/// No variant carries partial data: a failed call yields nothing.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Failed to send the HTTP request: {0}")]
    Request(#[from] reqwest::Error),

    #[error("The snapshot server answered {status} for {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("Failed to read snapshot file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to deserialize the snapshot payload: {0}")]
    Deserialization(String),

    #[error("Malformed time-series point at index {index}: {reason}")]
    MalformedPoint { index: usize, reason: String },
}
