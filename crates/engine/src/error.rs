use analytics::AnalyticsError;
use api_client::error::ApiError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    /// The source could not produce data for a requested window or payload.
    #[error("Retrieval failed: {0}")]
    Retrieval(#[from] ApiError),

    #[error("Analytics error: {0}")]
    Analytics(#[from] AnalyticsError),
}
