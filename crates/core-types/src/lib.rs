//! Shared data types for the license insights dashboard.
//!
//! This is the bottom layer of the workspace. It has no knowledge of how data is
//! fetched or rendered; every other crate speaks in these types.

pub mod enums;
pub mod error;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use enums::RangeSelector;
pub use error::CoreError;
pub use structs::{
    AppStats, AppStatus, ApplicationCounts, SavingsStats, TimeSeriesPoint, UtilizationStats,
};
