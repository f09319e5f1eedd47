use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One day of application adoption counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    pub date: NaiveDate,
    #[serde(rename = "linked")]
    pub linked_count: u64,
    #[serde(rename = "unlinked")]
    pub unlinked_count: u64,
}

impl TimeSeriesPoint {
    pub fn new(date: NaiveDate, linked_count: u64, unlinked_count: u64) -> Self {
        Self {
            date,
            linked_count,
            unlinked_count,
        }
    }

    /// Linked and unlinked instances together.
    pub fn total(&self) -> u64 {
        self.linked_count + self.unlinked_count
    }
}

/// Application counts shown on the "Total Applications" card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationCounts {
    pub total: u64,
    pub unlinked: u64,
}

/// Seat utilization over the last 30 days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UtilizationStats {
    /// Average utilization as a fraction (0.72 means 72%).
    pub average: Decimal,
    /// Month-over-month change as a fraction, signed.
    pub change: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavingsStats {
    /// Potential savings in currency units.
    pub potential: Decimal,
}

/// Aggregate statistics rendered as the dashboard summary cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppStats {
    pub applications: ApplicationCounts,
    pub utilization: UtilizationStats,
    pub savings: SavingsStats,
}

/// Inactivity counts for a single paid application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppStatus {
    pub icon: String,
    pub name: String,
    pub inactive_count: u64,
    pub abandoned_count: u64,
    pub total_count: u64,
}
