use serde::{Deserialize, Serialize};

/// Relative change between two aggregate totals.
///
/// `Undefined` is returned when the baseline is zero. It is a distinct variant
/// so a renderer can never confuse "no baseline" with an actual 0% change.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PercentageChange {
    /// Signed change in percent. Positive means growth.
    Change(f64),
    Undefined,
}

impl PercentageChange {
    pub fn value(&self) -> Option<f64> {
        match self {
            PercentageChange::Change(value) => Some(*value),
            PercentageChange::Undefined => None,
        }
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, PercentageChange::Undefined)
    }
}

/// How the seats of a single paid application split into inactive, abandoned
/// and active.
///
/// The three percentages sum to 100 whenever `total_count` is non-zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeatBreakdown {
    pub name: String,
    pub icon: String,
    pub inactive_pct: f64,
    pub abandoned_pct: f64,
    pub active_pct: f64,
    pub inactive_count: u64,
    pub abandoned_count: u64,
    pub active_count: u64,
    /// Inactive plus abandoned seats.
    pub flagged_count: u64,
    pub total_count: u64,
}

impl SeatBreakdown {
    /// The "inactive or abandoned vs. all" label, e.g. `6/20`.
    pub fn ratio_label(&self) -> String {
        format!("{}/{}", self.flagged_count, self.total_count)
    }
}
