use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum AnalyticsError {
    #[error("Date arithmetic out of range: {months} month(s) before {today}")]
    DateOutOfRange { today: NaiveDate, months: u32 },

    #[error("Invalid seat counts for '{name}': {flagged} inactive or abandoned out of {total}")]
    InvalidSeatCounts { name: String, flagged: u64, total: u64 },

    #[error("Window total over {points} point(s) exceeds the supported range")]
    TotalOverflow { points: usize },
}
