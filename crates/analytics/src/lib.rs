//! # License Insights Analytics
//!
//! Pure calculations behind the dashboard: comparison windows, aggregate totals,
//! percentage changes and per-application seat breakdowns.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This crate has no knowledge of external systems. It
//!   depends only on `core-types`.
//! - **Stateless Calculation:** Every function takes its inputs explicitly,
//!   including "today", so results are deterministic and easy to test.
//!
//! ## Public API
//!
//! - `compute_window`: derives the current and prior windows for a selector.
//! - `AnalyticsEngine`: aggregation, percentage change and seat breakdowns.
//! - `PercentageChange`, `SeatBreakdown`: the values handed to the renderer.
//! - `AnalyticsError`: the specific error types that can be returned from this crate.

pub mod engine;
pub mod error;
pub mod report;
pub mod window;

pub use engine::AnalyticsEngine;
pub use error::AnalyticsError;
pub use report::{PercentageChange, SeatBreakdown};
pub use window::{ComparisonWindow, compute_window};
