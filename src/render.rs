//! Terminal rendering of the dashboard values.
//!
//! This is the only place that turns numbers into display text; the library
//! crates hand over raw values.

use analytics::{PercentageChange, SeatBreakdown};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};
use core_types::AppStats;
use engine::ComparisonOutcome;
use rust_decimal::{Decimal, RoundingStrategy};

/// `+20.0%`, `-5.3%`, `0.0%`, or `N/A` when there is no baseline.
pub fn format_change(change: PercentageChange) -> String {
    match change {
        PercentageChange::Undefined => "N/A".to_string(),
        PercentageChange::Change(value) => {
            let sign = if value > 0.0 { "+" } else { "" };
            format!("{}{:.1}%", sign, value)
        }
    }
}

/// Groups digits in threes: `1250` becomes `1,250`.
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

fn round_half_up(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// A utilization fraction as a whole percentage: `0.724` becomes `72%`.
pub fn format_utilization(average: Decimal) -> String {
    format!("{}%", round_half_up(average * Decimal::ONE_HUNDRED, 0))
}

/// Month-over-month change with a direction marker: `▲ 3.5%` or `▼ 3.5%`.
pub fn format_month_over_month(change: Decimal) -> String {
    let marker = if change >= Decimal::ZERO { "▲" } else { "▼" };
    let magnitude = round_half_up((change * Decimal::ONE_HUNDRED).abs(), 1);
    format!("{} {:.1}%", marker, magnitude)
}

/// Savings in thousands: `48500` becomes `$49k`.
pub fn format_savings(potential: Decimal) -> String {
    format!("${}k", round_half_up(potential / Decimal::ONE_THOUSAND, 0))
}

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

fn right(value: impl ToString) -> Cell {
    Cell::new(value).set_alignment(CellAlignment::Right)
}

pub fn adoption_table(outcome: &ComparisonOutcome) -> String {
    let mut table = new_table(vec!["Date", "Linked Apps", "Unlinked Apps", "Total"]);
    for point in &outcome.series {
        table.add_row(vec![
            Cell::new(point.date),
            right(point.linked_count),
            right(point.unlinked_count),
            right(point.total()),
        ]);
    }

    let window = &outcome.window;
    format!(
        "App Adoption Overview\n\
         {} data points in the last {} ({} to {})\n\
         {} vs. previous ({} to {}): {} now, {} before\n{}",
        outcome.series.len(),
        outcome.selector,
        window.current_start,
        window.current_end,
        format_change(outcome.change),
        window.prior_start,
        window.prior_end,
        group_thousands(outcome.current_total),
        group_thousands(outcome.prior_total),
        table
    )
}

pub fn stats_table(stats: &AppStats) -> String {
    let mut table = new_table(vec!["Card", "Value", "Detail"]);
    table.add_row(vec![
        Cell::new("Total Applications"),
        right(group_thousands(stats.applications.total)),
        Cell::new(format!("Unlinked: {}", group_thousands(stats.applications.unlinked))),
    ]);
    table.add_row(vec![
        Cell::new("Average L30 Utilization"),
        right(format_utilization(stats.utilization.average)),
        Cell::new(format!("MoM: {}", format_month_over_month(stats.utilization.change))),
    ]);
    table.add_row(vec![
        Cell::new("Saving Potential"),
        right(format_savings(stats.savings.potential)),
        Cell::new(""),
    ]);
    table.to_string()
}

pub fn breakdown_table(rows: &[SeatBreakdown]) -> String {
    let mut table = new_table(vec![
        "Name of app",
        "Inactive",
        "Abandoned",
        "Active",
        "Inactive or Abandoned vs. all",
    ]);
    for row in rows {
        table.add_row(vec![
            Cell::new(&row.name),
            right(format!("{} ({:.1}%)", row.inactive_count, row.inactive_pct)),
            right(format!("{} ({:.1}%)", row.abandoned_count, row.abandoned_pct)),
            right(format!("{} ({:.1}%)", row.active_count, row.active_pct)),
            right(row.ratio_label()),
        ]);
    }
    format!("Inactive or Abandoned accounts in paid apps\n{}", table)
}
