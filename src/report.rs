//! Human-readable and CSV output for a solved scenario.
//!
//! On an optimal result the report gives the production plan and then one row per
//! plant:
//!
//! ```text
//! Optimal Doors (x₁):   2.00 units/wk
//! Optimal Windows (x₂): 6.00 units/wk
//! Maximum Total Profit: $3,600.00/wk (Status: Optimal)
//!
//! Plant Capacity Analysis
//!  Plant   | Constraint       | Capacity (hrs) | Time Used (hrs) | Slack (hrs) | Status
//! ---------+------------------+----------------+-----------------+-------------+----------------------
//!  Plant 1 | 1x₁ + 0x₂ ≤ 4    | 4.00           | 2.00            | 2.00        | Remaining Capacity
//!  ...
//! ```

use std::io::Write;

use anyhow::Result;
use prettytable::*;

use crate::optimise::SolveResult;
use crate::scenario::{Plant, ProductMix};

pub const BINDING_LABEL: &str = "Binding (Fully Used)";
pub const REMAINING_LABEL: &str = "Remaining Capacity";

/// One line of the plant capacity table.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstraintRow {
    pub plant: String,
    pub constraint: String,
    pub capacity: f64,
    pub time_used: f64,
    pub slack: f64,
    pub status: &'static str,
}

/// `a·x₁ + b·x₂ ≤ capacity` as the plant's constraint reads.
pub fn constraint_text(plant: &Plant) -> String {
    format!(
        "{}x₁ + {}x₂ ≤ {}",
        plant.doors_time, plant.windows_time, plant.capacity
    )
}

/// Table rows of a result, empty unless it is optimal.
pub fn constraint_rows(mix: &ProductMix, result: &SolveResult) -> Vec<ConstraintRow> {
    mix.plants
        .iter()
        .zip(&result.plants)
        .map(|(plant, utilisation)| ConstraintRow {
            plant: utilisation.label.clone(),
            constraint: constraint_text(plant),
            capacity: utilisation.capacity,
            time_used: utilisation.time_used,
            slack: utilisation.slack,
            status: if utilisation.binding {
                BINDING_LABEL
            } else {
                REMAINING_LABEL
            },
        })
        .collect()
}

/// Shown in place of a NaN or infinite number
pub const NOT_A_NUMBER: &str = "n/a";

/// Two decimals, as quantities and hours are shown.
pub fn format_units(value: f64) -> String {
    if !value.is_finite() {
        return NOT_A_NUMBER.to_string();
    }
    format!("{:.2}", value)
}

/// Dollars with thousands separators: `$3,600.00`, `-$12.50`.
pub fn format_currency(value: f64) -> String {
    if !value.is_finite() {
        return NOT_A_NUMBER.to_string();
    }
    let rounded = format!("{:.2}", value.abs());
    let (whole, cents) = rounded.split_once('.').unwrap_or((rounded.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    // -0.001 rounds to zero and prints without a sign
    let negative = value < 0.0 && rounded.bytes().any(|b| b.is_ascii_digit() && b != b'0');
    format!("{}${}.{}", if negative { "-" } else { "" }, grouped, cents)
}

/// Write the report for `result`.
///
/// A failed optimisation gets its status and a hint instead of metrics.
pub fn write_report<W: Write + ?Sized>(
    writer: &mut W,
    mix: &ProductMix,
    result: &SolveResult,
) -> Result<()> {
    if !result.is_optimal() {
        writeln!(writer, "The optimization failed. Status: {}", result.status)?;
        writeln!(
            writer,
            "Check your input values. The problem might be infeasible (no solution) or unbounded."
        )?;
        return Ok(());
    }

    writeln!(
        writer,
        "Optimal Doors (x₁):   {} units/wk",
        format_units(result.doors_units)
    )?;
    writeln!(
        writer,
        "Optimal Windows (x₂): {} units/wk",
        format_units(result.windows_units)
    )?;
    writeln!(
        writer,
        "Maximum Total Profit: {}/wk (Status: {})",
        format_currency(result.max_profit),
        result.status
    )?;

    let mut table = Table::new();
    table.set_titles(row![
        "Plant",
        "Constraint",
        "Capacity (hrs)",
        "Time Used (hrs)",
        "Slack (hrs)",
        "Status",
    ]);
    table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
    for row in constraint_rows(mix, result) {
        table.add_row(row![
            row.plant,
            row.constraint,
            format_units(row.capacity),
            format_units(row.time_used),
            format_units(row.slack),
            row.status,
        ]);
    }

    writeln!(writer, "\nPlant Capacity Analysis")?;
    table.print(writer)?;

    Ok(())
}

/// Write the plant table as CSV, header only for a failed optimisation.
pub fn write_csv<W: Write + ?Sized>(
    writer: &mut W,
    mix: &ProductMix,
    result: &SolveResult,
) -> Result<()> {
    writeln!(writer, "plant,constraint,capacity,time_used,slack,status")?;
    for row in constraint_rows(mix, result) {
        writeln!(
            writer,
            "{},{},{:.3},{:.3},{:.3},{}",
            csv_field(&row.plant),
            csv_field(&row.constraint),
            row.capacity,
            row.time_used,
            row.slack,
            row.status,
        )?;
    }
    Ok(())
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
