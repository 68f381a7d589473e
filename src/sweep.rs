//! Capacity sensitivity sweep.
//!
//! Re-solves a scenario for evenly spaced capacities of one plant, keeping every
//! other parameter fixed. Each point is an independent request, so the points are
//! solved in parallel.

use std::io::{self, Write};

use anyhow::Result;
use clap::Parser;
use prettytable::*;
use rayon::prelude::*;
use tracing::info;

use crate::AppError;
use crate::lp_solver::{OptimisationStatus, SolverBackend};
use crate::optimise::solve_with;
use crate::report::{format_currency, format_units};
use crate::scenario::{InvalidInput, PLANT_COUNT, ProductMix, ScenarioArgs};

/// Command-line arguments for the sweep command.
#[derive(Parser, Debug)]
pub struct SweepArgs {
    #[clap(flatten)]
    pub scenario: ScenarioArgs,

    /// Plant whose capacity is varied (1 to 3)
    #[clap(long, short)]
    pub plant: usize,

    /// First capacity of the sweep
    #[clap(long, allow_negative_numbers = true)]
    pub from: f64,

    /// Last capacity of the sweep
    #[clap(long, allow_negative_numbers = true)]
    pub to: f64,

    /// Number of capacities solved, ends included
    #[clap(long, short, default_value_t = 5)]
    pub steps: usize,

    /// LP backend to solve with [default: microlp if compiled in, else vertex]
    #[clap(long, value_enum, env = "PRODMIX_LP_SOLVER")]
    pub solver: Option<SolverBackend>,

    /// Solve even if the fixed parameters are out of their domain
    #[clap(long)]
    pub no_validate: bool,
}

/// Solution of the scenario at one capacity.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepPoint {
    pub capacity: f64,
    pub status: OptimisationStatus,
    pub doors_units: f64,
    pub windows_units: f64,
    pub max_profit: f64,
    /// Binding flag per plant, empty unless optimal
    pub binding: Vec<bool>,
}

/// The capacities visited by a sweep in ascending order, whichever end comes first.
fn capacities(from: f64, to: f64, steps: usize) -> Vec<f64> {
    if steps < 2 {
        return vec![from];
    }
    let (from, to) = if to < from { (to, from) } else { (from, to) };
    let step = (to - from) / (steps - 1) as f64;
    (0..steps)
        .map(|i| if i == steps - 1 { to } else { from + step * i as f64 })
        .collect()
}

/// Solve `mix` once per capacity of the plant at `plant_index` (0 for Plant 1).
///
/// Points come back in ascending capacity order. A failed solve is a point with its status, not
/// an error.
pub fn sweep_capacity(
    mix: &ProductMix,
    plant_index: usize,
    from: f64,
    to: f64,
    steps: usize,
    backend: SolverBackend,
) -> Result<Vec<SweepPoint>> {
    if plant_index >= PLANT_COUNT {
        return Err(AppError::PlantOutOfRange(plant_index + 1).into());
    }

    capacities(from, to, steps)
        .into_par_iter()
        .map(|capacity| -> Result<SweepPoint> {
            let mut mix = mix.clone();
            mix.plants[plant_index].capacity = capacity;
            let result = solve_with(&mix, backend)?;

            Ok(SweepPoint {
                capacity,
                status: result.status,
                doors_units: result.doors_units,
                windows_units: result.windows_units,
                max_profit: result.max_profit,
                binding: result.plants.iter().map(|plant| plant.binding).collect(),
            })
        })
        .collect()
}

/// Write a sweep as a table, one line per capacity.
pub fn write_sweep<W: Write + ?Sized>(
    writer: &mut W,
    plant_label: &str,
    points: &[SweepPoint],
) -> Result<()> {
    let mut table = Table::new();
    table.set_titles(row![
        format!("{} Capacity (hrs)", plant_label),
        "Status",
        "Doors",
        "Windows",
        "Profit/wk",
        "Binding",
    ]);
    table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);

    for point in points {
        let binding = point
            .binding
            .iter()
            .enumerate()
            .filter(|&(_, &binding)| binding)
            .map(|(i, _)| (i + 1).to_string())
            .collect::<Vec<_>>()
            .join(" ");

        if point.status == OptimisationStatus::Optimal {
            table.add_row(row![
                format_units(point.capacity),
                point.status,
                format_units(point.doors_units),
                format_units(point.windows_units),
                format_currency(point.max_profit),
                binding,
            ]);
        } else {
            table.add_row(row![
                format_units(point.capacity),
                point.status,
                "-",
                "-",
                "-",
                "-",
            ]);
        }
    }

    table.print(writer)?;
    Ok(())
}

/// Sweep one plant's capacity and print the table on stdout.
pub fn sweep_main(args: SweepArgs) -> Result<()> {
    let SweepArgs {
        ref scenario,
        plant,
        from,
        to,
        steps,
        solver,
        no_validate,
    } = args;

    if !(1..=PLANT_COUNT).contains(&plant) {
        return Err(AppError::PlantOutOfRange(plant).into());
    }

    // The swept capacity is left free, the table shows what bad values do
    let mix = scenario.resolve()?;
    if !no_validate {
        mix.validate_except_capacity(plant - 1)?;
        for (field, value) in [("from", from), ("to", to)] {
            if !value.is_finite() {
                return Err(InvalidInput::NotFinite {
                    field: field.to_string(),
                    value,
                }
                .into());
            }
        }
    }
    let backend = solver.unwrap_or_else(SolverBackend::fallback);

    info!(plant, from, to, steps, backend = %backend, "Sweeping capacity");
    let points = sweep_capacity(&mix, plant - 1, from, to, steps, backend)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_sweep(&mut out, &mix.plants[plant - 1].label, &points)?;
    out.flush()?;

    Ok(())
}
