//! Product-mix optimisation.
//!
//! A request goes through four stateless steps:
//!
//! 1. [`build_model`] turns a [`ProductMix`](crate::scenario::ProductMix) into a linear
//!    program with two non-negative variables and one `<=` row per plant
//! 2. The program is handed to an [`lp_solver`](crate::lp_solver) backend
//! 3. If the backend finds an optimum, [`analyse`] works out how much of each plant's
//!    capacity the optimum uses and which plants are binding
//! 4. [`solve_main`] writes the report
//!
//! # Usage Example
//!
//! ```rust
//! use prodmix::lp_solver::{OptimisationStatus, SolverBackend};
//! use prodmix::optimise::solve_with;
//! use prodmix::scenario::ProductMix;
//!
//! let result = solve_with(&ProductMix::default(), SolverBackend::Vertex)?;
//!
//! assert_eq!(result.status, OptimisationStatus::Optimal);
//! assert!((result.max_profit - 3600.0).abs() < 1e-6);
//! let binding: Vec<_> = result.binding_plants().map(|p| p.label.as_str()).collect();
//! assert_eq!(binding, ["Plant 2", "Plant 3"]);
//! # Ok::<(), anyhow::Error>(())
//! ```

use std::{
    fs,
    io::{self, BufWriter, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use crate::AppError;
use crate::lp_solver::SolverBackend;
use crate::report::{write_csv, write_report};
use crate::scenario::ScenarioArgs;

mod analysis;
mod engine;
mod model;
#[cfg(test)]
mod tests;

pub use analysis::{BINDING_TOLERANCE, PlantUtilisation, analyse};
pub use engine::{SolveResult, solve, solve_with};
pub use model::{ProductMixBrand, ProductMixModel, build_model};

/// Command-line arguments for the solve command.
#[derive(Parser, Debug)]
pub struct SolveArgs {
    #[clap(flatten)]
    pub scenario: ScenarioArgs,

    /// LP backend to solve with [default: microlp if compiled in, else vertex]
    #[clap(long, value_enum, env = "PRODMIX_LP_SOLVER")]
    pub solver: Option<SolverBackend>,

    /// Write the report to this file instead of stdout
    #[clap(long, short)]
    pub report: Option<PathBuf>,

    /// Output CSV file with the per-plant table
    #[clap(long)]
    pub csv: Option<PathBuf>,

    /// Solve even if the parameters are out of their domain
    #[clap(long)]
    pub no_validate: bool,
}

/// Solve a scenario and report the optimal plan.
///
/// The report is written even when the optimisation fails; the function then returns
/// [`AppError::NotOptimal`] so the process exits with an error status.
pub fn solve_main(args: SolveArgs) -> Result<()> {
    let SolveArgs {
        ref scenario,
        solver,
        ref report,
        ref csv,
        no_validate,
    } = args;

    let mix = scenario.resolve()?;
    if !no_validate {
        mix.validate()?;
    }

    let backend = solver.unwrap_or_else(SolverBackend::fallback);
    let result = solve_with(&mix, backend)?;

    match report {
        Some(path) => {
            let mut out_file = BufWriter::new(
                fs::File::create(path)
                    .with_context(|| format!("Cannot create report {}", path.display()))?,
            );
            write_report(&mut out_file, &mix, &result)?;
            out_file.flush()?;
            info!(path = %path.display(), "Report written");
        }
        None => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            write_report(&mut out, &mix, &result)?;
            out.flush()?;
        }
    }

    if let Some(path) = csv {
        let mut csv_file = BufWriter::new(
            fs::File::create(path)
                .with_context(|| format!("Cannot create CSV file {}", path.display()))?,
        );
        write_csv(&mut csv_file, &mix, &result)?;
        csv_file.flush()?;
        info!(path = %path.display(), "CSV written");
    }

    if !result.is_optimal() {
        return Err(AppError::NotOptimal(result.status).into());
    }

    Ok(())
}
