//! Product-mix optimisation for a two-product, three-plant manufacturer
//!
//! Given the unit profit of doors and windows, the hours each product takes in each
//! plant, and the hours each plant has available, this library finds the weekly
//! production plan that maximises profit and reports which plants are fully used
//! ("binding") and how much capacity the others have left ("slack").
//!
//! # Overview
//!
//! The canonical instance is the Wyndor Glass Co. textbook problem:
//!
//! ```text
//! maximise   300·x₁ + 500·x₂
//! subject to   1·x₁ + 0·x₂ ≤  4     (Plant 1)
//!              0·x₁ + 2·x₂ ≤ 12     (Plant 2)
//!              3·x₁ + 2·x₂ ≤ 18     (Plant 3)
//!              x₁, x₂ ≥ 0
//! ```
//!
//! whose optimum is two doors and six windows for $3,600 a week, with plants 2 and 3
//! binding.
//!
//! # Main Workflows
//!
//! 1. **Solve** ([`optimise`]): build the linear program, solve it, analyse plant usage
//! 2. **Sweep** ([`sweep`]): re-solve over a range of capacities for one plant
//! 3. **Show config** ([`scenario`]): print the effective scenario as TOML
//!
//! # Usage Example
//!
//! ```rust
//! use prodmix::lp_solver::SolverBackend;
//! use prodmix::optimise::solve_with;
//! use prodmix::scenario::ProductMix;
//!
//! let mut mix = ProductMix::default();
//! mix.plants[0].capacity = 2.0;
//!
//! let result = solve_with(&mix, SolverBackend::Vertex)?;
//! assert!(result.is_optimal());
//! assert_eq!(result.binding_plants().count(), 3);
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! # Modules
//!
//! - **[`scenario`]**: the scenario parameters, their defaults, TOML files and flags
//! - **[`optimise`]**: model construction, solving and post-solve analysis
//! - **[`report`]**: text and CSV presentation of a result
//! - **[`sweep`]**: capacity sensitivity sweeps
//! - **[`lp_solver`]**: linear programming layer with pluggable backends

use std::{error::Error, fmt};

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

pub mod lp_solver;
pub mod optimise;
pub mod report;
pub mod scenario;
pub mod sweep;

// Re-export the main functions for easy access
pub use optimise::{SolveArgs, SolveResult, solve, solve_main, solve_with};
pub use scenario::{InvalidInput, ProductMix, ShowConfigArgs, show_config_main};
pub use sweep::{SweepArgs, sweep_main};

use lp_solver::OptimisationStatus;

/// Application-level outcomes that end a command with an error status.
#[derive(Debug, PartialEq, Eq)]
pub enum AppError {
    /// The solver finished without an optimal plan.
    NotOptimal(OptimisationStatus),
    /// A plant number outside 1 to 3 was given.
    PlantOutOfRange(usize),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotOptimal(status) => write!(f, "Optimization failed: {}", status),
            AppError::PlantOutOfRange(plant) => {
                write!(f, "Plant {} does not exist, plants are numbered 1 to 3", plant)
            }
        }
    }
}

impl Error for AppError {}

/// Command-line interface arguments for the product-mix tools.
#[derive(Debug, Parser)]
#[clap(
    name = "prodmix",
    about = "Profit-maximising product-mix optimiser for doors and windows"
)]
pub struct CLIArguments {
    /// Log more (-v info, -vv debug); RUST_LOG takes precedence
    #[clap(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[clap(subcommand)]
    pub command: Command,
}

/// The commands available:
/// - `Solve`: Find the optimal production plan and report plant usage
/// - `Sweep`: Re-solve for a range of capacities of one plant
/// - `ShowConfig`: Print the effective scenario
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Find the profit-maximising production plan and report plant utilisation.
    Solve(SolveArgs),
    /// Solve for evenly spaced capacities of one plant, everything else fixed.
    Sweep(SweepArgs),
    /// Print the scenario after applying defaults, config file and flags, as TOML.
    ShowConfig(ShowConfigArgs),
}

/// Install the stderr log subscriber.
///
/// `RUST_LOG` wins when set, otherwise `verbose` picks warn, info or debug.
pub fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
