use anyhow::Result;
use tracing::{debug, info, warn};

use crate::lp_solver::{OptimisationStatus, SolverBackend};
use crate::scenario::ProductMix;

use super::analysis::{PlantUtilisation, analyse};
use super::model::build_model;

/// Outcome of one optimisation request.
///
/// Unless `status` is [`OptimisationStatus::Optimal`], the quantities and profit are
/// zero and `plants` is empty.
#[derive(Debug, Clone, PartialEq)]
pub struct SolveResult {
    pub status: OptimisationStatus,
    pub doors_units: f64,
    pub windows_units: f64,
    pub max_profit: f64,
    pub plants: Vec<PlantUtilisation>,
}

impl SolveResult {
    fn failed(status: OptimisationStatus) -> Self {
        Self {
            status,
            doors_units: 0.0,
            windows_units: 0.0,
            max_profit: 0.0,
            plants: Vec::new(),
        }
    }

    pub fn is_optimal(&self) -> bool {
        self.status == OptimisationStatus::Optimal
    }

    /// Plants with no capacity left at the optimum
    pub fn binding_plants(&self) -> impl Iterator<Item = &PlantUtilisation> {
        self.plants.iter().filter(|plant| plant.binding)
    }
}

/// Solve `mix` with the backend named by `PRODMIX_LP_SOLVER`, or the default one.
///
/// Infeasible, unbounded and undefined outcomes are results, not errors. `Err` means
/// the requested backend could not be used at all.
pub fn solve(mix: &ProductMix) -> Result<SolveResult> {
    solve_with(mix, SolverBackend::from_env_or_default()?)
}

/// Solve `mix` with a specific backend.
pub fn solve_with(mix: &ProductMix, backend: SolverBackend) -> Result<SolveResult> {
    let model = build_model(mix);
    debug!(
        backend = %backend,
        doors_profit = mix.doors_profit,
        windows_profit = mix.windows_profit,
        "Built product-mix model"
    );

    let solution = model.builder().solve_with(backend)?;

    if solution.status != OptimisationStatus::Optimal {
        warn!(status = %solution.status, "Product-mix optimisation failed");
        return Ok(SolveResult::failed(solution.status));
    }

    let doors_units = solution.get_value(model.doors()).unwrap_or(0.0);
    let windows_units = solution.get_value(model.windows()).unwrap_or(0.0);
    // Must equal the objective at the reported quantities, whatever the backend rounded
    let max_profit = mix.doors_profit * doors_units + mix.windows_profit * windows_units;
    let plants = analyse(mix, doors_units, windows_units).to_vec();

    info!(
        doors = doors_units,
        windows = windows_units,
        profit = max_profit,
        binding = plants.iter().filter(|plant| plant.binding).count(),
        "Product-mix optimisation succeeded"
    );

    Ok(SolveResult {
        status: OptimisationStatus::Optimal,
        doors_units,
        windows_units,
        max_profit,
        plants,
    })
}
