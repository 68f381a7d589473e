//! Translation of a [`ProductMix`] into a linear program.
//!
//! ```text
//! maximise   doors_profit·x₁ + windows_profit·x₂
//! subject to plantN.doors_time·x₁ + plantN.windows_time·x₂ ≤ plantN.capacity   (N = 1, 2, 3)
//!            x₁, x₂ ≥ 0
//! ```
//!
//! The builder trusts its input: a zero or negative capacity goes into the model as
//! given, and the solver reports what that does to feasibility.

use crate::constraint;
use crate::lp_solver::*;
use crate::scenario::{PLANT_COUNT, ProductMix};

/// Brand of every product-mix model
pub enum ProductMixBrand {}

/// A built product-mix program and the handles needed to read its solution.
pub struct ProductMixModel {
    builder: LPModelBuilder<ProductMixBrand>,
    doors: VariableId<ProductMixBrand>,
    windows: VariableId<ProductMixBrand>,
    plants: [ConstraintId; PLANT_COUNT],
}

impl ProductMixModel {
    pub fn builder(&self) -> &LPModelBuilder<ProductMixBrand> {
        &self.builder
    }

    /// Decision variable x₁
    pub fn doors(&self) -> VariableId<ProductMixBrand> {
        self.doors
    }

    /// Decision variable x₂
    pub fn windows(&self) -> VariableId<ProductMixBrand> {
        self.windows
    }

    /// Capacity constraint of the plant at `index` (0 for Plant 1)
    pub fn plant_constraint(&self, index: usize) -> Option<&Constraint<ProductMixBrand>> {
        self.plants
            .get(index)
            .and_then(|&id| self.builder.constraint(id))
    }
}

/// Build the two-variable, three-constraint program for `mix`.
///
/// Constraints are added in plant order and carry the plant labels.
pub fn build_model(mix: &ProductMix) -> ProductMixModel {
    let mut builder = LPModelBuilder::<ProductMixBrand>::new();

    let doors = builder.add_variable(VariableType::Continuous, 0.0, f64::INFINITY);
    let windows = builder.add_variable(VariableType::Continuous, 0.0, f64::INFINITY);

    builder.set_objective(
        mix.doors_profit * doors + mix.windows_profit * windows,
        OptimisationSense::Maximise,
    );

    let plants = mix.plants.each_ref().map(|plant| {
        builder.add_constraint(constraint!(
            plant.label.as_str(),
            (plant.doors_time * doors + plant.windows_time * windows) <= plant.capacity
        ))
    });

    ProductMixModel {
        builder,
        doors,
        windows,
        plants,
    }
}
