//! Linear Programming (LP) modelling layer
//!
//! This module describes a linear program independently of the engine that solves it.
//! The product-mix optimiser builds its model here and hands it to one of several
//! backends, so the formulation never depends on a particular solver library.
//!
//! # Type Safety with Branded Types
//!
//! All core types (`VariableId`, `LinearExpression`, `Constraint`, `LPModelBuilder`)
//! carry a generic `Brand` type parameter:
//!
//! - Variables from one builder cannot be used with another builder
//! - Constraints only accept variables from the builder that will consume them
//! - The brand is a zero-sized phantom type, so there is no runtime cost
//!
//! Use the `lp_model_builder!()` macro to get a builder with a unique brand:
//!
//! ```rust
//! use prodmix::constraint;
//! use prodmix::lp_model_builder;
//! use prodmix::lp_solver::VariableType;
//!
//! let mut builder1 = lp_model_builder!();
//! let mut builder2 = lp_model_builder!();
//!
//! let x = builder1.add_variable(VariableType::Continuous, 0.0, 10.0);
//! let _y = builder2.add_variable(VariableType::Continuous, 0.0, 10.0);
//!
//! builder1.add_constraint(constraint!((x) <= 5.0));
//!
//! // This would NOT compile, `_y` carries the brand of builder2:
//! // builder1.add_constraint(constraint!((_y) <= 5.0));
//! ```
//!
//! # Building a Model
//!
//! ```rust
//! use prodmix::constraint;
//! use prodmix::lp_model_builder;
//! use prodmix::lp_solver::{OptimisationSense, OptimisationStatus, SolverBackend, VariableType};
//!
//! let mut builder = lp_model_builder!(ExampleModel);
//! let x = builder.add_variable(VariableType::Continuous, 0.0, f64::INFINITY);
//! let y = builder.add_variable(VariableType::Continuous, 0.0, f64::INFINITY);
//!
//! builder.add_constraint(constraint!("capacity", (x + 2.0 * y) <= 14.0));
//! builder.add_constraint(constraint!((3.0 * x - y) >= 0.0));
//! builder.add_constraint(constraint!((x - y) <= 2.0));
//! builder.set_objective(3.0 * x + 4.0 * y, OptimisationSense::Maximise);
//!
//! let solution = builder.solve_with(SolverBackend::Vertex)?;
//! assert_eq!(solution.status, OptimisationStatus::Optimal);
//! assert!((solution.objective_value - 34.0).abs() < 1e-9);
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! # Solver Selection
//!
//! [`LPModelBuilder::solve`] picks the backend from the `PRODMIX_LP_SOLVER`
//! environment variable:
//! - `"vertex"` - built-in vertex enumeration (two variables at most)
//! - `"microlp"` - pure Rust simplex (requires `microlp` feature, on by default)
//! - `"coin_cbc"` or `"cbc"` - COIN-OR CBC (requires `coin_cbc` feature)
//!
//! If not set, microlp is used when compiled in, otherwise the vertex backend.
//! [`LPModelBuilder::solve_with`] ignores the environment.

use anyhow::{Result, anyhow};
use std::env;
use std::fmt;
use std::marker::PhantomData;
use tracing::{debug, warn};

/// Environment variable consulted by [`LPModelBuilder::solve`].
pub const SOLVER_ENV_VAR: &str = "PRODMIX_LP_SOLVER";

/// Variable types supported by LP solvers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableType {
    /// Continuous variable (can take any real value within its bounds)
    Continuous,
    /// Integer variable (can only take integer values)
    Integer,
    /// Binary variable (can only take values 0 or 1)
    Binary,
}

/// Constraint sense for linear constraints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintSense {
    /// Less than or equal to (≤)
    LessEqual,
    /// Equal to (=)
    Equal,
    /// Greater than or equal to (≥)
    GreaterEqual,
    /// Strictly greater than (>), relaxed to ≥ by every backend
    Greater,
}

impl ConstraintSense {
    /// Check `lhs <sense> rhs` allowing `tolerance` of violation.
    pub fn holds(self, lhs: f64, rhs: f64, tolerance: f64) -> bool {
        match self {
            ConstraintSense::LessEqual => lhs <= rhs + tolerance,
            ConstraintSense::Equal => (lhs - rhs).abs() <= tolerance,
            ConstraintSense::GreaterEqual | ConstraintSense::Greater => lhs >= rhs - tolerance,
        }
    }
}

/// Optimisation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptimisationSense {
    /// Minimise the objective function
    Minimise,
    /// Maximise the objective function
    Maximise,
}

/// Outcome of the optimisation process
///
/// Only [`OptimisationStatus::Optimal`] carries variable values. The other three are
/// legitimate results of solving a model built from bad data, not faults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptimisationStatus {
    /// A finite best solution exists and was found
    Optimal,
    /// No assignment satisfies every constraint
    Infeasible,
    /// The objective can be improved without limit
    Unbounded,
    /// The solver stopped without a definitive answer
    Undefined,
}

impl fmt::Display for OptimisationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OptimisationStatus::Optimal => "Optimal",
            OptimisationStatus::Infeasible => "Infeasible",
            OptimisationStatus::Unbounded => "Unbounded",
            OptimisationStatus::Undefined => "Undefined",
        };
        f.write_str(name)
    }
}

/// Available LP solver backends
///
/// Every variant exists regardless of enabled features so that configuration can name
/// it; asking for a backend that was not compiled in is reported when solving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum SolverBackend {
    /// Built-in vertex enumeration for models with at most two variables
    Vertex,
    /// microlp pure Rust simplex solver
    Microlp,
    /// Coin CBC open-source solver
    #[value(name = "coin_cbc", alias = "cbc", alias = "coin-cbc")]
    CoinCbc,
}

impl fmt::Display for SolverBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SolverBackend::Vertex => "vertex",
            SolverBackend::Microlp => "microlp",
            SolverBackend::CoinCbc => "coin_cbc",
        };
        f.write_str(name)
    }
}

impl SolverBackend {
    /// Parse a backend name as accepted by `PRODMIX_LP_SOLVER`
    pub fn from_name(name: &str) -> Result<Self> {
        match name.trim().to_lowercase().as_str() {
            "vertex" => Ok(SolverBackend::Vertex),
            "microlp" => Ok(SolverBackend::Microlp),
            "coin_cbc" | "coin-cbc" | "cbc" => Ok(SolverBackend::CoinCbc),
            _ => Err(anyhow!(
                "Invalid solver '{}' in {}. Valid options: vertex, microlp, coin_cbc",
                name,
                SOLVER_ENV_VAR
            )),
        }
    }

    /// Get the solver backend from environment variable or use fallback logic
    pub fn from_env_or_default() -> Result<Self> {
        if let Ok(solver_name) = env::var(SOLVER_ENV_VAR) {
            return Self::from_name(&solver_name);
        }
        Ok(Self::fallback())
    }

    /// Backend used when nothing was requested: microlp if compiled in, else vertex
    pub fn fallback() -> Self {
        if cfg!(feature = "microlp") {
            SolverBackend::Microlp
        } else {
            SolverBackend::Vertex
        }
    }

    /// Whether this backend was compiled into the current build
    pub fn is_available(self) -> bool {
        match self {
            SolverBackend::Vertex => true,
            SolverBackend::Microlp => cfg!(feature = "microlp"),
            SolverBackend::CoinCbc => cfg!(feature = "coin_cbc"),
        }
    }
}

/// A linear expression term: coefficient * variable
#[derive(Debug, Clone)]
pub struct LinearTerm<Brand> {
    pub coefficient: f64,
    pub variable: VariableId<Brand>,
}

/// A linear expression: sum of terms plus constant
#[derive(Debug, Clone)]
pub struct LinearExpression<Brand> {
    pub terms: Vec<LinearTerm<Brand>>,
    pub constant: f64,
}

impl<Brand> LinearExpression<Brand> {
    /// Create a new linear expression with a constant term
    pub fn new(constant: f64) -> Self {
        Self {
            terms: Vec::new(),
            constant,
        }
    }

    /// Add a term to the expression
    pub fn add_term(&mut self, coefficient: f64, variable: VariableId<Brand>) {
        self.terms.push(LinearTerm {
            coefficient,
            variable,
        });
    }

    /// Create a linear expression from a single variable
    pub fn from_variable(variable: VariableId<Brand>) -> Self {
        Self {
            terms: vec![LinearTerm {
                coefficient: 1.0,
                variable,
            }],
            constant: 0.0,
        }
    }

    /// Evaluate the expression for the given variable values, indexed by variable id.
    /// Variables missing from `values` count as zero.
    pub fn evaluate(&self, values: &[f64]) -> f64 {
        self.terms.iter().fold(self.constant, |acc, term| {
            acc + term.coefficient * values.get(term.variable.id).copied().unwrap_or(0.0)
        })
    }

    /// Coefficients summed per variable, in order of first appearance.
    ///
    /// Backends such as microlp reject a variable appearing twice in one row.
    pub fn merged_terms(&self) -> Vec<(usize, f64)> {
        let mut merged: Vec<(usize, f64)> = Vec::with_capacity(self.terms.len());
        for term in &self.terms {
            match merged.iter_mut().find(|(id, _)| *id == term.variable.id) {
                Some((_, coefficient)) => *coefficient += term.coefficient,
                None => merged.push((term.variable.id, term.coefficient)),
            }
        }
        merged
    }

    /// Dense coefficient vector of length `num_variables`
    pub(crate) fn dense_coefficients(&self, num_variables: usize) -> Vec<f64> {
        let mut dense = vec![0.0; num_variables];
        for (id, coefficient) in self.merged_terms() {
            if let Some(slot) = dense.get_mut(id) {
                *slot += coefficient;
            }
        }
        dense
    }
}

impl<Brand> From<VariableId<Brand>> for LinearExpression<Brand> {
    fn from(variable: VariableId<Brand>) -> Self {
        Self::from_variable(variable)
    }
}

/// Unique identifier for a variable in the LP model
///
/// The `Brand` type parameter ensures that variables can only be used with the
/// builder that created them.
pub struct VariableId<Brand> {
    id: usize,
    _brand: PhantomData<fn() -> Brand>,
}

impl<Brand> VariableId<Brand> {
    /// Position of the variable in the order it was added
    pub fn index(&self) -> usize {
        self.id
    }
}

// Manual trait implementations that don't require Brand to implement anything
impl<Brand> fmt::Debug for VariableId<Brand> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VariableId").field("id", &self.id).finish()
    }
}

impl<Brand> Clone for VariableId<Brand> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<Brand> Copy for VariableId<Brand> {}

impl<Brand> PartialEq for VariableId<Brand> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<Brand> Eq for VariableId<Brand> {}

impl<Brand> std::hash::Hash for VariableId<Brand> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Unique identifier for a constraint in the LP model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConstraintId(usize);

impl ConstraintId {
    /// Position of the constraint in the order it was added
    pub fn index(&self) -> usize {
        self.0
    }
}

/// A linear constraint `expression <sense> rhs`, optionally labelled
///
/// ```rust
/// use prodmix::constraint;
/// use prodmix::lp_model_builder;
/// use prodmix::lp_solver::{Constraint, ConstraintSense, VariableType};
///
/// let mut builder = lp_model_builder!();
/// let x = builder.add_variable(VariableType::Continuous, 0.0, 10.0);
/// let y = builder.add_variable(VariableType::Continuous, 0.0, 10.0);
///
/// let c1 = constraint!((x + y) <= 10.0);
/// let c2 = Constraint::le(x + y, 10.0).with_label("Plant 1");
/// let c3 = Constraint::new(x + y, ConstraintSense::Equal, 10.0);
/// assert_eq!(c2.label(), Some("Plant 1"));
/// # let _ = (c1, c3);
/// ```
#[derive(Debug, Clone)]
pub struct Constraint<Brand> {
    expression: LinearExpression<Brand>,
    sense: ConstraintSense,
    rhs: f64,
    label: Option<String>,
}

impl<Brand> Constraint<Brand> {
    /// Create a new constraint
    pub fn new(
        expression: impl Into<LinearExpression<Brand>>,
        sense: ConstraintSense,
        rhs: f64,
    ) -> Self {
        Self {
            expression: expression.into(),
            sense,
            rhs,
            label: None,
        }
    }

    /// Create an equality constraint: expression == rhs
    pub fn eq(expression: impl Into<LinearExpression<Brand>>, rhs: f64) -> Self {
        Self::new(expression, ConstraintSense::Equal, rhs)
    }

    /// Create a less-than-or-equal constraint: expression <= rhs
    pub fn le(expression: impl Into<LinearExpression<Brand>>, rhs: f64) -> Self {
        Self::new(expression, ConstraintSense::LessEqual, rhs)
    }

    /// Create a greater-than-or-equal constraint: expression >= rhs
    pub fn ge(expression: impl Into<LinearExpression<Brand>>, rhs: f64) -> Self {
        Self::new(expression, ConstraintSense::GreaterEqual, rhs)
    }

    /// Create a strictly-greater-than constraint: expression > rhs
    pub fn gt(expression: impl Into<LinearExpression<Brand>>, rhs: f64) -> Self {
        Self::new(expression, ConstraintSense::Greater, rhs)
    }

    /// Attach a label used in logs and reports
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn expression(&self) -> &LinearExpression<Brand> {
        &self.expression
    }

    pub fn sense(&self) -> ConstraintSense {
        self.sense
    }

    pub fn rhs(&self) -> f64 {
        self.rhs
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Right-hand side with the expression constant moved across
    pub(crate) fn adjusted_rhs(&self) -> f64 {
        self.rhs - self.expression.constant
    }
}

/// Variable information stored in the model
#[derive(Debug, Clone)]
struct VariableInfo {
    var_type: VariableType,
    lower_bound: f64,
    upper_bound: f64,
}

/// Objective function information
#[derive(Debug, Clone)]
struct ObjectiveInfo<Brand> {
    expression: LinearExpression<Brand>,
    sense: OptimisationSense,
}

/// Result of solving an LP model
///
/// When `status` is anything but `Optimal`, `objective_value` and every variable
/// value are zero.
#[derive(Debug, Clone)]
pub struct LPSolution<Brand> {
    pub status: OptimisationStatus,
    pub objective_value: f64,
    variable_values: Vec<f64>,
    _brand: PhantomData<fn() -> Brand>,
}

impl<Brand> LPSolution<Brand> {
    /// Get the value of a variable from the solution
    pub fn get_value(&self, var_id: VariableId<Brand>) -> Option<f64> {
        self.variable_values.get(var_id.id).copied()
    }

    pub(crate) fn optimal(objective_value: f64, variable_values: Vec<f64>) -> Self {
        Self {
            status: OptimisationStatus::Optimal,
            objective_value,
            variable_values,
            _brand: PhantomData,
        }
    }

    /// A non-optimal outcome: all values suppressed to zero
    pub(crate) fn without_solution(status: OptimisationStatus, num_variables: usize) -> Self {
        Self {
            status,
            objective_value: 0.0,
            variable_values: vec![0.0; num_variables],
            _brand: PhantomData,
        }
    }
}

/// Builder for LP models that can work with different backends
///
/// ```rust
/// use prodmix::lp_model_builder;
/// use prodmix::lp_solver::{LPModelBuilder, VariableType};
///
/// struct MyModel;
/// let mut builder1 = LPModelBuilder::<MyModel>::new();
/// let _x = builder1.add_variable(VariableType::Continuous, 0.0, 10.0);
///
/// let mut builder2 = lp_model_builder!();
/// let _y = builder2.add_variable(VariableType::Continuous, 0.0, 10.0);
/// ```
pub struct LPModelBuilder<Brand> {
    variables: Vec<VariableInfo>,
    constraints: Vec<Constraint<Brand>>,
    objective: Option<ObjectiveInfo<Brand>>,
    _brand: PhantomData<fn() -> Brand>,
}

impl<Brand> LPModelBuilder<Brand> {
    /// Create a new LP model builder
    pub fn new() -> Self {
        Self {
            variables: Vec::new(),
            constraints: Vec::new(),
            objective: None,
            _brand: PhantomData,
        }
    }

    /// Add a variable to the model
    pub fn add_variable(
        &mut self,
        var_type: VariableType,
        lower_bound: f64,
        upper_bound: f64,
    ) -> VariableId<Brand> {
        let var_id = VariableId {
            id: self.variables.len(),
            _brand: PhantomData,
        };
        self.variables.push(VariableInfo {
            var_type,
            lower_bound,
            upper_bound,
        });
        var_id
    }

    /// Add a constraint to the model
    pub fn add_constraint(&mut self, constraint: Constraint<Brand>) -> ConstraintId {
        let constr_id = ConstraintId(self.constraints.len());
        self.constraints.push(constraint);
        constr_id
    }

    /// Set the objective function
    pub fn set_objective(&mut self, expression: LinearExpression<Brand>, sense: OptimisationSense) {
        self.objective = Some(ObjectiveInfo { expression, sense });
    }

    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    /// Look up a constraint previously added to this builder
    pub fn constraint(&self, id: ConstraintId) -> Option<&Constraint<Brand>> {
        self.constraints.get(id.0)
    }

    /// Iterate over the constraints in insertion order
    pub fn constraints(&self) -> impl Iterator<Item = &Constraint<Brand>> {
        self.constraints.iter()
    }

    /// Objective value for the given variable values, 0 without an objective
    pub(crate) fn objective_at(&self, values: &[f64]) -> f64 {
        self.objective
            .as_ref()
            .map_or(0.0, |obj| obj.expression.evaluate(values))
    }

    /// Solve the model with the backend named by `PRODMIX_LP_SOLVER`, or the default one
    pub fn solve(&self) -> Result<LPSolution<Brand>> {
        let solver = SolverBackend::from_env_or_default()?;
        self.solve_with(solver)
    }

    /// Whether every coefficient and right-hand side is finite and no bound is NaN.
    /// Infinite bounds are fine, they mean "unbounded on that side".
    fn numbers_are_finite(&self) -> bool {
        let finite = |expr: &LinearExpression<Brand>| {
            expr.constant.is_finite() && expr.terms.iter().all(|t| t.coefficient.is_finite())
        };

        self.variables
            .iter()
            .all(|v| !v.lower_bound.is_nan() && !v.upper_bound.is_nan())
            && self
                .constraints
                .iter()
                .all(|c| c.rhs.is_finite() && finite(&c.expression))
            && self
                .objective
                .as_ref()
                .is_none_or(|obj| finite(&obj.expression))
    }

    /// Solve the model using the specified solver
    ///
    /// A model containing NaN or infinite numbers is not handed to any backend and
    /// comes back as [`OptimisationStatus::Undefined`].
    pub fn solve_with(&self, solver: SolverBackend) -> Result<LPSolution<Brand>> {
        if !solver.is_available() {
            return Err(backend_not_compiled(solver));
        }

        debug!(
            backend = %solver,
            variables = self.variables.len(),
            constraints = self.constraints.len(),
            "Solving LP model"
        );

        if !self.numbers_are_finite() {
            warn!(backend = %solver, "LP model has non-finite numbers, not solving");
            return Ok(LPSolution::without_solution(
                OptimisationStatus::Undefined,
                self.variables.len(),
            ));
        }

        let solution = match solver {
            SolverBackend::Vertex => vertex::solve_vertex(self),

            SolverBackend::Microlp => {
                #[cfg(feature = "microlp")]
                return log_outcome(solver, crate::lp_solver::microlp::solve_microlp(self));
                #[cfg(not(feature = "microlp"))]
                return Err(backend_not_compiled(solver));
            }

            SolverBackend::CoinCbc => {
                #[cfg(feature = "coin_cbc")]
                return log_outcome(solver, crate::lp_solver::coin_cbc::solve_coin_cbc(self));
                #[cfg(not(feature = "coin_cbc"))]
                return Err(backend_not_compiled(solver));
            }
        };

        log_outcome(solver, solution)
    }
}

impl<Brand> Default for LPModelBuilder<Brand> {
    fn default() -> Self {
        Self::new()
    }
}

fn log_outcome<Brand>(
    solver: SolverBackend,
    solution: Result<LPSolution<Brand>>,
) -> Result<LPSolution<Brand>> {
    if let Ok(solution) = &solution {
        debug!(
            backend = %solver,
            status = %solution.status,
            objective = solution.objective_value,
            "LP model solved"
        );
    }
    solution
}

fn backend_not_compiled(solver: SolverBackend) -> anyhow::Error {
    anyhow!(
        "{} solver requested but the '{}' feature is not enabled",
        solver,
        solver
    )
}

// Macros for convenient syntax
pub mod macros;

// Operator overloading for linear expressions
pub mod ops;

pub mod vertex;

#[cfg(feature = "microlp")]
pub mod microlp;

#[cfg(feature = "coin_cbc")]
pub mod coin_cbc;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{constraint, lp_model_builder};

    #[test]
    fn test_constraint_macro_senses() {
        let mut builder = lp_model_builder!();
        let x = builder.add_variable(VariableType::Continuous, 0.0, 10.0);
        let y = builder.add_variable(VariableType::Continuous, 0.0, 10.0);

        let c = constraint!((x + y) == 10.0);
        assert_eq!(c.sense, ConstraintSense::Equal);
        assert_eq!(c.rhs, 10.0);
        assert_eq!(c.label(), None);

        let c = constraint!((2.0 * x) <= 5.0);
        assert_eq!(c.sense, ConstraintSense::LessEqual);

        let c = constraint!((x - y) >= 0.0);
        assert_eq!(c.sense, ConstraintSense::GreaterEqual);

        let c = constraint!((x) > 1.0);
        assert_eq!(c.sense, ConstraintSense::Greater);

        let c = constraint!("Plant 2", (2.0 * y) <= 12);
        assert_eq!(c.label(), Some("Plant 2"));
        assert_eq!(c.rhs, 12.0);
    }

    #[test]
    fn test_constraint_ids_follow_insertion_order() {
        let mut builder = lp_model_builder!();
        let x = builder.add_variable(VariableType::Continuous, 0.0, f64::INFINITY);

        let first = builder.add_constraint(constraint!("first", (x) <= 4.0));
        let second = builder.add_constraint(constraint!("second", (2.0 * x) <= 12.0));

        assert_eq!(first.index(), 0);
        assert_eq!(second.index(), 1);
        assert_eq!(builder.num_constraints(), 2);
        assert_eq!(builder.constraint(second).and_then(|c| c.label()), Some("second"));
        let labels: Vec<_> = builder.constraints().filter_map(|c| c.label()).collect();
        assert_eq!(labels, ["first", "second"]);
    }

    #[test]
    fn test_merged_terms_sum_repeated_variables() {
        let mut builder = lp_model_builder!();
        let x = builder.add_variable(VariableType::Continuous, 0.0, 10.0);
        let y = builder.add_variable(VariableType::Continuous, 0.0, 10.0);

        let expr = 2.0 * x + y + 3.0 * x - y;
        assert_eq!(expr.terms.len(), 4);
        assert_eq!(expr.merged_terms(), vec![(0, 5.0), (1, 0.0)]);
        assert_eq!(expr.dense_coefficients(2), vec![5.0, 0.0]);
    }

    #[test]
    fn test_evaluate_expression() {
        let mut builder = lp_model_builder!();
        let x = builder.add_variable(VariableType::Continuous, 0.0, 10.0);
        let y = builder.add_variable(VariableType::Continuous, 0.0, 10.0);

        let profit = 300.0 * x + 500.0 * y;
        assert_eq!(profit.evaluate(&[2.0, 6.0]), 3600.0);
        assert_eq!((x + 1.0).evaluate(&[]), 1.0);
    }

    #[test]
    fn test_backend_names() {
        assert_eq!(SolverBackend::from_name("vertex").unwrap(), SolverBackend::Vertex);
        assert_eq!(SolverBackend::from_name("MicroLP").unwrap(), SolverBackend::Microlp);
        assert_eq!(SolverBackend::from_name("cbc").unwrap(), SolverBackend::CoinCbc);
        assert_eq!(SolverBackend::from_name(" coin-cbc ").unwrap(), SolverBackend::CoinCbc);
        assert!(SolverBackend::from_name("glpk").is_err());
        assert!(SolverBackend::fallback().is_available());
        assert!(SolverBackend::Vertex.is_available());
    }

    #[test]
    fn test_status_display() {
        assert_eq!(OptimisationStatus::Optimal.to_string(), "Optimal");
        assert_eq!(OptimisationStatus::Infeasible.to_string(), "Infeasible");
        assert_eq!(OptimisationStatus::Unbounded.to_string(), "Unbounded");
        assert_eq!(OptimisationStatus::Undefined.to_string(), "Undefined");
    }

    #[test]
    fn test_non_finite_model_is_undefined_on_every_backend() {
        let backends = [
            SolverBackend::Vertex,
            SolverBackend::Microlp,
            SolverBackend::CoinCbc,
        ];

        for backend in backends.into_iter().filter(|b| b.is_available()) {
            for (coefficient, rhs, profit) in [
                (f64::NAN, 18.0, 300.0),
                (3.0, f64::INFINITY, 300.0),
                (3.0, 18.0, f64::NAN),
                (3.0, 18.0, f64::INFINITY),
            ] {
                let mut builder = lp_model_builder!();
                let x = builder.add_variable(VariableType::Continuous, 0.0, f64::INFINITY);
                let y = builder.add_variable(VariableType::Continuous, 0.0, f64::INFINITY);
                builder.add_constraint(constraint!((coefficient * x + 2.0 * y) <= rhs));
                builder.add_constraint(constraint!((x) <= 4.0));
                builder.add_constraint(constraint!((y) <= 6.0));
                builder.set_objective(profit * x + 500.0 * y, OptimisationSense::Maximise);

                let solution = builder.solve_with(backend).unwrap();
                assert_eq!(solution.status, OptimisationStatus::Undefined, "{backend}");
                assert_eq!(solution.objective_value, 0.0);
                assert_eq!(solution.get_value(x), Some(0.0));
            }
        }
    }

    #[test]
    fn test_infinite_bounds_are_not_rejected() {
        let mut builder = lp_model_builder!();
        let x = builder.add_variable(VariableType::Continuous, f64::NEG_INFINITY, f64::INFINITY);
        builder.add_constraint(constraint!((x) <= 4.0));
        builder.set_objective(x.into(), OptimisationSense::Maximise);
        assert!(builder.numbers_are_finite());

        let mut nan_bound = lp_model_builder!();
        let x = nan_bound.add_variable(VariableType::Continuous, 0.0, f64::NAN);
        nan_bound.set_objective(x.into(), OptimisationSense::Maximise);
        assert!(!nan_bound.numbers_are_finite());
    }

    #[test]
    fn test_unavailable_backend_is_an_error() {
        let mut builder = lp_model_builder!();
        let x = builder.add_variable(VariableType::Continuous, 0.0, f64::INFINITY);
        builder.add_constraint(constraint!((x) <= 1.0));
        builder.set_objective(x.into(), OptimisationSense::Maximise);

        for backend in [SolverBackend::Microlp, SolverBackend::CoinCbc] {
            if !backend.is_available() {
                assert!(builder.solve_with(backend).is_err());
            }
        }
    }
}
