//! Built-in solver for models with at most two continuous variables.
//!
//! An optimum of a linear program, when finite, sits on a corner of the feasible
//! region. In two dimensions every corner is the intersection of two constraint
//! lines (variable bounds included), so the backend enumerates all pairwise
//! intersections, keeps the feasible ones and picks the best. Before picking, the
//! recession cone is searched for a ray that improves the objective forever, which
//! makes the model unbounded.
//!
//! Models with one variable (or none) are padded with variables fixed at zero.

use std::cmp::Reverse;

use anyhow::{Result, bail};
use itertools::Itertools;
use ordered_float::OrderedFloat;
use tracing::trace;

use crate::lp_solver::*;

const DIMENSIONS: usize = 2;

/// Relative tolerance for constraint satisfaction at a candidate point.
const FEASIBILITY_TOLERANCE: f64 = 1e-9;

/// Relative determinant below which two lines are treated as parallel.
const PARALLEL_TOLERANCE: f64 = 1e-12;

type Point = [f64; DIMENSIONS];

/// One half-plane (or line, for equalities): `normal · p <sense> rhs`.
#[derive(Debug, Clone, Copy)]
struct Row {
    normal: Point,
    sense: ConstraintSense,
    rhs: f64,
}

impl Row {
    fn is_degenerate(&self) -> bool {
        self.normal.iter().all(|&a| a == 0.0)
    }

    fn activity(&self, p: &Point) -> f64 {
        dot(&self.normal, p)
    }

    fn satisfied_by(&self, p: &Point) -> bool {
        let scale = 1.0
            + self.rhs.abs()
            + self
                .normal
                .iter()
                .zip(p)
                .map(|(a, x)| (a * x).abs())
                .sum::<f64>();
        self.sense
            .holds(self.activity(p), self.rhs, FEASIBILITY_TOLERANCE * scale)
    }

    /// Whether moving along `direction` forever keeps this row satisfied.
    fn admits_ray(&self, direction: &Point) -> bool {
        let tolerance = FEASIBILITY_TOLERANCE * norm(&self.normal);
        self.sense.holds(self.activity(direction), 0.0, tolerance)
    }

    /// Unit vector along the boundary line.
    fn direction(&self) -> Point {
        let length = norm(&self.normal);
        [-self.normal[1] / length, self.normal[0] / length]
    }

    /// Point of the boundary line closest to the origin.
    fn foot(&self) -> Point {
        let squared = dot(&self.normal, &self.normal);
        [
            self.normal[0] * self.rhs / squared,
            self.normal[1] * self.rhs / squared,
        ]
    }

    fn intersect(&self, other: &Row) -> Option<Point> {
        let [a, b] = self.normal;
        let [c, d] = other.normal;
        let det = a * d - b * c;
        if det.abs() <= PARALLEL_TOLERANCE * norm(&self.normal) * norm(&other.normal) {
            return None;
        }
        Some([
            (self.rhs * d - b * other.rhs) / det,
            (a * other.rhs - self.rhs * c) / det,
        ])
    }
}

fn dot(a: &Point, b: &Point) -> f64 {
    a[0] * b[0] + a[1] * b[1]
}

fn norm(a: &Point) -> f64 {
    dot(a, a).sqrt()
}

/// Flush solver noise around zero, including negative zero.
fn clean(value: f64) -> f64 {
    if value.abs() < 1e-12 { 0.0 } else { value }
}

/// Solve an LP model by vertex enumeration
pub fn solve_vertex<Brand>(builder: &LPModelBuilder<Brand>) -> Result<LPSolution<Brand>> {
    let num_vars = builder.variables.len();
    if num_vars > DIMENSIONS {
        bail!(
            "vertex solver handles at most {} variables, model has {}",
            DIMENSIONS,
            num_vars
        );
    }
    if let Some(var) = builder
        .variables
        .iter()
        .find(|v| v.var_type != VariableType::Continuous)
    {
        bail!(
            "vertex solver only handles continuous variables, found {:?}",
            var.var_type
        );
    }

    let (objective, sense) = match &builder.objective {
        Some(obj) => (obj.expression.dense_coefficients(DIMENSIONS), obj.sense),
        None => (vec![0.0; DIMENSIONS], OptimisationSense::Maximise),
    };
    let objective: Point = [objective[0], objective[1]];
    // Maximising `direction · p` covers both senses
    let direction = match sense {
        OptimisationSense::Maximise => objective,
        OptimisationSense::Minimise => [-objective[0], -objective[1]],
    };

    let mut rows = Vec::with_capacity(builder.constraints.len() + 2 * DIMENSIONS);
    for constraint in &builder.constraints {
        let dense = constraint.expression.dense_coefficients(DIMENSIONS);
        rows.push(Row {
            normal: [dense[0], dense[1]],
            sense: constraint.sense,
            rhs: constraint.adjusted_rhs(),
        });
    }
    for axis in 0..DIMENSIONS {
        let mut normal = [0.0; DIMENSIONS];
        normal[axis] = 1.0;
        let (lower, upper) = builder
            .variables
            .get(axis)
            .map_or((0.0, 0.0), |v| (v.lower_bound, v.upper_bound));
        if lower.is_finite() {
            rows.push(Row {
                normal,
                sense: ConstraintSense::GreaterEqual,
                rhs: lower,
            });
        }
        if upper.is_finite() {
            rows.push(Row {
                normal,
                sense: ConstraintSense::LessEqual,
                rhs: upper,
            });
        }
    }

    let numbers_are_finite = objective.iter().all(|c| c.is_finite())
        && rows
            .iter()
            .all(|row| row.rhs.is_finite() && row.normal.iter().all(|a| a.is_finite()));
    if !numbers_are_finite {
        return Ok(LPSolution::without_solution(
            OptimisationStatus::Undefined,
            num_vars,
        ));
    }

    let (degenerate, lines): (Vec<Row>, Vec<Row>) =
        rows.into_iter().partition(Row::is_degenerate);

    let origin = [0.0; DIMENSIONS];
    if degenerate.iter().any(|row| !row.satisfied_by(&origin)) {
        return Ok(LPSolution::without_solution(
            OptimisationStatus::Infeasible,
            num_vars,
        ));
    }

    // Pairwise intersections hold every corner. Feet of the lines and the origin
    // cover regions without corners (strips and half-planes).
    let candidates = lines
        .iter()
        .tuple_combinations()
        .filter_map(|(a, b)| a.intersect(b))
        .chain(lines.iter().map(Row::foot))
        .chain(std::iter::once(origin));

    let best = candidates
        .filter(|p| lines.iter().all(|row| row.satisfied_by(p)))
        .min_by_key(|p| Reverse(OrderedFloat(dot(&direction, p))));

    let Some(best) = best else {
        return Ok(LPSolution::without_solution(
            OptimisationStatus::Infeasible,
            num_vars,
        ));
    };

    let axes = [[1.0, 0.0], [-1.0, 0.0], [0.0, 1.0], [0.0, -1.0]];
    let improvement_tolerance = FEASIBILITY_TOLERANCE * norm(&direction);
    let improving_ray = lines
        .iter()
        .flat_map(|row| {
            let [dx, dy] = row.direction();
            [[dx, dy], [-dx, -dy]]
        })
        .chain(axes)
        .find(|ray| {
            dot(&direction, ray) > improvement_tolerance
                && lines.iter().all(|row| row.admits_ray(ray))
        });

    if let Some(ray) = improving_ray {
        trace!(?ray, "Objective improves along a feasible ray");
        return Ok(LPSolution::without_solution(
            OptimisationStatus::Unbounded,
            num_vars,
        ));
    }

    let variable_values: Vec<f64> = best.iter().take(num_vars).map(|&v| clean(v)).collect();
    let objective_value = clean(builder.objective_at(&variable_values));
    trace!(?variable_values, objective_value, "Best vertex");

    Ok(LPSolution::optimal(objective_value, variable_values))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{constraint, lp_model_builder};

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_textbook_product_mix() {
        let mut builder = lp_model_builder!();
        let x = builder.add_variable(VariableType::Continuous, 0.0, f64::INFINITY);
        let y = builder.add_variable(VariableType::Continuous, 0.0, f64::INFINITY);
        builder.add_constraint(constraint!((x) <= 4.0));
        builder.add_constraint(constraint!((2.0 * y) <= 12.0));
        builder.add_constraint(constraint!((3.0 * x + 2.0 * y) <= 18.0));
        builder.set_objective(300.0 * x + 500.0 * y, OptimisationSense::Maximise);

        let solution = solve_vertex(&builder).unwrap();
        assert_eq!(solution.status, OptimisationStatus::Optimal);
        assert_close(solution.get_value(x).unwrap(), 2.0);
        assert_close(solution.get_value(y).unwrap(), 6.0);
        assert_close(solution.objective_value, 3600.0);
    }

    #[test]
    fn test_minimise_with_greater_equal_rows() {
        let mut builder = lp_model_builder!();
        let x = builder.add_variable(VariableType::Continuous, 0.0, f64::INFINITY);
        let y = builder.add_variable(VariableType::Continuous, 0.0, f64::INFINITY);
        builder.add_constraint(constraint!((x + y) >= 4.0));
        builder.add_constraint(constraint!((x + 3.0 * y) >= 6.0));
        builder.set_objective(2.0 * x + 3.0 * y, OptimisationSense::Minimise);

        let solution = solve_vertex(&builder).unwrap();
        assert_eq!(solution.status, OptimisationStatus::Optimal);
        assert_close(solution.get_value(x).unwrap(), 3.0);
        assert_close(solution.get_value(y).unwrap(), 1.0);
        assert_close(solution.objective_value, 9.0);
    }

    #[test]
    fn test_equality_and_constant_terms() {
        let mut builder = lp_model_builder!();
        let x = builder.add_variable(VariableType::Continuous, 0.0, f64::INFINITY);
        let y = builder.add_variable(VariableType::Continuous, 0.0, f64::INFINITY);
        // x + y + 1 == 6  ->  x + y == 5
        builder.add_constraint(constraint!((x + y + 1.0) == 6.0));
        builder.add_constraint(constraint!((x) <= 3.0));
        builder.set_objective(x + 2.0 * y + 10.0, OptimisationSense::Minimise);

        let solution = solve_vertex(&builder).unwrap();
        assert_eq!(solution.status, OptimisationStatus::Optimal);
        assert_close(solution.get_value(x).unwrap(), 3.0);
        assert_close(solution.get_value(y).unwrap(), 2.0);
        assert_close(solution.objective_value, 17.0);
    }

    #[test]
    fn test_negative_capacity_is_infeasible() {
        let mut builder = lp_model_builder!();
        let x = builder.add_variable(VariableType::Continuous, 0.0, f64::INFINITY);
        let y = builder.add_variable(VariableType::Continuous, 0.0, f64::INFINITY);
        builder.add_constraint(constraint!((x + y) <= -1.0));
        builder.set_objective(x + y, OptimisationSense::Maximise);

        let solution = solve_vertex(&builder).unwrap();
        assert_eq!(solution.status, OptimisationStatus::Infeasible);
        assert_eq!(solution.objective_value, 0.0);
        assert_eq!(solution.get_value(x), Some(0.0));
    }

    #[test]
    fn test_empty_row_with_negative_rhs_is_infeasible() {
        let mut builder = lp_model_builder!();
        let x = builder.add_variable(VariableType::Continuous, 0.0, f64::INFINITY);
        builder.add_constraint(constraint!((0.0 * x) <= -2.0));
        builder.add_constraint(constraint!((x) <= 1.0));
        builder.set_objective(x.into(), OptimisationSense::Maximise);

        let solution = solve_vertex(&builder).unwrap();
        assert_eq!(solution.status, OptimisationStatus::Infeasible);
    }

    #[test]
    fn test_unconstrained_product_is_unbounded() {
        let mut builder = lp_model_builder!();
        let x = builder.add_variable(VariableType::Continuous, 0.0, f64::INFINITY);
        let y = builder.add_variable(VariableType::Continuous, 0.0, f64::INFINITY);
        builder.add_constraint(constraint!((x + 0.0 * y) <= 4.0));
        builder.set_objective(x + y, OptimisationSense::Maximise);

        let solution = solve_vertex(&builder).unwrap();
        assert_eq!(solution.status, OptimisationStatus::Unbounded);
        assert_eq!(solution.get_value(y), Some(0.0));
    }

    #[test]
    fn test_unbounded_region_with_bounded_objective() {
        let mut builder = lp_model_builder!();
        let x = builder.add_variable(VariableType::Continuous, 0.0, f64::INFINITY);
        let y = builder.add_variable(VariableType::Continuous, 0.0, f64::INFINITY);
        builder.add_constraint(constraint!((x) <= 4.0));
        // y is free to grow, but it costs profit
        builder.set_objective(x - y, OptimisationSense::Maximise);

        let solution = solve_vertex(&builder).unwrap();
        assert_eq!(solution.status, OptimisationStatus::Optimal);
        assert_close(solution.get_value(x).unwrap(), 4.0);
        assert_close(solution.get_value(y).unwrap(), 0.0);
    }

    #[test]
    fn test_single_variable_model() {
        let mut builder = lp_model_builder!();
        let x = builder.add_variable(VariableType::Continuous, 1.0, 8.0);
        builder.add_constraint(constraint!((2.0 * x) <= 10.0));
        builder.set_objective(x.into(), OptimisationSense::Maximise);

        let solution = solve_vertex(&builder).unwrap();
        assert_eq!(solution.status, OptimisationStatus::Optimal);
        assert_close(solution.get_value(x).unwrap(), 5.0);
    }

    #[test]
    fn test_free_variables_in_a_strip() {
        let mut builder = lp_model_builder!();
        let x = builder.add_variable(VariableType::Continuous, f64::NEG_INFINITY, f64::INFINITY);
        let y = builder.add_variable(VariableType::Continuous, f64::NEG_INFINITY, f64::INFINITY);
        builder.add_constraint(constraint!((x + y) <= 3.0));
        builder.add_constraint(constraint!((x + y) >= 1.0));
        builder.set_objective(x + y, OptimisationSense::Maximise);

        let solution = solve_vertex(&builder).unwrap();
        assert_eq!(solution.status, OptimisationStatus::Optimal);
        assert_close(solution.objective_value, 3.0);
    }

    #[test]
    fn test_non_finite_coefficient_is_undefined() {
        let mut builder = lp_model_builder!();
        let x = builder.add_variable(VariableType::Continuous, 0.0, f64::INFINITY);
        builder.add_constraint(constraint!((f64::NAN * x) <= 4.0));
        builder.set_objective(x.into(), OptimisationSense::Maximise);

        let solution = solve_vertex(&builder).unwrap();
        assert_eq!(solution.status, OptimisationStatus::Undefined);
    }

    #[test]
    fn test_rejects_three_variables() {
        let mut builder = lp_model_builder!();
        for _ in 0..3 {
            builder.add_variable(VariableType::Continuous, 0.0, 1.0);
        }
        assert!(solve_vertex(&builder).is_err());
    }

    #[test]
    fn test_rejects_integer_variables() {
        let mut builder = lp_model_builder!();
        builder.add_variable(VariableType::Integer, 0.0, 10.0);
        assert!(solve_vertex(&builder).is_err());
    }
}
