use ::microlp::{ComparisonOp, Error, OptimizationDirection, Problem, Variable};
use anyhow::Result;

use crate::lp_solver::*;

/// Solve an LP model using microlp
pub fn solve_microlp<Brand>(builder: &LPModelBuilder<Brand>) -> Result<LPSolution<Brand>> {
    let num_vars = builder.variables.len();

    let (objective, direction) = match &builder.objective {
        Some(obj) => (
            obj.expression.dense_coefficients(num_vars),
            match obj.sense {
                OptimisationSense::Minimise => OptimizationDirection::Minimize,
                OptimisationSense::Maximise => OptimizationDirection::Maximize,
            },
        ),
        None => (vec![0.0; num_vars], OptimizationDirection::Maximize),
    };

    let mut problem = Problem::new(direction);

    let vars: Vec<Variable> = builder
        .variables
        .iter()
        .zip(&objective)
        .map(|(var_info, &weight)| match var_info.var_type {
            VariableType::Continuous => {
                problem.add_var(weight, (var_info.lower_bound, var_info.upper_bound))
            }
            VariableType::Integer => problem.add_integer_var(
                weight,
                (
                    var_info.lower_bound.ceil() as i32,
                    var_info.upper_bound.floor() as i32,
                ),
            ),
            VariableType::Binary => problem.add_binary_var(weight),
        })
        .collect();

    for constraint in &builder.constraints {
        let terms: Vec<(Variable, f64)> = constraint
            .expression
            .merged_terms()
            .into_iter()
            .filter(|&(_, coefficient)| coefficient != 0.0)
            .map(|(id, coefficient)| (vars[id], coefficient))
            .collect();
        let rhs = constraint.adjusted_rhs();

        // A row without variables is just a statement about constants
        if terms.is_empty() {
            if constraint.sense.holds(0.0, rhs, 0.0) {
                continue;
            }
            return Ok(LPSolution::without_solution(
                OptimisationStatus::Infeasible,
                num_vars,
            ));
        }

        let op = match constraint.sense {
            ConstraintSense::LessEqual => ComparisonOp::Le,
            ConstraintSense::Equal => ComparisonOp::Eq,
            // microlp has no strict inequalities either
            ConstraintSense::GreaterEqual | ConstraintSense::Greater => ComparisonOp::Ge,
        };
        problem.add_constraint(terms, op, rhs);
    }

    let solution = match problem.solve() {
        Ok(solution) => solution,
        Err(Error::Infeasible) => {
            return Ok(LPSolution::without_solution(
                OptimisationStatus::Infeasible,
                num_vars,
            ));
        }
        Err(Error::Unbounded) => {
            return Ok(LPSolution::without_solution(
                OptimisationStatus::Unbounded,
                num_vars,
            ));
        }
        Err(e) => {
            tracing::warn!(error = %e, "microlp stopped without a definitive status");
            return Ok(LPSolution::without_solution(
                OptimisationStatus::Undefined,
                num_vars,
            ));
        }
    };

    let variable_values: Vec<f64> = vars.iter().map(|&var| solution[var]).collect();
    let objective_value = builder.objective_at(&variable_values);

    Ok(LPSolution::optimal(objective_value, variable_values))
}
