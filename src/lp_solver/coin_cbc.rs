use ::coin_cbc::{Col, Model, Sense};
use anyhow::Result;

use crate::lp_solver::*;

/// Round a floating-point number to a specified number of significant digits
/// This is an workaround to mask floating point errors in CBC.
fn round_to_sig_digits(value: f64, digits: u32) -> f64 {
    if value == 0.0 {
        return 0.0;
    }

    let magnitude = value.abs().log10().floor() as i32;
    let scale = 10_f64.powi(digits as i32 - magnitude - 1);
    (value * scale).round() / scale
}

/// Solve an LP model using Coin CBC
pub fn solve_coin_cbc<Brand>(builder: &LPModelBuilder<Brand>) -> Result<LPSolution<Brand>> {
    let num_vars = builder.variables.len();
    let mut model = Model::default();
    // CBC prints its progress on stdout, which is where reports go
    model.set_parameter("logLevel", "0");

    let cols: Vec<Col> = builder
        .variables
        .iter()
        .map(|var_info| {
            let col = match var_info.var_type {
                VariableType::Continuous => model.add_col(),
                VariableType::Integer => model.add_integer(),
                VariableType::Binary => return model.add_binary(),
            };
            model.set_col_lower(col, var_info.lower_bound);
            model.set_col_upper(col, var_info.upper_bound);
            col
        })
        .collect();

    for constraint in &builder.constraints {
        let terms: Vec<(usize, f64)> = constraint
            .expression
            .merged_terms()
            .into_iter()
            .filter(|&(_, coefficient)| coefficient != 0.0)
            .collect();
        let rhs = constraint.adjusted_rhs();

        if terms.is_empty() {
            if constraint.sense.holds(0.0, rhs, 0.0) {
                continue;
            }
            return Ok(LPSolution::without_solution(
                OptimisationStatus::Infeasible,
                num_vars,
            ));
        }

        let row = model.add_row();
        for (id, coefficient) in terms {
            model.set_weight(row, cols[id], coefficient);
        }

        match constraint.sense {
            ConstraintSense::LessEqual => model.set_row_upper(row, rhs),
            ConstraintSense::Equal => model.set_row_equal(row, rhs),
            ConstraintSense::GreaterEqual => model.set_row_lower(row, rhs),
            // Coin CBC doesn't support strict inequalities, use >= with small epsilon
            ConstraintSense::Greater => model.set_row_lower(row, rhs + 1e-10),
        }
    }

    if let Some(obj_info) = &builder.objective {
        for (id, coefficient) in obj_info.expression.merged_terms() {
            model.set_obj_coeff(cols[id], coefficient);
        }

        model.set_obj_sense(match obj_info.sense {
            OptimisationSense::Minimise => Sense::Minimize,
            OptimisationSense::Maximise => Sense::Maximize,
        });
    }

    let solution = model.solve();
    let raw = solution.raw();

    let status = if raw.is_proven_optimal() {
        OptimisationStatus::Optimal
    } else if raw.is_proven_infeasible() {
        OptimisationStatus::Infeasible
    } else if raw.is_continuous_unbounded() {
        OptimisationStatus::Unbounded
    } else {
        OptimisationStatus::Undefined
    };

    if status != OptimisationStatus::Optimal {
        return Ok(LPSolution::without_solution(status, num_vars));
    }

    let variable_values: Vec<f64> = cols
        .iter()
        .map(|&col| round_to_sig_digits(solution.col(col), 8))
        .collect();
    let objective_value = round_to_sig_digits(builder.objective_at(&variable_values), 8);

    Ok(LPSolution::optimal(objective_value, variable_values))
}
