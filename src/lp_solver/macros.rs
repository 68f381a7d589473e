//! Macros for the LP modelling layer
//!
//! `lp_model_builder!` gives each model its own brand type and `constraint!`
//! writes constraints with comparison syntax.

/// Create a new LP model builder with a unique brand
///
/// ```rust
/// use prodmix::lp_model_builder;
/// use prodmix::lp_solver::VariableType;
///
/// // Anonymous brand (each call creates unique anonymous type)
/// let mut builder = lp_model_builder!();
/// let _x = builder.add_variable(VariableType::Continuous, 0.0, 10.0);
///
/// // Named brand (easier to identify in type errors)
/// let mut mix = lp_model_builder!(ProductMixModel);
/// let _doors = mix.add_variable(VariableType::Continuous, 0.0, f64::INFINITY);
/// ```
#[macro_export]
macro_rules! lp_model_builder {
    ($brand_name:ident) => {{
        struct $brand_name;
        $crate::lp_solver::LPModelBuilder::<$brand_name>::new()
    }};

    // `UniqueBrand` lives in the block scope, so every expansion gets a distinct type
    () => {{
        struct UniqueBrand;
        $crate::lp_solver::LPModelBuilder::<UniqueBrand>::new()
    }};
}

/// Create constraints using natural comparison syntax
///
/// The left-hand side must be in parentheses. A leading label, separated by a
/// comma, names the constraint for reports.
///
/// ```rust
/// use prodmix::constraint;
/// use prodmix::lp_model_builder;
/// use prodmix::lp_solver::VariableType;
///
/// let mut builder = lp_model_builder!();
/// let doors = builder.add_variable(VariableType::Continuous, 0.0, f64::INFINITY);
/// let windows = builder.add_variable(VariableType::Continuous, 0.0, f64::INFINITY);
///
/// builder.add_constraint(constraint!("Plant 3", (3.0 * doors + 2.0 * windows) <= 18.0));
/// builder.add_constraint(constraint!((doors - windows) >= 0));
/// builder.add_constraint(constraint!((doors) == 2.0));
/// builder.add_constraint(constraint!((windows) > 1.0));
/// ```
#[macro_export]
macro_rules! constraint {
    (($lhs:expr) == $rhs:expr) => {
        $crate::lp_solver::Constraint::new(
            $lhs,
            $crate::lp_solver::ConstraintSense::Equal,
            $rhs as f64,
        )
    };
    (($lhs:expr) <= $rhs:expr) => {
        $crate::lp_solver::Constraint::new(
            $lhs,
            $crate::lp_solver::ConstraintSense::LessEqual,
            $rhs as f64,
        )
    };
    (($lhs:expr) >= $rhs:expr) => {
        $crate::lp_solver::Constraint::new(
            $lhs,
            $crate::lp_solver::ConstraintSense::GreaterEqual,
            $rhs as f64,
        )
    };
    (($lhs:expr) > $rhs:expr) => {
        $crate::lp_solver::Constraint::new(
            $lhs,
            $crate::lp_solver::ConstraintSense::Greater,
            $rhs as f64,
        )
    };
    ($label:expr, ($lhs:expr) $($comparison:tt)+) => {
        $crate::constraint!(($lhs) $($comparison)+).with_label($label)
    };
}
