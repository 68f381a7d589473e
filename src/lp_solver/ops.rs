//! Operator overloading for linear expressions
//!
//! Variables, expressions and `f64` constants combine with `+`, `-` and scalar `*`,
//! always producing a [`LinearExpression`] with the operands' brand:
//!
//! ```rust
//! use prodmix::lp_model_builder;
//! use prodmix::lp_solver::{LinearExpression, VariableType};
//!
//! let mut builder = lp_model_builder!();
//! let doors = builder.add_variable(VariableType::Continuous, 0.0, f64::INFINITY);
//! let windows = builder.add_variable(VariableType::Continuous, 0.0, f64::INFINITY);
//!
//! let profit = 300.0 * doors + 500.0 * windows;
//! let plant3 = doors * 3.0 + 2.0 * windows;
//! let spare = 18.0 - plant3;
//! let total: LinearExpression<_> = [doors, windows].into_iter().map(LinearExpression::from).sum();
//!
//! assert_eq!(profit.evaluate(&[2.0, 6.0]), 3600.0);
//! assert_eq!(spare.evaluate(&[2.0, 6.0]), 0.0);
//! assert_eq!(total.evaluate(&[2.0, 6.0]), 8.0);
//! ```

use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

use super::{LinearExpression, LinearTerm, VariableId};

impl<Brand> Neg for LinearExpression<Brand> {
    type Output = LinearExpression<Brand>;

    fn neg(self) -> Self::Output {
        self * -1.0
    }
}

impl<Brand> Neg for VariableId<Brand> {
    type Output = LinearExpression<Brand>;

    fn neg(self) -> Self::Output {
        LinearExpression::from_variable(self) * -1.0
    }
}

impl<Brand> AddAssign<LinearExpression<Brand>> for LinearExpression<Brand> {
    fn add_assign(&mut self, other: LinearExpression<Brand>) {
        self.terms.extend(other.terms);
        self.constant += other.constant;
    }
}

impl<Brand> SubAssign<LinearExpression<Brand>> for LinearExpression<Brand> {
    fn sub_assign(&mut self, other: LinearExpression<Brand>) {
        *self += -other;
    }
}

impl<Brand> AddAssign<f64> for LinearExpression<Brand> {
    fn add_assign(&mut self, other: f64) {
        self.constant += other;
    }
}

impl<Brand> Mul<f64> for LinearExpression<Brand> {
    type Output = LinearExpression<Brand>;

    fn mul(mut self, factor: f64) -> Self::Output {
        for term in &mut self.terms {
            term.coefficient *= factor;
        }
        self.constant *= factor;
        self
    }
}

impl<Brand> Sum for LinearExpression<Brand> {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(LinearExpression::new(0.0), |acc, expr| acc + expr)
    }
}

/// Lift both operands into `LinearExpression` and delegate to the compound-assignment
/// operators above.
macro_rules! linear_binary_ops {
    ($($lhs:ty, $rhs:ty);* $(;)?) => {$(
        impl<Brand> Add<$rhs> for $lhs {
            type Output = LinearExpression<Brand>;

            fn add(self, other: $rhs) -> Self::Output {
                let mut expr = LinearExpression::from(self);
                expr += LinearExpression::from(other);
                expr
            }
        }

        impl<Brand> Sub<$rhs> for $lhs {
            type Output = LinearExpression<Brand>;

            fn sub(self, other: $rhs) -> Self::Output {
                let mut expr = LinearExpression::from(self);
                expr -= LinearExpression::from(other);
                expr
            }
        }
    )*};
}

linear_binary_ops! {
    LinearExpression<Brand>, LinearExpression<Brand>;
    LinearExpression<Brand>, VariableId<Brand>;
    VariableId<Brand>, LinearExpression<Brand>;
    VariableId<Brand>, VariableId<Brand>;
}

impl<Brand> Add<f64> for LinearExpression<Brand> {
    type Output = LinearExpression<Brand>;

    fn add(mut self, other: f64) -> Self::Output {
        self += other;
        self
    }
}

impl<Brand> Sub<f64> for LinearExpression<Brand> {
    type Output = LinearExpression<Brand>;

    fn sub(mut self, other: f64) -> Self::Output {
        self += -other;
        self
    }
}

impl<Brand> Add<f64> for VariableId<Brand> {
    type Output = LinearExpression<Brand>;

    fn add(self, other: f64) -> Self::Output {
        LinearExpression::from_variable(self) + other
    }
}

impl<Brand> Sub<f64> for VariableId<Brand> {
    type Output = LinearExpression<Brand>;

    fn sub(self, other: f64) -> Self::Output {
        LinearExpression::from_variable(self) - other
    }
}

impl<Brand> Mul<f64> for VariableId<Brand> {
    type Output = LinearExpression<Brand>;

    fn mul(self, factor: f64) -> Self::Output {
        LinearExpression {
            terms: vec![LinearTerm {
                coefficient: factor,
                variable: self,
            }],
            constant: 0.0,
        }
    }
}

// Scalar on the left

impl<Brand> Mul<VariableId<Brand>> for f64 {
    type Output = LinearExpression<Brand>;

    fn mul(self, other: VariableId<Brand>) -> Self::Output {
        other * self
    }
}

impl<Brand> Mul<LinearExpression<Brand>> for f64 {
    type Output = LinearExpression<Brand>;

    fn mul(self, other: LinearExpression<Brand>) -> Self::Output {
        other * self
    }
}

impl<Brand> Add<VariableId<Brand>> for f64 {
    type Output = LinearExpression<Brand>;

    fn add(self, other: VariableId<Brand>) -> Self::Output {
        other + self
    }
}

impl<Brand> Add<LinearExpression<Brand>> for f64 {
    type Output = LinearExpression<Brand>;

    fn add(self, other: LinearExpression<Brand>) -> Self::Output {
        other + self
    }
}

impl<Brand> Sub<VariableId<Brand>> for f64 {
    type Output = LinearExpression<Brand>;

    fn sub(self, other: VariableId<Brand>) -> Self::Output {
        -other + self
    }
}

impl<Brand> Sub<LinearExpression<Brand>> for f64 {
    type Output = LinearExpression<Brand>;

    fn sub(self, other: LinearExpression<Brand>) -> Self::Output {
        -other + self
    }
}

#[cfg(test)]
mod tests {
    use crate::lp_model_builder;
    use crate::lp_solver::VariableType;

    #[test]
    fn test_expression_operations() {
        let mut builder = lp_model_builder!();
        let x = builder.add_variable(VariableType::Continuous, 0.0, 10.0);
        let y = builder.add_variable(VariableType::Continuous, 0.0, 10.0);

        let expr = 2.0 * x + 3.0 * y + 5.0;
        assert_eq!(expr.constant, 5.0);
        assert_eq!(expr.terms.len(), 2);

        assert_eq!((x + y).terms.len(), 2);
        assert_eq!((x - y).terms.len(), 2);
        assert_eq!((2.0 * x).terms.len(), 1);
        assert_eq!((x * 2.0).terms.len(), 1);
    }

    #[test]
    fn test_subtraction_negates_right_operand() {
        let mut builder = lp_model_builder!();
        let x = builder.add_variable(VariableType::Continuous, 0.0, 10.0);
        let y = builder.add_variable(VariableType::Continuous, 0.0, 10.0);

        let expr = (4.0 * x + 1.0) - (2.0 * y + 3.0);
        assert_eq!(expr.terms[1].coefficient, -2.0);
        assert_eq!(expr.terms[1].variable, y);
        assert_eq!(expr.constant, -2.0);

        let slack = 12.0 - 2.0 * y;
        assert_eq!(slack.evaluate(&[0.0, 6.0]), 0.0);
        assert_eq!((10.0 - x).evaluate(&[3.0]), 7.0);
    }

    #[test]
    fn test_scaling_applies_to_constant() {
        let mut builder = lp_model_builder!();
        let x = builder.add_variable(VariableType::Continuous, 0.0, 10.0);

        let expr = 3.0 * (x + 2.0);
        assert_eq!(expr.terms[0].coefficient, 3.0);
        assert_eq!(expr.constant, 6.0);
        assert_eq!((-expr).constant, -6.0);
    }

    #[test]
    fn test_variable_id_debug() {
        let mut builder = lp_model_builder!();
        let x = builder.add_variable(VariableType::Continuous, 0.0, 10.0);

        let debug_str = format!("{:?}", x);
        assert!(debug_str.contains("VariableId"));
    }
}
