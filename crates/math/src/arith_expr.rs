// Copyright 2025 Irreducible Inc.

use std::{
	fmt::{self, Display},
	iter::{Product, Sum},
	ops::{Add, AddAssign, Mul, MulAssign, Sub, SubAssign},
};

use ff::Field;

use super::error::Error;

/// Arithmetic expressions that can be evaluated symbolically.
///
/// Arithmetic expressions are trees, where the leaves are either constants or
/// variables, and the non-leaf nodes are arithmetic operations. They are
/// specific representations of multivariate polynomials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArithExpr<F: Field> {
	Const(F),
	Var(usize),
	Add(Box<ArithExpr<F>>, Box<ArithExpr<F>>),
	Sub(Box<ArithExpr<F>>, Box<ArithExpr<F>>),
	Mul(Box<ArithExpr<F>>, Box<ArithExpr<F>>),
}

impl<F: Field> Display for ArithExpr<F> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Const(v) => write!(f, "{v:?}"),
			Self::Var(i) => write!(f, "x{i}"),
			Self::Add(x, y) => write!(f, "({} + {})", &**x, &**y),
			Self::Sub(x, y) => write!(f, "({} - {})", &**x, &**y),
			Self::Mul(x, y) => write!(f, "({} * {})", &**x, &**y),
		}
	}
}

impl<F: Field> ArithExpr<F> {
	/// The number of variables the expression contains.
	pub fn n_vars(&self) -> usize {
		match self {
			Self::Const(_) => 0,
			Self::Var(index) => *index + 1,
			Self::Add(left, right) | Self::Sub(left, right) | Self::Mul(left, right) => {
				left.n_vars().max(right.n_vars())
			}
		}
	}

	/// The total degree of the polynomial the expression represents.
	pub fn degree(&self) -> usize {
		match self {
			Self::Const(_) => 0,
			Self::Var(_) => 1,
			Self::Add(left, right) | Self::Sub(left, right) => left.degree().max(right.degree()),
			Self::Mul(left, right) => left.degree() + right.degree(),
		}
	}

	pub const fn zero() -> Self {
		Self::Const(F::ZERO)
	}

	pub const fn one() -> Self {
		Self::Const(F::ONE)
	}

	/// Creates a new expression with the variable indices remapped.
	///
	/// This recursively replaces the variable sub-expressions with an index
	/// `i` with the variable `indices[i]`.
	///
	/// ## Throws
	///
	/// * [`Error::IncorrectArgumentLength`] if indices has length less than
	///   the current number of variables
	pub fn remap_vars(self, indices: &[usize]) -> Result<Self, Error> {
		let expr = match self {
			Self::Const(_) => self,
			Self::Var(index) => {
				let new_index =
					indices
						.get(index)
						.ok_or_else(|| Error::IncorrectArgumentLength {
							arg: "indices".to_string(),
							expected: index,
						})?;
				Self::Var(*new_index)
			}
			Self::Add(left, right) => {
				let new_left = left.remap_vars(indices)?;
				let new_right = right.remap_vars(indices)?;
				Self::Add(Box::new(new_left), Box::new(new_right))
			}
			Self::Sub(left, right) => {
				let new_left = left.remap_vars(indices)?;
				let new_right = right.remap_vars(indices)?;
				Self::Sub(Box::new(new_left), Box::new(new_right))
			}
			Self::Mul(left, right) => {
				let new_left = left.remap_vars(indices)?;
				let new_right = right.remap_vars(indices)?;
				Self::Mul(Box::new(new_left), Box::new(new_right))
			}
		};
		Ok(expr)
	}

	/// Returns `Some(F)` if the expression is a constant.
	pub const fn constant(&self) -> Option<F> {
		match self {
			Self::Const(value) => Some(*value),
			_ => None,
		}
	}

	/// Creates a new optimized expression.
	///
	/// Recursively rewrites the expression for better evaluation performance,
	/// folding constants and eliminating additive/multiplicative identities.
	pub fn optimize(&self) -> Self {
		match self {
			Self::Const(_) | Self::Var(_) => self.clone(),
			Self::Add(left, right) => {
				let left = left.optimize();
				let right = right.optimize();
				match (left, right) {
					// constant folding
					(Self::Const(left), Self::Const(right)) => Self::Const(left + right),
					// 0 + a = a + 0 = a
					(Self::Const(left), right) if left == F::ZERO => right,
					(left, Self::Const(right)) if right == F::ZERO => left,
					// fallback
					(left, right) => Self::Add(Box::new(left), Box::new(right)),
				}
			}
			Self::Sub(left, right) => {
				let left = left.optimize();
				let right = right.optimize();
				match (left, right) {
					// constant folding
					(Self::Const(left), Self::Const(right)) => Self::Const(left - right),
					// a - 0 = a
					(left, Self::Const(right)) if right == F::ZERO => left,
					// a - a = 0, by structural equality
					(left, right) if left == right => Self::Const(F::ZERO),
					// fallback
					(left, right) => Self::Sub(Box::new(left), Box::new(right)),
				}
			}
			Self::Mul(left, right) => {
				let left = left.optimize();
				let right = right.optimize();
				match (left, right) {
					// constant folding
					(Self::Const(left), Self::Const(right)) => Self::Const(left * right),
					// 0 * a = a * 0 = 0
					(left, right)
						if left == Self::Const(F::ZERO) || right == Self::Const(F::ZERO) =>
					{
						Self::Const(F::ZERO)
					}
					// 1 * a = a * 1 = a
					(Self::Const(left), right) if left == F::ONE => right,
					(left, Self::Const(right)) if right == F::ONE => left,
					// fallback
					(left, right) => Self::Mul(Box::new(left), Box::new(right)),
				}
			}
		}
	}

	/// Evaluates the expression with the given variable assignment.
	///
	/// ## Throws
	///
	/// * [`Error::IncorrectArgumentLength`] if `vars` is shorter than
	///   [`Self::n_vars`]
	pub fn evaluate(&self, vars: &[F]) -> Result<F, Error> {
		let n_vars = self.n_vars();
		if vars.len() < n_vars {
			return Err(Error::IncorrectArgumentLength {
				arg: "vars".to_string(),
				expected: n_vars,
			});
		}
		Ok(self.evaluate_inner(vars))
	}

	fn evaluate_inner(&self, vars: &[F]) -> F {
		match self {
			Self::Const(val) => *val,
			Self::Var(index) => vars[*index],
			Self::Add(left, right) => left.evaluate_inner(vars) + right.evaluate_inner(vars),
			Self::Sub(left, right) => left.evaluate_inner(vars) - right.evaluate_inner(vars),
			Self::Mul(left, right) => left.evaluate_inner(vars) * right.evaluate_inner(vars),
		}
	}
}

impl<F: Field> Default for ArithExpr<F> {
	fn default() -> Self {
		Self::zero()
	}
}

impl<F: Field> Add for ArithExpr<F> {
	type Output = Self;

	fn add(self, rhs: Self) -> Self {
		Self::Add(Box::new(self), Box::new(rhs))
	}
}

impl<F: Field> AddAssign for ArithExpr<F> {
	fn add_assign(&mut self, rhs: Self) {
		*self = std::mem::take(self) + rhs;
	}
}

impl<F: Field> Sub for ArithExpr<F> {
	type Output = Self;

	fn sub(self, rhs: Self) -> Self {
		Self::Sub(Box::new(self), Box::new(rhs))
	}
}

impl<F: Field> SubAssign for ArithExpr<F> {
	fn sub_assign(&mut self, rhs: Self) {
		*self = std::mem::take(self) - rhs;
	}
}

impl<F: Field> Mul for ArithExpr<F> {
	type Output = Self;

	fn mul(self, rhs: Self) -> Self {
		Self::Mul(Box::new(self), Box::new(rhs))
	}
}

impl<F: Field> MulAssign for ArithExpr<F> {
	fn mul_assign(&mut self, rhs: Self) {
		*self = std::mem::take(self) * rhs;
	}
}

impl<F: Field> Sum for ArithExpr<F> {
	fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
		iter.reduce(|acc, item| acc + item).unwrap_or(Self::zero())
	}
}

impl<F: Field> Product for ArithExpr<F> {
	fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
		iter.reduce(|acc, item| acc * item).unwrap_or(Self::one())
	}
}

#[cfg(test)]
mod tests {
	use assert_matches::assert_matches;
	use pasta_curves::Fp;

	use super::*;

	#[test]
	fn test_degree() {
		let expr = ArithExpr::Const(Fp::from(6));
		assert_eq!(expr.degree(), 0);

		let expr: ArithExpr<Fp> = ArithExpr::Var(0) * ArithExpr::Var(1);
		assert_eq!(expr.degree(), 2);

		let expr: ArithExpr<Fp> =
			ArithExpr::Var(0) * ArithExpr::Var(1) - ArithExpr::Var(2) * ArithExpr::Var(3);
		assert_eq!(expr.degree(), 2);
	}

	#[test]
	fn test_remap_vars_with_too_few_vars() {
		let expr = (ArithExpr::Var(0) + ArithExpr::Const(Fp::ONE)) * ArithExpr::Var(1);
		assert_matches!(expr.remap_vars(&[5]), Err(Error::IncorrectArgumentLength { .. }));
	}

	#[test]
	fn test_remap_vars_works() {
		let expr = (ArithExpr::Var(0) + ArithExpr::Const(Fp::ONE)) * ArithExpr::Var(1);
		let new_expr = expr.remap_vars(&[5, 3]);

		let expected = (ArithExpr::Var(5) + ArithExpr::Const(Fp::ONE)) * ArithExpr::Var(3);
		assert_eq!(new_expr.unwrap(), expected);
	}

	#[test]
	fn test_optimize_identity_handling() {
		let zero = ArithExpr::<Fp>::zero();
		let one = ArithExpr::<Fp>::one();

		assert_eq!((zero.clone() * ArithExpr::<Fp>::Var(0)).optimize(), zero);
		assert_eq!((ArithExpr::<Fp>::Var(0) * zero.clone()).optimize(), zero);

		assert_eq!((ArithExpr::<Fp>::Var(0) * one.clone()).optimize(), ArithExpr::Var(0));
		assert_eq!((one * ArithExpr::<Fp>::Var(0)).optimize(), ArithExpr::Var(0));

		assert_eq!((ArithExpr::<Fp>::Var(0) + zero.clone()).optimize(), ArithExpr::Var(0));
		assert_eq!((zero.clone() + ArithExpr::<Fp>::Var(0)).optimize(), ArithExpr::Var(0));

		assert_eq!((ArithExpr::<Fp>::Var(0) - zero.clone()).optimize(), ArithExpr::Var(0));
		assert_eq!((ArithExpr::<Fp>::Var(0) - ArithExpr::Var(0)).optimize(), zero);
	}

	#[test]
	fn test_evaluate() {
		let expr = ArithExpr::Var(0) * ArithExpr::Var(1)
			- ArithExpr::Var(2) * ArithExpr::Const(Fp::from(3));
		let vars = [Fp::from(5), Fp::from(7), Fp::from(2)];
		assert_eq!(expr.evaluate(&vars).unwrap(), Fp::from(29));

		assert_matches!(
			expr.evaluate(&vars[..2]),
			Err(Error::IncorrectArgumentLength { .. })
		);
	}
}
