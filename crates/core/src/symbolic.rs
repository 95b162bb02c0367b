// Copyright 2025 Irreducible Inc.

//! Symbolic expressions over protocol objects.
//!
//! An [`Expression`] pairs a variable-indexed [`ArithExpr`] with an ordered
//! list of [`Terminal`]s binding each variable to a column reference (at a
//! fixed row offset) or a challenge. Binary operations merge the terminal
//! lists of their operands, remapping variable indices so that structurally
//! equal references share a variable.

use ff::Field;
use trellis_math::{ArithExpr, ExpressionBoard};

use crate::{
	constraint_system::{ChallengeId, ColumnId},
	witness::TraceIndex,
};

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("challenge index {index} is out of range")]
	ChallengeOutOfRange { index: usize },
	#[error("witness error: {0}")]
	Witness(#[from] crate::witness::Error),
	#[error("math error: {0}")]
	Math(#[from] trellis_math::Error),
}

/// A leaf of a symbolic expression.
///
/// `Column` references the value of a committed column at a fixed row delta
/// from the evaluation row; `Challenge` references a verifier-sampled field
/// element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Terminal {
	Column { column: ColumnId, shift: isize },
	Challenge(ChallengeId),
}

/// A symbolic expression over columns and challenges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expression<F: Field> {
	expr: ArithExpr<F>,
	terminals: Vec<Terminal>,
}

impl<F: Field> Expression<F> {
	pub fn constant(value: F) -> Self {
		Self {
			expr: ArithExpr::Const(value),
			terminals: Vec::new(),
		}
	}

	/// A reference to `column` at the evaluation row.
	pub fn col(column: ColumnId) -> Self {
		Self::shifted(column, 0)
	}

	/// A reference to `column` at offset `shift` from the evaluation row.
	pub fn shifted(column: ColumnId, shift: isize) -> Self {
		Self {
			expr: ArithExpr::Var(0),
			terminals: vec![Terminal::Column { column, shift }],
		}
	}

	pub fn challenge(challenge: ChallengeId) -> Self {
		Self {
			expr: ArithExpr::Var(0),
			terminals: vec![Terminal::Challenge(challenge)],
		}
	}

	/// The ordered terminal list backing the expression's variables.
	pub fn terminals(&self) -> &[Terminal] {
		&self.terminals
	}

	/// Iterates over the column references in the expression.
	pub fn columns(&self) -> impl Iterator<Item = (ColumnId, isize)> + '_ {
		self.terminals.iter().filter_map(|terminal| match terminal {
			Terminal::Column { column, shift } => Some((*column, *shift)),
			Terminal::Challenge(_) => None,
		})
	}

	/// Evaluates an ordered term list as a polynomial in `challenge`.
	///
	/// Builds `terms[0] + challenge * terms[1] + challenge^2 * terms[2] + ...`
	/// as an explicit Horner fold from the last term down. The ascending-power
	/// term order is a protocol invariant: verifier-side recomputation with
	/// [`trellis_math::evaluate_univariate`] consumes value lists in exactly
	/// this order.
	pub fn poly_eval(challenge: Self, terms: Vec<Self>) -> Self {
		assert!(!terms.is_empty(), "poly_eval requires a non-empty term list");

		let mut terms = terms.into_iter().rev();
		let last = terms
			.next()
			.expect("the term list was just checked to be non-empty");
		terms.fold(last, |acc, term| term + challenge.clone() * acc)
	}

	/// Lowers the expression into a [`CompiledExpr`] for repeated evaluation.
	pub fn board(&self) -> CompiledExpr<F> {
		CompiledExpr {
			board: self.expr.board(),
			terminals: self.terminals.clone(),
		}
	}

	/// Merges the terminal list of `rhs` into `self`'s, deduplicating equal
	/// terminals by first occurrence, and returns the two variable-aligned
	/// subexpressions along with the merged list.
	fn merge(self, rhs: Self) -> (ArithExpr<F>, ArithExpr<F>, Vec<Terminal>) {
		let mut terminals = self.terminals;
		let rhs_indices = rhs
			.terminals
			.iter()
			.map(|terminal| {
				terminals
					.iter()
					.position(|existing| existing == terminal)
					.unwrap_or_else(|| {
						terminals.push(*terminal);
						terminals.len() - 1
					})
			})
			.collect::<Vec<_>>();

		let rhs_expr = rhs
			.expr
			.remap_vars(&rhs_indices)
			.expect("expression variables always index into the terminal list");

		(self.expr, rhs_expr, terminals)
	}
}

impl<F: Field> std::ops::Add for Expression<F> {
	type Output = Self;

	fn add(self, rhs: Self) -> Self {
		let (lhs_expr, rhs_expr, terminals) = self.merge(rhs);
		Self {
			expr: lhs_expr + rhs_expr,
			terminals,
		}
	}
}

impl<F: Field> std::ops::Sub for Expression<F> {
	type Output = Self;

	fn sub(self, rhs: Self) -> Self {
		let (lhs_expr, rhs_expr, terminals) = self.merge(rhs);
		Self {
			expr: lhs_expr - rhs_expr,
			terminals,
		}
	}
}

impl<F: Field> std::ops::Mul for Expression<F> {
	type Output = Self;

	fn mul(self, rhs: Self) -> Self {
		let (lhs_expr, rhs_expr, terminals) = self.merge(rhs);
		Self {
			expr: lhs_expr * rhs_expr,
			terminals,
		}
	}
}

/// A materialized evaluation plan for an [`Expression`].
#[derive(Debug, Clone)]
pub struct CompiledExpr<F: Field> {
	board: ExpressionBoard<F>,
	terminals: Vec<Terminal>,
}

impl<F: Field> CompiledExpr<F> {
	/// Evaluates the expression at the given trace row.
	///
	/// Column references are resolved at `row + shift`, wrapped cyclically
	/// modulo the column size; challenge references are resolved against the
	/// sampled challenge values.
	pub fn evaluate_at(
		&self,
		trace: &TraceIndex<F>,
		challenges: &[F],
		row: usize,
	) -> Result<F, Error> {
		let vars = self
			.terminals
			.iter()
			.map(|terminal| match *terminal {
				Terminal::Column { column, shift } => {
					trace.value_at(column, row, shift).map_err(Into::into)
				}
				Terminal::Challenge(challenge) => challenges
					.get(challenge)
					.copied()
					.ok_or(Error::ChallengeOutOfRange { index: challenge }),
			})
			.collect::<Result<Vec<_>, Error>>()?;

		Ok(self.board.evaluate(&vars)?)
	}
}

#[cfg(test)]
mod tests {
	use pasta_curves::Fp;

	use super::*;

	#[test]
	fn test_merge_dedups_equal_terminals() {
		let expr = Expression::<Fp>::col(0) * Expression::col(1) + Expression::col(0);
		assert_eq!(
			expr.terminals(),
			&[
				Terminal::Column { column: 0, shift: 0 },
				Terminal::Column { column: 1, shift: 0 },
			]
		);
	}

	#[test]
	fn test_shifted_references_are_distinct_terminals() {
		let expr = Expression::<Fp>::col(0) - Expression::shifted(0, -1);
		assert_eq!(
			expr.terminals(),
			&[
				Terminal::Column { column: 0, shift: 0 },
				Terminal::Column { column: 0, shift: -1 },
			]
		);
	}

	#[test]
	fn test_poly_eval_ascending_power_order() {
		// terms t0, t1, t2 as constants, challenge as a constant: the value
		// must equal t0 + c*t1 + c^2*t2.
		let terms = vec![
			Expression::constant(Fp::from(3)),
			Expression::constant(Fp::from(5)),
			Expression::constant(Fp::from(7)),
		];
		let expr = Expression::poly_eval(Expression::constant(Fp::from(2)), terms);

		let cs_stub = crate::builder::ConstraintSystemBuilder::<Fp>::new().build();
		let trace = TraceIndex::new(&cs_stub);
		let value = expr.board().evaluate_at(&trace, &[], 0).unwrap();
		assert_eq!(value, Fp::from(41));
		assert_eq!(
			value,
			trellis_math::evaluate_univariate(
				&[Fp::from(3), Fp::from(5), Fp::from(7)],
				Fp::from(2)
			)
		);
	}

	#[test]
	#[should_panic(expected = "non-empty term list")]
	fn test_poly_eval_empty_terms_panics() {
		let _ = Expression::<Fp>::poly_eval(Expression::constant(Fp::ONE), Vec::new());
	}
}
