// Copyright 2025 Irreducible Inc.

use ff::Field;
use trellis_utils::bail;

use super::{arith_expr::ArithExpr, error::Error};

/// A flattened evaluation plan for an [`ArithExpr`].
///
/// The expression tree is lowered into a postorder instruction list operating
/// on a slot stack, so that repeated evaluation (once per trace row, say)
/// avoids walking the tree. Instruction operands are indices of previously
/// computed slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpressionBoard<F: Field> {
	instrs: Vec<Instruction<F>>,
	n_vars: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Instruction<F: Field> {
	Const(F),
	Var(usize),
	Add(usize, usize),
	Sub(usize, usize),
	Mul(usize, usize),
}

impl<F: Field> ArithExpr<F> {
	/// Lowers the expression into an [`ExpressionBoard`].
	pub fn board(&self) -> ExpressionBoard<F> {
		let mut instrs = Vec::new();
		flatten(self, &mut instrs);
		ExpressionBoard {
			instrs,
			n_vars: self.n_vars(),
		}
	}
}

fn flatten<F: Field>(expr: &ArithExpr<F>, instrs: &mut Vec<Instruction<F>>) -> usize {
	let instr = match expr {
		ArithExpr::Const(val) => Instruction::Const(*val),
		ArithExpr::Var(index) => Instruction::Var(*index),
		ArithExpr::Add(left, right) => {
			let left = flatten(left, instrs);
			let right = flatten(right, instrs);
			Instruction::Add(left, right)
		}
		ArithExpr::Sub(left, right) => {
			let left = flatten(left, instrs);
			let right = flatten(right, instrs);
			Instruction::Sub(left, right)
		}
		ArithExpr::Mul(left, right) => {
			let left = flatten(left, instrs);
			let right = flatten(right, instrs);
			Instruction::Mul(left, right)
		}
	};
	instrs.push(instr);
	instrs.len() - 1
}

impl<F: Field> ExpressionBoard<F> {
	/// The number of variables the underlying expression contains.
	pub const fn n_vars(&self) -> usize {
		self.n_vars
	}

	/// Evaluates the plan with the given variable assignment.
	///
	/// Must return exactly the same value as [`ArithExpr::evaluate`] on the
	/// expression the board was lowered from.
	///
	/// ## Throws
	///
	/// * [`Error::IncorrectArgumentLength`] if `vars` is shorter than
	///   [`Self::n_vars`]
	pub fn evaluate(&self, vars: &[F]) -> Result<F, Error> {
		if vars.len() < self.n_vars {
			bail!(Error::IncorrectArgumentLength {
				arg: "vars".to_string(),
				expected: self.n_vars,
			});
		}

		let mut slots = Vec::with_capacity(self.instrs.len());
		for instr in &self.instrs {
			let value = match instr {
				Instruction::Const(val) => *val,
				Instruction::Var(index) => vars[*index],
				Instruction::Add(left, right) => slots[*left] + slots[*right],
				Instruction::Sub(left, right) => slots[*left] - slots[*right],
				Instruction::Mul(left, right) => slots[*left] * slots[*right],
			};
			slots.push(value);
		}

		let result = slots
			.last()
			.copied()
			.expect("expression trees are non-empty, so the instruction list is non-empty");
		Ok(result)
	}
}

#[cfg(test)]
mod tests {
	use assert_matches::assert_matches;
	use pasta_curves::Fp;
	use rand::{rngs::StdRng, Rng, SeedableRng};

	use super::*;

	fn random_expr(rng: &mut StdRng, n_vars: usize, depth: usize) -> ArithExpr<Fp> {
		if depth == 0 {
			return if rng.gen_bool(0.5) {
				ArithExpr::Var(rng.gen_range(0..n_vars))
			} else {
				ArithExpr::Const(Fp::from(rng.gen_range(0..64u64)))
			};
		}
		let left = random_expr(rng, n_vars, depth - 1);
		let right = random_expr(rng, n_vars, depth - 1);
		match rng.gen_range(0..3) {
			0 => left + right,
			1 => left - right,
			_ => left * right,
		}
	}

	#[test]
	fn test_board_evaluation_matches_tree_evaluation() {
		let mut rng = StdRng::seed_from_u64(0);
		for _ in 0..32 {
			let expr = random_expr(&mut rng, 4, 5);
			let board = expr.board();
			let vars = std::array::from_fn::<_, 4, _>(|_| Fp::from(rng.gen_range(0..1024u64)));
			assert_eq!(board.evaluate(&vars).unwrap(), expr.evaluate(&vars).unwrap());
		}
	}

	#[test]
	fn test_board_var_count_is_checked() {
		let expr: ArithExpr<Fp> = ArithExpr::Var(0) * ArithExpr::Var(3);
		let board = expr.board();
		assert_eq!(board.n_vars(), 4);
		assert_matches!(
			board.evaluate(&[Fp::ONE; 2]),
			Err(Error::IncorrectArgumentLength { .. })
		);
	}
}
