// Copyright 2025 Irreducible Inc.

//! The mutable registry a protocol is declared into.
//!
//! All declarations go through a [`ConstraintSystemBuilder`] passed by
//! reference; there is no ambient global state. Insertions are append-only
//! and return opaque handles, and insertion order is observable: it fixes
//! handle values, derived names, and the term orders that compiler passes
//! and their verifier checks both rely on.

use ff::Field;
use trellis_utils::bail;

use crate::{
	constraint_system::{
		Challenge, ChallengeId, Column, ColumnId, Constraint, ConstraintSystem, DeferredAction,
		DeferredVerification, InnerProductId, OpeningId, OpeningQuery,
	},
	protocols::innerproduct::InnerProduct,
	symbolic::Expression,
};

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("column {name} must have a nonzero number of rows")]
	ZeroSizeColumn { name: String },

	#[error("column index {index} is out of range")]
	ColumnOutOfRange { index: usize },

	#[error("inner-product query {name} must have at least one B column")]
	EmptyInnerProduct { name: String },

	#[error("inner-product query {name} pairs columns of sizes {expected} and {got}")]
	ColumnSizeMismatch {
		name: String,
		expected: usize,
		got: usize,
	},
}

#[derive(Debug, Default)]
pub struct ConstraintSystemBuilder<F: Field> {
	columns: Vec<Column>,
	challenges: Vec<Challenge>,
	global_constraints: Vec<Constraint<F>>,
	boundary_constraints: Vec<Constraint<F>>,
	opening_queries: Vec<OpeningQuery>,
	inner_products: Vec<InnerProduct>,
	pending_inner_products: Vec<InnerProductId>,
	deferred: Vec<DeferredAction<F>>,
	n_rounds: usize,
	n_compiler_passes: usize,
}

impl<F: Field> ConstraintSystemBuilder<F> {
	pub fn new() -> Self {
		Self::default()
	}

	/// Declares a committed column with `size` rows in the given round.
	pub fn add_committed(
		&mut self,
		name: impl ToString,
		round: usize,
		size: usize,
	) -> Result<ColumnId, Error> {
		let name = name.to_string();
		if size == 0 {
			bail!(Error::ZeroSizeColumn { name });
		}
		self.bump_round(round);
		self.columns.push(Column { name, round, size });
		Ok(self.columns.len() - 1)
	}

	/// Declares a single-field-element challenge sampled by the verifier in
	/// the given round.
	pub fn sample_challenge(&mut self, name: impl ToString, round: usize) -> ChallengeId {
		self.bump_round(round);
		self.challenges.push(Challenge {
			name: name.to_string(),
			round,
		});
		self.challenges.len() - 1
	}

	/// Declares a constraint that must vanish on every row where all of its
	/// shifted column references stay in range.
	pub fn assert_zero(&mut self, name: impl ToString, round: usize, expr: Expression<F>) {
		self.bump_round(round);
		self.global_constraints.push(Constraint {
			name: name.to_string(),
			round,
			expr,
		});
	}

	/// Declares a constraint that must vanish at row 0.
	pub fn assert_zero_at_start(&mut self, name: impl ToString, round: usize, expr: Expression<F>) {
		self.bump_round(round);
		self.boundary_constraints.push(Constraint {
			name: name.to_string(),
			round,
			expr,
		});
	}

	/// Declares an opening query on `column` at offset `shift` from row 0,
	/// wrapped cyclically; a shift of -1 opens the last row.
	pub fn add_opening(
		&mut self,
		name: impl ToString,
		round: usize,
		column: ColumnId,
		shift: isize,
	) -> Result<OpeningId, Error> {
		if column >= self.columns.len() {
			bail!(Error::ColumnOutOfRange { index: column });
		}
		self.bump_round(round);
		self.opening_queries.push(OpeningQuery {
			name: name.to_string(),
			round,
			column,
			shift,
		});
		Ok(self.opening_queries.len() - 1)
	}

	/// Declares an inner-product query: one A column paired against one or
	/// more B columns of the same size. The claimed scalar values are
	/// supplied by the prover at verification time.
	pub fn add_inner_product(
		&mut self,
		name: impl ToString,
		round: usize,
		a: ColumnId,
		bs: Vec<ColumnId>,
	) -> Result<InnerProductId, Error> {
		let name = name.to_string();
		if bs.is_empty() {
			bail!(Error::EmptyInnerProduct { name });
		}
		let size = self.column_size(a)?;
		for &b in &bs {
			let b_size = self.column_size(b)?;
			if b_size != size {
				bail!(Error::ColumnSizeMismatch {
					name,
					expected: size,
					got: b_size,
				});
			}
		}

		self.bump_round(round);
		self.inner_products.push(InnerProduct {
			name,
			round,
			a,
			bs,
			size,
		});
		let id = self.inner_products.len() - 1;
		self.pending_inner_products.push(id);
		Ok(id)
	}

	/// Registers a check to execute during verification of the given round.
	pub fn register_deferred(&mut self, round: usize, action: Box<dyn DeferredVerification<F>>) {
		self.bump_round(round);
		self.deferred.push(DeferredAction { round, action });
	}

	/// Drains the inner-product queries not yet consumed by a compiler pass,
	/// in declaration order, and returns them along with the index of this
	/// pass. The pass index keeps names derived by successive passes in
	/// disjoint namespaces.
	pub fn take_inner_products(&mut self) -> (usize, Vec<(InnerProductId, InnerProduct)>) {
		let pass = self.n_compiler_passes;
		self.n_compiler_passes += 1;

		let pending = std::mem::take(&mut self.pending_inner_products)
			.into_iter()
			.map(|id| (id, self.inner_products[id].clone()))
			.collect();
		(pass, pending)
	}

	pub fn column_size(&self, id: ColumnId) -> Result<usize, Error> {
		self.columns
			.get(id)
			.map(|column| column.size)
			.ok_or(Error::ColumnOutOfRange { index: id })
	}

	pub fn build(self) -> ConstraintSystem<F> {
		ConstraintSystem {
			columns: self.columns,
			challenges: self.challenges,
			global_constraints: self.global_constraints,
			boundary_constraints: self.boundary_constraints,
			opening_queries: self.opening_queries,
			inner_products: self.inner_products,
			deferred: self.deferred,
			n_rounds: self.n_rounds,
		}
	}

	fn bump_round(&mut self, round: usize) {
		self.n_rounds = self.n_rounds.max(round + 1);
	}
}

#[cfg(test)]
mod tests {
	use assert_matches::assert_matches;
	use pasta_curves::Fp;

	use super::*;

	#[test]
	fn test_rounds_track_insertions() {
		let mut builder = ConstraintSystemBuilder::<Fp>::new();
		builder.add_committed("a", 0, 4).unwrap();
		builder.sample_challenge("c", 2);
		let cs = builder.build();
		assert_eq!(cs.n_rounds, 3);
	}

	#[test]
	fn test_inner_product_declaration_contract() {
		let mut builder = ConstraintSystemBuilder::<Fp>::new();
		let a = builder.add_committed("a", 0, 4).unwrap();
		let b = builder.add_committed("b", 0, 4).unwrap();
		let short = builder.add_committed("short", 0, 2).unwrap();

		assert_matches!(
			builder.add_inner_product("ip", 0, a, vec![]),
			Err(Error::EmptyInnerProduct { .. })
		);
		assert_matches!(
			builder.add_inner_product("ip", 0, a, vec![b, short]),
			Err(Error::ColumnSizeMismatch { expected: 4, got: 2, .. })
		);
		assert_matches!(builder.add_committed("empty", 0, 0), Err(Error::ZeroSizeColumn { .. }));

		builder.add_inner_product("ip", 0, a, vec![b]).unwrap();
	}

	#[test]
	fn test_take_inner_products_drains_pending() {
		let mut builder = ConstraintSystemBuilder::<Fp>::new();
		let a = builder.add_committed("a", 0, 4).unwrap();
		let b = builder.add_committed("b", 0, 4).unwrap();
		builder.add_inner_product("ip", 0, a, vec![b]).unwrap();

		let (pass, queries) = builder.take_inner_products();
		assert_eq!(pass, 0);
		assert_eq!(queries.len(), 1);

		let (pass, queries) = builder.take_inner_products();
		assert_eq!(pass, 1);
		assert!(queries.is_empty());
	}
}
