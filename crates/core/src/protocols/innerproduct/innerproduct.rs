// Copyright 2025 Irreducible Inc.

use ff::Field;

use crate::{
	constraint_system::{ChallengeId, ColumnId, InnerProductId, OpeningId},
	symbolic::{CompiledExpr, Expression},
};

/// A declared inner-product query: one A column paired against one or more B
/// columns of the same size, each pair claiming $\sum_i a_i b_i = v$ for a
/// scalar $v$ the prover alleges at verification time.
///
/// Immutable once declared.
#[derive(Debug, Clone)]
pub struct InnerProduct {
	pub name: String,
	pub round: usize,
	pub a: ColumnId,
	pub bs: Vec<ColumnId>,
	pub size: usize,
}

impl InnerProduct {
	/// The number of (A, B) pairs the query contributes to a batch.
	pub fn n_pairs(&self) -> usize {
		self.bs.len()
	}
}

/// The compilation context of one pass of the inner-product compiler,
/// covering all queries of a particular column size.
///
/// Stores the protocol items the pass added to the registry, plus the
/// collapsed expression the prover re-evaluates when assigning the summation
/// column.
#[derive(Debug, Clone)]
pub struct BatchContext<F: Field> {
	/// The queries covered by the context, in declaration order. This order
	/// fixes the challenge power each pair is scaled by.
	pub queries: Vec<(InnerProductId, InnerProduct)>,

	/// The batching challenge collapsing the queries into a single batched
	/// query, so that only one summation column is committed for all of
	/// them. `None` when the batch holds a single pair and no randomness is
	/// needed.
	pub batching_challenge: Option<ChallengeId>,

	/// The linear combination of the pair products covered by the context.
	/// For pairs $(a_k, b_k)$ in declaration order and batching challenge
	/// $r$, row $i$ of Collapsed is $\sum_k a_{k,i} b_{k,i} r^k$.
	pub collapsed: Expression<F>,

	/// The materialized evaluation plan of [`Self::collapsed`].
	pub collapsed_board: CompiledExpr<F>,

	/// The committed column accumulating Collapsed as a running prefix sum.
	pub summation: ColumnId,

	/// The opening query pointing to the last entry of [`Self::summation`].
	/// The verifier compares it against the alleged inner-product values to
	/// finalize the compilation step.
	pub summation_opening: OpeningId,
}
