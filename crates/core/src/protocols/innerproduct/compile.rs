// Copyright 2025 Irreducible Inc.

use ff::Field;
use itertools::Itertools;
use tracing::{debug, instrument};
use trellis_utils::sorting::{is_sorted_ascending, stable_sort};

use super::{verify::SummationCheck, BatchContext, Error, InnerProduct};
use crate::{
	builder::ConstraintSystemBuilder,
	constraint_system::InnerProductId,
	symbolic::Expression,
};

/// Compiles all pending inner-product queries into running-sum columns, one
/// per distinct column size.
///
/// Queries are bucketed by size with a stable sort, so declaration order is
/// preserved inside a bucket and buckets are processed in ascending size
/// order. Each bucket is compiled independently; a compilation pass with no
/// pending queries is a no-op.
#[instrument(skip_all, name = "innerproduct::compile", level = "debug")]
pub fn compile<F: Field>(
	builder: &mut ConstraintSystemBuilder<F>,
) -> Result<Vec<BatchContext<F>>, Error> {
	let (pass, queries) = builder.take_inner_products();
	if queries.is_empty() {
		return Ok(Vec::new());
	}

	let (_, sorted) = stable_sort(queries, |(_, query)| query.size, false);
	debug_assert!(is_sorted_ascending(sorted.iter().map(|(_, query)| query.size)));

	let mut contexts = Vec::new();
	for (size, bucket) in &sorted.into_iter().chunk_by(|(_, query)| query.size) {
		let bucket = bucket.collect::<Vec<_>>();
		debug!(size, n_queries = bucket.len(), "compiling inner-product bucket");
		contexts.push(compile_for_size(builder, pass, bucket)?);
	}
	Ok(contexts)
}

/// Applies the compilation step to a non-empty list of queries that all
/// relate to columns of the same size.
///
/// Returns the compilation context of the batch.
fn compile_for_size<F: Field>(
	builder: &mut ConstraintSystemBuilder<F>,
	pass: usize,
	queries: Vec<(InnerProductId, InnerProduct)>,
) -> Result<BatchContext<F>, Error> {
	assert!(!queries.is_empty(), "caller must pass a non-empty query list");
	let size = queries[0].1.size;
	assert!(
		queries.iter().all(|(_, query)| query.size == size),
		"caller must pass queries of a single column size"
	);

	let has_more_than_one_pair = queries.len() > 1 || queries[0].1.n_pairs() > 1;
	let round = queries
		.iter()
		.map(|(_, query)| query.round)
		.max()
		.expect("the query list is non-empty");

	// Batching needs the challenge to be sampled after the claim data is
	// committed, so reserve an extra round for it.
	let round = if has_more_than_one_pair { round + 1 } else { round };

	let summation = builder.add_committed(
		format!("innerproduct::{pass}::summation::{size}"),
		round,
		size,
	)?;

	let (collapsed, batching_challenge) = if has_more_than_one_pair {
		let batching_challenge = builder.sample_challenge(
			format!("innerproduct::{pass}::batching_challenge::{size}"),
			round,
		);

		// The flattened pair order (query order, then B order within a
		// query) fixes the challenge power each pair is scaled by. The
		// verifier check below consumes the alleged values in the same
		// order.
		let pair_products = queries
			.iter()
			.flat_map(|(_, query)| {
				query
					.bs
					.iter()
					.map(move |&b| Expression::col(query.a) * Expression::col(b))
			})
			.collect::<Vec<_>>();

		let collapsed =
			Expression::poly_eval(Expression::challenge(batching_challenge), pair_products);
		(collapsed, Some(batching_challenge))
	} else {
		let query = &queries[0].1;
		(Expression::col(query.a) * Expression::col(query.bs[0]), None)
	};

	let collapsed_board = collapsed.board();

	// This constraint sets the recurrent property of summation. The shift
	// excludes row 0 from its domain; the boundary constraint below pins it.
	builder.assert_zero(
		format!("innerproduct::{pass}::summation_consistency::{size}"),
		round,
		Expression::col(summation) - Expression::shifted(summation, -1) - collapsed.clone(),
	);

	// This constraint ensures that summation has the correct initial value.
	builder.assert_zero_at_start(
		format!("innerproduct::{pass}::summation_init::{size}"),
		round,
		collapsed.clone() - Expression::col(summation),
	);

	// The opening of the final position of summation is compared to the
	// linear combination of the alleged inner-product values.
	let summation_opening = builder.add_opening(
		format!("innerproduct::{pass}::summation_end::{size}"),
		round,
		summation,
		-1,
	)?;

	builder.register_deferred(
		round,
		Box::new(SummationCheck::new(queries.clone(), summation_opening, batching_challenge)),
	);

	Ok(BatchContext {
		queries,
		batching_challenge,
		collapsed,
		collapsed_board,
		summation,
		summation_opening,
	})
}
