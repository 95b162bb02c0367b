// Copyright 2025 Irreducible Inc.

use ff::Field;
use itertools::izip;
use tracing::instrument;

use super::{BatchContext, Error, InnerProduct};
use crate::witness::TraceIndex;

/// Assigns the summation column of a compiled batch: the running prefix sum
/// of the collapsed expression over the trace rows.
///
/// All columns referenced by the batch's queries must be assigned before the
/// call, and the batching challenge (if any) must be present in `challenges`.
#[instrument(skip_all, name = "innerproduct::fill_summation", level = "debug")]
pub fn fill_summation<F: Field>(
	ctx: &BatchContext<F>,
	trace: &mut TraceIndex<F>,
	challenges: &[F],
) -> Result<(), Error> {
	let size = trace.column_size(ctx.summation)?;

	let mut acc = F::ZERO;
	let mut summation = Vec::with_capacity(size);
	for row in 0..size {
		acc += ctx.collapsed_board.evaluate_at(trace, challenges, row)?;
		summation.push(acc);
	}

	trace.update_column(ctx.summation, summation)?;
	Ok(())
}

/// The honest prover's alleged values for an inner-product query: the dot
/// product of A against each B column, in B declaration order.
pub fn inner_product_values<F: Field>(
	trace: &TraceIndex<F>,
	query: &InnerProduct,
) -> Result<Vec<F>, Error> {
	let a = trace.get_column(query.a)?;
	query
		.bs
		.iter()
		.map(|&b| {
			let b = trace.get_column(b)?;
			Ok(izip!(a, b).map(|(&a, &b)| a * b).sum())
		})
		.collect()
}
