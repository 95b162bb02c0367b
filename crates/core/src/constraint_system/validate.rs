// Copyright 2025 Irreducible Inc.

//! Prover-side witness validation.
//!
//! Checks a filled trace against every declared constraint by direct
//! evaluation. This is debugging tooling for circuit authors: it evaluates
//! each global constraint over its full row domain, which is far more work
//! than a real proof but pinpoints the exact constraint and row that fail.

use ff::Field;
use itertools::Itertools;
use tracing::instrument;
use trellis_utils::bail;

use super::{error::Error, Constraint, ConstraintSystem};
use crate::witness::TraceIndex;

/// Validates a filled trace against all global and boundary constraints.
///
/// Global constraints must vanish on every row where all shifted column
/// references stay in range: a reference with shift -1 excludes row 0 from
/// the domain, a reference with shift +1 excludes the last row. Boundary
/// constraints must vanish at row 0, with shifts resolved cyclically as in
/// opening queries.
#[instrument(skip_all, name = "constraint_system::validate_witness", level = "debug")]
pub fn validate_witness<F: Field>(
	cs: &ConstraintSystem<F>,
	trace: &TraceIndex<F>,
	challenges: &[F],
) -> Result<(), Error> {
	for (id, _) in cs.columns.iter().enumerate() {
		trace.get_column(id)?;
	}

	for constraint in &cs.global_constraints {
		let (size, lo, hi) = global_domain(cs, constraint)?;
		debug_assert!(lo <= hi && hi <= size);

		let compiled = constraint.expr.board();
		for row in lo..hi {
			let value = compiled.evaluate_at(trace, challenges, row)?;
			if value != F::ZERO {
				bail!(Error::NonZeroConstraint {
					name: constraint.name.clone(),
					row,
				});
			}
		}
	}

	for constraint in &cs.boundary_constraints {
		let compiled = constraint.expr.board();
		let value = compiled.evaluate_at(trace, challenges, 0)?;
		if value != F::ZERO {
			bail!(Error::NonZeroConstraint {
				name: constraint.name.clone(),
				row: 0,
			});
		}
	}

	Ok(())
}

/// The row domain of a global constraint: the shared size of its referenced
/// columns, trimmed at both ends so that every shifted reference stays in
/// range.
fn global_domain<F: Field>(
	cs: &ConstraintSystem<F>,
	constraint: &Constraint<F>,
) -> Result<(usize, usize, usize), Error> {
	let sizes = constraint
		.expr
		.columns()
		.map(|(column, _)| cs.columns[column].size)
		.unique()
		.collect::<Vec<_>>();

	let size = match sizes.as_slice() {
		[] => bail!(Error::NoColumnsInConstraint {
			name: constraint.name.clone(),
		}),
		[size] => *size,
		_ => bail!(Error::ConstraintSizeMismatch {
			name: constraint.name.clone(),
			sizes,
		}),
	};

	let (min_shift, max_shift) = constraint
		.expr
		.columns()
		.fold((0isize, 0isize), |(min, max), (_, shift)| {
			(min.min(shift), max.max(shift))
		});

	let lo = (-min_shift).max(0) as usize;
	let hi = size.saturating_sub(max_shift.max(0) as usize);
	Ok((size, lo.min(hi), hi))
}
