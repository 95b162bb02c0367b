// Copyright 2025 Irreducible Inc.

use ff::Field;
use trellis_utils::bail;

use crate::constraint_system::{ColumnId, ConstraintSystem};

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("column index {index} is out of range")]
	ColumnOutOfRange { index: usize },
	#[error("column {index} has no witness assignment")]
	MissingWitness { index: usize },
	#[error("column {index} expects {expected} values, got {got}")]
	SizeMismatch {
		index: usize,
		expected: usize,
		got: usize,
	},
}

/// Per-column witness assignments for a built constraint system.
///
/// Expected column sizes are fixed at construction, so a misshapen
/// assignment fails at the update call rather than at first use.
#[derive(Debug, Clone)]
pub struct TraceIndex<F: Field> {
	columns: Vec<Option<Vec<F>>>,
	sizes: Vec<usize>,
}

impl<F: Field> TraceIndex<F> {
	pub fn new(cs: &ConstraintSystem<F>) -> Self {
		let sizes = cs.columns.iter().map(|column| column.size).collect::<Vec<_>>();
		Self {
			columns: vec![None; sizes.len()],
			sizes,
		}
	}

	pub fn column_size(&self, id: ColumnId) -> Result<usize, Error> {
		self.sizes
			.get(id)
			.copied()
			.ok_or(Error::ColumnOutOfRange { index: id })
	}

	pub fn update_column(&mut self, id: ColumnId, values: Vec<F>) -> Result<(), Error> {
		let expected = self.column_size(id)?;
		if values.len() != expected {
			bail!(Error::SizeMismatch {
				index: id,
				expected,
				got: values.len(),
			});
		}
		self.columns[id] = Some(values);
		Ok(())
	}

	pub fn get_column(&self, id: ColumnId) -> Result<&[F], Error> {
		self.columns
			.get(id)
			.ok_or(Error::ColumnOutOfRange { index: id })?
			.as_deref()
			.ok_or(Error::MissingWitness { index: id })
	}

	/// The value of a column at offset `shift` from `row`, wrapped
	/// cyclically modulo the column size. A shift of -1 from row 0 addresses
	/// the last row.
	pub fn value_at(&self, id: ColumnId, row: usize, shift: isize) -> Result<F, Error> {
		let values = self.get_column(id)?;
		let size = values.len() as isize;
		let index = (row as isize + shift).rem_euclid(size);
		Ok(values[index as usize])
	}
}

#[cfg(test)]
mod tests {
	use assert_matches::assert_matches;
	use pasta_curves::Fp;

	use super::*;
	use crate::builder::ConstraintSystemBuilder;

	fn one_column_system(size: usize) -> ConstraintSystem<Fp> {
		let mut builder = ConstraintSystemBuilder::new();
		builder.add_committed("x", 0, size).unwrap();
		builder.build()
	}

	#[test]
	fn test_update_checks_length() {
		let cs = one_column_system(4);
		let mut trace = TraceIndex::new(&cs);
		assert_matches!(
			trace.update_column(0, vec![Fp::ONE; 3]),
			Err(Error::SizeMismatch { expected: 4, got: 3, .. })
		);
		trace.update_column(0, vec![Fp::ONE; 4]).unwrap();
	}

	#[test]
	fn test_missing_witness_and_range_errors() {
		let cs = one_column_system(2);
		let trace = TraceIndex::<Fp>::new(&cs);
		assert_matches!(trace.get_column(0), Err(Error::MissingWitness { index: 0 }));
		assert_matches!(trace.get_column(7), Err(Error::ColumnOutOfRange { index: 7 }));
	}

	#[test]
	fn test_value_at_wraps_cyclically() {
		let cs = one_column_system(4);
		let mut trace = TraceIndex::new(&cs);
		let values = [2u64, 3, 5, 7].map(Fp::from).to_vec();
		trace.update_column(0, values).unwrap();

		assert_eq!(trace.value_at(0, 2, 1).unwrap(), Fp::from(7));
		// shift -1 from row 0 addresses the last row
		assert_eq!(trace.value_at(0, 0, -1).unwrap(), Fp::from(7));
		assert_eq!(trace.value_at(0, 3, 1).unwrap(), Fp::from(2));
	}
}
