// Copyright 2025 Irreducible Inc.

use crate::{protocols, symbolic, witness};

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("constraint {name} references no columns")]
	NoColumnsInConstraint { name: String },

	#[error("constraint {name} references columns of unequal sizes {sizes:?}")]
	ConstraintSizeMismatch { name: String, sizes: Vec<usize> },

	#[error("constraint {name} does not vanish at row {row}")]
	NonZeroConstraint { name: String, row: usize },

	#[error("witness error: {0}")]
	Witness(#[from] witness::Error),

	#[error("symbolic evaluation error: {0}")]
	Symbolic(#[from] symbolic::Error),

	#[error("verification error: {0}")]
	Verification(#[from] VerificationError),
}

/// Soundness failures surfaced during the verification phase.
///
/// These are expected outcomes of checking an invalid proof, distinct from
/// the contract violations in [`Error`].
#[derive(Debug, thiserror::Error)]
pub enum VerificationError {
	#[error("challenge index {index} is out of range")]
	ChallengeOutOfRange { index: usize },

	#[error("opening index {index} is out of range")]
	OpeningOutOfRange { index: usize },

	#[error("inner-product query {index} has no alleged values")]
	MissingQueryValues { index: usize },

	#[error("inner-product query {index} expects {expected} alleged values, got {got}")]
	QueryValueCountMismatch {
		index: usize,
		expected: usize,
		got: usize,
	},

	#[error("inner product verification failed: {0}")]
	InnerProduct(#[from] protocols::innerproduct::VerificationError),
}
