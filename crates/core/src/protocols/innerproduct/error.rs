// Copyright 2025 Irreducible Inc.

use crate::{builder, symbolic, witness};

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("builder error: {0}")]
	Builder(#[from] builder::Error),

	#[error("witness error: {0}")]
	Witness(#[from] witness::Error),

	#[error("symbolic evaluation error: {0}")]
	Symbolic(#[from] symbolic::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum VerificationError {
	#[error(
		"the opened value of the summation column does not match the linear combination of the alleged inner-product values"
	)]
	SummationMismatch,
}
