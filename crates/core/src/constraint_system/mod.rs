// Copyright 2025 Irreducible Inc.

//! The built, immutable form of a protocol's registry.
//!
//! A [`ConstraintSystem`] is produced by
//! [`ConstraintSystemBuilder::build`](crate::builder::ConstraintSystemBuilder::build)
//! and contains everything that places constraints on witness data:
//!
//! - committed columns and verifier challenges, tagged by round
//! - global constraints (vanish on every in-range row) and boundary
//!   constraints (vanish at row 0)
//! - opening queries binding handles to single column values
//! - deferred verifier checks, executed once openings and challenges are
//!   known

pub mod error;
pub mod validate;
mod verify;

use ff::Field;
use rand::RngCore;

pub use error::*;
pub use verify::*;

use crate::{
	protocols::innerproduct::InnerProduct, symbolic::Expression, witness::TraceIndex,
};

pub type ColumnId = usize;
pub type ChallengeId = usize;
pub type OpeningId = usize;
pub type InnerProductId = usize;

/// A committed column of field elements with a fixed number of rows.
#[derive(Debug, Clone)]
pub struct Column {
	pub name: String,
	pub round: usize,
	pub size: usize,
}

/// A single field element sampled by the verifier in a given round,
/// conceptually after the columns of the previous rounds are committed.
#[derive(Debug, Clone)]
pub struct Challenge {
	pub name: String,
	pub round: usize,
}

/// An algebraic constraint: the expression must evaluate to zero everywhere
/// on its row domain.
#[derive(Debug, Clone)]
pub struct Constraint<F: Field> {
	pub name: String,
	pub round: usize,
	pub expr: Expression<F>,
}

/// A query binding an [`OpeningId`] to the value of `column` at offset
/// `shift` from row 0, wrapped cyclically. A shift of -1 denotes the last
/// row.
#[derive(Debug, Clone)]
pub struct OpeningQuery {
	pub name: String,
	pub round: usize,
	pub column: ColumnId,
	pub shift: isize,
}

#[derive(Debug)]
pub struct ConstraintSystem<F: Field> {
	pub columns: Vec<Column>,
	pub challenges: Vec<Challenge>,
	pub global_constraints: Vec<Constraint<F>>,
	pub boundary_constraints: Vec<Constraint<F>>,
	pub opening_queries: Vec<OpeningQuery>,
	pub inner_products: Vec<InnerProduct>,
	pub deferred: Vec<DeferredAction<F>>,
	pub n_rounds: usize,
}

impl<F: Field> ConstraintSystem<F> {
	/// Draws one field element per declared challenge, indexed by
	/// [`ChallengeId`]. The randomness source is external to the toolkit.
	pub fn sample_challenges(&self, mut rng: impl RngCore) -> Vec<F> {
		self.challenges
			.iter()
			.map(|_| F::random(&mut rng))
			.collect()
	}

	/// Resolves every opening query against a filled trace, indexed by
	/// [`OpeningId`].
	pub fn compute_openings(&self, trace: &TraceIndex<F>) -> Result<Vec<F>, Error> {
		self.opening_queries
			.iter()
			.map(|query| Ok(trace.value_at(query.column, 0, query.shift)?))
			.collect()
	}
}
