// Copyright 2025 Irreducible Inc.

use std::fmt::Debug;

use ff::Field;

use super::{
	error::VerificationError, ChallengeId, ConstraintSystem, InnerProductId, OpeningId,
};

/// The values a deferred check may consult: sampled challenges, opened column
/// values, and the prover's alleged inner-product values, each indexed by the
/// handle returned at declaration time.
#[derive(Debug, Clone, Copy)]
pub struct VerificationContext<'a, F: Field> {
	pub challenges: &'a [F],
	pub openings: &'a [F],
	pub inner_product_values: &'a [Vec<F>],
}

impl<F: Field> VerificationContext<'_, F> {
	pub fn challenge(&self, id: ChallengeId) -> Result<F, VerificationError> {
		self.challenges
			.get(id)
			.copied()
			.ok_or(VerificationError::ChallengeOutOfRange { index: id })
	}

	pub fn opening(&self, id: OpeningId) -> Result<F, VerificationError> {
		self.openings
			.get(id)
			.copied()
			.ok_or(VerificationError::OpeningOutOfRange { index: id })
	}

	pub fn inner_product_values(&self, id: InnerProductId) -> Result<&[F], VerificationError> {
		self.inner_product_values
			.get(id)
			.map(Vec::as_slice)
			.ok_or(VerificationError::MissingQueryValues { index: id })
	}
}

/// A check registered at compile time and executed once during verification,
/// after all referenced challenges and openings are resolved.
///
/// Implementations are plain immutable records holding exactly the handles
/// they need; `run` must be a deterministic, side-effect-free function of the
/// record and the context.
pub trait DeferredVerification<F: Field>: Debug {
	fn run(&self, ctx: &VerificationContext<'_, F>) -> Result<(), VerificationError>;
}

/// A deferred check along with the round it was registered in.
#[derive(Debug)]
pub struct DeferredAction<F: Field> {
	pub round: usize,
	pub action: Box<dyn DeferredVerification<F>>,
}

/// Executes every registered deferred check exactly once, round by round, in
/// registration order within a round.
///
/// The first failing check aborts verification; the surrounding protocol
/// runtime decides what to do with the invalid proof.
pub fn verify<F: Field>(
	cs: &ConstraintSystem<F>,
	ctx: &VerificationContext<'_, F>,
) -> Result<(), VerificationError> {
	for round in 0..cs.n_rounds {
		for deferred in cs.deferred.iter().filter(|deferred| deferred.round == round) {
			deferred.action.run(ctx)?;
		}
	}
	Ok(())
}
