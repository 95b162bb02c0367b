// Copyright 2025 Irreducible Inc.

use ff::Field;
use trellis_math::evaluate_univariate;

use super::{InnerProduct, VerificationError as InnerProductVerificationError};
use crate::constraint_system::{
	ChallengeId, DeferredVerification, InnerProductId, OpeningId, VerificationContext,
	VerificationError,
};

/// The deferred check finalizing one batch of the inner-product compiler.
///
/// Captures the exact ordered query list used at compile time, the opening of
/// the summation column's last entry, and the batching challenge handle
/// (`None` when the batch held a single pair and no challenge was sampled).
#[derive(Debug)]
pub struct SummationCheck {
	queries: Vec<(InnerProductId, InnerProduct)>,
	summation_opening: OpeningId,
	batching_challenge: Option<ChallengeId>,
}

impl SummationCheck {
	pub fn new(
		queries: Vec<(InnerProductId, InnerProduct)>,
		summation_opening: OpeningId,
		batching_challenge: Option<ChallengeId>,
	) -> Self {
		Self {
			queries,
			summation_opening,
			batching_challenge,
		}
	}
}

impl<F: Field> DeferredVerification<F> for SummationCheck {
	fn run(&self, ctx: &VerificationContext<'_, F>) -> Result<(), VerificationError> {
		// Flatten the alleged values in the order the compile-time pair list
		// was built: query order, then B order within a query. The challenge
		// power of each value is its position in this list.
		let mut alleged = Vec::new();
		for (id, query) in &self.queries {
			let values = ctx.inner_product_values(*id)?;
			if values.len() != query.n_pairs() {
				return Err(VerificationError::QueryValueCountMismatch {
					index: *id,
					expected: query.n_pairs(),
					got: values.len(),
				});
			}
			alleged.extend_from_slice(values);
		}

		let expected = match self.batching_challenge {
			Some(challenge) => evaluate_univariate(&alleged, ctx.challenge(challenge)?),
			None => {
				debug_assert_eq!(alleged.len(), 1);
				alleged[0]
			}
		};

		let opened = ctx.opening(self.summation_opening)?;
		if expected != opened {
			return Err(InnerProductVerificationError::SummationMismatch.into());
		}
		Ok(())
	}
}
