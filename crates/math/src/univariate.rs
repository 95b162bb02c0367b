// Copyright 2025 Irreducible Inc.

use ff::Field;

/// Evaluates the univariate polynomial with the given coefficient list at the
/// point `x`.
///
/// Coefficients are in ascending-power order: the result is
/// `coeffs[0] + x * coeffs[1] + x^2 * coeffs[2] + ...`, computed with
/// Horner's method. This ordering is a protocol invariant shared with the
/// symbolic polynomial-evaluation construction in `trellis_core`; both sides
/// of a protocol must consume term lists in the same order.
pub fn evaluate_univariate<F: Field>(coeffs: &[F], x: F) -> F {
	// Evaluate from the highest coefficient down so each step is one
	// multiply-accumulate.
	coeffs
		.iter()
		.rev()
		.fold(F::ZERO, |eval, &coeff| eval * x + coeff)
}

#[cfg(test)]
mod tests {
	use pasta_curves::Fp;
	use rand::{rngs::StdRng, Rng, SeedableRng};

	use super::*;

	fn evaluate_univariate_naive<F: Field>(coeffs: &[F], x: F) -> F {
		coeffs
			.iter()
			.enumerate()
			.map(|(i, &coeff)| {
				let mut power = F::ONE;
				for _ in 0..i {
					power *= x;
				}
				power * coeff
			})
			.sum()
	}

	#[test]
	fn test_evaluate_univariate() {
		let mut rng = StdRng::seed_from_u64(0);
		let coeffs = (0..10)
			.map(|_| Fp::from(rng.gen_range(0..u64::MAX)))
			.collect::<Vec<_>>();
		let x = Fp::from(rng.gen_range(0..u64::MAX));
		assert_eq!(evaluate_univariate(&coeffs, x), evaluate_univariate_naive(&coeffs, x));
	}

	#[test]
	fn test_evaluate_univariate_no_coeffs() {
		let x = Fp::from(123);
		assert_eq!(evaluate_univariate(&[], x), Fp::ZERO);
	}

	#[test]
	fn test_evaluate_univariate_ascending_power_order() {
		// 3 + 5x + 7x^2 at x = 2
		let coeffs = [Fp::from(3), Fp::from(5), Fp::from(7)];
		assert_eq!(evaluate_univariate(&coeffs, Fp::from(2)), Fp::from(41));
	}
}
