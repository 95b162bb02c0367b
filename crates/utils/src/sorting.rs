// Copyright 2025 Irreducible Inc.

use itertools::Itertools;

/// Returns whether the given values are sorted in ascending order.
pub fn is_sorted_ascending<T: PartialOrd + Clone>(values: impl Iterator<Item = T>) -> bool {
	!values.tuple_windows().any(|(a, b)| a > b)
}

/// Stable sorts a collection of objects by a `usize` key function.
///
/// Returns a tuple of the original indices of the objects and the sorted
/// objects themselves. Stability matters here: objects comparing equal keep
/// their declaration order, which downstream protocol code relies on for
/// prover-verifier consistency.
pub fn stable_sort<T>(
	objs: impl IntoIterator<Item = T>,
	key: impl Fn(&T) -> usize,
	descending: bool,
) -> (Vec<usize>, Vec<T>) {
	let mut indexed_objs = objs.into_iter().enumerate().collect::<Vec<_>>();
	// NOTE: Important to use stable sorting for prover-verifier consistency!
	if descending {
		indexed_objs.sort_by(|a, b| key(&b.1).cmp(&key(&a.1)));
	} else {
		indexed_objs.sort_by(|a, b| key(&a.1).cmp(&key(&b.1)));
	}
	let (original_indices, sorted_objs) = indexed_objs.into_iter().unzip::<_, _, Vec<_>, Vec<_>>();
	(original_indices, sorted_objs)
}
