use rand::Rng;

/// Picks one value from `(value, weight)` pairs with probability
/// `weight / total`.
///
/// This performs:
/// - an O(n) scan to compute the total weight
/// - one draw in `[0, total)`
/// - a cumulative subtraction to select a bucket
///
/// Returns `None` if the collection is empty or every weight is zero.
pub fn pick_weighted<T, I, R>(items: I, rng: &mut R) -> Option<T>
where
	I: IntoIterator<Item = (T, usize)>,
	I::IntoIter: Clone,
	R: Rng + ?Sized,
{
	let items = items.into_iter();
	let total: usize = items.clone().map(|(_, weight)| weight).sum();
	if total == 0 {
		return None;
	}

	let mut r = rng.random_range(0..total);
	for (value, weight) in items {
		if r < weight {
			return Some(value);
		}
		r -= weight;
	}

	// r < total, so the scan always lands in a bucket
	None
}
