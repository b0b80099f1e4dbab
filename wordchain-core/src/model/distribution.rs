use std::collections::BTreeMap;

use rand::Rng;

use super::sampling::pick_weighted;

/// Observed next-token counts for a single context.
///
/// Conceptually, this is the set of outgoing edges of one node in the
/// Markov chain, each edge weighted by its number of observations.
///
/// ## Invariants
/// - Each token appears at most once
/// - Each count is strictly positive
/// - `total` is the sum of all counts
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Distribution {
	/// Outgoing transitions indexed by the next token.
	/// Example: { "sea" => 42, "ship" => 3 }
	transitions: BTreeMap<String, usize>,
	total: usize,
}

impl Distribution {
	/// Records one occurrence of `next` following this context.
	///
	/// - If the token was already seen, its count is increased.
	/// - Otherwise it is inserted with a count of 1.
	pub(crate) fn add_transition(&mut self, next: &str) {
		match self.transitions.get_mut(next) {
			Some(count) => *count += 1,
			None => {
				self.transitions.insert(next.to_owned(), 1);
			}
		}
		self.total += 1;
	}

	/// Adds every count of `other` into this distribution.
	pub(crate) fn merge(&mut self, other: &Self) {
		for (token, count) in &other.transitions {
			*self.transitions.entry(token.clone()).or_insert(0) += count;
		}
		self.total += other.total;
	}

	/// Number of times `token` followed this context (0 if never).
	pub fn count(&self, token: &str) -> usize {
		self.transitions.get(token).copied().unwrap_or(0)
	}

	/// Sum of all counts.
	pub fn total(&self) -> usize {
		self.total
	}

	/// Number of distinct next tokens.
	pub fn len(&self) -> usize {
		self.transitions.len()
	}

	pub fn is_empty(&self) -> bool {
		self.transitions.is_empty()
	}

	/// Iterates over `(token, count)` pairs, sorted by token.
	pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> + Clone {
		self.transitions.iter().map(|(token, count)| (token.as_str(), *count))
	}

	/// Samples the next token with probability `count / total`.
	///
	/// Returns `None` if the distribution is empty.
	pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
		pick_weighted(self.iter(), rng)
	}
}

impl<S: AsRef<str>> FromIterator<S> for Distribution {
	/// Builds a distribution by observing each token once, in order.
	fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
		let mut distribution = Self::default();
		for token in iter {
			distribution.add_transition(token.as_ref());
		}
		distribution
	}
}
