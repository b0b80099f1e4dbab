use std::collections::HashMap;

use log::debug;
use rand::Rng;
use rand::seq::IndexedRandom;

use super::context::Context;
use super::distribution::Distribution;
use crate::error::{ChainError, Result};

/// One learned context and the tokens observed right after it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChainEntry {
	context: Context,
	distribution: Distribution,
}

impl ChainEntry {
	pub fn context(&self) -> &Context {
		&self.context
	}

	pub fn distribution(&self) -> &Distribution {
		&self.distribution
	}
}

/// Mutable accumulator for a word-level Markov chain of order `n`.
///
/// # Responsibilities
/// - Slide an `n`-token window over token sequences
/// - Accumulate next-token counts per distinct context
/// - Merge with another builder of the same order
///
/// Once training is done, `freeze` hands the counts over to an immutable
/// [`ChainModel`]; the builder is consumed so nothing can be added afterwards.
///
/// # Invariants
/// - `order` is always >= 1
/// - Every context has exactly `order` tokens and appears once in `entries`
/// - `index[context]` is the position of that context in `entries`
#[derive(Clone, Debug)]
pub struct ChainBuilder {
	order: usize,
	index: HashMap<Context, usize>,
	entries: Vec<ChainEntry>,
}

impl ChainBuilder {
	/// Creates an empty builder for a chain of order `order`.
	///
	/// # Errors
	/// Returns [`ChainError::InvalidOrder`] if `order < 1`.
	pub fn new(order: usize) -> Result<Self> {
		if order < 1 {
			return Err(ChainError::InvalidOrder(order));
		}
		Ok(Self { order, index: HashMap::new(), entries: Vec::new() })
	}

	pub fn order(&self) -> usize {
		self.order
	}

	/// Records every `(context, next token)` pair of a token sequence.
	///
	/// Windows never cross the boundary between two `feed` calls, so feeding
	/// several corpora is not the same as feeding their concatenation.
	///
	/// # Notes
	/// - Sequences with `order` tokens or fewer contribute nothing.
	pub fn feed<S: AsRef<str>>(&mut self, tokens: &[S]) -> &mut Self {
		if tokens.len() <= self.order {
			return self;
		}

		let tokens: Vec<String> = tokens.iter().map(|t| t.as_ref().to_owned()).collect();
		for window in tokens.windows(self.order + 1) {
			let (context, next) = window.split_at(self.order);
			self.observe(context, &next[0]);
		}
		self
	}

	/// Records one occurrence of `next` following `context`.
	fn observe(&mut self, context: &[String], next: &str) {
		let position = match self.index.get(context) {
			Some(&position) => position,
			None => {
				let context = Context::new(context);
				self.entries.push(ChainEntry { context: context.clone(), distribution: Distribution::default() });
				self.index.insert(context, self.entries.len() - 1);
				self.entries.len() - 1
			}
		};
		self.entries[position].distribution.add_transition(next);
	}

	/// Merges another builder into this one.
	///
	/// # Notes
	/// - Counts of matching contexts and tokens are summed.
	/// - Contexts unknown to `self` are appended in `other`'s order.
	///
	/// # Errors
	/// Returns [`ChainError::InvalidOrder`] if the orders do not match.
	pub fn merge(&mut self, other: &Self) -> Result<()> {
		if self.order != other.order {
			return Err(ChainError::InvalidOrder(other.order));
		}

		for entry in &other.entries {
			match self.index.get(entry.context.tokens()) {
				Some(&position) => self.entries[position].distribution.merge(&entry.distribution),
				None => {
					self.entries.push(entry.clone());
					self.index.insert(entry.context.clone(), self.entries.len() - 1);
				}
			}
		}

		Ok(())
	}

	/// Finishes training and returns the read-only model.
	pub fn freeze(self) -> ChainModel {
		let model = ChainModel { order: self.order, index: self.index, entries: self.entries };
		debug!(
			"Chain frozen: order {}, {} contexts, {} observations",
			model.order,
			model.len(),
			model.total_observations()
		);
		model
	}
}

/// Immutable word-level Markov chain.
///
/// Produced by [`ChainBuilder::freeze`] or [`ChainModel::train`]; nothing
/// can modify it afterwards, so one model can be shared by any number of
/// concurrent generators.
#[derive(Clone, Debug)]
pub struct ChainModel {
	order: usize,
	index: HashMap<Context, usize>,
	entries: Vec<ChainEntry>,
}

impl ChainModel {
	/// Trains a chain of order `order` over a single token sequence.
	///
	/// If `tokens.len() <= order` the model is empty, which is valid here
	/// but rejected by generation.
	///
	/// # Errors
	/// Returns [`ChainError::InvalidOrder`] if `order < 1`.
	pub fn train<S: AsRef<str>>(tokens: &[S], order: usize) -> Result<Self> {
		let mut builder = ChainBuilder::new(order)?;
		builder.feed(tokens);
		Ok(builder.freeze())
	}

	pub fn order(&self) -> usize {
		self.order
	}

	/// Number of distinct contexts.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Looks up the entry for a window of exactly `order` tokens.
	pub fn get(&self, window: &[String]) -> Option<&ChainEntry> {
		self.index.get(window).map(|&position| &self.entries[position])
	}

	/// All entries, in the order their context was first observed.
	pub fn entries(&self) -> &[ChainEntry] {
		&self.entries
	}

	/// Picks one entry uniformly at random, `None` if the model is empty.
	pub fn random_entry<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&ChainEntry> {
		self.entries.choose(rng)
	}

	/// Sum of every count in the chain, i.e. the number of windows seen.
	pub fn total_observations(&self) -> usize {
		self.entries.iter().map(|entry| entry.distribution.total()).sum()
	}
}

impl PartialEq for ChainModel {
	/// Models are equal when they hold the same contexts with the same
	/// counts, whatever order the contexts were first seen in.
	fn eq(&self, other: &Self) -> bool {
		self.order == other.order
			&& self.len() == other.len()
			&& self.entries.iter().all(|entry| {
				other
					.get(entry.context.tokens())
					.is_some_and(|theirs| theirs.distribution == entry.distribution)
			})
	}
}

impl Eq for ChainModel {}
