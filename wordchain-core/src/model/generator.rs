use log::{debug, trace};
use rand::Rng;

use super::chain::{ChainEntry, ChainModel};
use super::context::Context;
use super::generation_input::{FallbackPolicy, GenerationInput, StartSeed};
use crate::error::{ChainError, Result};

/// Walks a trained [`ChainModel`] to produce new token sequences.
///
/// # Responsibilities
/// - Seed the output with a starting context (random or custom)
/// - Extend the output one token at a time, sampling from the distribution
///   of the trailing `order` tokens
/// - Apply the configured [`FallbackPolicy`] when that window is unknown
///
/// The generator only borrows the model, so several generators can share
/// one model across threads. Each `generate` call is independent.
#[derive(Debug)]
pub struct Generator<'m> {
	model: &'m ChainModel,
	input: GenerationInput,
}

impl<'m> Generator<'m> {
	/// Creates a generator over `model`.
	///
	/// # Errors
	/// - [`ChainError::EmptyModel`] if the model has no context.
	/// - [`ChainError::InvalidSeed`] if a custom seed is not `order` tokens long.
	/// - [`ChainError::ContextNotFound`] if a custom seed is not a context of the model.
	pub fn new(model: &'m ChainModel, input: GenerationInput) -> Result<Self> {
		if model.is_empty() {
			return Err(ChainError::EmptyModel);
		}

		if let StartSeed::Custom(tokens) = &input.start_seed {
			if tokens.len() != model.order() {
				return Err(ChainError::InvalidSeed { expected: model.order(), got: tokens.len() });
			}
			if model.get(tokens).is_none() {
				return Err(ChainError::ContextNotFound(tokens.clone()));
			}
		}

		Ok(Self { model, input })
	}

	/// Generates exactly `num_words` tokens.
	///
	/// # Behavior
	/// - The first `order` tokens are the starting context (truncated if
	///   `num_words < order`).
	/// - Every following token is sampled from the distribution of the
	///   trailing `order` tokens, proportionally to its counts.
	/// - When the trailing window is unknown, `Reseed` emits the tokens of a
	///   new random context and `Fail` returns an error.
	///
	/// # Errors
	/// - [`ChainError::InvalidRequestSize`] if `num_words < 1`.
	/// - [`ChainError::ContextNotFound`] under [`FallbackPolicy::Fail`].
	pub fn generate<R: Rng + ?Sized>(&self, num_words: usize, rng: &mut R) -> Result<Vec<String>> {
		if num_words < 1 {
			return Err(ChainError::InvalidRequestSize(num_words));
		}

		let order = self.model.order();
		let mut output: Vec<String> = Vec::with_capacity(num_words);
		let mut reseeds = 0;

		let seed = self.seed_entry(rng)?;
		Self::emit(&mut output, seed.context(), num_words);

		while output.len() < num_words {
			let window = &output[output.len() - order..];
			let entry = match self.model.get(window) {
				Some(entry) => entry,
				None => match self.input.fallback {
					FallbackPolicy::Fail => return Err(ChainError::ContextNotFound(window.to_vec())),
					FallbackPolicy::Reseed => {
						let entry = self.random_entry(rng)?;
						trace!("Unknown context {:?}, reseeding from {}", window, entry.context());
						Self::emit(&mut output, entry.context(), num_words);
						reseeds += 1;
						continue;
					}
				},
			};

			let next = entry
				.distribution()
				.sample(rng)
				.ok_or_else(|| ChainError::ContextNotFound(window.to_vec()))?
				.to_owned();
			output.push(next);
		}

		debug!("Generated {} words ({} reseeds)", output.len(), reseeds);
		Ok(output)
	}

	/// Resolves the starting entry according to the start seed.
	fn seed_entry<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<&'m ChainEntry> {
		match &self.input.start_seed {
			StartSeed::Random => self.random_entry(rng),
			StartSeed::Custom(tokens) => {
				self.model.get(tokens).ok_or_else(|| ChainError::ContextNotFound(tokens.clone()))
			}
		}
	}

	fn random_entry<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<&'m ChainEntry> {
		self.model.random_entry(rng).ok_or(ChainError::EmptyModel)
	}

	/// Appends the tokens of `context`, without exceeding `limit` tokens in total.
	fn emit(output: &mut Vec<String>, context: &Context, limit: usize) {
		let remaining = limit.saturating_sub(output.len());
		output.extend(context.iter().take(remaining).cloned());
	}
}

/// Generates `num_words` tokens with the default input and the thread RNG.
///
/// # Errors
/// See [`Generator::new`] and [`Generator::generate`].
pub fn generate(model: &ChainModel, num_words: usize) -> Result<Vec<String>> {
	generate_with(model, num_words, &GenerationInput::default(), &mut rand::rng())
}

/// Generates `num_words` tokens with an explicit input and RNG.
pub fn generate_with<R: Rng + ?Sized>(
	model: &ChainModel,
	num_words: usize,
	input: &GenerationInput,
	rng: &mut R,
) -> Result<Vec<String>> {
	Generator::new(model, input.clone())?.generate(num_words, rng)
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	fn custom(tokens: &[&str], fallback: FallbackPolicy) -> GenerationInput {
		GenerationInput {
			fallback,
			start_seed: StartSeed::Custom(tokens.iter().map(|t| t.to_string()).collect()),
		}
	}

	#[test]
	fn dead_end_fails_under_fail_policy() {
		let model = ChainModel::train(&["a", "c"], 1).unwrap();
		let generator = Generator::new(&model, custom(&["a"], FallbackPolicy::Fail)).unwrap();
		let mut rng = StdRng::seed_from_u64(0);

		match generator.generate(3, &mut rng) {
			Err(ChainError::ContextNotFound(window)) => assert_eq!(window, vec!["c"]),
			other => panic!("expected ContextNotFound, got {other:?}"),
		}
	}

	#[test]
	fn dead_end_on_last_word_is_not_an_error() {
		let model = ChainModel::train(&["a", "c"], 1).unwrap();
		let generator = Generator::new(&model, custom(&["a"], FallbackPolicy::Fail)).unwrap();
		let mut rng = StdRng::seed_from_u64(0);
		assert_eq!(generator.generate(2, &mut rng).unwrap(), vec!["a", "c"]);
	}

	#[test]
	fn dead_end_reseeds_under_reseed_policy() {
		let model = ChainModel::train(&["a", "c"], 1).unwrap();
		let generator = Generator::new(&model, custom(&["a"], FallbackPolicy::Reseed)).unwrap();
		let mut rng = StdRng::seed_from_u64(0);
		assert_eq!(generator.generate(5, &mut rng).unwrap(), vec!["a", "c", "a", "c", "a"]);
	}

	#[test]
	fn reseed_is_truncated_to_the_budget() {
		let model = ChainModel::train(&["x", "y", "z"], 2).unwrap();
		let generator = Generator::new(&model, custom(&["x", "y"], FallbackPolicy::Reseed)).unwrap();
		let mut rng = StdRng::seed_from_u64(0);
		assert_eq!(generator.generate(4, &mut rng).unwrap(), vec!["x", "y", "z", "x"]);
	}

	#[test]
	fn seed_is_truncated_below_order() {
		let model = ChainModel::train(&["one", "two", "three", "four"], 3).unwrap();
		let mut rng = StdRng::seed_from_u64(0);
		let words = generate_with(&model, 2, &GenerationInput::default(), &mut rng).unwrap();
		assert_eq!(words, vec!["one", "two"]);
	}

	#[test]
	fn custom_seed_must_match_order() {
		let model = ChainModel::train(&["a", "b", "c"], 2).unwrap();
		let result = Generator::new(&model, custom(&["a"], FallbackPolicy::Reseed));
		assert!(matches!(result, Err(ChainError::InvalidSeed { expected: 2, got: 1 })));
	}

	#[test]
	fn custom_seed_must_be_known() {
		let model = ChainModel::train(&["a", "b", "c"], 2).unwrap();
		let result = Generator::new(&model, custom(&["b", "c"], FallbackPolicy::Reseed));
		assert!(matches!(result, Err(ChainError::ContextNotFound(_))));
	}

	#[test]
	fn zero_words_is_rejected() {
		let model = ChainModel::train(&["a", "b", "c"], 1).unwrap();
		let generator = Generator::new(&model, GenerationInput::default()).unwrap();
		let mut rng = StdRng::seed_from_u64(0);
		assert!(matches!(generator.generate(0, &mut rng), Err(ChainError::InvalidRequestSize(0))));
	}
}
