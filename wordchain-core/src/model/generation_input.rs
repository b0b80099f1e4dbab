use std::fmt;
use std::str::FromStr;

/// What the generator does when the trailing window of its output was never
/// recorded as a context.
///
/// This happens when the sampled token was the last token of a corpus: the
/// window ending on it never had a follower, so it never became a context.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FallbackPolicy {
	/// Pick a new context uniformly at random, emit its tokens and carry on.
	#[default]
	Reseed,
	/// Stop and report `ContextNotFound`.
	Fail,
}

impl FromStr for FallbackPolicy {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_lowercase().as_str() {
			"reseed" => Ok(Self::Reseed),
			"fail" => Ok(Self::Fail),
			_ => Err(format!("invalid fallback policy: {s:?} (expected \"reseed\" or \"fail\")")),
		}
	}
}

impl fmt::Display for FallbackPolicy {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Reseed => write!(f, "reseed"),
			Self::Fail => write!(f, "fail"),
		}
	}
}

/// Strategy used to select the starting context of a generation.
///
/// # Variants
/// - `Random`: pick one of the model's contexts uniformly at random.
/// - `Custom(tokens)`: start from the given tokens, which must form a
///   context of the model.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum StartSeed {
	#[default]
	Random,
	Custom(Vec<String>),
}

/// Generation parameters shared by every call of a `Generator`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GenerationInput {
	/// Behavior when the trailing window is not a known context.
	pub fallback: FallbackPolicy,

	/// How the first `order` tokens are chosen.
	pub start_seed: StartSeed,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn defaults_reseed_from_random_context() {
		let input = GenerationInput::default();
		assert_eq!(input.fallback, FallbackPolicy::Reseed);
		assert_eq!(input.start_seed, StartSeed::Random);
	}

	#[test]
	fn fallback_policy_parses_case_insensitively() {
		assert_eq!("Reseed".parse::<FallbackPolicy>(), Ok(FallbackPolicy::Reseed));
		assert_eq!("FAIL".parse::<FallbackPolicy>(), Ok(FallbackPolicy::Fail));
		assert!("retry".parse::<FallbackPolicy>().is_err());
	}

	#[test]
	fn fallback_policy_display_round_trips() {
		for policy in [FallbackPolicy::Reseed, FallbackPolicy::Fail] {
			assert_eq!(policy.to_string().parse::<FallbackPolicy>(), Ok(policy));
		}
	}
}
