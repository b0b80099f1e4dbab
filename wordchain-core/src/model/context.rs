use std::borrow::Borrow;
use std::fmt;
use std::ops::Deref;

/// A fixed-length window of tokens used as a chain key.
///
/// Contexts compare and hash by value, exactly like the `[String]` slice
/// they wrap, so a borrowed window of the output can be looked up in a map
/// keyed by `Context` without allocating.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Context(Box<[String]>);

impl Context {
	pub fn new(tokens: &[String]) -> Self {
		Self(tokens.into())
	}

	pub fn tokens(&self) -> &[String] {
		&self.0
	}
}

impl Deref for Context {
	type Target = [String];

	fn deref(&self) -> &[String] {
		&self.0
	}
}

impl Borrow<[String]> for Context {
	fn borrow(&self) -> &[String] {
		&self.0
	}
}

impl fmt::Display for Context {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "[{}]", self.0.join(" "))
	}
}
