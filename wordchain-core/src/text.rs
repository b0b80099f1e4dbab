/// Characters that close a sentence when rendering generated prose.
const SENTENCE_TERMINATORS: [char; 3] = ['.', '!', '?'];

/// Splits raw text into word tokens.
///
/// - Tokens are separated by runs of Unicode whitespace
/// - Leading and trailing whitespace never yields an empty token
/// - No case or punctuation normalization is applied
pub fn split_words(text: &str) -> Vec<String> {
	text.split_whitespace().map(str::to_owned).collect()
}

/// Joins generated tokens into a single line of prose.
///
/// Tokens are joined once with single spaces, then double quotes are
/// stripped: the chain cannot remember an opened quote, so the ones it
/// emits are rarely balanced.
pub fn to_prose<S: AsRef<str>>(words: &[S]) -> String {
	let mut prose = String::with_capacity(words.iter().map(|w| w.as_ref().len() + 1).sum());
	for (i, word) in words.iter().enumerate() {
		if i > 0 {
			prose.push(' ');
		}
		prose.push_str(word.as_ref());
	}
	prose.retain(|c| c != '"');
	prose
}

/// Splits prose into display sentences.
///
/// Example:
/// `"of it. The sea was calm! Was it? and then"` → `["The sea was calm.", "Was it."]`
///
/// # Notes
/// - The fragment before the first terminator starts mid-sentence and is dropped.
/// - The fragment after the last terminator is unterminated and is dropped.
/// - Kept sentences are trimmed and always end with `.`.
/// - Only `.`, `!` and `?` terminate a sentence; `|` is ordinary text.
pub fn split_sentences(prose: &str) -> Vec<String> {
	let fragments: Vec<&str> = prose.split(SENTENCE_TERMINATORS).collect();
	if fragments.len() < 3 {
		return Vec::new();
	}

	fragments[1..fragments.len() - 1]
		.iter()
		.map(|fragment| fragment.trim())
		.filter(|fragment| !fragment.is_empty())
		.map(|fragment| format!("{fragment}."))
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn split_words_collapses_whitespace_runs() {
		let words = split_words("  the\tsea \n\n was   calm  ");
		assert_eq!(words, vec!["the", "sea", "was", "calm"]);
	}

	#[test]
	fn split_words_keeps_punctuation_and_case() {
		assert_eq!(split_words("Hello, World!"), vec!["Hello,", "World!"]);
	}

	#[test]
	fn split_words_empty_input() {
		assert!(split_words("").is_empty());
		assert!(split_words(" \t\n ").is_empty());
	}

	#[test]
	fn to_prose_joins_and_strips_quotes() {
		let words = ["\"Captain", "Nemo\"", "said."];
		assert_eq!(to_prose(&words), "Captain Nemo said.");
	}

	#[test]
	fn to_prose_empty() {
		let words: [&str; 0] = [];
		assert_eq!(to_prose(&words), "");
	}

	#[test]
	fn split_sentences_drops_leading_and_trailing_fragments() {
		let sentences = split_sentences("of it. The sea was calm! Was it? and then");
		assert_eq!(sentences, vec!["The sea was calm.", "Was it."]);
	}

	#[test]
	fn split_sentences_skips_empty_fragments() {
		let sentences = split_sentences("start. One... Two. end");
		assert_eq!(sentences, vec!["One.", "Two."]);
	}

	#[test]
	fn split_sentences_keeps_pipes() {
		let sentences = split_sentences("x. left | right. y");
		assert_eq!(sentences, vec!["left | right."]);
	}

	#[test]
	fn split_sentences_needs_two_terminators() {
		assert!(split_sentences("no terminator here").is_empty());
		assert!(split_sentences("only one. here").is_empty());
	}
}
