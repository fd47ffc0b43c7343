use std::collections::HashSet;

/// Normalizes a raw string.
///
/// - Lowercases every character
/// - Replaces each ASCII punctuation character with a space
/// - Collapses consecutive whitespace into a single space
/// - Trims both ends
///
/// Example:
/// `"Hello,   World!"` → `"hello world"`
pub fn process_string(raw: &str) -> String {
	let replaced: String = raw
		.chars()
		.flat_map(char::to_lowercase)
		.map(|c| if c.is_ascii_punctuation() { ' ' } else { c })
		.collect();

	replaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Set of words removed from every sentence, name and query.
#[derive(Clone, Debug, Default)]
pub struct StopWords {
	words: HashSet<String>,
}

impl StopWords {
	/// Creates a stop-word set from any list of words.
	///
	/// Words are stored as given; they are compared against already
	/// normalized tokens.
	pub fn new<I, S>(words: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self { words: words.into_iter().map(Into::into).collect() }
	}

	/// Returns `true` if `word` must be removed.
	pub fn contains(&self, word: &str) -> bool {
		self.words.contains(word)
	}

	pub fn len(&self) -> usize {
		self.words.len()
	}

	pub fn is_empty(&self) -> bool {
		self.words.is_empty()
	}

	/// Drops stop words from `tokens`, keeping order.
	pub fn remove_from(&self, tokens: Vec<String>) -> Vec<String> {
		tokens.into_iter().filter(|token| !self.contains(token)).collect()
	}
}

/// Normalizes `raw`, splits it into words and removes stop words.
///
/// Returns an empty vector when nothing survives.
pub fn tokenize(raw: &str, stop_words: &StopWords) -> Vec<String> {
	let tokens = process_string(raw).split(' ').filter(|t| !t.is_empty()).map(str::to_owned).collect();
	stop_words.remove_from(tokens)
}

/// Iterates over all contiguous spans of `n` tokens.
///
/// Yields nothing if `tokens` is shorter than `n` or if `n == 0`.
pub fn ngrams(tokens: &[String], n: usize) -> impl Iterator<Item = &[String]> {
	let count = if n == 0 || tokens.len() < n { 0 } else { tokens.len() - n + 1 };
	(0..count).map(move |i| &tokens[i..i + n])
}

#[cfg(test)]
mod tests {
	use super::*;

	fn words(s: &str) -> Vec<String> {
		s.split_whitespace().map(str::to_owned).collect()
	}

	#[test]
	fn process_string_strips_punctuation_and_spaces() {
		assert_eq!(process_string("  Hello,   World!! "), "hello world");
		assert_eq!(process_string("Harry's wand-maker"), "harry s wand maker");
		assert_eq!(process_string("?!."), "");
	}

	#[test]
	fn tokenize_removes_stop_words() {
		let stop_words = StopWords::new(["the", "a"]);
		assert_eq!(tokenize("The boy saw a Dragon.", &stop_words), words("boy saw dragon"));
		assert!(tokenize("the A", &stop_words).is_empty());
	}

	#[test]
	fn ngrams_of_every_length() {
		let tokens = words("a b c");
		let bigrams: Vec<_> = ngrams(&tokens, 2).map(|g| g.join(" ")).collect();
		assert_eq!(bigrams, vec!["a b", "b c"]);
		assert_eq!(ngrams(&tokens, 3).count(), 1);
		assert_eq!(ngrams(&tokens, 4).count(), 0);
		assert_eq!(ngrams(&tokens, 0).count(), 0);
	}
}
