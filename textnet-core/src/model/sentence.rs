use std::fmt;

use serde::{Deserialize, Serialize};

/// A normalized sentence: an ordered list of tokens.
///
/// Two sentences with the same tokens are equal regardless of where they
/// appear in the corpus. Ordering is lexicographic over the tokens, which
/// matches ordering over the space-joined text since tokens never contain
/// whitespace.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct Sentence(Vec<String>);

impl Sentence {
	pub fn new(tokens: Vec<String>) -> Self {
		Self(tokens)
	}

	pub fn tokens(&self) -> &[String] {
		&self.0
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl From<Vec<String>> for Sentence {
	fn from(tokens: Vec<String>) -> Self {
		Self(tokens)
	}
}

impl fmt::Display for Sentence {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0.join(" "))
	}
}

/// Ordered list of sentences. Order defines windows; duplicates are kept.
pub type Corpus = Vec<Sentence>;
