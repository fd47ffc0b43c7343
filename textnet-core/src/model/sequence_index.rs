use std::collections::HashMap;

use super::entry::Entry;
use super::sentence::Sentence;
use crate::error::{AnalyzerError, Result};
use crate::text::ngrams;

/// Represents an index of all word n-grams of one length.
///
/// The `SequenceIndex` maps the space-joined text of every n-gram found
/// in the corpus to an [`Entry`] holding the distinct sentences containing
/// it and its total occurrence count.
///
/// # Responsibilities
/// - Build the index from sentences
/// - Answer exact lookups in O(1) amortized time
/// - Merge with another index of the same length `n`
///
/// # Invariants
/// - `n` is always >= 1
/// - Every key is made of exactly `n` tokens
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SequenceIndex {
	/// The n-gram length.
	n: usize, // must be >= 1

	/// Mapping from n-gram text to its entry.
	entries: HashMap<String, Entry>,
}

impl SequenceIndex {
	/// Creates a new empty index for n-grams of length `n`.
	///
	/// # Errors
	/// Returns an error if `n < 1`.
	pub fn new(n: usize) -> Result<Self> {
		if n < 1 {
			return Err(AnalyzerError::invalid("n", n, "n-gram length must be >= 1"));
		}
		Ok(Self { n, entries: HashMap::new() })
	}

	/// Builds the index of all n-grams of length `n` in `sentences`.
	///
	/// Single-threaded; see [`super::index_cache::IndexCache`] for the
	/// parallel build.
	///
	/// # Errors
	/// Returns an error if `n < 1`.
	pub fn build(sentences: &[Sentence], n: usize) -> Result<Self> {
		let mut index = Self::new(n)?;
		for sentence in sentences {
			index.add_sentence(sentence);
		}
		Ok(index)
	}

	pub fn n(&self) -> usize {
		self.n
	}

	/// Number of distinct n-grams.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Adds every n-gram of `sentence` to the index.
	///
	/// Sentences shorter than `n` contribute nothing.
	pub fn add_sentence(&mut self, sentence: &Sentence) {
		for ngram in ngrams(sentence.tokens(), self.n) {
			let key = ngram.join(" ");
			let entry = self.entries.entry(key).or_insert_with_key(|key| Entry::new(key));
			entry.add_occurrence(sentence);
		}
	}

	/// Looks up an n-gram by its space-joined text.
	///
	/// Returns `None` if the n-gram never occurs.
	pub fn lookup(&self, ngram: &str) -> Option<&Entry> {
		self.entries.get(ngram)
	}

	/// Iterates over all entries, in no particular order.
	pub fn entries(&self) -> impl Iterator<Item = &Entry> {
		self.entries.values()
	}

	/// Returns every `(n-gram text, occurrence count)` pair sorted by text.
	pub fn counts(&self) -> Vec<(String, usize)> {
		let mut counts: Vec<(String, usize)> =
			self.entries.values().map(|entry| (entry.key().to_owned(), entry.count())).collect();
		counts.sort();
		counts
	}

	/// Merges another index into this one.
	///
	/// # Notes
	/// - Both indexes must have the same length `n`.
	/// - Sentence sets of matching entries are united, counts summed.
	///
	/// # Errors
	/// Returns an error if the lengths do not match.
	pub fn merge(&mut self, other: &Self) -> Result<()> {
		if self.n != other.n {
			return Err(AnalyzerError::Merge(format!("n mismatch: {} != {}", self.n, other.n)));
		}

		for (key, entry) in &other.entries {
			if let Some(existing) = self.entries.get_mut(key) {
				existing.merge(entry)?;
			} else {
				self.entries.insert(key.clone(), entry.clone());
			}
		}

		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn sentence(s: &str) -> Sentence {
		Sentence::new(s.split_whitespace().map(str::to_owned).collect())
	}

	fn corpus() -> Vec<Sentence> {
		vec![sentence("a b c"), sentence("b c d")]
	}

	#[test]
	fn rejects_zero_length() {
		assert!(matches!(SequenceIndex::new(0), Err(AnalyzerError::InvalidParameter { .. })));
	}

	#[test]
	fn bigram_index_matches_counts_and_sentences() {
		let index = SequenceIndex::build(&corpus(), 2).unwrap();
		assert_eq!(index.len(), 3);

		let ab = index.lookup("a b").unwrap();
		assert_eq!(ab.count(), 1);
		assert_eq!(ab.sentences().iter().collect::<Vec<_>>(), vec![&sentence("a b c")]);

		let bc = index.lookup("b c").unwrap();
		assert_eq!(bc.count(), 2);
		assert_eq!(bc.sentences().iter().collect::<Vec<_>>(), vec![&sentence("a b c"), &sentence("b c d")]);

		assert_eq!(index.lookup("c d").unwrap().count(), 1);
		assert!(index.lookup("a c").is_none());
	}

	#[test]
	fn repeated_ngram_counts_every_position() {
		let repeated = sentence("la la la");
		let index = SequenceIndex::build(&[repeated.clone(), repeated], 1).unwrap();
		let entry = index.lookup("la").unwrap();
		assert_eq!(entry.count(), 6);
		assert_eq!(entry.sentences().len(), 1);
	}

	#[test]
	fn count_is_never_below_sentence_set_size() {
		let corpus = vec![sentence("x y x y"), sentence("y x"), sentence("x"), sentence("x y")];
		for n in 1..=4 {
			let index = SequenceIndex::build(&corpus, n).unwrap();
			for entry in index.entries() {
				assert!(entry.count() >= entry.sentences().len());
			}
		}
	}

	#[test]
	fn every_ngram_of_every_sentence_is_covered() {
		let corpus = vec![sentence("one two three four"), sentence("two three"), sentence("four")];
		for n in 1..=3 {
			let index = SequenceIndex::build(&corpus, n).unwrap();
			for s in &corpus {
				for ngram in ngrams(s.tokens(), n) {
					let entry = index.lookup(&ngram.join(" ")).unwrap();
					assert!(entry.sentences().contains(s));
				}
			}
		}
	}

	#[test]
	fn build_is_idempotent() {
		let first = SequenceIndex::build(&corpus(), 2).unwrap();
		let second = SequenceIndex::build(&corpus(), 2).unwrap();
		assert_eq!(first, second);
		assert_eq!(first.counts(), second.counts());
	}

	#[test]
	fn merge_equals_single_build() {
		let corpus = corpus();
		let mut left = SequenceIndex::build(&corpus[..1], 2).unwrap();
		let right = SequenceIndex::build(&corpus[1..], 2).unwrap();
		left.merge(&right).unwrap();
		assert_eq!(left, SequenceIndex::build(&corpus, 2).unwrap());

		let other_length = SequenceIndex::new(3).unwrap();
		assert!(left.merge(&other_length).is_err());
	}

	#[test]
	fn counts_are_sorted_by_text() {
		let index = SequenceIndex::build(&corpus(), 1).unwrap();
		assert_eq!(
			index.counts(),
			vec![("a".to_owned(), 1), ("b".to_owned(), 2), ("c".to_owned(), 2), ("d".to_owned(), 1)]
		);
	}
}
