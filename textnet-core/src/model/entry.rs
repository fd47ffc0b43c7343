use std::collections::BTreeSet;

use super::sentence::Sentence;
use crate::error::{AnalyzerError, Result};

/// Represents the lookup result for one n-gram.
///
/// An `Entry` corresponds to a fixed n-gram text (`key`) and stores the
/// distinct sentences containing it plus how many times it occurred.
///
/// ## Responsibilities:
/// - Accumulate occurrences during an index build
/// - Merge with another entry having the same key (parallel build support)
///
/// ## Invariants
/// - `sentences.len() <= count`, equal when the n-gram appears at most
///   once per containing sentence
/// - `count >= 1`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
	/// Space-joined n-gram text.
	key: String,
	/// Distinct sentences containing the n-gram, sorted.
	sentences: BTreeSet<Sentence>,
	/// Occurrences across every position of every sentence.
	count: usize,
}

impl Entry {
	/// Creates a new empty entry for the given n-gram text.
	pub(crate) fn new(key: &str) -> Self {
		Self { key: key.to_owned(), sentences: BTreeSet::new(), count: 0 }
	}

	/// Records one occurrence of the n-gram inside `sentence`.
	pub(crate) fn add_occurrence(&mut self, sentence: &Sentence) {
		if !self.sentences.contains(sentence) {
			self.sentences.insert(sentence.clone());
		}
		self.count += 1;
	}

	pub fn key(&self) -> &str {
		&self.key
	}

	/// Distinct sentences containing the n-gram, in sorted order.
	pub fn sentences(&self) -> &BTreeSet<Sentence> {
		&self.sentences
	}

	/// Total number of occurrences.
	pub fn count(&self) -> usize {
		self.count
	}

	/// Merges another entry into this one.
	///
	/// Sentence sets are united and counts summed.
	///
	/// # Errors
	/// Returns an error if the keys do not match.
	pub(crate) fn merge(&mut self, other: &Self) -> Result<()> {
		if self.key != other.key {
			return Err(AnalyzerError::Merge(format!("key mismatch: {} != {}", self.key, other.key)));
		}
		self.sentences.extend(other.sentences.iter().cloned());
		self.count += other.count;
		Ok(())
	}
}
