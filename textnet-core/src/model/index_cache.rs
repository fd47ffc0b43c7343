use std::collections::{hash_map, BTreeSet, HashMap};
use std::sync::mpsc;
use std::thread;

use log::debug;

use super::entry::Entry;
use super::sentence::Sentence;
use super::sequence_index::SequenceIndex;
use crate::error::Result;

/// Number of chunks per CPU when splitting the corpus for a parallel build.
const CHUNK_FACTOR: usize = 4;

/// Corpora smaller than this are indexed on the calling thread.
const PARALLEL_THRESHOLD: usize = 512;

/// Per-length cache of [`SequenceIndex`]es over one corpus.
///
/// Each length is built at most once per cache. Lookups resolve any
/// n-gram against the index of its own length.
#[derive(Debug, Default)]
pub struct IndexCache {
	indexes: HashMap<usize, SequenceIndex>,
}

impl IndexCache {
	pub fn new() -> Self {
		Self::default()
	}

	/// Lengths already built.
	pub fn lengths(&self) -> BTreeSet<usize> {
		self.indexes.keys().copied().collect()
	}

	/// Returns the index of length `n`, building it if needed.
	///
	/// # Errors
	/// Returns an error if `n < 1`.
	pub fn get_or_build(&mut self, corpus: &[Sentence], n: usize) -> Result<&SequenceIndex> {
		match self.indexes.entry(n) {
			hash_map::Entry::Occupied(cached) => Ok(cached.into_mut()),
			hash_map::Entry::Vacant(slot) => Ok(slot.insert(build_parallel(corpus, n)?)),
		}
	}

	/// Builds every distinct length in `lengths` that is not cached yet.
	///
	/// # Errors
	/// Returns an error if any length is `< 1`.
	pub fn ensure<I>(&mut self, corpus: &[Sentence], lengths: I) -> Result<()>
	where
		I: IntoIterator<Item = usize>,
	{
		let missing: BTreeSet<usize> = lengths.into_iter().filter(|n| !self.indexes.contains_key(n)).collect();
		for n in missing {
			self.get_or_build(corpus, n)?;
		}
		Ok(())
	}

	/// Looks up an n-gram given as tokens in the index of its length.
	///
	/// Returns `None` for an empty n-gram, an unbuilt length or a miss.
	pub fn lookup(&self, ngram: &[String]) -> Option<&Entry> {
		self.indexes.get(&ngram.len())?.lookup(&ngram.join(" "))
	}
}

/// Builds the index of length `n`, splitting the corpus into chunks indexed
/// on worker threads and merged on the calling thread.
///
/// # Behavior
/// - Splits sentences into chunks (based on CPU cores * factor).
/// - Spawns one thread per chunk, each building a partial index.
/// - Merges all partial indexes once every worker has reported.
///
/// # Notes
/// - Small corpora skip the threads entirely.
/// - The result does not depend on chunking: merge unites sentence sets
///   and sums counts.
pub fn build_parallel(corpus: &[Sentence], n: usize) -> Result<SequenceIndex> {
	let mut final_index = SequenceIndex::new(n)?;
	if corpus.len() < PARALLEL_THRESHOLD {
		for sentence in corpus {
			final_index.add_sentence(sentence);
		}
		debug!("built {n}-gram index with {} entries", final_index.len());
		return Ok(final_index);
	}

	let chunks = num_cpus::get() * CHUNK_FACTOR;
	let chunk_size = corpus.len().div_ceil(chunks).max(1);

	let (tx, rx) = mpsc::channel();
	for chunk in corpus.chunks(chunk_size) {
		let tx = tx.clone();
		let chunk: Vec<Sentence> = chunk.to_vec();

		thread::spawn(move || {
			let partial = SequenceIndex::build(&chunk, n);
			// The receiver outlives every worker
			let _ = tx.send(partial);
		});
	}
	drop(tx);

	for partial in rx.iter() {
		final_index.merge(&partial?)?;
	}

	debug!("built {n}-gram index with {} entries from {} sentences", final_index.len(), corpus.len());
	Ok(final_index)
}
