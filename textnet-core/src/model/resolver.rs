use std::collections::{BTreeMap, BTreeSet};

use log::debug;

use super::index_cache::IndexCache;
use super::person::{Person, Roster};
use super::sentence::Sentence;
use crate::error::Result;

/// Canonical name → distinct sentences mentioning the person.
///
/// Persons without any matching sentence have no entry.
pub type PersonSentences = BTreeMap<String, BTreeSet<Sentence>>;

/// Returns the distinct sentences in which any of the person's search
/// phrases occurs.
///
/// The lengths of every phrase must already be built in `cache`
/// (see [`IndexCache::ensure`]); phrases of unbuilt lengths resolve to nothing.
pub fn resolve(person: &Person, cache: &IndexCache) -> BTreeSet<Sentence> {
	person
		.search_phrases()
		.iter()
		.filter_map(|phrase| cache.lookup(phrase))
		.flat_map(|entry| entry.sentences().iter().cloned())
		.collect()
}

/// Resolves every person of the roster.
///
/// Builds the index lengths needed by all search phrases once, then
/// resolves each person against the cache.
///
/// # Errors
/// Only fails if an index cannot be built.
pub fn map_persons_to_sentences(roster: &Roster, corpus: &[Sentence], cache: &mut IndexCache) -> Result<PersonSentences> {
	let lengths: BTreeSet<usize> = roster
		.iter()
		.flat_map(|person| person.search_phrases())
		.map(|phrase| phrase.len())
		.filter(|len| *len > 0)
		.collect();
	cache.ensure(corpus, lengths)?;

	let mut mapping = PersonSentences::new();
	for person in roster {
		let sentences = resolve(person, cache);
		if !sentences.is_empty() {
			mapping.insert(person.full_name(), sentences);
		}
	}

	debug!("resolved {} of {} persons to sentences", mapping.len(), roster.len());
	Ok(mapping)
}
