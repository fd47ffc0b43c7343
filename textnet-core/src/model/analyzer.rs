use std::collections::{BTreeMap, BTreeSet};

use log::info;

use super::graph::CoOccurrenceGraph;
use super::index_cache::IndexCache;
use super::params::{GraphParams, PathParams};
use super::path_finder::{has_path_of_at_least, is_connected};
use super::person::Roster;
use super::resolver::{map_persons_to_sentences, PersonSentences};
use super::sentence::{Corpus, Sentence};
use super::source::Source;
use crate::error::{AnalyzerError, Result};
use crate::text::{ngrams, StopWords};

/// `("{len}_seq", [(n-gram text, count), ...])` for one length.
pub type SequenceCounts = (String, Vec<(String, usize)>);

/// `(n-gram text, sentences containing it)`.
pub type SequenceMatch = (String, Vec<Sentence>);

/// `(canonical name, n-grams drawn from the person's sentences)`.
pub type PersonContext = (String, Vec<Vec<String>>);

/// Two connected persons, each as canonical name tokens.
pub type Connection = [Vec<String>; 2];

/// `(first name, second name, answer)` for a pair query.
pub type PairAnswer = (String, String, bool);

/// High-level analyzer over one corpus and one roster.
///
/// # Responsibilities
/// - Own the immutable corpus, roster and stop words of a run
/// - Cache sequence indexes per n-gram length across operations
/// - Expose every analysis: sequence counts, mention counts, sequence
///   search, person contexts, co-occurrence edges and path queries
///
/// Operations take `&mut self` only to fill the index cache; the corpus
/// and roster never change after construction.
#[derive(Debug)]
pub struct TextAnalyzer {
	corpus: Corpus,
	roster: Roster,
	stop_words: StopWords,
	cache: IndexCache,
}

impl TextAnalyzer {
	/// Creates an analyzer by loading `source`.
	///
	/// # Errors
	/// Returns an error if the source cannot be read or parsed.
	pub fn new(source: Source, stop_words: StopWords) -> Result<Self> {
		let (corpus, roster) = source.load(&stop_words)?;
		Ok(Self { corpus, roster, stop_words, cache: IndexCache::new() })
	}

	/// Creates an analyzer over data that is already normalized.
	pub fn from_parts(corpus: Corpus, roster: Roster, stop_words: StopWords) -> Result<Self> {
		Self::new(Source::Loaded { corpus, roster }, stop_words)
	}

	/// Returns the corpus and the roster as loaded.
	pub fn processed(&self) -> (&Corpus, &Roster) {
		(&self.corpus, &self.roster)
	}

	/// Stop words used to normalize raw input and queries.
	pub fn stop_words(&self) -> &StopWords {
		&self.stop_words
	}

	/// Counts every n-gram of every length from 1 to `max_n`.
	///
	/// # Returns
	/// One `("{len}_seq", counts)` group per length, counts sorted by n-gram text.
	///
	/// # Errors
	/// Returns an error if `max_n < 1`.
	pub fn count_sequences(&mut self, max_n: usize) -> Result<Vec<SequenceCounts>> {
		check_length("max_n", max_n)?;
		info!("counting sequences up to length {max_n}");

		let mut results = Vec::with_capacity(max_n);
		for n in 1..=max_n {
			let index = self.cache.get_or_build(&self.corpus, n)?;
			results.push((format!("{n}_seq"), index.counts()));
		}
		Ok(results)
	}

	/// Counts how many times each person is mentioned.
	///
	/// Every distinct word of the canonical name and of the aliases is
	/// counted as a whole-token occurrence over the corpus, and the counts
	/// are summed. Persons never mentioned are omitted.
	///
	/// # Returns
	/// `(canonical name, count)` pairs sorted by name.
	pub fn count_person_mentions(&mut self) -> Result<Vec<(String, usize)>> {
		info!("counting mentions of {} persons", self.roster.len());
		let unigrams = self.cache.get_or_build(&self.corpus, 1)?;

		let mut mentions: Vec<(String, usize)> = self
			.roster
			.iter()
			.map(|person| {
				let count = person
					.mention_words()
					.into_iter()
					.filter_map(|word| unigrams.lookup(word))
					.map(|entry| entry.count())
					.sum();
				(person.full_name(), count)
			})
			.filter(|(_, count)| *count > 0)
			.collect();

		mentions.sort();
		Ok(mentions)
	}

	/// Finds the sentences containing each queried n-gram.
	///
	/// Only the distinct query lengths are indexed. Queries are matched
	/// exactly; missing n-grams are left out of the result.
	///
	/// # Returns
	/// `(n-gram text, sorted sentences)` pairs sorted by text, one per
	/// distinct query.
	pub fn search_sequences(&mut self, queries: &[Vec<String>]) -> Result<Vec<SequenceMatch>> {
		let lengths: BTreeSet<usize> = queries.iter().map(Vec::len).filter(|len| *len > 0).collect();
		info!("searching {} sequences over {} lengths", queries.len(), lengths.len());
		self.cache.ensure(&self.corpus, lengths)?;

		let matches: BTreeMap<String, Vec<Sentence>> = queries
			.iter()
			.filter_map(|query| self.cache.lookup(query))
			.map(|entry| (entry.key().to_owned(), entry.sentences().iter().cloned().collect()))
			.collect();

		Ok(matches.into_iter().collect())
	}

	/// Maps every mentioned person to the distinct sentences mentioning them.
	pub fn persons_to_sentences(&mut self) -> Result<PersonSentences> {
		map_persons_to_sentences(&self.roster, &self.corpus, &mut self.cache)
	}

	/// Collects, for each mentioned person, the distinct n-grams of lengths
	/// 1 to `max_n` found in their sentences.
	///
	/// # Returns
	/// `(canonical name, sorted n-grams as token lists)` pairs sorted by name.
	///
	/// # Errors
	/// Returns an error if `max_n < 1`.
	pub fn people_context(&mut self, max_n: usize) -> Result<Vec<PersonContext>> {
		check_length("max_n", max_n)?;
		info!("collecting person contexts up to length {max_n}");

		let contexts = self
			.persons_to_sentences()?
			.into_iter()
			.map(|(name, sentences)| {
				let context: BTreeSet<Vec<String>> = sentences
					.iter()
					.flat_map(|sentence| (1..=max_n).flat_map(move |n| ngrams(sentence.tokens(), n)))
					.map(<[String]>::to_vec)
					.collect();
				(name, context.into_iter().collect())
			})
			.collect();
		Ok(contexts)
	}

	/// Builds the co-occurrence graph for the given parameters.
	pub fn graph(&mut self, params: &GraphParams) -> Result<CoOccurrenceGraph> {
		let persons = self.persons_to_sentences()?;
		Ok(CoOccurrenceGraph::build(&persons, &self.corpus, params))
	}

	/// Lists the pairs of persons connected in the co-occurrence graph.
	///
	/// # Returns
	/// Each pair sorted, as canonical name tokens; pairs sorted.
	pub fn find_connections(&mut self, params: &GraphParams) -> Result<Vec<Connection>> {
		info!(
			"finding connections with window size {} and threshold {}",
			params.window_size(),
			params.threshold()
		);
		let graph = self.graph(params)?;

		let mut connections: Vec<Connection> = graph
			.edges()
			.into_iter()
			.map(|(a, b)| [split_name(a), split_name(b)])
			.collect();
		connections.sort();
		Ok(connections)
	}

	/// Answers, for each pair, whether the two persons are connected by a
	/// path of at most `path_params.max_len()` nodes.
	///
	/// # Returns
	/// One answer per pair, sorted by the first name (stable for ties).
	pub fn indirect_connections(
		&mut self,
		pairs: &[(String, String)],
		graph_params: &GraphParams,
		path_params: &PathParams,
	) -> Result<Vec<PairAnswer>> {
		info!("checking {} indirect connections within {} nodes", pairs.len(), path_params.max_len());
		let graph = self.graph(graph_params)?;

		let mut answers: Vec<PairAnswer> = pairs
			.iter()
			.map(|(a, b)| (a.clone(), b.clone(), is_connected(&graph, a, b, path_params)))
			.collect();
		answers.sort_by(|x, y| x.0.cmp(&y.0));
		Ok(answers)
	}

	/// Answers, for each pair, whether a path of exactly `k` nodes connects
	/// the two persons.
	///
	/// The search is bounded at `k` nodes and accepts paths of at least
	/// `k` nodes, which together mean exactly `k`.
	///
	/// # Returns
	/// One answer per pair, in input order.
	///
	/// # Errors
	/// Returns an error if `k < 1`.
	pub fn fixed_length_paths(
		&mut self,
		pairs: &[(String, String)],
		graph_params: &GraphParams,
		k: usize,
	) -> Result<Vec<PairAnswer>> {
		let path_params = PathParams::new(k)?;
		info!("checking {} pairs for paths of {k} nodes", pairs.len());
		let graph = self.graph(graph_params)?;

		Ok(pairs
			.iter()
			.map(|(a, b)| (a.clone(), b.clone(), has_path_of_at_least(&graph, a, b, &path_params, k)))
			.collect())
	}
}

fn check_length(name: &'static str, n: usize) -> Result<()> {
	if n < 1 {
		return Err(AnalyzerError::invalid(name, n, "must be >= 1"));
	}
	Ok(())
}

fn split_name(name: &str) -> Vec<String> {
	name.split(' ').map(str::to_owned).collect()
}
