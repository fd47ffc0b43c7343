use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{AnalyzerError, Result};
use crate::model::person::{dedup_by_name, Person, Roster};
use crate::model::sentence::{Corpus, Sentence};
use crate::text::{tokenize, StopWords};

/// Top-level key of a preprocessed document.
pub const PREPROCESSED_KEY: &str = "Question 1";
pub const SENTENCES_KEY: &str = "Processed Sentences";
pub const NAMES_KEY: &str = "Processed Names";
/// Key holding the list of queries in a query file.
pub const QUERY_KEY: &str = "keys";

/// Opens a CSV table with a header row.
///
/// Rows may have fewer fields than the header; missing trailing fields
/// read as empty.
fn csv_reader<P: AsRef<Path>>(path: P) -> Result<csv::Reader<File>> {
	Ok(csv::ReaderBuilder::new().has_headers(true).flexible(true).from_path(path)?)
}

/// Reads the stop-word table (first column, one word per row).
pub fn read_stop_words<P: AsRef<Path>>(path: P) -> Result<StopWords> {
	let mut reader = csv_reader(&path)?;
	let mut words = Vec::new();
	for record in reader.records() {
		let record = record?;
		match record.get(0) {
			Some(word) if !word.is_empty() => words.push(word.to_owned()),
			_ => (),
		}
	}
	debug!("loaded {} stop words from {}", words.len(), path.as_ref().display());
	Ok(StopWords::new(words))
}

/// Reads the sentence table and tokenizes every row.
///
/// - The first column holds the raw sentence; empty cells read as `""`.
/// - Rows that tokenize to nothing are dropped.
///
/// # Errors
/// Returns an error on I/O or CSV failure, or if a row has no column at all.
pub fn read_sentences<P: AsRef<Path>>(path: P, stop_words: &StopWords) -> Result<Corpus> {
	let path = path.as_ref();
	let mut reader = csv_reader(path)?;
	let mut corpus = Corpus::new();
	let mut dropped = 0;

	for record in reader.records() {
		let record = record?;
		let raw = record.get(0).ok_or_else(|| AnalyzerError::MissingColumn { path: path.to_owned(), column: 0 })?;
		let tokens = tokenize(raw, stop_words);
		if tokens.is_empty() {
			dropped += 1;
		} else {
			corpus.push(Sentence::new(tokens));
		}
	}

	if dropped > 0 {
		warn!("dropped {dropped} empty sentences from {}", path.display());
	}
	debug!("loaded {} sentences from {}", corpus.len(), path.display());
	Ok(corpus)
}

/// Reads the person table.
///
/// - Column 0 holds the canonical name, column 1 a comma-separated list of aliases.
/// - Names and aliases are tokenized like sentences.
/// - Empty aliases are dropped; persons whose name is empty are dropped.
/// - Duplicate canonical names keep their first row.
///
/// # Errors
/// Returns an error on I/O or CSV failure, or if a row has no column at all.
pub fn read_persons<P: AsRef<Path>>(path: P, stop_words: &StopWords) -> Result<Roster> {
	let path = path.as_ref();
	let mut reader = csv_reader(path)?;
	let mut persons = Vec::new();

	for record in reader.records() {
		let record = record?;
		let name = record.get(0).ok_or_else(|| AnalyzerError::MissingColumn { path: path.to_owned(), column: 0 })?;
		let aliases = record.get(1).unwrap_or("");

		let name = tokenize(name, stop_words);
		let aliases = aliases.split(',').map(|alias| tokenize(alias, stop_words)).collect();
		persons.push(Person::new(name, aliases));
	}

	let total = persons.len();
	let roster = dedup_by_name(persons);
	if roster.len() < total {
		warn!("dropped {} empty or duplicate persons from {}", total - roster.len(), path.display());
	}
	Ok(roster)
}

/// Reads a JSON file into a generic value.
fn read_json<P: AsRef<Path>>(path: P) -> Result<Value> {
	let reader = BufReader::new(File::open(path)?);
	Ok(serde_json::from_reader(reader)?)
}

/// Removes `key` from a JSON object, failing with a [`AnalyzerError::MissingKey`].
fn take_key(value: &mut Value, key: &str, path: &Path) -> Result<Value> {
	value
		.get_mut(key)
		.map(Value::take)
		.ok_or_else(|| AnalyzerError::MissingKey { path: path.to_owned(), key: key.to_owned() })
}

/// Reads an already processed corpus and roster.
///
/// Expected shape:
/// `{"Question 1": {"Processed Sentences": [...], "Processed Names": [...]}}`
///
/// The content is trusted as already normalized, except that empty
/// sentences are still dropped and the roster is still deduplicated.
pub fn read_preprocessed<P: AsRef<Path>>(path: P) -> Result<(Corpus, Roster)> {
	let path = path.as_ref();
	let mut document = read_json(path)?;
	let mut section = take_key(&mut document, PREPROCESSED_KEY, path)?;

	let corpus: Corpus = serde_json::from_value(take_key(&mut section, SENTENCES_KEY, path)?)?;
	let persons: Vec<Person> = serde_json::from_value(take_key(&mut section, NAMES_KEY, path)?)?;

	let corpus = corpus.into_iter().filter(|sentence| !sentence.is_empty()).collect();
	Ok((corpus, dedup_by_name(persons)))
}

/// Reads the `keys` list of a query file.
pub fn read_query_keys<T, P>(path: P) -> Result<Vec<T>>
where
	T: DeserializeOwned,
	P: AsRef<Path>,
{
	let path = path.as_ref();
	let mut document = read_json(path)?;
	Ok(serde_json::from_value(take_key(&mut document, QUERY_KEY, path)?)?)
}

/// Reads n-gram queries.
///
/// Each key is a list of strings joined by spaces and tokenized like a
/// sentence. Queries that tokenize to nothing are dropped; duplicates are
/// collapsed keeping the first occurrence.
pub fn read_sequence_queries<P: AsRef<Path>>(path: P, stop_words: &StopWords) -> Result<Vec<Vec<String>>> {
	let keys: Vec<Vec<String>> = read_query_keys(path)?;
	let mut seen = HashSet::new();
	Ok(keys
		.iter()
		.map(|key| tokenize(&key.join(" "), stop_words))
		.filter(|query| !query.is_empty() && seen.insert(query.clone()))
		.collect())
}

/// Reads person pairs. Each pair is sorted so that the smaller name comes first.
///
/// # Errors
/// Returns an error if a key does not hold exactly two names.
pub fn read_name_pairs<P: AsRef<Path>>(path: P) -> Result<Vec<(String, String)>> {
	let path = path.as_ref();
	let keys: Vec<Vec<String>> = read_query_keys(path)?;
	keys.into_iter()
		.map(|pair| match <[String; 2]>::try_from(pair) {
			Ok([a, b]) if a <= b => Ok((a, b)),
			Ok([a, b]) => Ok((b, a)),
			Err(pair) => Err(AnalyzerError::Malformed {
				path: path.to_owned(),
				reason: format!("expected a pair of names, got {} names", pair.len()),
			}),
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Write;
	use tempfile::NamedTempFile;

	fn file_with(content: &str) -> NamedTempFile {
		let mut file = NamedTempFile::new().unwrap();
		file.write_all(content.as_bytes()).unwrap();
		file
	}

	fn words(s: &str) -> Vec<String> {
		s.split_whitespace().map(str::to_owned).collect()
	}

	#[test]
	fn sentences_are_normalized_and_empty_rows_dropped() {
		let stop_words = StopWords::new(["the"]);
		let file = file_with("sentence\n\"Harry, the Wizard!\"\nThe\n\nRon ate.\n");
		let corpus = read_sentences(file.path(), &stop_words).unwrap();
		assert_eq!(corpus, vec![Sentence::new(words("harry wizard")), Sentence::new(words("ron ate"))]);
	}

	#[test]
	fn persons_are_deduplicated_with_aliases_split_on_commas() {
		let stop_words = StopWords::new(["the"]);
		let file = file_with("Name,Other Names\nHarry Potter,\"The Boy Who Lived,,Harry\"\nharry potter,ignored\nRon Weasley\n");
		let roster = read_persons(file.path(), &stop_words).unwrap();

		assert_eq!(roster.len(), 2);
		assert_eq!(roster[0].name(), words("harry potter").as_slice());
		assert_eq!(roster[0].aliases(), &[words("boy who lived"), words("harry")]);
		assert_eq!(roster[1].full_name(), "ron weasley");
		assert!(roster[1].aliases().is_empty());
	}

	#[test]
	fn stop_words_skip_empty_cells() {
		let file = file_with("words\nthe\n\na\n");
		let stop_words = read_stop_words(file.path()).unwrap();
		assert_eq!(stop_words.len(), 2);
		assert!(stop_words.contains("a"));
	}

	#[test]
	fn preprocessed_document_is_loaded() {
		let file = file_with(
			r#"{"Question 1": {"Processed Sentences": [["a", "b"], []], "Processed Names": [[["ann"], [["annie"], []]]]}}"#,
		);
		let (corpus, roster) = read_preprocessed(file.path()).unwrap();
		assert_eq!(corpus, vec![Sentence::new(words("a b"))]);
		assert_eq!(roster[0].aliases(), &[words("annie")]);
	}

	#[test]
	fn missing_key_is_fatal() {
		let file = file_with(r#"{"Question 1": {"Processed Sentences": []}}"#);
		match read_preprocessed(file.path()) {
			Err(AnalyzerError::MissingKey { key, .. }) => assert_eq!(key, NAMES_KEY),
			other => panic!("unexpected result: {other:?}"),
		}

		let file = file_with(r#"{"queries": []}"#);
		assert!(matches!(read_name_pairs(file.path()), Err(AnalyzerError::MissingKey { .. })));
	}

	#[test]
	fn sequence_queries_are_normalized_and_deduplicated() {
		let stop_words = StopWords::new(["the"]);
		let file = file_with(r#"{"keys": [["The", "Dark Lord"], ["dark", "lord"], ["the"], ["wand"]]}"#);
		let queries = read_sequence_queries(file.path(), &stop_words).unwrap();
		assert_eq!(queries, vec![words("dark lord"), words("wand")]);
	}

	#[test]
	fn name_pairs_are_sorted_and_checked() {
		let file = file_with(r#"{"keys": [["ron weasley", "harry potter"], ["a", "b"]]}"#);
		let pairs = read_name_pairs(file.path()).unwrap();
		assert_eq!(pairs[0], ("harry potter".to_owned(), "ron weasley".to_owned()));

		let file = file_with(r#"{"keys": [["only one"]]}"#);
		assert!(matches!(read_name_pairs(file.path()), Err(AnalyzerError::Malformed { .. })));
	}
}
