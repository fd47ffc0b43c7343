use std::path::PathBuf;

use log::info;

use super::person::{dedup_by_name, Roster};
use super::sentence::Corpus;
use crate::error::{AnalyzerError, Result};
use crate::io;
use crate::text::StopWords;

/// Where the corpus and the roster come from.
///
/// Chosen once at the boundary; everything downstream only sees the
/// loaded corpus and roster.
#[derive(Clone, Debug)]
pub enum Source {
	/// Raw CSV tables, normalized while loading. Either table may be absent.
	Raw { sentences: Option<PathBuf>, persons: Option<PathBuf> },
	/// A JSON document produced by an earlier run.
	Preprocessed { path: PathBuf },
	/// Data already in memory, trusted as normalized.
	Loaded { corpus: Corpus, roster: Roster },
}

impl Source {
	/// Selects the source from optional raw paths and an optional
	/// preprocessed document.
	///
	/// # Errors
	/// - [`AnalyzerError::ConflictingSources`] if both kinds are given.
	/// - [`AnalyzerError::MissingArgument`] if neither is given.
	pub fn from_paths(sentences: Option<PathBuf>, persons: Option<PathBuf>, preprocessed: Option<PathBuf>) -> Result<Self> {
		let raw_given = sentences.is_some() || persons.is_some();
		match (raw_given, preprocessed) {
			(true, Some(_)) => Err(AnalyzerError::ConflictingSources),
			(false, Some(path)) => Ok(Source::Preprocessed { path }),
			(true, None) => Ok(Source::Raw { sentences, persons }),
			(false, None) => Err(AnalyzerError::MissingArgument("--sentences/--preprocessed")),
		}
	}

	/// Loads the corpus and the roster.
	///
	/// Raw tables are normalized with `stop_words`; an absent table loads
	/// as empty.
	pub fn load(self, stop_words: &StopWords) -> Result<(Corpus, Roster)> {
		let (corpus, roster) = match self {
			Source::Raw { sentences, persons } => {
				let corpus = match sentences {
					Some(path) => io::read_sentences(path, stop_words)?,
					None => Corpus::new(),
				};
				let roster = match persons {
					Some(path) => io::read_persons(path, stop_words)?,
					None => Roster::new(),
				};
				(corpus, roster)
			}
			Source::Preprocessed { path } => io::read_preprocessed(path)?,
			Source::Loaded { corpus, roster } => (corpus, dedup_by_name(roster)),
		};
		info!("loaded {} sentences and {} persons", corpus.len(), roster.len());
		Ok((corpus, roster))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::person::Person;
	use crate::model::sentence::Sentence;

	#[test]
	fn raw_and_preprocessed_conflict() {
		let result = Source::from_paths(Some("s.csv".into()), None, Some("p.json".into()));
		assert!(matches!(result, Err(AnalyzerError::ConflictingSources)));
	}

	#[test]
	fn no_input_is_rejected() {
		let result = Source::from_paths(None, None, None);
		assert!(matches!(result, Err(AnalyzerError::MissingArgument("--sentences/--preprocessed"))));

		let source = Source::from_paths(None, Some("names.csv".into()), None).unwrap();
		assert!(matches!(source, Source::Raw { sentences: None, persons: Some(_) }));
	}

	#[test]
	fn preprocessed_alone_is_selected() {
		let source = Source::from_paths(None, None, Some("p.json".into())).unwrap();
		assert!(matches!(source, Source::Preprocessed { .. }));
	}

	#[test]
	fn loaded_roster_is_deduplicated() {
		let name = vec!["ann".to_owned()];
		let source = Source::Loaded {
			corpus: vec![Sentence::new(name.clone())],
			roster: vec![Person::new(name.clone(), vec![]), Person::new(name, vec![])],
		};
		let (corpus, roster) = source.load(&StopWords::default()).unwrap();
		assert_eq!((corpus.len(), roster.len()), (1, 1));
	}
}
