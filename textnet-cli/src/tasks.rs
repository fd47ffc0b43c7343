use std::path::PathBuf;

use log::info;
use serde::Serialize;
use serde_json::{Map, Value};

use textnet_core::error::{AnalyzerError, Result};
use textnet_core::io::{read_name_pairs, read_sequence_queries, read_stop_words};
use textnet_core::model::analyzer::TextAnalyzer;
use textnet_core::model::params::{GraphParams, PathParams};
use textnet_core::model::source::Source;

use crate::args::Args;

/// One analysis to run, with every argument it needs already checked.
#[derive(Debug, PartialEq)]
pub enum Task {
    Processed,
    SequenceCounts { max_k: usize },
    Mentions,
    Search { query_path: PathBuf },
    Contexts { max_k: usize },
    Connections { graph: GraphParams },
    Indirect { pairs_path: PathBuf, graph: GraphParams, path: PathParams },
    FixedLength { pairs_path: PathBuf, graph: GraphParams, length: usize },
}

fn required<T: Clone>(value: &Option<T>, flag: &'static str) -> Result<T> {
    value.clone().ok_or(AnalyzerError::MissingArgument(flag))
}

fn graph_params(args: &Args) -> Result<GraphParams> {
    GraphParams::new(required(&args.window_size, "--windowsize")?, required(&args.threshold, "--threshold")?)
}

/// Loads the stop words and the selected source into an analyzer.
///
/// # Errors
/// - No stop-word file is given, even for preprocessed input.
/// - Raw tables and a preprocessed document are both given, or neither is.
/// - An input file cannot be read.
pub fn load_analyzer(args: &Args) -> Result<TextAnalyzer> {
    let remove_words = args.remove_words.as_ref().ok_or(AnalyzerError::MissingStopWords)?;

    // Either the raw CSV tables or a preprocessed document, never both
    let source = Source::from_paths(args.sentences.clone(), args.names.clone(), args.preprocessed.clone())?;

    let stop_words = read_stop_words(remove_words)?;
    TextAnalyzer::new(source, stop_words)
}

impl Task {
    /// Selects the task from the arguments.
    ///
    /// # Errors
    /// - The task number is not between 1 and 8.
    /// - A flag the task needs is missing or out of range.
    pub fn from_args(args: &Args) -> Result<Self> {
        let task = match args.task.trim() {
            "1" => Task::Processed,
            "2" => Task::SequenceCounts { max_k: required(&args.max_k, "--maxk")? },
            "3" => Task::Mentions,
            "4" => Task::Search { query_path: required(&args.query_path, "--qsek_query_path")? },
            "5" => Task::Contexts { max_k: required(&args.max_k, "--maxk")? },
            "6" => Task::Connections { graph: graph_params(args)? },
            "7" => Task::Indirect {
                pairs_path: required(&args.pairs, "--pairs")?,
                graph: graph_params(args)?,
                path: PathParams::new(required(&args.maximal_distance, "--maximal_distance")?)?,
            },
            "8" => Task::FixedLength {
                pairs_path: required(&args.pairs, "--pairs")?,
                graph: graph_params(args)?,
                length: required(&args.fixed_length, "--fixed_length")?,
            },
            other => return Err(AnalyzerError::InvalidTask(other.to_owned())),
        };
        Ok(task)
    }

    /// Task number as shown in the output document.
    pub fn number(&self) -> u8 {
        match self {
            Task::Processed => 1,
            Task::SequenceCounts { .. } => 2,
            Task::Mentions => 3,
            Task::Search { .. } => 4,
            Task::Contexts { .. } => 5,
            Task::Connections { .. } => 6,
            Task::Indirect { .. } => 7,
            Task::FixedLength { .. } => 8,
        }
    }

    /// Runs the task and wraps its result as
    /// `{"Question N": {<result key>: <result>}}`.
    pub fn run(&self, analyzer: &mut TextAnalyzer) -> Result<Value> {
        info!("running task {}", self.number());

        let mut body = Map::new();
        match self {
            Task::Processed => {
                let (corpus, roster) = analyzer.processed();
                insert(&mut body, "Processed Sentences", corpus)?;
                insert(&mut body, "Processed Names", roster)?;
            }
            Task::SequenceCounts { max_k } => {
                insert(&mut body, &format!("{max_k}-Seq Counts"), &analyzer.count_sequences(*max_k)?)?;
            }
            Task::Mentions => {
                insert(&mut body, "Name Mentions", &analyzer.count_person_mentions()?)?;
            }
            Task::Search { query_path } => {
                let queries = read_sequence_queries(query_path, analyzer.stop_words())?;
                insert(&mut body, "K-Seq Matches", &analyzer.search_sequences(&queries)?)?;
            }
            Task::Contexts { max_k } => {
                insert(&mut body, "Person Contexts and K-Seqs", &analyzer.people_context(*max_k)?)?;
            }
            Task::Connections { graph } => {
                insert(&mut body, "Pair Matches", &analyzer.find_connections(graph)?)?;
            }
            Task::Indirect { pairs_path, graph, path } => {
                let pairs = read_name_pairs(pairs_path)?;
                insert(&mut body, "Pair Matches", &analyzer.indirect_connections(&pairs, graph, path)?)?;
            }
            Task::FixedLength { pairs_path, graph, length } => {
                let pairs = read_name_pairs(pairs_path)?;
                insert(&mut body, "Pair Matches", &analyzer.fixed_length_paths(&pairs, graph, *length)?)?;
            }
        }

        let mut document = Map::new();
        document.insert(format!("Question {}", self.number()), Value::Object(body));
        Ok(Value::Object(document))
    }
}

fn insert<T: Serialize + ?Sized>(body: &mut Map<String, Value>, key: &str, value: &T) -> Result<()> {
    body.insert(key.to_owned(), serde_json::to_value(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use textnet_core::model::person::Person;
    use textnet_core::model::sentence::Sentence;
    use textnet_core::text::StopWords;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("textnet").chain(args.iter().copied())).unwrap()
    }

    fn words(s: &str) -> Vec<String> {
        s.split_whitespace().map(str::to_owned).collect()
    }

    #[test]
    fn task_arguments_are_required() {
        let args = parse(&["-t", "2"]);
        assert!(matches!(Task::from_args(&args), Err(AnalyzerError::MissingArgument("--maxk"))));

        let args = parse(&["-t", "6", "--windowsize", "3"]);
        assert!(matches!(Task::from_args(&args), Err(AnalyzerError::MissingArgument("--threshold"))));

        let args = parse(&["-t", "9"]);
        assert!(matches!(Task::from_args(&args), Err(AnalyzerError::InvalidTask(_))));
    }

    #[test]
    fn stop_words_and_source_are_required() {
        let args = parse(&["-t", "3", "-s", "sentences.csv"]);
        assert!(matches!(load_analyzer(&args), Err(AnalyzerError::MissingStopWords)));

        let args = parse(&["-t", "1", "-p", "processed.json"]);
        assert!(matches!(load_analyzer(&args), Err(AnalyzerError::MissingStopWords)));

        let args = parse(&["-t", "3", "-r", "stop.csv"]);
        assert!(matches!(load_analyzer(&args), Err(AnalyzerError::MissingArgument(_))));

        let args = parse(&["-t", "3", "-r", "stop.csv", "-s", "sentences.csv", "-p", "processed.json"]);
        assert!(matches!(load_analyzer(&args), Err(AnalyzerError::ConflictingSources)));
    }

    #[test]
    fn graph_task_is_parsed() {
        let args = parse(&["-t", "6", "--windowsize", "3", "--threshold", "2"]);
        assert_eq!(Task::from_args(&args).unwrap(), Task::Connections { graph: GraphParams::new(3, 2).unwrap() });

        let args = parse(&["-t", "7", "--pairs", "p.json", "--windowsize", "0", "--threshold", "2", "--maximal_distance", "4"]);
        assert!(matches!(Task::from_args(&args), Err(AnalyzerError::InvalidParameter { .. })));
    }

    #[test]
    fn result_document_is_keyed_by_question() {
        let corpus = vec![Sentence::new(words("alice met bobby"))];
        let roster = vec![Person::new(words("alice"), vec![]), Person::new(words("bob"), vec![words("bobby")])];
        let mut analyzer = TextAnalyzer::from_parts(corpus, roster, StopWords::default()).unwrap();

        let document = Task::Mentions.run(&mut analyzer).unwrap();
        assert_eq!(document, serde_json::json!({"Question 3": {"Name Mentions": [["alice", 1], ["bob", 1]]}}));

        let document = Task::SequenceCounts { max_k: 1 }.run(&mut analyzer).unwrap();
        assert_eq!(
            document,
            serde_json::json!({"Question 2": {"1-Seq Counts": [["1_seq", [["alice", 1], ["bobby", 1], ["met", 1]]]]}})
        );
    }
}
