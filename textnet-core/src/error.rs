use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading input or validating analysis parameters.
///
/// Lookup misses (unknown n-gram, alias or graph node) are never errors:
/// they are excluded from result collections instead.
#[derive(Debug, Error)]
pub enum AnalyzerError {
	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),

	#[error("CSV error: {0}")]
	Csv(#[from] csv::Error),

	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),

	/// A JSON document lacks an expected key.
	#[error("missing key '{key}' in {}", path.display())]
	MissingKey { path: PathBuf, key: String },

	/// A CSV table lacks an expected column.
	#[error("missing column {column} in {}", path.display())]
	MissingColumn { path: PathBuf, column: usize },

	/// A query file has the expected keys but an unusable shape.
	#[error("malformed query in {}: {reason}", path.display())]
	Malformed { path: PathBuf, reason: String },

	#[error("provide either raw input paths or preprocessed data, not both")]
	ConflictingSources,

	#[error("a stop-word file is required")]
	MissingStopWords,

	/// A task was requested without one of the arguments it needs.
	#[error("missing argument: {0}")]
	MissingArgument(&'static str),

	#[error("invalid value {value} for {name}: {reason}")]
	InvalidParameter { name: &'static str, value: usize, reason: &'static str },

	/// Two partial indexes could not be combined.
	#[error("cannot merge: {0}")]
	Merge(String),

	#[error("invalid task number: {0}")]
	InvalidTask(String),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, AnalyzerError>;

impl AnalyzerError {
	/// Shorthand for a parameter that fails its range check.
	pub(crate) fn invalid(name: &'static str, value: usize, reason: &'static str) -> Self {
		Self::InvalidParameter { name, value, reason }
	}
}
