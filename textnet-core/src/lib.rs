//! Text co-occurrence analysis library.
//!
//! This crate analyzes a corpus of short sentences against a roster of
//! named persons, including:
//! - Word n-gram frequency tables and n-gram to sentence lookup
//! - Per-person mention counts and contextual n-grams
//! - A co-occurrence graph between persons built over sliding windows
//! - Bounded-length path queries over that graph
//!
//! The high-level entry point is [`model::analyzer::TextAnalyzer`].

/// Analysis engine: sequence indexing, person resolution,
/// co-occurrence graph and path search.
pub mod model;

/// Text normalization (lowercasing, punctuation, stop words, n-grams).
pub mod text;

/// CSV and JSON ingestion of corpus, roster and query files.
pub mod io;

/// Error type shared by the whole crate.
pub mod error;

pub use error::{AnalyzerError, Result};
