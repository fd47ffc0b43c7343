//! Top-level module for the analysis engine.
//!
//! This module provides:
//! - Corpus and roster data types (`Sentence`, `Person`, `Roster`)
//! - Input selection (`Source`) and validated parameters (`GraphParams`, `PathParams`)
//! - Per-length n-gram indexing (`SequenceIndex`, `IndexCache`)
//! - Person to sentence resolution (`resolver`)
//! - The co-occurrence graph (`CoOccurrenceGraph`) and bounded path search (`path_finder`)
//! - A high-level analysis interface (`TextAnalyzer`)

/// High-level interface running every analysis over one corpus and roster.
pub mod analyzer;

/// Lookup result for one n-gram (sentences and occurrence count).
pub mod entry;

/// Undirected co-occurrence graph between persons.
pub mod graph;

/// Per-length cache of sequence indexes, built in parallel.
pub mod index_cache;

/// Validated analysis parameters.
pub mod params;

/// Bounded-depth enumeration of simple paths.
pub mod path_finder;

/// Person records and rosters.
pub mod person;

/// Maps persons to the sentences mentioning them.
pub mod resolver;

/// Sentence type shared by the corpus and the indexes.
pub mod sentence;

/// Fixed-length n-gram index (n-gram text → sentences and count).
pub mod sequence_index;

/// Where the corpus and roster come from.
pub mod source;
