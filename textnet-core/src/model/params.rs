use crate::error::{AnalyzerError, Result};

/// Parameters of the co-occurrence graph.
///
/// # Invariants
/// - `window_size >= 1`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GraphParams {
	window_size: usize,
	threshold: usize,
}

impl GraphParams {
	/// Validates and creates graph parameters.
	///
	/// - `window_size`: number of consecutive sentences per window.
	/// - `threshold`: minimum number of shared windows for an edge.
	///
	/// # Errors
	/// Returns an error if `window_size == 0`.
	pub fn new(window_size: usize, threshold: usize) -> Result<Self> {
		if window_size == 0 {
			return Err(AnalyzerError::invalid("window_size", window_size, "must be >= 1"));
		}
		Ok(Self { window_size, threshold })
	}

	pub fn window_size(&self) -> usize {
		self.window_size
	}

	pub fn threshold(&self) -> usize {
		self.threshold
	}
}

/// Parameters of a bounded path search.
///
/// `max_len` counts nodes, so the longest accepted path has `max_len - 1` edges.
///
/// # Notes
/// The search cost grows exponentially with `max_len` on dense graphs.
/// Choosing a bound compatible with the roster size is up to the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PathParams {
	max_len: usize,
}

impl PathParams {
	/// # Errors
	/// Returns an error if `max_len == 0`.
	pub fn new(max_len: usize) -> Result<Self> {
		if max_len == 0 {
			return Err(AnalyzerError::invalid("max_len", max_len, "must be >= 1"));
		}
		Ok(Self { max_len })
	}

	pub fn max_len(&self) -> usize {
		self.max_len
	}
}
