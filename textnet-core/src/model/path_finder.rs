use super::graph::CoOccurrenceGraph;
use super::params::PathParams;

/// A simple path: distinct nodes from start to end, consecutive nodes adjacent.
pub type Path<'g> = Vec<&'g str>;

/// Lazily enumerates every simple path between two nodes whose node count
/// does not exceed a bound.
///
/// Depth-first search driven by an explicit stack of `(node, path so far)`
/// frames. A node is excluded from a branch only if it is already on that
/// branch's path, so sibling branches never prune each other.
///
/// # Notes
/// - A path stops as soon as it reaches the end node.
/// - If start equals end, the single-node path is produced.
/// - Order of produced paths is unspecified.
pub struct PathIter<'g> {
	graph: &'g CoOccurrenceGraph,
	end: &'g str,
	max_len: usize,
	stack: Vec<(&'g str, Path<'g>)>,
}

impl<'g> PathIter<'g> {
	/// Starts a search from `start` to `end`.
	///
	/// Produces nothing if either node is absent from the graph.
	pub fn new(graph: &'g CoOccurrenceGraph, start: &str, end: &str, params: &PathParams) -> Self {
		let mut stack = Vec::new();
		let mut end_node = "";
		if let (Some(start), Some(end)) = (graph.node(start), graph.node(end)) {
			stack.push((start, vec![start]));
			end_node = end;
		}
		Self { graph, end: end_node, max_len: params.max_len(), stack }
	}
}

impl<'g> Iterator for PathIter<'g> {
	type Item = Path<'g>;

	fn next(&mut self) -> Option<Self::Item> {
		while let Some((current, path)) = self.stack.pop() {
			if path.len() > self.max_len {
				continue;
			}
			if current == self.end {
				return Some(path);
			}
			// Children would exceed the bound
			if path.len() == self.max_len {
				continue;
			}

			let Some(neighbors) = self.graph.neighbors(current) else { continue };
			for next in neighbors {
				let next = next.as_str();
				if !path.contains(&next) {
					let mut extended = path.clone();
					extended.push(next);
					self.stack.push((next, extended));
				}
			}
		}
		None
	}
}

/// Returns every simple path from `start` to `end` with at most
/// `params.max_len()` nodes.
///
/// Unknown nodes yield no path. This is an exhaustive enumeration, not a
/// shortest-path search.
pub fn find_all_paths<'g>(graph: &'g CoOccurrenceGraph, start: &str, end: &str, params: &PathParams) -> Vec<Path<'g>> {
	PathIter::new(graph, start, end, params).collect()
}

/// Returns `true` if at least one path of at most `params.max_len()` nodes
/// connects `start` and `end`.
///
/// Empty names are never nodes, so they are never connected.
pub fn is_connected(graph: &CoOccurrenceGraph, start: &str, end: &str, params: &PathParams) -> bool {
	if start.is_empty() || end.is_empty() {
		return false;
	}
	PathIter::new(graph, start, end, params).next().is_some()
}

/// Returns `true` if some path found under `params.max_len()` has at least
/// `min_len` nodes.
///
/// # Notes
/// `min_len` is checked against paths already capped by `max_len`, so the
/// answer is always `false` when `min_len > max_len`. Passing compatible
/// bounds is up to the caller.
pub fn has_path_of_at_least(graph: &CoOccurrenceGraph, start: &str, end: &str, params: &PathParams, min_len: usize) -> bool {
	if start.is_empty() || end.is_empty() {
		return false;
	}
	PathIter::new(graph, start, end, params).any(|path| path.len() >= min_len)
}
