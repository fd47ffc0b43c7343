use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use log::debug;

use super::params::GraphParams;
use super::resolver::PersonSentences;
use super::sentence::Sentence;

/// Undirected, unweighted graph between persons.
///
/// Nodes are canonical names (space-joined). Two persons are adjacent when
/// they co-occur in at least `threshold` windows of `window_size`
/// consecutive sentences.
///
/// # Invariants
/// - No self-loops
/// - Adjacency is symmetric: `b ∈ adjacency[a]` ⇔ `a ∈ adjacency[b]`
/// - Every edge endpoint is a node
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CoOccurrenceGraph {
	adjacency: BTreeMap<String, BTreeSet<String>>,
}

impl CoOccurrenceGraph {
	/// Creates a graph with the given nodes and no edges.
	pub fn with_nodes<I, S>(nodes: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let adjacency = nodes.into_iter().map(|node| (node.into(), BTreeSet::new())).collect();
		Self { adjacency }
	}

	/// Creates a graph from an edge list. Endpoints become nodes;
	/// self-loops are ignored.
	pub fn from_edges<I, S>(edges: I) -> Self
	where
		I: IntoIterator<Item = (S, S)>,
		S: Into<String>,
	{
		let mut graph = Self::default();
		for (a, b) in edges {
			graph.add_edge(a.into(), b.into());
		}
		graph
	}

	/// Builds the co-occurrence graph.
	///
	/// # Parameters
	/// - `persons`: resolved sentences per person; only these persons become nodes.
	/// - `corpus`: the ordered corpus defining the windows.
	/// - `params`: window size and edge threshold.
	///
	/// # Behavior
	/// - Forms every window of `window_size` consecutive sentences
	///   (`corpus.len() - window_size + 1` windows, none if the corpus is shorter).
	/// - For each unordered pair of persons, counts the windows containing at
	///   least one sentence of each (membership by sentence value).
	/// - Adds the edge when that count reaches `threshold`.
	///
	/// # Notes
	/// - Without any window there is no edge, whatever the threshold.
	/// - Each person's window presence is computed once, so the pair pass is
	///   O(persons² × windows).
	pub fn build(persons: &PersonSentences, corpus: &[Sentence], params: &GraphParams) -> Self {
		let mut graph = Self::with_nodes(persons.keys().cloned());

		let window_size = params.window_size();
		if corpus.len() < window_size {
			debug!("corpus of {} sentences has no window of size {window_size}", corpus.len());
			return graph;
		}
		let windows = corpus.len() - window_size + 1;

		// Sentence value → id, so window membership compares by value
		let mut ids: HashMap<&Sentence, usize> = HashMap::new();
		let corpus_ids: Vec<usize> = corpus
			.iter()
			.map(|sentence| {
				let next = ids.len();
				*ids.entry(sentence).or_insert(next)
			})
			.collect();

		let presence: Vec<(&String, Vec<bool>)> = persons
			.iter()
			.map(|(name, sentences)| {
				let members: HashSet<usize> = sentences.iter().filter_map(|s| ids.get(s).copied()).collect();
				(name, window_presence(&corpus_ids, &members, window_size, windows))
			})
			.collect();

		for (i, (name_a, windows_a)) in presence.iter().enumerate() {
			for (name_b, windows_b) in &presence[i + 1..] {
				let shared = windows_a.iter().zip(windows_b).filter(|(a, b)| **a && **b).count();
				if shared >= params.threshold() {
					graph.add_edge((*name_a).clone(), (*name_b).clone());
				}
			}
		}

		debug!(
			"built co-occurrence graph: {} nodes, {} edges over {windows} windows",
			graph.node_count(),
			graph.edge_count()
		);
		graph
	}

	fn add_edge(&mut self, a: String, b: String) {
		if a == b {
			return;
		}
		self.adjacency.entry(a.clone()).or_default().insert(b.clone());
		self.adjacency.entry(b).or_default().insert(a);
	}

	/// Returns the graph's own copy of a node name.
	pub fn node(&self, name: &str) -> Option<&str> {
		self.adjacency.get_key_value(name).map(|(node, _)| node.as_str())
	}

	/// Neighbors of `node` in sorted order, or `None` if it is not a node.
	pub fn neighbors(&self, node: &str) -> Option<&BTreeSet<String>> {
		self.adjacency.get(node)
	}

	pub fn has_edge(&self, a: &str, b: &str) -> bool {
		self.adjacency.get(a).is_some_and(|neighbors| neighbors.contains(b))
	}

	pub fn nodes(&self) -> impl Iterator<Item = &str> {
		self.adjacency.keys().map(String::as_str)
	}

	pub fn node_count(&self) -> usize {
		self.adjacency.len()
	}

	pub fn edge_count(&self) -> usize {
		self.adjacency.values().map(BTreeSet::len).sum::<usize>() / 2
	}

	/// Every edge once, as a sorted name pair, in sorted order.
	pub fn edges(&self) -> Vec<(&str, &str)> {
		self.adjacency
			.iter()
			.flat_map(|(a, neighbors)| {
				neighbors.iter().filter(move |b| a < *b).map(move |b| (a.as_str(), b.as_str()))
			})
			.collect()
	}
}

/// For each window, whether any of its sentences belongs to `members`.
///
/// Uses a running count of member sentences inside the sliding window.
fn window_presence(corpus_ids: &[usize], members: &HashSet<usize>, window_size: usize, windows: usize) -> Vec<bool> {
	let is_member: Vec<bool> = corpus_ids.iter().map(|id| members.contains(id)).collect();
	let mut inside = is_member[..window_size].iter().filter(|m| **m).count();

	let mut presence = Vec::with_capacity(windows);
	presence.push(inside > 0);
	for start in 1..windows {
		if is_member[start - 1] {
			inside -= 1;
		}
		if is_member[start + window_size - 1] {
			inside += 1;
		}
		presence.push(inside > 0);
	}
	presence
}
