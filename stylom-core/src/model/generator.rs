use std::collections::BTreeMap;
use std::collections::BTreeSet;

use log::debug;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::error::{Result, StylomError};
use crate::model::frequency::{FrequencyTable, NgramOrder};

/// Directed weighted graph over word tokens, built from bigram counts.
///
/// Each node owns a map from successor token to edge weight (the bigram
/// count). Self-loops are allowed, and rare words that never start a
/// bigram have out-degree 0.
///
/// BTree maps keep iteration order stable, so runs driven by a seeded
/// RNG replay the exact same walk.
///
/// # Invariants
/// - Every edge weight is >= 1.
/// - `vertices` holds every word appearing on either side of a bigram,
///   sorted and deduplicated.
#[derive(Clone, Debug)]
pub struct TransitionGraph {
	edges: BTreeMap<String, BTreeMap<String, u64>>,
	vertices: Vec<String>,
}

impl TransitionGraph {
	/// Builds the graph from a bigram frequency table.
	///
	/// # Errors
	/// - `OrderMismatch` if the table holds unigrams.
	/// - `EmptyDistribution` if the table is empty (no vertex to ever
	///   start a walk from).
	pub fn from_bigrams(table: &FrequencyTable) -> Result<Self> {
		if table.order() != NgramOrder::Bigram {
			return Err(StylomError::OrderMismatch {
				left: NgramOrder::Bigram,
				right: table.order(),
			});
		}

		let mut edges: BTreeMap<String, BTreeMap<String, u64>> = BTreeMap::new();
		let mut vertices: BTreeSet<String> = BTreeSet::new();
		for (bigram, weight) in table.iter() {
			// Keys are two tokens joined by a single space; tokens never
			// contain whitespace themselves.
			let Some((first, second)) = bigram.split_once(' ') else {
				continue;
			};
			vertices.insert(first.to_owned());
			vertices.insert(second.to_owned());
			*edges
				.entry(first.to_owned())
				.or_default()
				.entry(second.to_owned())
				.or_insert(0) += weight;
		}

		if vertices.is_empty() {
			return Err(StylomError::EmptyDistribution);
		}

		Ok(Self { edges, vertices: vertices.into_iter().collect() })
	}

	/// Number of distinct word tokens in the graph.
	pub fn vertex_count(&self) -> usize {
		self.vertices.len()
	}

	/// Weight of the edge `from -> to`; zero when absent.
	pub fn weight(&self, from: &str, to: &str) -> u64 {
		self.edges
			.get(from)
			.and_then(|successors| successors.get(to))
			.copied()
			.unwrap_or(0)
	}

	/// Sum of outgoing edge weights of a node; zero for dead ends.
	pub fn out_weight(&self, node: &str) -> u64 {
		self.edges
			.get(node)
			.map(|successors| successors.values().sum())
			.unwrap_or(0)
	}

	/// Picks a uniformly random vertex from the full vertex set.
	fn random_vertex<R: Rng>(&self, rng: &mut R) -> &str {
		// The constructor guarantees at least one vertex.
		&self.vertices[rng.random_range(0..self.vertices.len())]
	}

	/// Advances one step from `node` using weighted random sampling.
	///
	/// The probability of selecting a successor is proportional to its
	/// edge weight. Returns `None` when the node has no outgoing edges.
	fn step<'a, R: Rng>(&'a self, node: &str, rng: &mut R) -> Option<&'a str> {
		let successors = self.edges.get(node)?;
		let total: u64 = successors.values().sum();
		if total == 0 {
			// Should not happen due to invariants, but kept for safety
			return None;
		}

		let mut r = rng.random_range(0..total);
		let mut fallback: Option<&str> = None;
		for (successor, weight) in successors {
			if r < *weight {
				return Some(successor);
			}
			r -= weight;
			fallback = Some(successor);
		}
		fallback
	}
}

/// Sampling strategy backing a `TextGenerator`.
///
/// Bigram tables drive a true Markov walk; unigram tables reduce to
/// independent weighted draws with no memory of the previous token.
enum Sampler {
	Chain(TransitionGraph),
	Draws { vocabulary: Vec<(String, u64)>, total: u64 },
}

/// Pseudo-random text generator built from one author's table.
///
/// # Responsibilities
/// - Build the transition structure matching the table's order
/// - Produce space-joined pseudo-text through an injected RNG
///
/// All randomness flows through the caller-supplied `Rng`, so a seeded
/// generator is fully reproducible.
pub struct TextGenerator {
	sampler: Sampler,
}

impl TextGenerator {
	/// Builds a generator from a frequency table of either order.
	///
	/// # Errors
	/// Returns `EmptyDistribution` for an empty table; there is nothing
	/// to draw from.
	pub fn from_table(table: &FrequencyTable) -> Result<Self> {
		let sampler = match table.order() {
			NgramOrder::Bigram => Sampler::Chain(TransitionGraph::from_bigrams(table)?),
			NgramOrder::Unigram => {
				let vocabulary: BTreeMap<String, u64> =
					table.iter().map(|(gram, count)| (gram.to_owned(), count)).collect();
				let total: u64 = vocabulary.values().sum();
				if total == 0 {
					return Err(StylomError::EmptyDistribution);
				}
				Sampler::Draws { vocabulary: vocabulary.into_iter().collect(), total }
			}
		};
		Ok(Self { sampler })
	}

	/// Generates pseudo-random text of the requested length.
	///
	/// # Behavior
	/// - Bigram mode: starts on a uniformly random vertex, then takes
	///   `length` weighted steps, so the output holds `length + 1`
	///   tokens. A node without outgoing edges falls back to a fresh
	///   uniformly random vertex instead of dead-ending.
	/// - Unigram mode: `length` independent draws, each token selected
	///   with probability proportional to its count.
	///
	/// The result is a single space-joined string.
	pub fn generate<R: Rng>(&self, length: usize, rng: &mut R) -> String {
		match &self.sampler {
			Sampler::Chain(graph) => {
				let mut words: Vec<&str> = Vec::with_capacity(length + 1);
				let mut current = graph.random_vertex(rng);
				words.push(current);
				for _ in 0..length {
					current = match graph.step(current, rng) {
						Some(next) => next,
						// Dead end: restart from a random vertex
						None => {
							debug!("dead end at '{}', restarting from a random vertex", current);
							graph.random_vertex(rng)
						}
					};
					words.push(current);
				}
				words.join(" ")
			}
			Sampler::Draws { vocabulary, total } => {
				let mut words: Vec<&str> = Vec::with_capacity(length);
				for _ in 0..length {
					words.push(Self::draw(vocabulary, *total, rng));
				}
				words.join(" ")
			}
		}
	}

	/// One weighted draw over the whole vocabulary.
	fn draw<'a, R: Rng>(vocabulary: &'a [(String, u64)], total: u64, rng: &mut R) -> &'a str {
		let mut r = rng.random_range(0..total);
		let mut fallback = "";
		for (token, weight) in vocabulary {
			if r < *weight {
				return token;
			}
			r -= weight;
			fallback = token;
		}
		// Unreachable while total equals the sum of weights
		fallback
	}
}

/// Parameters of one generation request.
///
/// Carries the desired output length and the optional RNG seed. With a
/// seed the run is reproducible; without one the RNG is drawn from the
/// operating system.
#[derive(Clone, Copy, Debug)]
pub struct GenerationInput {
	pub length: usize,
	pub seed: Option<u64>,
}

impl GenerationInput {
	pub fn new(length: usize) -> Self {
		Self { length, seed: None }
	}

	pub fn with_seed(length: usize, seed: u64) -> Self {
		Self { length, seed: Some(seed) }
	}

	/// Builds the RNG driving the generation.
	pub fn rng(&self) -> StdRng {
		match self.seed {
			Some(seed) => StdRng::seed_from_u64(seed),
			None => StdRng::from_os_rng(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn toks(words: &[&str]) -> Vec<String> {
		words.iter().map(|w| w.to_string()).collect()
	}

	fn bigram_table(words: &[&str]) -> FrequencyTable {
		let mut table = FrequencyTable::new(NgramOrder::Bigram);
		table.add_tokens(toks(words));
		table
	}

	#[test]
	fn graph_collects_vertices_from_both_sides() {
		let table = bigram_table(&["aaa", "bbb", "ccc"]);
		let graph = TransitionGraph::from_bigrams(&table).unwrap();

		assert_eq!(graph.vertex_count(), 3);
		assert_eq!(graph.weight("aaa", "bbb"), 1);
		assert_eq!(graph.weight("bbb", "ccc"), 1);
		// "ccc" never starts a bigram: out-degree 0, still a vertex
		assert_eq!(graph.out_weight("ccc"), 0);
	}

	#[test]
	fn graph_accumulates_repeated_bigrams() {
		let table = bigram_table(&["aaa", "bbb", "aaa", "bbb"]);
		let graph = TransitionGraph::from_bigrams(&table).unwrap();
		assert_eq!(graph.weight("aaa", "bbb"), 2);
		assert_eq!(graph.weight("bbb", "aaa"), 1);
	}

	#[test]
	fn graph_rejects_unigram_tables() {
		let table = FrequencyTable::new(NgramOrder::Unigram);
		assert!(matches!(
			TransitionGraph::from_bigrams(&table),
			Err(StylomError::OrderMismatch { .. })
		));
	}

	#[test]
	fn empty_table_cannot_build_a_generator() {
		let table = FrequencyTable::new(NgramOrder::Bigram);
		assert!(matches!(
			TextGenerator::from_table(&table),
			Err(StylomError::EmptyDistribution)
		));
	}

	#[test]
	fn bigram_generation_emits_length_plus_one_tokens() {
		let table = bigram_table(&["aaa", "bbb", "ccc", "aaa"]);
		let generator = TextGenerator::from_table(&table).unwrap();
		let mut rng = StdRng::seed_from_u64(7);

		let text = generator.generate(10, &mut rng);
		assert_eq!(text.split(' ').count(), 11);
	}

	#[test]
	fn unigram_generation_emits_length_tokens() {
		let mut table = FrequencyTable::new(NgramOrder::Unigram);
		table.add_tokens(toks(&["aaa", "bbb", "bbb"]));
		let generator = TextGenerator::from_table(&table).unwrap();
		let mut rng = StdRng::seed_from_u64(7);

		let text = generator.generate(5, &mut rng);
		assert_eq!(text.split(' ').count(), 5);
		assert!(generator.generate(0, &mut rng).is_empty());
	}

	#[test]
	fn walk_follows_single_successor_chains() {
		// aaa -> bbb -> ccc is the only path; ccc restarts somewhere.
		let table = bigram_table(&["aaa", "bbb", "ccc"]);
		let generator = TextGenerator::from_table(&table).unwrap();
		let mut rng = StdRng::seed_from_u64(0);

		let text = generator.generate(6, &mut rng);
		for pair in text.split(' ').collect::<Vec<_>>().windows(2) {
			match pair[0] {
				"aaa" => assert_eq!(pair[1], "bbb"),
				"bbb" => assert_eq!(pair[1], "ccc"),
				// after the dead end any vertex is a valid restart
				"ccc" => assert!(["aaa", "bbb", "ccc"].contains(&pair[1])),
				other => panic!("unexpected token {other:?}"),
			}
		}
	}

	#[test]
	fn dead_ends_never_abort_generation() {
		// Single bigram: "bbb" has out-degree 0 and forces restarts.
		let table = bigram_table(&["aaa", "bbb"]);
		let generator = TextGenerator::from_table(&table).unwrap();
		let mut rng = StdRng::seed_from_u64(3);

		let text = generator.generate(50, &mut rng);
		assert_eq!(text.split(' ').count(), 51);
	}

	#[test]
	fn seeded_runs_are_reproducible() {
		let table = bigram_table(&[
			"le", "chat", "dort", "le", "chien", "dort", "le", "chat", "mange",
		]);
		let generator = TextGenerator::from_table(&table).unwrap();

		let input = GenerationInput::with_seed(40, 42);
		let first = generator.generate(input.length, &mut input.rng());
		let second = generator.generate(input.length, &mut input.rng());
		assert_eq!(first, second);
	}

	#[test]
	fn seeded_unigram_runs_are_reproducible() {
		let mut table = FrequencyTable::new(NgramOrder::Unigram);
		table.add_tokens(toks(&["chat", "chien", "chat", "cheval", "chat"]));
		let generator = TextGenerator::from_table(&table).unwrap();

		let input = GenerationInput::with_seed(25, 9);
		assert_eq!(
			generator.generate(input.length, &mut input.rng()),
			generator.generate(input.length, &mut input.rng())
		);
	}
}
