use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{Result, StylomError};

/// Order of the n-grams stored in a table.
///
/// Only unigrams and bigrams are supported; higher orders are not part
/// of the analysis modes.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum NgramOrder {
	Unigram,
	Bigram,
}

impl NgramOrder {
	/// Maps an analysis mode (1 or 2) to an order.
	///
	/// # Errors
	/// Returns `UnsupportedMode` for anything else.
	pub fn from_mode(mode: u8) -> Result<Self> {
		match mode {
			1 => Ok(Self::Unigram),
			2 => Ok(Self::Bigram),
			other => Err(StylomError::UnsupportedMode(other)),
		}
	}
}

/// A frequency table mapping n-grams to occurrence counts.
///
/// Bigram keys are the two words joined by a single space, word order
/// preserved. The table is built by scanning token sequences and is
/// read-only afterward; merging is the only other mutation.
///
/// # Invariants
/// - Every stored count is >= 1; absence means zero.
/// - All keys in one table have the same order `order`.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct FrequencyTable {
	order: NgramOrder,
	counts: HashMap<String, u64>,
}

impl FrequencyTable {
	/// Creates an empty table for the given order.
	pub fn new(order: NgramOrder) -> Self {
		Self { order, counts: HashMap::new() }
	}

	pub fn order(&self) -> NgramOrder {
		self.order
	}

	/// Number of distinct n-grams.
	pub fn len(&self) -> usize {
		self.counts.len()
	}

	pub fn is_empty(&self) -> bool {
		self.counts.is_empty()
	}

	/// Occurrence count of one n-gram; zero when absent.
	pub fn count(&self, ngram: &str) -> u64 {
		self.counts.get(ngram).copied().unwrap_or(0)
	}

	/// Sum of every stored count.
	pub fn total(&self) -> u64 {
		self.counts.values().sum()
	}

	/// Iterates over `(ngram, count)` pairs in unspecified order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
		self.counts.iter().map(|(k, v)| (k.as_str(), *v))
	}

	/// Consumes a token sequence and updates counts in sequence order.
	///
	/// # Behavior
	/// - `Unigram`: each token increments its own count by 1.
	/// - `Bigram`: each adjacent pair forms one key `"first second"`;
	///   the final unpaired token contributes no count.
	///
	/// An empty sequence leaves the table untouched; this is not an error.
	pub fn add_tokens<I>(&mut self, tokens: I)
	where
		I: IntoIterator<Item = String>,
	{
		match self.order {
			NgramOrder::Unigram => {
				for token in tokens {
					*self.counts.entry(token).or_insert(0) += 1;
				}
			}
			NgramOrder::Bigram => {
				let mut previous: Option<String> = None;
				for token in tokens {
					if let Some(first) = previous.take() {
						let key = format!("{first} {token}");
						*self.counts.entry(key).or_insert(0) += 1;
					}
					previous = Some(token);
				}
			}
		}
	}

	/// Merges another table into this one by summing counts per key.
	///
	/// Merging is commutative and associative, so per-document tables
	/// can be combined in any order.
	///
	/// # Errors
	/// Returns `OrderMismatch` if the two tables hold different orders.
	pub fn merge(&mut self, other: &Self) -> Result<()> {
		if self.order != other.order {
			return Err(StylomError::OrderMismatch { left: self.order, right: other.order });
		}

		for (ngram, count) in &other.counts {
			*self.counts.entry(ngram.clone()).or_insert(0) += count;
		}

		Ok(())
	}
}
